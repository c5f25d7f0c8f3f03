// src/db/db.rs

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::common::error::AppError;

/// Abre a pool de conexões com o banco, tentando um número limitado de vezes
/// com backoff fixo antes de falhar de vez.
///
/// As chaves estrangeiras do SQLite são opt-in por conexão, então ficam
/// ligadas aqui para todo o pool.
pub async fn connect_with_retry(
    database_url: &str,
    attempts: u32,
    backoff: Duration,
) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let attempts = attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;

        match SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt >= attempts => return Err(e.into()),
            Err(e) => {
                tracing::warn!(
                    tentativa = attempt,
                    erro = %e,
                    "Falha ao conectar ao banco de dados; tentando novamente"
                );
                tokio::time::sleep(backoff).await;
            }
        }
    }
}
