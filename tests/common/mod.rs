use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use colva_cotizador::db::{self, AccountRepository, CatalogRepository, QuoteRepository};
use colva_cotizador::models::account::{Role, Session};
use colva_cotizador::models::quote::ClientInfo;
use colva_cotizador::services::{AccountService, CatalogService, QuoteService};

/// Banco em memória com o mesmo esquema da aplicação.
///
/// Uma única conexão no pool: cada conexão `:memory:` do SQLite é um banco
/// separado, então o pool não pode abrir uma segunda.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("URL do banco de teste inválida")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Falha ao abrir o banco em memória");

    db::MIGRATOR
        .run(&pool)
        .await
        .expect("Falha ao migrar o banco de teste");

    pool
}

/// Pool já com a conta administradora e o catálogo padrão.
pub async fn seeded_pool() -> SqlitePool {
    let pool = test_pool().await;
    db::seed::ensure_seed_data(&pool)
        .await
        .expect("Falha ao popular os dados iniciais de teste");
    pool
}

pub fn account_service(pool: &SqlitePool) -> AccountService {
    AccountService::new(AccountRepository::new(pool.clone()), pool.clone())
}

pub fn catalog_service(pool: &SqlitePool) -> CatalogService {
    CatalogService::new(CatalogRepository::new(pool.clone()), pool.clone())
}

pub fn quote_service(pool: &SqlitePool) -> QuoteService {
    QuoteService::new(
        QuoteRepository::new(pool.clone()),
        CatalogRepository::new(pool.clone()),
        pool.clone(),
    )
}

/// Sessão da conta administradora sem passar pelo bcrypt (lento) do login.
pub fn admin_session() -> Session {
    Session {
        account_id: "admin".to_string(),
        username: "Administrador".to_string(),
        role: Role::Admin,
    }
}

pub fn cliente_de_prueba() -> ClientInfo {
    ClientInfo {
        tipo_documento: "CC".to_string(),
        numero_documento: "1012345678".to_string(),
        nombres: "Laura".to_string(),
        apellidos: "Gómez".to_string(),
        telefono: "3001234567".to_string(),
        email: "laura@example.com".to_string(),
    }
}
