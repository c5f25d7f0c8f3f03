// src/db/seed.rs

use bcrypt::hash;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{AccountRepository, CatalogRepository},
    models::account::{ADMIN_IDENTIFIER, Role},
};

// Credenciais padrão da primeira execução.
const ADMIN_USERNAME: &str = "Administrador";
const ADMIN_PASSWORD: &str = "admin123";

// Catálogo padrão de domótica, inserido apenas quando `productos` está vazia.
const DEFAULT_PRODUCTS: &[(&str, i64, Decimal)] = &[
    ("Google Assistant Nest", 15, dec!(223076)),
    ("Foco LED RGB Controlado", 30, dec!(61876)),
    ("Control Remoto Universal", 25, dec!(91636)),
    ("Adaptador de Corriente", 50, dec!(59396)),
    ("Cámara IP WIFI 2MP", 20, dec!(90892)),
    ("Chromecast Serie 3", 18, dec!(223076)),
    ("Interruptor Sencillo", 40, dec!(123876)),
    ("Interruptor Doble", 35, dec!(148676)),
    ("Otros (Personal y CH)", 10, dec!(67402)),
];

/// Popula a conta administradora e o catálogo padrão quando as tabelas
/// respectivas estão vazias. Idempotente: execuções seguintes não tocam em
/// nada.
pub async fn ensure_seed_data(pool: &SqlitePool) -> Result<(), AppError> {
    let account_repo = AccountRepository::new(pool.clone());
    let catalog_repo = CatalogRepository::new(pool.clone());

    if account_repo.count(pool).await? == 0 {
        let hashed_password =
            tokio::task::spawn_blocking(|| hash(ADMIN_PASSWORD, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        account_repo
            .insert(
                pool,
                ADMIN_IDENTIFIER,
                ADMIN_USERNAME,
                &hashed_password,
                Role::Admin,
            )
            .await?;

        tracing::info!("🌱 Conta administradora criada na primeira execução.");
    }

    if catalog_repo.count(pool).await? == 0 {
        for (nombre, unidades, costo) in DEFAULT_PRODUCTS {
            catalog_repo.insert(pool, nombre, *unidades, *costo).await?;
        }

        tracing::info!(
            produtos = DEFAULT_PRODUCTS.len(),
            "🌱 Catálogo padrão inserido na primeira execução."
        );
    }

    Ok(())
}
