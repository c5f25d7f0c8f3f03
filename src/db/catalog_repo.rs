// src/db/catalog_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::db_utils::is_unique_violation,
    common::error::AppError,
    models::catalog::Product,
};

// O repositório do catálogo, responsável pela tabela `productos`.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, nombre, unidades, costo FROM productos ORDER BY nombre ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn find_by_name(&self, nombre: &str) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, nombre, unidades, costo FROM productos WHERE nombre = ?",
        )
        .bind(nombre)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn count<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM productos")
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    // ---
    // Funções de "Escrita"
    // ---

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        unidades: i64,
        costo: Decimal,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO productos (nombre, unidades, costo)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(nombre)
        .bind(unidades)
        .bind(costo.to_string())
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::DuplicateName(nombre.to_string());
            }
            AppError::from(e)
        })?;

        Ok(id)
    }

    // Define o estoque absoluto de um produto. Retorna o valor gravado, ou
    // None quando o nome não existe.
    pub async fn set_stock(&self, nombre: &str, unidades: i64) -> Result<Option<i64>, AppError> {
        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE productos
            SET unidades = ?
            WHERE nombre = ?
            RETURNING unidades
            "#,
        )
        .bind(unidades)
        .bind(nombre)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    // Baixa de estoque na confirmação de uma cotação. O MAX(0, ...) garante o
    // invariante da coluna mesmo se duas confirmações disputarem o mesmo
    // produto (corrida aceita, ver modelo de concorrência).
    pub async fn decrement_stock<'e, E>(
        &self,
        executor: E,
        producto_id: i64,
        cantidad: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("UPDATE productos SET unidades = MAX(0, unidades - ?) WHERE id = ?")
            .bind(cantidad)
            .bind(producto_id)
            .execute(executor)
            .await?;

        Ok(())
    }
}
