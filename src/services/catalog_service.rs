// src/services/catalog_service.rs

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{NewProduct, Product},
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
    pool: SqlitePool,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository, pool: SqlitePool) -> Self {
        Self { repo, pool }
    }

    // Catálogo completo, ordenado por nome.
    pub async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        self.repo.list_all().await
    }

    pub async fn get_by_name(&self, nombre: &str) -> Result<Option<Product>, AppError> {
        self.repo.find_by_name(nombre).await
    }

    /// Cadastra um produto novo e devolve o id gerado.
    pub async fn add(&self, payload: &NewProduct) -> Result<i64, AppError> {
        payload.validate()?;

        self.repo
            .insert(&self.pool, payload.nombre.trim(), payload.unidades, payload.costo)
            .await
    }

    /// Define o estoque absoluto de um produto. Valores negativos são
    /// ajustados para zero (o estoque nunca fica negativo).
    pub async fn adjust_stock(&self, nombre: &str, unidades: i64) -> Result<i64, AppError> {
        let aplicado = unidades.max(0);
        if aplicado != unidades {
            tracing::warn!(
                producto = nombre,
                solicitado = unidades,
                "Estoque negativo solicitado; ajustado para zero"
            );
        }

        self.repo
            .set_stock(nombre, aplicado)
            .await?
            .ok_or_else(|| AppError::ProductNotFound(nombre.to_string()))
    }

    /// true sse o estoque atual cobre a quantidade pedida. Produto
    /// desconhecido devolve `false`, nunca erro.
    pub async fn check_stock(&self, nombre: &str, cantidad: i64) -> Result<bool, AppError> {
        let Some(product) = self.repo.find_by_name(nombre).await? else {
            return Ok(false);
        };

        Ok(product.unidades >= cantidad)
    }
}
