// src/services/quote_service.rs

use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, QuoteRepository},
    models::account::Session,
    models::quote::{ClientInfo, Quote, QuoteLine},
    services::document_service::QuoteDocument,
    services::quote_builder::{BuilderState, QuoteBuilder},
};

#[derive(Clone)]
pub struct QuoteService {
    quote_repo: QuoteRepository,
    catalog_repo: CatalogRepository,
    pool: SqlitePool,
}

impl QuoteService {
    pub fn new(quote_repo: QuoteRepository, catalog_repo: CatalogRepository, pool: SqlitePool) -> Self {
        Self {
            quote_repo,
            catalog_repo,
            pool,
        }
    }

    /// Confirma a cotação montada: grava cabeçalho e linhas em uma única
    /// transação e depois baixa o estoque dos produtos usados.
    ///
    /// O cabeçalho nunca fica sem linhas: qualquer falha nas linhas desfaz
    /// tudo. Já uma falha na baixa de estoque NÃO desfaz a cotação: o
    /// registro comercial prevalece e o problema vai para o log.
    pub async fn commit(
        &self,
        builder: &mut QuoteBuilder,
        session: &Session,
        cliente: &ClientInfo,
    ) -> Result<i64, AppError> {
        if builder.state() == BuilderState::Committed {
            return Err(AppError::QuoteAlreadyCommitted);
        }

        let lines = builder.draft_lines();
        if lines.is_empty() {
            return Err(AppError::EmptyQuote);
        }

        cliente.validate()?;
        let totales = builder.compute_totals();

        let cotizacion_id = self
            .quote_repo
            .create_with_lines(&session.account_id, Utc::now(), cliente, &totales, &lines)
            .await?;

        for (producto_id, cantidad) in builder.totals_by_product() {
            if let Err(e) = self
                .catalog_repo
                .decrement_stock(&self.pool, producto_id, cantidad)
                .await
            {
                tracing::warn!(
                    cotizacion_id,
                    producto_id,
                    cantidad,
                    erro = %e,
                    "Falha ao baixar o estoque após confirmar a cotação"
                );
            }
        }

        builder.mark_committed();

        tracing::info!(
            cotizacion_id,
            usuario = %session.account_id,
            total = %totales.total,
            "Cotação confirmada"
        );

        Ok(cotizacion_id)
    }

    pub async fn get_quote(&self, id: i64) -> Result<Quote, AppError> {
        self.quote_repo
            .get_quote(id)
            .await?
            .ok_or(AppError::QuoteNotFound(id))
    }

    pub async fn list_lines(&self, cotizacion_id: i64) -> Result<Vec<QuoteLine>, AppError> {
        self.quote_repo.list_lines(cotizacion_id).await
    }

    pub async fn list_by_account(&self, usuario_id: &str) -> Result<Vec<Quote>, AppError> {
        self.quote_repo.list_by_account(usuario_id).await
    }

    /// Monta o modelo imprimível de uma cotação persistida, pronto para o
    /// renderizador de documentos.
    pub async fn document_for(&self, cotizacion_id: i64) -> Result<QuoteDocument, AppError> {
        let quote = self.get_quote(cotizacion_id).await?;
        let lines = self
            .quote_repo
            .list_lines_with_products(cotizacion_id)
            .await?;

        Ok(QuoteDocument::build(&quote, &lines))
    }
}
