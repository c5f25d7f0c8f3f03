// src/db/quote_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::quote::{ClientInfo, Quote, QuoteLine, QuoteLineDetail, QuoteLineDraft, QuoteTotals},
};

// O repositório de cotações, dono das tabelas `cotizaciones` e
// `cotizacion_detalles`. As escritas aceitam um executor para comporem a
// mesma transação.
#[derive(Clone)]
pub struct QuoteRepository {
    pool: SqlitePool,
}

impl QuoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Grava o cabeçalho e todas as linhas em uma única transação: ou a
    /// cotação inteira entra, ou nada entra.
    pub async fn create_with_lines(
        &self,
        usuario_id: &str,
        fecha: DateTime<Utc>,
        cliente: &ClientInfo,
        totales: &QuoteTotals,
        lines: &[QuoteLineDraft],
    ) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        let cotizacion_id = self
            .insert_header(&mut *tx, usuario_id, fecha, cliente, totales)
            .await?;

        for line in lines {
            // Se falhar aqui, o rollback no drop do tx desfaz o cabeçalho também.
            self.insert_line(&mut *tx, cotizacion_id, line).await?;
        }

        tx.commit().await?;
        Ok(cotizacion_id)
    }

    pub async fn insert_header<'e, E>(
        &self,
        executor: E,
        usuario_id: &str,
        fecha: DateTime<Utc>,
        cliente: &ClientInfo,
        totales: &QuoteTotals,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO cotizaciones (
                usuario_id, fecha,
                cliente_tipo_doc, cliente_num_doc, cliente_nombres,
                cliente_apellidos, cliente_telefono, cliente_email,
                subtotal, iva, total
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(usuario_id)
        .bind(fecha)
        .bind(&cliente.tipo_documento)
        .bind(&cliente.numero_documento)
        .bind(&cliente.nombres)
        .bind(&cliente.apellidos)
        .bind(&cliente.telefono)
        .bind(&cliente.email)
        .bind(totales.subtotal.to_string())
        .bind(totales.iva.to_string())
        .bind(totales.total.to_string())
        .fetch_one(executor)
        .await?;

        Ok(id)
    }

    pub async fn insert_line<'e, E>(
        &self,
        executor: E,
        cotizacion_id: i64,
        line: &QuoteLineDraft,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO cotizacion_detalles (
                cotizacion_id, ambiente, producto_id, cantidad, precio_unitario
            )
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(cotizacion_id)
        .bind(line.ambiente as i64)
        .bind(line.producto_id)
        .bind(line.cantidad)
        .bind(line.precio_unitario.to_string())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn get_quote(&self, id: i64) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>("SELECT * FROM cotizaciones WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(quote)
    }

    pub async fn list_lines(&self, cotizacion_id: i64) -> Result<Vec<QuoteLine>, AppError> {
        let lines = sqlx::query_as::<_, QuoteLine>(
            r#"
            SELECT id, cotizacion_id, ambiente, producto_id, cantidad, precio_unitario
            FROM cotizacion_detalles
            WHERE cotizacion_id = ?
            ORDER BY ambiente ASC, id ASC
            "#,
        )
        .bind(cotizacion_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    // Linhas com o nome do produto, na ordem de ambiente, para o documento.
    pub async fn list_lines_with_products(
        &self,
        cotizacion_id: i64,
    ) -> Result<Vec<QuoteLineDetail>, AppError> {
        let lines = sqlx::query_as::<_, QuoteLineDetail>(
            r#"
            SELECT d.ambiente, p.nombre, d.cantidad, d.precio_unitario
            FROM cotizacion_detalles d
            JOIN productos p ON p.id = d.producto_id
            WHERE d.cotizacion_id = ?
            ORDER BY d.ambiente ASC, p.nombre ASC
            "#,
        )
        .bind(cotizacion_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    // Cotações emitidas por uma conta, da mais recente para a mais antiga.
    pub async fn list_by_account(&self, usuario_id: &str) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>(
            "SELECT * FROM cotizaciones WHERE usuario_id = ? ORDER BY fecha DESC, id DESC",
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(quotes)
    }
}
