// src/models/quote.rs

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use validator::Validate;

use crate::common::db_utils::decimal_column;

/// Alíquota do IVA aplicada sobre o subtotal (19%).
pub const TASA_IVA: Decimal = dec!(0.19);

// Identificação do cliente da cotação, gravada junto ao cabeçalho.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    #[validate(length(min = 1, message = "O tipo de documento é obrigatório."))]
    pub tipo_documento: String,

    #[validate(length(min = 1, message = "O número de documento é obrigatório."))]
    pub numero_documento: String,

    #[validate(length(min = 1, message = "Os nomes do cliente são obrigatórios."))]
    pub nombres: String,

    #[validate(length(min = 1, message = "Os sobrenomes do cliente são obrigatórios."))]
    pub apellidos: String,

    #[validate(length(min = 1, message = "O telefone é obrigatório."))]
    pub telefono: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
}

// Totais de uma cotação. `total == subtotal + iva` sempre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    pub subtotal: Decimal,
    pub iva: Decimal,
    pub total: Decimal,
}

impl QuoteTotals {
    /// Deriva IVA e total a partir do subtotal, na precisão de moeda (2 casas).
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let iva = (subtotal * TASA_IVA)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self {
            subtotal,
            iva,
            total: subtotal + iva,
        }
    }
}

// Cabeçalho persistido de uma cotação (tabela `cotizaciones`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: i64,
    pub usuario_id: String,
    pub fecha: DateTime<Utc>,
    pub cliente: ClientInfo,
    pub subtotal: Decimal,
    pub iva: Decimal,
    pub total: Decimal,
}

impl sqlx::FromRow<'_, SqliteRow> for Quote {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            usuario_id: row.try_get("usuario_id")?,
            fecha: row.try_get("fecha")?,
            cliente: ClientInfo {
                tipo_documento: row.try_get("cliente_tipo_doc")?,
                numero_documento: row.try_get("cliente_num_doc")?,
                nombres: row.try_get("cliente_nombres")?,
                apellidos: row.try_get("cliente_apellidos")?,
                telefono: row.try_get("cliente_telefono")?,
                email: row.try_get("cliente_email")?,
            },
            subtotal: decimal_column(row, "subtotal")?,
            iva: decimal_column(row, "iva")?,
            total: decimal_column(row, "total")?,
        })
    }
}

// Uma linha persistida (tabela `cotizacion_detalles`). Só existem linhas com
// cantidad > 0; células zeradas nunca chegam ao banco.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub id: i64,
    pub cotizacion_id: i64,
    pub ambiente: i64,
    pub producto_id: i64,
    pub cantidad: i64,
    pub precio_unitario: Decimal,
}

impl sqlx::FromRow<'_, SqliteRow> for QuoteLine {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            cotizacion_id: row.try_get("cotizacion_id")?,
            ambiente: row.try_get("ambiente")?,
            producto_id: row.try_get("producto_id")?,
            cantidad: row.try_get("cantidad")?,
            precio_unitario: decimal_column(row, "precio_unitario")?,
        })
    }
}

// Linha ainda não persistida, extraída da grade do montador de cotações.
// `precio_unitario` é o snapshot do custo no momento da montagem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteLineDraft {
    pub ambiente: u32,
    pub producto_id: i64,
    pub cantidad: i64,
    pub precio_unitario: Decimal,
}

// Linha de cotação enriquecida com o nome do produto (JOIN com `productos`),
// usada na montagem do documento.
#[derive(Debug, Clone)]
pub struct QuoteLineDetail {
    pub ambiente: i64,
    pub producto: String,
    pub cantidad: i64,
    pub precio_unitario: Decimal,
}

impl sqlx::FromRow<'_, SqliteRow> for QuoteLineDetail {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            ambiente: row.try_get("ambiente")?,
            producto: row.try_get("nombre")?,
            cantidad: row.try_get("cantidad")?,
            precio_unitario: decimal_column(row, "precio_unitario")?,
        })
    }
}
