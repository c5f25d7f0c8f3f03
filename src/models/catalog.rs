// src/models/catalog.rs

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use validator::{Validate, ValidationError};

use crate::common::db_utils::decimal_column;

/// Teto de custo aceito pelo catálogo, equivalente a uma coluna NUMERIC(15,2).
pub const COSTO_MAXIMO: Decimal = dec!(9_999_999_999.99);

// Um produto do catálogo (tabela `productos`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub nombre: String,
    pub unidades: i64,
    pub costo: Decimal,
}

// `costo` fica em TEXT no SQLite, então a linha é montada manualmente.
impl sqlx::FromRow<'_, SqliteRow> for Product {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            nombre: row.try_get("nombre")?,
            unidades: row.try_get("unidades")?,
            costo: decimal_column(row, "costo")?,
        })
    }
}

// ---
// Validação customizada
// ---
fn validate_costo(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O custo deve ser maior que 0.".into());
        return Err(err);
    }
    if *val > COSTO_MAXIMO {
        let mut err = ValidationError::new("range");
        err.message = Some("O custo excede o limite permitido (máximo: 9.999.999.999,99).".into());
        return Err(err);
    }
    Ok(())
}

fn validate_nombre(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        let mut err = ValidationError::new("length");
        err.message = Some("O nome do produto é obrigatório.".into());
        return Err(err);
    }
    Ok(())
}

// Dados para cadastrar um produto novo.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[validate(custom(function = "validate_nombre"))]
    pub nombre: String,

    #[validate(range(min = 0, message = "As unidades devem ser um inteiro não negativo."))]
    pub unidades: i64,

    #[validate(custom(function = "validate_costo"))]
    pub costo: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // A interface consome o catálogo serializado; o formato das chaves faz
    // parte do contrato.
    #[test]
    fn produto_serializa_com_as_chaves_esperadas() {
        let producto = Product {
            id: 1,
            nombre: "Google Assistant Nest".to_string(),
            unidades: 15,
            costo: dec!(223076),
        };

        let valor = serde_json::to_value(&producto).unwrap();
        assert_eq!(valor["nombre"], "Google Assistant Nest");
        assert_eq!(valor["unidades"], 15);
        assert_eq!(valor["costo"], 223076.0);
    }
}
