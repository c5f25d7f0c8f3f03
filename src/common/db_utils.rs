use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use std::str::FromStr;

// ---
// Helpers de conversão SQLite
// ---
// O SQLite não tem tipo decimal exato, então as colunas monetárias ficam em
// TEXT e são convertidas aqui. Um valor ilegível é um erro de decodificação
// da linha, não um erro de domínio.

pub(crate) fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Verifica se um erro do sqlx é violação de chave única (UNIQUE).
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}
