// src/models/account.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use crate::common::error::AppError;

// Papel de uma conta. No banco é a coluna TEXT `role` ('admin' | 'client').
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Client => write!(f, "client"),
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "client" => Ok(Role::Client),
            other => Err(AppError::InvalidRole(other.to_string())),
        }
    }
}

/// Identificador reservado da conta administradora (seed de primeira execução).
pub const ADMIN_IDENTIFIER: &str = "admin";

// Representa um usuário vindo do banco de dados (tabela `usuarios`).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    // Identificação emitida externamente (cédula), usada como chave primária.
    pub id: String,
    pub username: String,

    // A coluna chama `password` por herança do esquema, mas guarda o hash bcrypt.
    #[serde(skip_serializing)]
    pub password: String,

    pub role: Role,
}

// Linha resumida para listagens administrativas.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: String,
    pub username: String,
    pub role: Role,
}

/// Contexto da sessão autenticada, passado explicitamente a cada operação
/// que precisa saber quem está agindo.
#[derive(Debug, Clone)]
pub struct Session {
    pub account_id: String,
    pub username: String,
    pub role: Role,
}

// ---
// Validação customizada
// ---
fn validate_identifier(val: &str) -> Result<(), ValidationError> {
    if val.is_empty() || !val.chars().all(|c| c.is_ascii_digit()) {
        let mut err = ValidationError::new("identifier");
        err.message = Some("O número de identificação deve conter apenas dígitos.".into());
        return Err(err);
    }
    Ok(())
}

// Dados para registro de um novo usuário (sempre com papel 'client').
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(length(min = 1, message = "O nome de usuário é obrigatório."))]
    pub username: String,

    #[validate(custom(function = "validate_identifier"))]
    pub id: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    pub confirm_password: String,
}

impl RegisterPayload {
    // As senhas digitadas precisam coincidir antes de qualquer hashing.
    pub(crate) fn validate_consistency(&self) -> Result<(), ValidationError> {
        if self.password != self.confirm_password {
            let mut err = ValidationError::new("confirm_password");
            err.message = Some("As senhas não coincidem.".into());
            return Err(err);
        }
        Ok(())
    }
}

// Atualização parcial de uma conta: só os campos presentes são alterados.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    #[validate(length(min = 1, message = "O nome de usuário não pode ser vazio."))]
    pub username: Option<String>,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: Option<String>,

    pub role: Option<Role>,
}
