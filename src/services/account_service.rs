// src/services/account_service.rs

use bcrypt::{hash, verify};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::AccountRepository,
    models::account::{
        ADMIN_IDENTIFIER, Account, AccountSummary, AccountUpdate, RegisterPayload, Role, Session,
    },
};

#[derive(Clone)]
pub struct AccountService {
    repo: AccountRepository,
    pool: SqlitePool,
}

impl AccountService {
    pub fn new(repo: AccountRepository, pool: SqlitePool) -> Self {
        Self { repo, pool }
    }

    // O hashing é pesado, então roda em um thread separado.
    async fn hash_password(password: &str) -> Result<String, AppError> {
        let password = password.to_owned();
        let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        Ok(hashed)
    }

    async fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
        let password = password.to_owned();
        let stored_hash = stored_hash.to_owned();
        let is_valid = tokio::task::spawn_blocking(move || verify(&password, &stored_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        Ok(is_valid)
    }

    /// true sse a identificação existe e a senha confere. Identificação
    /// desconhecida é `false`, nunca erro.
    pub async fn validate(&self, id: &str, password: &str) -> Result<bool, AppError> {
        let Some(account) = self.repo.find_by_id(id).await? else {
            return Ok(false);
        };

        Self::verify_password(password, &account.password).await
    }

    /// Como `validate`, mas devolve o contexto de sessão que as demais
    /// operações recebem explicitamente (não há "usuário atual" global).
    pub async fn login(&self, id: &str, password: &str) -> Result<Session, AppError> {
        let account = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &account.password).await? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(Session {
            account_id: account.id,
            username: account.username,
            role: account.role,
        })
    }

    pub async fn get_role(&self, id: &str) -> Result<Option<Role>, AppError> {
        Ok(self.repo.find_by_id(id).await?.map(|a| a.role))
    }

    pub async fn get_profile(&self, id: &str) -> Result<Option<Account>, AppError> {
        self.repo.find_by_id(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<AccountSummary>, AppError> {
        self.repo.list_all().await
    }

    pub async fn add(
        &self,
        id: &str,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Account, AppError> {
        let hashed_password = Self::hash_password(password).await?;

        self.repo
            .insert(&self.pool, id, username, &hashed_password, role)
            .await
    }

    /// Registro de autoatendimento: valida o payload e cria a conta sempre
    /// com papel 'client'.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<Account, AppError> {
        payload.validate()?;

        payload.validate_consistency().map_err(|e| {
            let mut errors = validator::ValidationErrors::new();
            errors.add("confirmPassword", e);
            AppError::ValidationError(errors)
        })?;

        self.add(&payload.id, &payload.username, &payload.password, Role::Client)
            .await
    }

    /// Atualização parcial. Um pedido de troca de papel da conta
    /// administradora é ignorado em silêncio (política observada, não erro).
    pub async fn update(&self, id: &str, changes: &AccountUpdate) -> Result<Account, AppError> {
        changes.validate()?;

        let mut role = changes.role;
        if id == ADMIN_IDENTIFIER && role.is_some() {
            tracing::debug!("Pedido de troca de papel da conta administradora ignorado.");
            role = None;
        }

        let password_hash = match changes.password.as_deref() {
            Some(p) => Some(Self::hash_password(p).await?),
            None => None,
        };

        self.repo
            .update(id, changes.username.as_deref(), password_hash.as_deref(), role)
            .await?
            .ok_or(AppError::AccountNotFound)
    }

    /// Remove uma conta. A administradora é intocável; identificação
    /// desconhecida devolve `false`.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        if id == ADMIN_IDENTIFIER {
            return Err(AppError::ForbiddenOperation);
        }

        Ok(self.repo.delete(id).await? > 0)
    }
}
