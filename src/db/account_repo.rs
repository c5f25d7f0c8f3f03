// src/db/account_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::db_utils::is_unique_violation,
    common::error::AppError,
    models::account::{Account, AccountSummary, Role},
};

// O repositório de usuários, responsável por todas as interações com a
// tabela `usuarios`.
#[derive(Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // Busca um usuário pela sua identificação
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password, role FROM usuarios WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    // Lista todas as contas na ordem de armazenamento (sem ORDER BY).
    pub async fn list_all(&self) -> Result<Vec<AccountSummary>, AppError> {
        let accounts = sqlx::query_as::<_, AccountSummary>(
            "SELECT id, username, role FROM usuarios",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    pub async fn count<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    // Cria um novo usuário. `password_hash` já vem com o hash bcrypt pronto.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        id: &str,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<Account, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO usuarios (id, username, password, role)
            VALUES (?, ?, ?, ?)
            RETURNING id, username, password, role
            "#,
        )
        .bind(id)
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::DuplicateIdentifier;
            }
            e.into()
        })
    }

    // Atualização parcial: campos None mantêm o valor atual (COALESCE).
    pub async fn update(
        &self,
        id: &str,
        username: Option<&str>,
        password_hash: Option<&str>,
        role: Option<Role>,
    ) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE usuarios
            SET username = COALESCE(?, username),
                password = COALESCE(?, password),
                role     = COALESCE(?, role)
            WHERE id = ?
            RETURNING id, username, password, role
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    // Retorna quantas linhas foram removidas (0 = identificação desconhecida).
    pub async fn delete(&self, id: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
