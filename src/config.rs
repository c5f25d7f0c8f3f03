// src/config.rs

use sqlx::SqlitePool;
use std::path::PathBuf;
use std::time::Duration;
use std::env;

use crate::db::{self, AccountRepository, CatalogRepository, QuoteRepository};
use crate::services::{AccountService, CatalogService, DocumentService, QuoteService};

// Configuração carregada do ambiente (com defaults utilizáveis em
// desenvolvimento; nada aqui é obrigatório).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub fonts_dir: PathBuf,
    pub downloads_dir: PathBuf,
    pub db_connect_attempts: u32,
    pub db_connect_backoff: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://colva_app.sqlite3".to_string());

        let fonts_dir = env::var("COLVA_FONTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./fonts"));

        // O diretório de downloads vem da configuração; a detecção de
        // plataforma fica com a camada de apresentação.
        let downloads_dir = env::var("COLVA_DOWNLOADS_DIR")
            .map(PathBuf::from)
            .ok()
            .or_else(|| env::var("HOME").ok().map(|h| PathBuf::from(h).join("Downloads")))
            .unwrap_or_else(|| PathBuf::from("./descargas"));

        let db_connect_attempts = env::var("COLVA_DB_CONNECT_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let db_connect_backoff = env::var("COLVA_DB_CONNECT_BACKOFF_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_millis(500));

        Self {
            database_url,
            fonts_dir,
            downloads_dir,
            db_connect_attempts,
            db_connect_backoff,
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub settings: Settings,
    pub account_service: AccountService,
    pub catalog_service: CatalogService,
    pub quote_service: QuoteService,
    pub document_service: DocumentService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        let settings = Settings::from_env();

        let db_pool = db::connect_with_retry(
            &settings.database_url,
            settings.db_connect_attempts,
            settings.db_connect_backoff,
        )
        .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let account_repo = AccountRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let quote_repo = QuoteRepository::new(db_pool.clone());

        let account_service = AccountService::new(account_repo, db_pool.clone());
        let catalog_service = CatalogService::new(catalog_repo.clone(), db_pool.clone());
        let quote_service = QuoteService::new(quote_repo, catalog_repo, db_pool.clone());
        let document_service =
            DocumentService::new(settings.fonts_dir.clone(), settings.downloads_dir.clone());

        Ok(Self {
            db_pool,
            settings,
            account_service,
            catalog_service,
            quote_service,
            document_service,
        })
    }
}
