pub mod db;
pub use db::connect_with_retry;
pub mod account_repo;
pub use account_repo::AccountRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod quote_repo;
pub use quote_repo::QuoteRepository;
pub mod seed;

// Migrações embutidas (diretório `migrations/`), compartilhadas entre o
// binário e os testes de integração.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
