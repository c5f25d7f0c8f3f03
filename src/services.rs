pub mod account_service;
pub use account_service::AccountService;
pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod quote_builder;
pub use quote_builder::{BuilderState, CellUpdate, QuoteBuilder};
pub mod quote_service;
pub use quote_service::QuoteService;
pub mod document_service;
pub use document_service::{DocumentService, QuoteDocument};
