//! Núcleo do cotizador Colva: contas, catálogo com estoque, montagem e
//! confirmação de cotações por ambiente e emissão do PDF. A interface
//! gráfica consome estes serviços; não há estado global de sessão.

pub mod common;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
