//src/main.rs

use colva_cotizador::config::AppState;
use colva_cotizador::db;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    db::MIGRATOR
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Primeira execução: conta administradora + catálogo padrão
    db::seed::ensure_seed_data(&app_state.db_pool)
        .await
        .expect("Falha ao popular os dados iniciais.");

    let productos = app_state
        .catalog_service
        .list_all()
        .await
        .expect("Falha ao carregar o catálogo.");

    tracing::info!(
        produtos = productos.len(),
        "🚀 Núcleo pronto; a interface consome os serviços via AppState."
    );
}
