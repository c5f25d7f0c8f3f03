mod common;

use assert_matches::assert_matches;
use colva_cotizador::common::error::AppError;
use colva_cotizador::db;
use colva_cotizador::models::catalog::NewProduct;
use rust_decimal_macros::dec;

use common::{catalog_service, seeded_pool, test_pool};

#[tokio::test]
async fn a_semente_preenche_o_catalogo_padrao_uma_unica_vez() {
    let pool = seeded_pool().await;
    let service = catalog_service(&pool);

    let products = service.list_all().await.unwrap();
    assert_eq!(products.len(), 9);

    let nest = service.get_by_name("Google Assistant Nest").await.unwrap().unwrap();
    assert_eq!(nest.unidades, 15);
    assert_eq!(nest.costo, dec!(223076));

    // Segunda execução não duplica nada.
    db::seed::ensure_seed_data(&pool).await.unwrap();
    assert_eq!(service.list_all().await.unwrap().len(), 9);
}

#[tokio::test]
async fn list_all_ordena_por_nome_ascendente() {
    let pool = seeded_pool().await;
    let service = catalog_service(&pool);

    let products = service.list_all().await.unwrap();
    let nombres: Vec<&str> = products.iter().map(|p| p.nombre.as_str()).collect();

    let mut ordenados = nombres.clone();
    ordenados.sort();
    assert_eq!(nombres, ordenados);
}

#[tokio::test]
async fn nome_duplicado_e_rejeitado_sem_tocar_na_linha_existente() {
    let pool = seeded_pool().await;
    let service = catalog_service(&pool);

    let err = service
        .add(&NewProduct {
            nombre: "Chromecast Serie 3".to_string(),
            unidades: 5,
            costo: dec!(100000),
        })
        .await
        .unwrap_err();
    assert_matches!(err, AppError::DuplicateName(_));

    let existente = service.get_by_name("Chromecast Serie 3").await.unwrap().unwrap();
    assert_eq!(existente.unidades, 18);
    assert_eq!(existente.costo, dec!(223076));
}

#[tokio::test]
async fn cadastro_valida_nome_unidades_e_custo() {
    let pool = test_pool().await;
    let service = catalog_service(&pool);

    // Nome em branco
    let err = service
        .add(&NewProduct {
            nombre: "   ".to_string(),
            unidades: 1,
            costo: dec!(100),
        })
        .await
        .unwrap_err();
    assert_matches!(err, AppError::ValidationError(_));

    // Custo zero
    let err = service
        .add(&NewProduct {
            nombre: "Sensor de Puerta".to_string(),
            unidades: 1,
            costo: dec!(0),
        })
        .await
        .unwrap_err();
    assert_matches!(err, AppError::ValidationError(_));

    // Custo acima do teto
    let err = service
        .add(&NewProduct {
            nombre: "Sensor de Puerta".to_string(),
            unidades: 1,
            costo: dec!(10_000_000_000),
        })
        .await
        .unwrap_err();
    assert_matches!(err, AppError::ValidationError(_));

    // Unidades negativas
    let err = service
        .add(&NewProduct {
            nombre: "Sensor de Puerta".to_string(),
            unidades: -3,
            costo: dec!(45000),
        })
        .await
        .unwrap_err();
    assert_matches!(err, AppError::ValidationError(_));

    // Válido: o nome é gravado sem os espaços das pontas.
    let id = service
        .add(&NewProduct {
            nombre: "  Sensor de Puerta  ".to_string(),
            unidades: 12,
            costo: dec!(45000),
        })
        .await
        .unwrap();
    assert!(id > 0);

    let sensor = service.get_by_name("Sensor de Puerta").await.unwrap().unwrap();
    assert_eq!(sensor.unidades, 12);
}

#[tokio::test]
async fn ajuste_de_estoque_absoluto_e_clamp_em_zero() {
    let pool = seeded_pool().await;
    let service = catalog_service(&pool);

    assert_eq!(service.adjust_stock("Google Assistant Nest", 40).await.unwrap(), 40);

    // Valor negativo vira zero, sem erro.
    assert_eq!(service.adjust_stock("Google Assistant Nest", -5).await.unwrap(), 0);
    let nest = service.get_by_name("Google Assistant Nest").await.unwrap().unwrap();
    assert_eq!(nest.unidades, 0);

    let err = service.adjust_stock("No Existe", 10).await.unwrap_err();
    assert_matches!(err, AppError::ProductNotFound(_));
}

#[tokio::test]
async fn check_stock_cobre_conhecidos_e_desconhecidos() {
    let pool = seeded_pool().await;
    let service = catalog_service(&pool);

    assert!(service.check_stock("Google Assistant Nest", 15).await.unwrap());
    assert!(!service.check_stock("Google Assistant Nest", 16).await.unwrap());
    // Produto desconhecido é false, nunca erro.
    assert!(!service.check_stock("No Existe", 1).await.unwrap());
}
