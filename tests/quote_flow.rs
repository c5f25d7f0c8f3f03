mod common;

use assert_matches::assert_matches;
use colva_cotizador::common::error::AppError;
use colva_cotizador::models::catalog::Product;
use colva_cotizador::models::quote::ClientInfo;
use colva_cotizador::services::QuoteBuilder;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::{admin_session, catalog_service, cliente_de_prueba, quote_service, seeded_pool};

async fn builder_do_catalogo(pool: &sqlx::SqlitePool) -> QuoteBuilder {
    let products = catalog_service(pool).list_all().await.unwrap();
    QuoteBuilder::new(products)
}

fn id_por_nombre(builder: &QuoteBuilder, nombre: &str) -> i64 {
    builder
        .productos()
        .iter()
        .find(|p| p.nombre == nombre)
        .map(|p| p.id)
        .expect("produto esperado no catálogo de teste")
}

#[tokio::test]
async fn fluxo_completo_confirma_e_baixa_o_estoque() {
    let pool = seeded_pool().await;
    let quotes = quote_service(&pool);
    let catalog = catalog_service(&pool);

    let mut builder = builder_do_catalogo(&pool).await;
    let nest = id_por_nombre(&builder, "Google Assistant Nest");

    let room = builder.add_room().unwrap();
    builder.set_cell(room, nest, 2).unwrap();

    let totales = builder.compute_totals();
    assert_eq!(totales.subtotal, dec!(446152));
    assert_eq!(totales.iva, dec!(84768.88));
    assert_eq!(totales.total, dec!(530920.88));

    let cotizacion_id = quotes
        .commit(&mut builder, &admin_session(), &cliente_de_prueba())
        .await
        .unwrap();

    // Cabeçalho com os totais exatos e atribuído à conta da sessão.
    let quote = quotes.get_quote(cotizacion_id).await.unwrap();
    assert_eq!(quote.usuario_id, "admin");
    assert_eq!(quote.subtotal, dec!(446152));
    assert_eq!(quote.iva, dec!(84768.88));
    assert_eq!(quote.total, quote.subtotal + quote.iva);

    // subtotal == soma das extensões das linhas, com preço do snapshot.
    let lines = quotes.list_lines(cotizacion_id).await.unwrap();
    assert_eq!(lines.len(), 1);
    let soma: Decimal = lines
        .iter()
        .map(|l| Decimal::from(l.cantidad) * l.precio_unitario)
        .sum();
    assert_eq!(soma, quote.subtotal);

    // Estoque: 15 - 2 = 13.
    let nest_depois = catalog.get_by_name("Google Assistant Nest").await.unwrap().unwrap();
    assert_eq!(nest_depois.unidades, 13);
}

#[tokio::test]
async fn cotacao_vazia_e_rejeitada_sem_escrever_nada() {
    let pool = seeded_pool().await;
    let quotes = quote_service(&pool);

    let mut builder = builder_do_catalogo(&pool).await;
    builder.add_room().unwrap();

    let err = quotes
        .commit(&mut builder, &admin_session(), &cliente_de_prueba())
        .await
        .unwrap_err();
    assert_matches!(err, AppError::EmptyQuote);

    let headers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cotizaciones")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(headers, 0);
}

#[tokio::test]
async fn cliente_invalido_e_rejeitado_antes_de_persistir() {
    let pool = seeded_pool().await;
    let quotes = quote_service(&pool);

    let mut builder = builder_do_catalogo(&pool).await;
    let nest = id_por_nombre(&builder, "Google Assistant Nest");
    let room = builder.add_room().unwrap();
    builder.set_cell(room, nest, 1).unwrap();

    let cliente = ClientInfo {
        email: "nao-e-um-email".to_string(),
        ..cliente_de_prueba()
    };

    let err = quotes
        .commit(&mut builder, &admin_session(), &cliente)
        .await
        .unwrap_err();
    assert_matches!(err, AppError::ValidationError(_));

    let headers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cotizaciones")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(headers, 0);
}

#[tokio::test]
async fn falha_nas_linhas_desfaz_o_cabecalho() {
    let pool = seeded_pool().await;
    let quotes = quote_service(&pool);

    // Snapshot com um produto que não existe no banco: a linha viola a
    // chave estrangeira e a transação inteira tem que sumir.
    let mut builder = QuoteBuilder::new(vec![Product {
        id: 9999,
        nombre: "Fantasma".to_string(),
        unidades: 10,
        costo: dec!(1000),
    }]);
    let room = builder.add_room().unwrap();
    builder.set_cell(room, 9999, 1).unwrap();

    let err = quotes
        .commit(&mut builder, &admin_session(), &cliente_de_prueba())
        .await
        .unwrap_err();
    assert_matches!(err, AppError::DatabaseError(_));

    let headers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cotizaciones")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(headers, 0);

    let detalles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cotizacion_detalles")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(detalles, 0);
}

#[tokio::test]
async fn confirmar_duas_vezes_e_rejeitado() {
    let pool = seeded_pool().await;
    let quotes = quote_service(&pool);

    let mut builder = builder_do_catalogo(&pool).await;
    let nest = id_por_nombre(&builder, "Google Assistant Nest");
    let room = builder.add_room().unwrap();
    builder.set_cell(room, nest, 1).unwrap();

    quotes
        .commit(&mut builder, &admin_session(), &cliente_de_prueba())
        .await
        .unwrap();

    let err = quotes
        .commit(&mut builder, &admin_session(), &cliente_de_prueba())
        .await
        .unwrap_err();
    assert_matches!(err, AppError::QuoteAlreadyCommitted);
}

#[tokio::test]
async fn estoque_baixa_somando_todos_os_ambientes() {
    let pool = seeded_pool().await;
    let quotes = quote_service(&pool);
    let catalog = catalog_service(&pool);

    // "Otros (Personal y CH)" tem 10 unidades na semente.
    let mut builder = builder_do_catalogo(&pool).await;
    let otros = id_por_nombre(&builder, "Otros (Personal y CH)");

    let room_a = builder.add_room().unwrap();
    let room_b = builder.add_room().unwrap();
    builder.set_cell(room_a, otros, 7).unwrap();
    builder.set_cell(room_b, otros, 3).unwrap();

    quotes
        .commit(&mut builder, &admin_session(), &cliente_de_prueba())
        .await
        .unwrap();

    let depois = catalog.get_by_name("Otros (Personal y CH)").await.unwrap().unwrap();
    assert_eq!(depois.unidades, 0);
}

#[tokio::test]
async fn documento_agrupa_por_ambiente_e_pula_os_vazios() {
    let pool = seeded_pool().await;
    let quotes = quote_service(&pool);

    let mut builder = builder_do_catalogo(&pool).await;
    let nest = id_por_nombre(&builder, "Google Assistant Nest");
    let foco = id_por_nombre(&builder, "Foco LED RGB Controlado");

    let room_1 = builder.add_room().unwrap();
    let room_2 = builder.add_room().unwrap();
    let room_3 = builder.add_room().unwrap();

    builder.set_cell(room_1, nest, 2).unwrap();
    builder.set_cell(room_2, foco, 0).unwrap();
    builder.set_cell(room_3, foco, 4).unwrap();

    let cotizacion_id = quotes
        .commit(&mut builder, &admin_session(), &cliente_de_prueba())
        .await
        .unwrap();

    let doc = quotes.document_for(cotizacion_id).await.unwrap();

    // O ambiente 2 ficou zerado: não aparece, e o 3 mantém o rótulo.
    assert_eq!(doc.ambientes.len(), 2);
    assert_eq!(doc.ambientes[0].numero, 1);
    assert_eq!(doc.ambientes[1].numero, 3);
    assert_eq!(doc.ambientes[0].filas[0].producto, "Google Assistant Nest");
    assert_eq!(doc.ambientes[0].filas[0].total_linea, dec!(446152));
    assert_eq!(doc.total, doc.subtotal + doc.iva);
}

#[tokio::test]
async fn cotacoes_ficam_atribuidas_a_conta_que_confirmou() {
    let pool = seeded_pool().await;
    let quotes = quote_service(&pool);

    let mut builder = builder_do_catalogo(&pool).await;
    let nest = id_por_nombre(&builder, "Google Assistant Nest");
    let room = builder.add_room().unwrap();
    builder.set_cell(room, nest, 1).unwrap();

    quotes
        .commit(&mut builder, &admin_session(), &cliente_de_prueba())
        .await
        .unwrap();

    let do_admin = quotes.list_by_account("admin").await.unwrap();
    assert_eq!(do_admin.len(), 1);
    assert!(quotes.list_by_account("outro").await.unwrap().is_empty());
}
