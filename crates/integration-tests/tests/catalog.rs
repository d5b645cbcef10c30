//! Catalog client against a stub service.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::{Method, StatusCode};
use serde_json::json;
use storefront_checkout::catalog::{CatalogClient, CatalogError, parent_section};
use storefront_checkout::config::StorefrontConfig;
use storefront_checkout_core::{CategoryId, ProductId, StockId};
use storefront_checkout_integration_tests::{StubServer, fixtures, refused_address};

#[tokio::test]
async fn test_fetch_sections_parses_hierarchy() {
    let stub = StubServer::builder()
        .get("/sections/", StatusCode::OK, &fixtures::sections())
        .spawn()
        .await
        .unwrap();
    let catalog = CatalogClient::new(&stub.config()).unwrap();

    let sections = catalog.fetch_sections().await.unwrap();

    assert_eq!(sections.len(), 1);
    let section = &sections[0];
    assert_eq!(section.name, "Women");
    assert_eq!(section.featured[0].href, "/women/spring");

    let category = section.category(&CategoryId::new("cat1")).unwrap();
    assert_eq!(category.collections[0].name, "Sneakers");
    assert_eq!(parent_section(&sections, category).unwrap().id, section.id);
}

#[tokio::test]
async fn test_fetch_products_preserves_order() {
    let products = json!([
        fixtures::product("p2", "Trail", &[("s3", "40", 89_900, 1)]),
        fixtures::product("p1", "Runner", &[("s1", "42", 129_900, 0)]),
    ]);
    let stub = StubServer::builder()
        .get("/products/", StatusCode::OK, &products)
        .spawn()
        .await
        .unwrap();
    let catalog = CatalogClient::new(&stub.config()).unwrap();

    let products = catalog.fetch_products().await.unwrap();

    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p2", "p1"]);
    assert!(products[0].in_stock());
    assert!(!products[1].in_stock());
}

#[tokio::test]
async fn test_fetch_product_by_id() {
    let stub = StubServer::builder()
        .get(
            "/products/p1",
            StatusCode::OK,
            &fixtures::product("p1", "Runner", &[("s1", "42", 129_900, 4)]),
        )
        .spawn()
        .await
        .unwrap();
    let catalog = CatalogClient::new(&stub.config()).unwrap();

    let product = catalog.fetch_product(&ProductId::new("p1")).await.unwrap();

    assert_eq!(product.name, "Runner");
    assert_eq!(product.article_number, 100_200);
    assert_eq!(product.variant(&StockId::new("s1")).unwrap().quantity, 4);
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let stub = StubServer::builder().spawn().await.unwrap();
    let catalog = CatalogClient::new(&stub.config()).unwrap();

    let err = catalog
        .fetch_product(&ProductId::new("p9"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let stub = StubServer::builder()
        .get(
            "/products/",
            StatusCode::INTERNAL_SERVER_ERROR,
            &json!({"error": "boom"}),
        )
        .spawn()
        .await
        .unwrap();
    let catalog = CatalogClient::new(&stub.config()).unwrap();

    let err = catalog.fetch_products().await.unwrap_err();

    assert!(matches!(err, CatalogError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let stub = StubServer::builder()
        .route(
            Method::GET,
            "/sections/",
            StatusCode::OK,
            "{not json".to_string(),
        )
        .spawn()
        .await
        .unwrap();
    let catalog = CatalogClient::new(&stub.config()).unwrap();

    let err = catalog.fetch_sections().await.unwrap_err();

    assert!(matches!(err, CatalogError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let config = StorefrontConfig::with_api_address(&refused_address().await.unwrap()).unwrap();
    let catalog = CatalogClient::new(&config).unwrap();

    let err = catalog.fetch_sections().await.unwrap_err();

    assert!(err.is_transport());
}

#[tokio::test]
async fn test_responses_are_cached_until_invalidated() {
    let stub = StubServer::builder()
        .get(
            "/products/",
            StatusCode::OK,
            &json!([fixtures::product("p1", "Runner", &[])]),
        )
        .spawn()
        .await
        .unwrap();
    let catalog = CatalogClient::new(&stub.config()).unwrap();

    catalog.fetch_products().await.unwrap();
    catalog.fetch_products().await.unwrap();
    assert_eq!(stub.hits("/products/"), 1);

    catalog.invalidate_cache();
    catalog.fetch_products().await.unwrap();
    assert_eq!(stub.hits("/products/"), 2);
}

#[tokio::test]
async fn test_stock_ids_are_comma_joined() {
    let stub = StubServer::builder()
        .get(
            "/stock/s1,s2",
            StatusCode::OK,
            &json!([
                fixtures::hydrated_stock("s2", "p2", 50_000, 1),
                fixtures::hydrated_stock("s1", "p1", 129_900, 3),
            ]),
        )
        .spawn()
        .await
        .unwrap();
    let catalog = CatalogClient::new(&stub.config()).unwrap();

    let stocks = catalog
        .fetch_products_by_stock_id(&[StockId::new("s1"), StockId::new("s2")])
        .await
        .unwrap();

    assert_eq!(stocks.len(), 2);
    assert_eq!(stub.hits("/stock/s1,s2"), 1);
}

#[tokio::test]
async fn test_stock_is_not_cached() {
    let stub = StubServer::builder()
        .get(
            "/stock/s1",
            StatusCode::OK,
            &json!([fixtures::hydrated_stock("s1", "p1", 129_900, 3)]),
        )
        .spawn()
        .await
        .unwrap();
    let catalog = CatalogClient::new(&stub.config()).unwrap();
    let ids = [StockId::new("s1")];

    catalog.fetch_products_by_stock_id(&ids).await.unwrap();
    catalog.fetch_products_by_stock_id(&ids).await.unwrap();

    assert_eq!(stub.hits("/stock/s1"), 2);
}

#[tokio::test]
async fn test_hydrate_cart_matches_by_id_not_position() {
    // Service answers out of order and omits s9
    let stub = StubServer::builder()
        .get(
            "/stock/s1,s2,s9",
            StatusCode::OK,
            &json!([
                fixtures::hydrated_stock("s2", "p2", 50_000, 1),
                fixtures::hydrated_stock("s1", "p1", 129_900, 1),
            ]),
        )
        .spawn()
        .await
        .unwrap();
    let catalog = CatalogClient::new(&stub.config()).unwrap();
    let entries: Vec<StockId> = ["s1", "s2", "s1", "s9"].into_iter().map(StockId::from).collect();

    let cart = catalog.hydrate_cart(&entries).await.unwrap();

    let lines: Vec<(&str, u32)> = cart
        .lines
        .iter()
        .map(|l| (l.stock.id.as_str(), l.quantity))
        .collect();
    assert_eq!(lines, vec![("s1", 2), ("s2", 1)]);
    assert_eq!(cart.missing, vec![StockId::new("s9")]);
    assert_eq!(cart.over_stock().count(), 1);
    assert_eq!(
        cart.subtotal(stub.config().currency).unwrap().to_string(),
        "3098.00 SEK"
    );
}

#[derive(Debug, Clone, Copy)]
enum Accessor {
    Sections,
    Products,
    Product,
    Stock,
}

impl Accessor {
    const ALL: [Self; 4] = [Self::Sections, Self::Products, Self::Product, Self::Stock];

    const fn path(self) -> &'static str {
        match self {
            Self::Sections => "/sections/",
            Self::Products => "/products/",
            Self::Product => "/products/p1",
            Self::Stock => "/stock/s1,s2",
        }
    }

    async fn call(self, catalog: &CatalogClient) -> Result<(), CatalogError> {
        match self {
            Self::Sections => catalog.fetch_sections().await.map(drop),
            Self::Products => catalog.fetch_products().await.map(drop),
            Self::Product => catalog.fetch_product(&ProductId::new("p1")).await.map(drop),
            Self::Stock => catalog
                .fetch_products_by_stock_id(&[StockId::new("s1"), StockId::new("s2")])
                .await
                .map(drop),
        }
    }
}

#[tokio::test]
async fn test_every_accessor_fails_on_server_error() {
    for status in [StatusCode::INTERNAL_SERVER_ERROR, StatusCode::BAD_GATEWAY] {
        let mut builder = StubServer::builder();
        for accessor in Accessor::ALL {
            builder = builder.get(accessor.path(), status, &json!({"error": "boom"}));
        }
        let stub = builder.spawn().await.unwrap();
        let catalog = CatalogClient::new(&stub.config()).unwrap();

        for accessor in Accessor::ALL {
            let err = accessor.call(&catalog).await.unwrap_err();
            assert!(
                matches!(err, CatalogError::Status { status: code, .. } if code == status.as_u16()),
                "{accessor:?} on {status}: {err}"
            );
            assert!(!err.is_transport());
        }
    }
}

#[tokio::test]
async fn test_every_accessor_fails_when_unreachable() {
    let config = StorefrontConfig::with_api_address(&refused_address().await.unwrap()).unwrap();
    let catalog = CatalogClient::new(&config).unwrap();

    for accessor in Accessor::ALL {
        let err = accessor.call(&catalog).await.unwrap_err();
        assert!(err.is_transport(), "{accessor:?}: {err}");
    }
}

#[tokio::test]
async fn test_hydration_ignores_cached_product_quantities() {
    let stub = StubServer::builder()
        .get(
            "/products/p1",
            StatusCode::OK,
            &fixtures::product("p1", "Runner", &[("s1", "42", 129_900, 4)]),
        )
        .get(
            "/stock/s1",
            StatusCode::OK,
            &json!([fixtures::hydrated_stock("s1", "p1", 129_900, 1)]),
        )
        .spawn()
        .await
        .unwrap();
    let catalog = CatalogClient::new(&stub.config()).unwrap();
    let id = ProductId::new("p1");
    let entries = [StockId::new("s1"), StockId::new("s1")];

    for _ in 0..2 {
        let product = catalog.fetch_product(&id).await.unwrap();
        assert_eq!(product.variant(&StockId::new("s1")).unwrap().quantity, 4);

        let cart = catalog.hydrate_cart(&entries).await.unwrap();
        assert_eq!(cart.lines[0].stock.quantity, 1);
        assert_eq!(cart.over_stock().count(), 1);
    }

    assert_eq!(stub.hits("/products/p1"), 1);
    assert_eq!(stub.hits("/stock/s1"), 2);
}
