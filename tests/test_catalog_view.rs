use recipe_catalog::{
    load_and_render, CatalogConfig, RecipeCatalog, RecipeFetcher, RetryConfig, ViewState,
};

fn fast_config(endpoint: String) -> CatalogConfig {
    CatalogConfig {
        endpoint,
        timeout: 5,
        retry: RetryConfig {
            attempts: 3,
            base_delay_ms: 10,
        },
    }
}

#[tokio::test]
async fn test_catalog_renders_cards_from_server() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recepies")
        .with_status(200)
        .with_body(
            r#"{
                "Pumpkin Soup": {
                    "title": "Vegetarian Cream of Pumpkin Soup",
                    "ingredients": ["1 kg Pumpkin", "1 Onion"],
                    "instructions": "Blend the soup until smooth."
                },
                "Untitled": { "ingredients": "see card" }
            }"#,
        )
        .create_async()
        .await;

    let endpoint = format!("{}/recepies", server.url());
    let view = load_and_render(&fast_config(endpoint.clone())).await.unwrap();
    let text = view.to_text();

    assert!(text.contains("Recipe Catalog"), "{text}");
    assert!(text.contains(&endpoint), "{text}");
    assert!(text.contains("[ Refresh Recipes ]"), "{text}");
    assert!(text.contains("Vegetarian Cream of Pumpkin Soup"), "{text}");
    assert!(text.contains("- 1 kg Pumpkin"), "{text}");
    assert!(text.contains("Untitled"), "{text}");
    assert!(text.contains("No ingredient information."), "{text}");
    assert!(text.contains("No instructions available."), "{text}");
    assert_eq!(view.find_all("card").len(), 2);
}

#[tokio::test]
async fn test_catalog_shows_error_after_retries() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/recepies")
        .with_status(503)
        .expect(3)
        .create_async()
        .await;

    let fetcher = RecipeFetcher::from_config(&fast_config(format!("{}/recepies", server.url())))
        .unwrap();
    let catalog = RecipeCatalog::new(fetcher);
    let _load = catalog.mount();

    let state = catalog.settled().await;
    mock.assert_async().await;

    match state {
        ViewState::Errored(message) => {
            assert!(message.contains("3 attempts"), "{message}");
            assert!(message.contains("status: 503"), "{message}");
        }
        other => panic!("Expected Errored, got {other:?}"),
    }
    let html = catalog.render().to_html();
    assert!(html.contains("role=\"alert\""), "{html}");
    assert!(!html.contains("disabled"), "{html}");
}

#[tokio::test]
async fn test_refresh_after_error_loads_again() {
    let mut server = mockito::Server::new_async().await;
    let failing = server
        .mock("GET", "/recepies")
        .with_status(500)
        .expect(3)
        .create_async()
        .await;

    let fetcher = RecipeFetcher::from_config(&fast_config(format!("{}/recepies", server.url())))
        .unwrap();
    let catalog = RecipeCatalog::new(fetcher);
    if let Some(load) = catalog.mount() {
        load.await.unwrap();
    }
    failing.assert_async().await;
    assert!(matches!(catalog.state(), ViewState::Errored(_)));

    failing.remove_async().await;
    let _ok = server
        .mock("GET", "/recepies")
        .with_status(200)
        .with_body(r#"{"recipe_count": 5, "status": "OK"}"#)
        .create_async()
        .await;

    let load = catalog.refresh().expect("refresh is accepted once the load settled");
    assert_eq!(catalog.state(), ViewState::Loading);
    assert!(catalog.refresh().is_none());
    load.await.unwrap();

    match catalog.state() {
        ViewState::Loaded { recipes, advisory } => {
            assert_eq!(
                recipes.names().collect::<Vec<_>>(),
                ["Caprese Salad", "Chicken Curry"]
            );
            assert!(advisory.is_none());
        }
        other => panic!("Expected Loaded, got {other:?}"),
    }
}
