//! Biggy search client against a mocked search API

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]


use biggy_clients::{ClientError, IndexingType, SearchRequestArgs, SuggestionProductsArgs};
use serde_json::json;
use test_utils::{TestResult, clients_for, single_query};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_top_searches_returns_body_unchanged() -> TestResult {
    let server = MockServer::start().await;
    let body = json!({"searches": [{"term": "shoes", "count": 12}]});

    Mock::given(method("GET"))
        .and(path("/storetheme/api/top_searches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let clients = clients_for(&server);
    let result = clients.search()?.top_searches().await?;

    assert_eq!(result, body);
    Ok(())
}

#[tokio::test]
async fn test_suggestion_searches_sends_term() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storetheme/api/suggestion_searches"))
        .and(query_param("term", "sho"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"searches": []})))
        .expect(1)
        .mount(&server)
        .await;

    let clients = clients_for(&server);
    clients.search()?.suggestion_searches("sho").await?;
    Ok(())
}

#[tokio::test]
async fn test_autocomplete_uses_suggestion_searches_endpoint() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storetheme/api/suggestion_searches"))
        .and(query_param("term", "red sh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"searches": ["red shoes"]})))
        .expect(1)
        .mount(&server)
        .await;

    let clients = clients_for(&server);
    let result = clients
        .search()?
        .autocomplete_search_suggestions("red sh")
        .await?;

    assert_eq!(result["searches"][0], "red shoes");
    Ok(())
}

#[tokio::test]
async fn test_suggestion_products_posts_ordered_attributes() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storetheme/api/suggestion_products"))
        .and(body_json(json!({
            "term": "shirt",
            "attributes": [
                {"key": "color", "value": "red"},
                {"key": "trade-policy", "value": "2"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .expect(1)
        .mount(&server)
        .await;

    let args = SuggestionProductsArgs {
        term: "shirt".to_string(),
        attribute_key: Some("color".to_string()),
        attribute_value: Some("red".to_string()),
        trade_policy: Some("2".to_string()),
        indexing_type: Some(IndexingType::Catalog),
    };

    let clients = clients_for(&server);
    clients.search()?.suggestion_products(&args).await?;
    Ok(())
}

#[tokio::test]
async fn test_search_metadata_projects_title_and_description() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/storetheme/api/split/metadata_search/shoes/trade-policy/1",
        ))
        .and(query_param("query", "runner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Running shoes",
            "description": "Shoes for running",
            "total": 130
        })))
        .mount(&server)
        .await;

    let args = SearchRequestArgs::new("shoes")
        .with_trade_policy("1")
        .with_indexing_type(IndexingType::Catalog)
        .with_query("runner");

    let clients = clients_for(&server);
    let metadata = clients.search()?.search_metadata(&args).await?;

    assert_eq!(metadata.title, Some(json!("Running shoes")));
    assert_eq!(
        metadata.meta_tag_description,
        Some(json!("Shoes for running"))
    );
    Ok(())
}

#[tokio::test]
async fn test_product_search_omits_leap_when_false() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storetheme/api/split/product_search/shoes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;

    let args = SearchRequestArgs::new("shoes")
        .with_trade_policy("1")
        .with_indexing_type(IndexingType::Xml)
        .with_query("runner")
        .with_page(2)
        .with_count(24);

    let clients = clients_for(&server);
    clients.search()?.product_search(&args).await?;

    let query = single_query(&server).await.unwrap_or_default();
    assert!(query.contains("query=runner"), "{query}");
    assert!(query.contains("page=2"), "{query}");
    assert!(query.contains("count=24"), "{query}");
    assert!(!query.contains("bgy_leap"), "{query}");
    assert!(!query.contains("sort"), "{query}");
    Ok(())
}

#[tokio::test]
async fn test_facets_sends_leap_when_true() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storetheme/api/split/attribute_search/shoes"))
        .and(query_param("bgy_leap", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"attributes": []})))
        .expect(1)
        .mount(&server)
        .await;

    let args = SearchRequestArgs::new("shoes").with_leap(true);

    let clients = clients_for(&server);
    let facets = clients.search()?.facets(&args).await?;

    assert_eq!(facets, json!({"attributes": []}));
    Ok(())
}

#[tokio::test]
async fn test_banners_and_redirect_use_full_text() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storetheme/api/split/banner_search/sale"))
        .and(query_param("query", "summer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "banners": [{"id": "b1", "html": "<b>Sale</b>"}],
            "total": 1
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/storetheme/api/split/redirect_search/sale"))
        .and(query_param("query", "summer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"redirect": "/summer-sale"})))
        .mount(&server)
        .await;

    let args = SearchRequestArgs::new("sale").with_full_text("summer");

    let clients = clients_for(&server);
    let search = clients.search()?;
    let banners = search.banners(&args).await?;
    let redirect = search.redirect(&args).await?;

    assert_eq!(banners.banners, Some(json!([{"id": "b1", "html": "<b>Sale</b>"}])));
    assert_eq!(redirect.url, Some(json!("/summer-sale")));
    Ok(())
}

#[tokio::test]
async fn test_missing_fields_project_to_absent() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storetheme/api/split/redirect_search/sale"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let clients = clients_for(&server);
    let redirect = clients
        .search()?
        .redirect(&SearchRequestArgs::new("sale"))
        .await?;

    assert_eq!(redirect.url, None);
    Ok(())
}

#[tokio::test]
async fn test_structured_metadata_and_redirect_are_not_parse_errors() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storetheme/api/split/metadata_search/shoes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": {"default": "Shoes"},
            "description": null
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/storetheme/api/split/redirect_search/shoes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"redirect": {"url": "/shoes-sale", "status": 302}})),
        )
        .mount(&server)
        .await;

    let clients = clients_for(&server);
    let search = clients.search()?;
    let args = SearchRequestArgs::new("shoes");
    let metadata = search.search_metadata(&args).await?;
    let redirect = search.redirect(&args).await?;

    assert_eq!(metadata.title, Some(json!({"default": "Shoes"})));
    assert_eq!(metadata.meta_tag_description, None);
    assert_eq!(
        redirect.url,
        Some(json!({"url": "/shoes-sale", "status": 302}))
    );
    Ok(())
}

#[tokio::test]
async fn test_correction_and_suggestions() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storetheme/api/split/correction_search/"))
        .and(query_param("query", "shoos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "correction": {"text": "shoes", "correction": true}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/storetheme/api/split/suggestion_search/"))
        .and(query_param("query", "shoos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggestion": {"searches": [{"term": "shoes"}]}
        })))
        .mount(&server)
        .await;

    let clients = clients_for(&server);
    let search = clients.search()?;

    let correction = search.correction("shoos").await?;
    assert_eq!(
        correction.correction,
        Some(json!({"text": "shoes", "correction": true}))
    );

    let suggestions = search.search_suggestions("shoos").await?;
    assert_eq!(suggestions, Some(json!({"searches": [{"term": "shoes"}]})));
    Ok(())
}

#[tokio::test]
async fn test_upstream_failure_propagates() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let clients = clients_for(&server);
    let err = clients
        .search()?
        .product_search(&SearchRequestArgs::new("shoes"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(matches!(err, ClientError::Status(ref upstream) if upstream.body == "boom"));
    Ok(())
}
