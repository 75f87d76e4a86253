//! Command handlers
//!
//! Each handler resolves its client through the registry, makes the calls and
//! returns the JSON document printed by `main`.

mod search;
mod services;

use crate::cli::Command;
use biggy_clients::Clients;
use serde_json::Value;
use std::time::Instant;

/// Run one command against the clients of the current store
///
/// # Errors
/// Returns client construction and upstream errors
pub async fn run(command: Command, clients: &Clients) -> anyhow::Result<Value> {
    let name = command_name(&command);
    let started = Instant::now();

    let result = match command {
        Command::TopSearches => search::top_searches(clients).await,
        Command::SuggestionSearches { term } => search::suggestion_searches(clients, &term).await,
        Command::SuggestionProducts(args) => search::suggestion_products(clients, args.into()).await,
        Command::Metadata(args) => search::metadata(clients, args.into()).await,
        Command::Facets(args) => search::facets(clients, args.into()).await,
        Command::Products(args) => search::products(clients, args.into()).await,
        Command::Search(args) => search::full_search(clients, args.into()).await,
        Command::Banners(args) => search::banners(clients, args.into()).await,
        Command::Redirect(args) => search::redirect(clients, args.into()).await,
        Command::Correction { full_text } => search::correction(clients, &full_text).await,
        Command::Suggestions { full_text } => search::suggestions(clients, &full_text).await,
        Command::Autocomplete { full_text } => search::autocomplete(clients, &full_text).await,
        Command::Algolia {
            index,
            query,
            page,
            hits_per_page,
            filters,
        } => {
            let query = biggy_clients::AlgoliaQuery {
                query,
                page,
                hits_per_page,
                filters,
            };
            services::algolia(clients, &index, &query).await
        }
        Command::OrderForm { id } => services::order_form(clients, id.as_deref()).await,
        Command::Product { slug } => services::product(clients, &slug).await,
        Command::CategoryTree { levels } => services::category_tree(clients, levels).await,
        Command::Route { path } => services::route(clients, &path).await,
    };

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    match &result {
        Ok(_) => tracing::info!(
            target: "biggy::command",
            command = name,
            account = clients.context().account(),
            elapsed_ms,
            "Command completed"
        ),
        Err(e) => tracing::error!(
            target: "biggy::command",
            command = name,
            account = clients.context().account(),
            elapsed_ms,
            error = %e,
            "Command failed"
        ),
    }

    result
}

const fn command_name(command: &Command) -> &'static str {
    match command {
        Command::TopSearches => "top-searches",
        Command::SuggestionSearches { .. } => "suggestion-searches",
        Command::SuggestionProducts(_) => "suggestion-products",
        Command::Metadata(_) => "metadata",
        Command::Facets(_) => "facets",
        Command::Products(_) => "products",
        Command::Search(_) => "search",
        Command::Banners(_) => "banners",
        Command::Redirect(_) => "redirect",
        Command::Correction { .. } => "correction",
        Command::Suggestions { .. } => "suggestions",
        Command::Autocomplete { .. } => "autocomplete",
        Command::Algolia { .. } => "algolia",
        Command::OrderForm { .. } => "order-form",
        Command::Product { .. } => "product",
        Command::CategoryTree { .. } => "category-tree",
        Command::Route { .. } => "route",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SearchCommand;
    use biggy_clients::IoContext;
    use biggy_config::ServicesConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn clients_for(server: &MockServer) -> Clients {
        let mut services = ServicesConfig::from_env();
        services.search.base_url = server.uri();
        services.catalog.base_url = server.uri();
        Clients::new(IoContext::new("storetheme", "master").with_services(services))
    }

    #[tokio::test]
    async fn test_search_combines_three_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/storetheme/api/split/metadata_search/shoes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "Shoes",
                "description": "All shoes"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/storetheme/api/split/attribute_search/shoes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"attributes": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/storetheme/api/split/product_search/shoes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": [1, 2]})))
            .mount(&server)
            .await;

        let command = Command::Search(SearchCommand {
            attribute_path: "shoes".to_string(),
            ..SearchCommand::default()
        });
        let output = run(command, &clients_for(&server)).await.unwrap();

        assert_eq!(
            output,
            json!({
                "metadata": {"title": "Shoes", "metaTagDescription": "All shoes"},
                "facets": {"attributes": []},
                "products": {"products": [1, 2]}
            })
        );
    }

    #[tokio::test]
    async fn test_search_fails_when_any_endpoint_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/storetheme/api/split/product_search/shoes"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let command = Command::Search(SearchCommand {
            attribute_path: "shoes".to_string(),
            ..SearchCommand::default()
        });

        assert!(run(command, &clients_for(&server)).await.is_err());
    }

    #[tokio::test]
    async fn test_product_prints_null_when_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/catalog_system/pub/products/search/nothing/p"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let command = Command::Product {
            slug: "nothing".to_string(),
        };
        let output = run(command, &clients_for(&server)).await.unwrap();
        assert_eq!(output, Value::Null);
    }

    #[test]
    fn test_command_names_match_subcommands() {
        assert_eq!(command_name(&Command::TopSearches), "top-searches");
        assert_eq!(
            command_name(&Command::CategoryTree { levels: 1 }),
            "category-tree"
        );
    }
}
