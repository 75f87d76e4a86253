use biggy_clients::{Clients, SearchRequestArgs, SuggestionProductsArgs};
use serde_json::{Value, json};

pub async fn top_searches(clients: &Clients) -> anyhow::Result<Value> {
    Ok(clients.search()?.top_searches().await?)
}

pub async fn suggestion_searches(clients: &Clients, term: &str) -> anyhow::Result<Value> {
    Ok(clients.search()?.suggestion_searches(term).await?)
}

pub async fn suggestion_products(
    clients: &Clients,
    args: SuggestionProductsArgs,
) -> anyhow::Result<Value> {
    Ok(clients.search()?.suggestion_products(&args).await?)
}

pub async fn metadata(clients: &Clients, args: SearchRequestArgs) -> anyhow::Result<Value> {
    let metadata = clients.search()?.search_metadata(&args).await?;
    Ok(serde_json::to_value(metadata)?)
}

pub async fn facets(clients: &Clients, args: SearchRequestArgs) -> anyhow::Result<Value> {
    Ok(clients.search()?.facets(&args).await?)
}

pub async fn products(clients: &Clients, args: SearchRequestArgs) -> anyhow::Result<Value> {
    Ok(clients.search()?.product_search(&args).await?)
}

/// Metadata, facets and products of one search page, requested concurrently
///
/// The first failure fails the whole command.
pub async fn full_search(clients: &Clients, args: SearchRequestArgs) -> anyhow::Result<Value> {
    let search = clients.search()?;
    let (metadata, facets, products) = futures::try_join!(
        search.search_metadata(&args),
        search.facets(&args),
        search.product_search(&args),
    )?;

    Ok(json!({
        "metadata": metadata,
        "facets": facets,
        "products": products,
    }))
}

pub async fn banners(clients: &Clients, args: SearchRequestArgs) -> anyhow::Result<Value> {
    let banners = clients.search()?.banners(&args).await?;
    Ok(serde_json::to_value(banners)?)
}

pub async fn redirect(clients: &Clients, args: SearchRequestArgs) -> anyhow::Result<Value> {
    let redirect = clients.search()?.redirect(&args).await?;
    Ok(serde_json::to_value(redirect)?)
}

pub async fn correction(clients: &Clients, full_text: &str) -> anyhow::Result<Value> {
    let correction = clients.search()?.correction(full_text).await?;
    Ok(serde_json::to_value(correction)?)
}

pub async fn suggestions(clients: &Clients, full_text: &str) -> anyhow::Result<Value> {
    let suggestion = clients.search()?.search_suggestions(full_text).await?;
    Ok(suggestion.unwrap_or(Value::Null))
}

pub async fn autocomplete(clients: &Clients, full_text: &str) -> anyhow::Result<Value> {
    Ok(clients
        .search()?
        .autocomplete_search_suggestions(full_text)
        .await?)
}
