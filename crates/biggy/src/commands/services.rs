use biggy_clients::{AlgoliaQuery, Clients};
use serde_json::Value;

pub async fn algolia(clients: &Clients, index: &str, query: &AlgoliaQuery) -> anyhow::Result<Value> {
    let result = clients.algolia()?.query(index, query).await?;
    Ok(serde_json::to_value(result)?)
}

pub async fn order_form(clients: &Clients, id: Option<&str>) -> anyhow::Result<Value> {
    Ok(clients.checkout()?.order_form(id).await?)
}

pub async fn product(clients: &Clients, slug: &str) -> anyhow::Result<Value> {
    let product = clients.catalog()?.product_by_slug(slug).await?;
    Ok(product.unwrap_or(Value::Null))
}

pub async fn category_tree(clients: &Clients, levels: u8) -> anyhow::Result<Value> {
    let tree = clients.catalog()?.category_tree(levels).await?;
    Ok(serde_json::to_value(tree)?)
}

pub async fn route(clients: &Clients, path: &str) -> anyhow::Result<Value> {
    let route = clients.rewriter()?.internal_route(path).await?;
    Ok(serde_json::to_value(route)?)
}
