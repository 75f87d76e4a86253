//! VTEX catalog client

use crate::context::{InstanceOptions, IoContext};
use crate::error::Result;
use crate::http::{HttpClient, NO_QUERY, vtex_headers};
use crate::registry::{ServiceClient, ServiceName};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: HttpClient,
}

/// One node of the category tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeNode {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub has_children: Option<bool>,
    #[serde(default)]
    pub children: Vec<CategoryTreeNode>,
}

impl CatalogClient {
    /// # Errors
    /// Returns `ClientError::Configuration` for a malformed endpoint or token
    pub fn new(context: &IoContext, options: &InstanceOptions) -> Result<Self> {
        let base_url = context.endpoint(&context.services().catalog.base_url);
        let http = HttpClient::new(&base_url, context, options, vtex_headers(context)?)?;
        Ok(Self { http })
    }

    /// Product whose link text is `slug`, if there is one
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self))]
    pub async fn product_by_slug(&self, slug: &str) -> Result<Option<Value>> {
        let path = format!(
            "api/catalog_system/pub/products/search/{}/p",
            urlencoding::encode(slug)
        );
        let products: Vec<Value> = self.http.get(&path, NO_QUERY, "catalog-product").await?;
        Ok(products.into_iter().next())
    }

    /// Category tree down to `levels` levels
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self))]
    pub async fn category_tree(&self, levels: u8) -> Result<Vec<CategoryTreeNode>> {
        let path = format!("api/catalog_system/pub/category/tree/{levels}");
        self.http.get(&path, NO_QUERY, "catalog-category-tree").await
    }
}

impl ServiceClient for CatalogClient {
    const NAME: ServiceName = ServiceName::Catalog;

    fn new(context: &IoContext, options: &InstanceOptions) -> Result<Self> {
        Self::new(context, options)
    }
}
