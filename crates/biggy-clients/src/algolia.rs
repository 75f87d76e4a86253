//! Algolia index query client

use crate::context::{InstanceOptions, IoContext};
use crate::error::{ClientError, Result};
use crate::http::HttpClient;
use crate::registry::{ServiceClient, ServiceName};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const APP_ID_HEADER: &str = "x-algolia-application-id";
const API_KEY_HEADER: &str = "x-algolia-api-key";

#[derive(Debug, Clone)]
pub struct AlgoliaClient {
    http: HttpClient,
}

/// Search parameters for one index query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlgoliaQuery {
    pub query: String,
    pub page: Option<u32>,
    pub hits_per_page: Option<u32>,
    pub filters: Option<String>,
}

impl AlgoliaQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// URL-encoded parameter string Algolia expects in the `params` field
    pub fn to_params(&self) -> String {
        let mut params = vec![format!("query={}", urlencoding::encode(&self.query))];
        if let Some(page) = self.page {
            params.push(format!("page={page}"));
        }
        if let Some(hits_per_page) = self.hits_per_page {
            params.push(format!("hitsPerPage={hits_per_page}"));
        }
        if let Some(filters) = &self.filters {
            params.push(format!("filters={}", urlencoding::encode(filters)));
        }
        params.join("&")
    }
}

#[derive(Debug, Serialize)]
struct QueryBody {
    params: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgoliaQueryResult {
    #[serde(default)]
    pub hits: Vec<Value>,
    pub nb_hits: Option<u64>,
    pub page: Option<u32>,
    pub nb_pages: Option<u32>,
    pub query: Option<String>,
}

impl AlgoliaClient {
    /// # Errors
    /// Returns `ClientError::Configuration` when the application id or API key
    /// is missing
    pub fn new(context: &IoContext, options: &InstanceOptions) -> Result<Self> {
        let config = &context.services().algolia;
        let app_id = required(config.app_id.as_deref(), "algolia app_id")?;
        let api_key = required(config.api_key.as_deref(), "algolia api_key")?;

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(APP_ID_HEADER), header(app_id)?);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), header(api_key)?);

        let base_url = context.endpoint(&config.base_url.replace("{app_id}", &app_id.to_lowercase()));
        let http = HttpClient::new(&base_url, context, options, headers)?;

        Ok(Self { http })
    }

    /// Query one index
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self, query), fields(query = %query.query))]
    pub async fn query(&self, index: &str, query: &AlgoliaQuery) -> Result<AlgoliaQueryResult> {
        let path = format!("1/indexes/{}/query", urlencoding::encode(index));
        let body = QueryBody {
            params: query.to_params(),
        };

        self.http.post(&path, &body, "algolia-query").await
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ClientError::Configuration(format!("{field} is not configured")))
}

fn header(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ClientError::Configuration(format!("Invalid Algolia credential: {e}")))
}

impl ServiceClient for AlgoliaClient {
    const NAME: ServiceName = ServiceName::Algolia;

    fn new(context: &IoContext, options: &InstanceOptions) -> Result<Self> {
        Self::new(context, options)
    }
}
