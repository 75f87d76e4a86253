//! VTEX rewriter client, resolving internal routes over GraphQL

use crate::context::{InstanceOptions, IoContext};
use crate::error::{ClientError, Result};
use crate::http::{HttpClient, vtex_headers};
use crate::registry::{ServiceClient, ServiceName};
use serde::{Deserialize, Serialize};
use serde_json::json;

const GRAPHQL_PATH: &str = "_v/graphql";

const INTERNAL_ROUTE_QUERY: &str = "query InternalRoute($path: String!) {
  internal {
    get(path: $path) {
      from
      declarer
      type
      id
      binding
      resolveAs
    }
  }
}";

#[derive(Debug, Clone)]
pub struct RewriterClient {
    http: HttpClient,
}

/// A route the rewriter maps to an internal page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalRoute {
    pub from: Option<String>,
    pub declarer: Option<String>,
    #[serde(rename = "type")]
    pub route_type: Option<String>,
    pub id: Option<String>,
    pub binding: Option<String>,
    pub resolve_as: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct InternalRouteData {
    internal: Option<InternalRouteQuery>,
}

#[derive(Debug, Deserialize)]
struct InternalRouteQuery {
    get: Option<InternalRoute>,
}

impl RewriterClient {
    /// # Errors
    /// Returns `ClientError::Configuration` for a malformed endpoint or token
    pub fn new(context: &IoContext, options: &InstanceOptions) -> Result<Self> {
        let base_url = context.endpoint(&context.services().rewriter.base_url);
        let http = HttpClient::new(&base_url, context, options, vtex_headers(context)?)?;
        Ok(Self { http })
    }

    /// Internal route registered for `path`, if any
    ///
    /// # Errors
    /// Returns transport, status or parse errors, and `ClientError::GraphQl`
    /// when the response carries GraphQL errors
    #[tracing::instrument(skip(self))]
    pub async fn internal_route(&self, path: &str) -> Result<Option<InternalRoute>> {
        let body = json!({
            "query": INTERNAL_ROUTE_QUERY,
            "variables": { "path": path },
        });

        let response: GraphQlResponse<InternalRouteData> = self
            .http
            .post(GRAPHQL_PATH, &body, "rewriter-get-internal")
            .await?;

        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(ClientError::GraphQl(messages.join("; ")));
        }

        Ok(response
            .data
            .and_then(|data| data.internal)
            .and_then(|internal| internal.get))
    }
}

impl ServiceClient for RewriterClient {
    const NAME: ServiceName = ServiceName::Rewriter;

    fn new(context: &IoContext, options: &InstanceOptions) -> Result<Self> {
        Self::new(context, options)
    }
}
