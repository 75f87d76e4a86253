//! Shared HTTP transport for the service clients
//!
//! Wraps a `reqwest::Client` bound to one base URL. Every call is tagged with
//! a metric name that appears in logs and in the request metrics, and every
//! non-2xx answer becomes [`ClientError::Status`].

use crate::context::{InstanceOptions, IoContext};
use crate::error::{ClientError, Result, UpstreamStatus};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

pub const OPERATION_ID_HEADER: &str = "x-vtex-operation-id";
pub const VTEX_AUTH_HEADER: &str = "VtexIdclientAutCookie";

/// Query parameters for calls that send none
pub const NO_QUERY: &[(&str, &str)] = &[];

#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    operation_id: String,
    http: reqwest::Client,
}

impl HttpClient {
    /// Build a transport for `base_url`
    ///
    /// The context's operation id, the instance option headers and `headers`
    /// are sent with every request.
    ///
    /// # Errors
    /// Returns `ClientError::Configuration` for a malformed base URL or header,
    /// and `ClientError::Transport` if the underlying client cannot be built
    pub fn new(
        base_url: &str,
        context: &IoContext,
        options: &InstanceOptions,
        mut headers: HeaderMap,
    ) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Configuration(format!(
                "Invalid base URL: {base_url}"
            )));
        }

        let operation_id = context.operation_id().to_string();
        headers.insert(
            HeaderName::from_static(OPERATION_ID_HEADER),
            header_value(&operation_id)?,
        );
        for (name, value) in options.headers() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::Configuration(format!("Invalid header name {name}: {e}")))?;
            headers.insert(name, header_value(value)?);
        }

        let timeout = options
            .timeout()
            .unwrap_or_else(|| context.http().timeout());

        let http = reqwest::Client::builder()
            .user_agent(context.http().user_agent.clone())
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url,
            operation_id,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` with `query` and decode the JSON answer
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    pub async fn get<T, Q>(&self, path: &str, query: &Q, metric: &'static str) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        let request = self.http.get(&url).query(query);
        self.execute(request, "GET", &url, metric).await
    }

    /// POST `body` as JSON to `path` and decode the JSON answer
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    pub async fn post<T, B>(&self, path: &str, body: &B, metric: &'static str) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let request = self.http.post(&url).json(body);
        self.execute(request, "POST", &url, metric).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: &'static str,
        url: &str,
        metric: &'static str,
    ) -> Result<T> {
        tracing::debug!(
            metric,
            method,
            url,
            operation_id = %self.operation_id,
            "Sending upstream request"
        );

        let started = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let elapsed = started.elapsed();
                record_request(metric, "error", elapsed);
                tracing::warn!(
                    metric,
                    method,
                    url,
                    elapsed_ms = millis(elapsed),
                    error = %e,
                    "Upstream request failed"
                );
                return Err(e.into());
            }
        };

        let status = response.status();
        let body = response.text().await?;
        let elapsed = started.elapsed();
        record_request(metric, status_class(status), elapsed);

        if !status.is_success() {
            tracing::warn!(
                metric,
                method,
                url,
                status = status.as_u16(),
                elapsed_ms = millis(elapsed),
                "Upstream rejected request"
            );
            return Err(ClientError::Status(UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            }));
        }

        tracing::info!(
            metric,
            method,
            url,
            status = status.as_u16(),
            elapsed_ms = millis(elapsed),
            "Upstream request completed"
        );

        Ok(serde_json::from_str(&body)?)
    }
}

/// Headers for VTEX IO services, carrying the context's auth token if any
///
/// # Errors
/// Returns `ClientError::Configuration` if the token is not a valid header value
pub fn vtex_headers(context: &IoContext) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(token) = context.auth_token() {
        let name = HeaderName::from_bytes(VTEX_AUTH_HEADER.as_bytes())
            .map_err(|e| ClientError::Configuration(e.to_string()))?;
        headers.insert(name, header_value(token)?);
    }
    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ClientError::Configuration(format!("Invalid header value: {e}")))
}

fn record_request(metric: &'static str, outcome: &'static str, elapsed: Duration) {
    metrics::counter!("biggy_client_requests_total", "metric" => metric, "outcome" => outcome)
        .increment(1);
    metrics::histogram!("biggy_client_request_duration_seconds", "metric" => metric)
        .record(elapsed.as_secs_f64());
}

fn status_class(status: StatusCode) -> &'static str {
    if status.is_success() {
        "2xx"
    } else if status.is_client_error() {
        "4xx"
    } else if status.is_server_error() {
        "5xx"
    } else {
        "other"
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str, context: &IoContext) -> HttpClient {
        HttpClient::new(base_url, context, &InstanceOptions::default(), HeaderMap::new()).unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let ctx = IoContext::new("storetheme", "master");
        let client = client_for("http://search.test/v1/", &ctx);

        assert_eq!(client.base_url(), "http://search.test/v1");
        assert_eq!(
            client.url("/storetheme/api/top_searches"),
            "http://search.test/v1/storetheme/api/top_searches"
        );
    }

    #[test]
    fn test_rejects_base_url_without_scheme() {
        let ctx = IoContext::new("storetheme", "master");
        let err = HttpClient::new("search.test", &ctx, &InstanceOptions::default(), HeaderMap::new())
            .unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn test_rejects_invalid_option_header() {
        let ctx = IoContext::new("storetheme", "master");
        let options = InstanceOptions::new().with_header("bad header", "x");
        let err = HttpClient::new("http://search.test", &ctx, &options, HeaderMap::new())
            .unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn test_vtex_headers_only_with_token() {
        let anonymous = IoContext::new("storetheme", "master");
        assert!(vtex_headers(&anonymous).unwrap().is_empty());

        let authed = anonymous.with_auth_token("secret");
        let headers = vtex_headers(&authed).unwrap();
        assert_eq!(headers.get("vtexidclientautcookie").unwrap(), "secret");
    }

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(StatusCode::OK), "2xx");
        assert_eq!(status_class(StatusCode::NOT_FOUND), "4xx");
        assert_eq!(status_class(StatusCode::BAD_GATEWAY), "5xx");
    }

    #[tokio::test]
    async fn test_get_sends_operation_id_and_query() {
        let server = MockServer::start().await;
        let ctx = IoContext::new("storetheme", "master");

        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("term", "shoe"))
            .and(header(OPERATION_ID_HEADER, ctx.operation_id().to_string().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), &ctx);
        let body: serde_json::Value = client
            .get("items", &[("term", "shoe")], "items")
            .await
            .unwrap();

        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let ctx = IoContext::new("storetheme", "master");
        let client = client_for(&server.uri(), &ctx);
        let err = client
            .post::<serde_json::Value, _>("items", &serde_json::json!({}), "items")
            .await
            .unwrap_err();

        match err {
            ClientError::Status(upstream) => {
                assert_eq!(upstream.status, 502);
                assert_eq!(upstream.body, "bad gateway");
                assert!(upstream.url.ends_with("/items"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let ctx = IoContext::new("storetheme", "master");
        let client = client_for(&server.uri(), &ctx);
        let err = client
            .get::<serde_json::Value, _>("items", NO_QUERY, "items")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Parse(_)));
    }
}
