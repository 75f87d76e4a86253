use super::path::{FullTextParams, SuggestionProductsBody, build_path, search_params};
use super::types::{
    BannerSearchBody, Banners, Correction, CorrectionSearchBody, MetadataSearchBody, Redirect,
    RedirectSearchBody, SearchMetadata, SearchRequestArgs, SuggestionProductsArgs,
    SuggestionSearchBody,
};
use crate::context::{InstanceOptions, IoContext};
use crate::error::Result;
use crate::http::{HttpClient, NO_QUERY};
use crate::registry::{ServiceClient, ServiceName};
use reqwest::header::HeaderMap;
use serde_json::Value;

/// Client for the Biggy search API of one store
///
/// Every path is prefixed with the store (the context account). Responses of
/// the split endpoints are projected to the fields callers consume; the other
/// endpoints return the upstream body unchanged.
#[derive(Debug, Clone)]
pub struct BiggySearchClient {
    http: HttpClient,
    store: String,
}

impl BiggySearchClient {
    /// Construct a client for the context's store
    ///
    /// No request is made until a method is called.
    ///
    /// # Errors
    /// Returns `ClientError::Configuration` when the context has no account or
    /// the search endpoint is malformed
    pub fn new(context: &IoContext, options: &InstanceOptions) -> Result<Self> {
        let store = context.require_account()?.to_string();
        let base_url = context.endpoint(&context.services().search.base_url);
        let http = HttpClient::new(&base_url, context, options, HeaderMap::new())?;

        Ok(Self { http, store })
    }

    pub fn store(&self) -> &str {
        &self.store
    }

    /// Most searched terms of the store
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self), fields(store = %self.store))]
    pub async fn top_searches(&self) -> Result<Value> {
        self.http
            .get(&format!("{}/api/top_searches", self.store), NO_QUERY, "top-searches")
            .await
    }

    /// Search terms that complete `term`
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self), fields(store = %self.store))]
    pub async fn suggestion_searches(&self, term: &str) -> Result<Value> {
        self.http
            .get(
                &format!("{}/api/suggestion_searches", self.store),
                &[("term", term)],
                "suggestion-searches",
            )
            .await
    }

    /// Products matching `args.term`, narrowed by the attribute filters
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self, args), fields(store = %self.store, term = %args.term))]
    pub async fn suggestion_products(&self, args: &SuggestionProductsArgs) -> Result<Value> {
        let body = SuggestionProductsBody::from(args);
        tracing::debug!(attributes = body.attributes.len(), "Requesting product suggestions");

        self.http
            .post(
                &format!("{}/api/suggestion_products", self.store),
                &body,
                "suggestion-products",
            )
            .await
    }

    /// Page title and meta description for a search
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self, args), fields(store = %self.store, attribute_path = %args.attribute_path))]
    pub async fn search_metadata(&self, args: &SearchRequestArgs) -> Result<SearchMetadata> {
        let body: MetadataSearchBody = self
            .split_search("metadata_search", args, &search_params(args))
            .await?;
        Ok(body.into())
    }

    /// Facets (attributes) available for a search
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self, args), fields(store = %self.store, attribute_path = %args.attribute_path))]
    pub async fn facets(&self, args: &SearchRequestArgs) -> Result<Value> {
        self.split_search("attribute_search", args, &search_params(args))
            .await
    }

    /// Products for a search
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self, args), fields(store = %self.store, attribute_path = %args.attribute_path))]
    pub async fn product_search(&self, args: &SearchRequestArgs) -> Result<Value> {
        self.split_search("product_search", args, &search_params(args))
            .await
    }

    /// Banners configured for a search
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self, args), fields(store = %self.store, attribute_path = %args.attribute_path))]
    pub async fn banners(&self, args: &SearchRequestArgs) -> Result<Banners> {
        let body: BannerSearchBody = self
            .split_search(
                "banner_search",
                args,
                &FullTextParams::new(args.full_text.as_deref()),
            )
            .await?;
        Ok(body.into())
    }

    /// Search terms that complete a free text, for autocomplete widgets
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self), fields(store = %self.store))]
    pub async fn autocomplete_search_suggestions(&self, full_text: &str) -> Result<Value> {
        self.http
            .get(
                &format!("{}/api/suggestion_searches", self.store),
                &[("term", full_text)],
                "search-autocomplete-suggestions",
            )
            .await
    }

    /// Spelling correction for a free text
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self), fields(store = %self.store))]
    pub async fn correction(&self, full_text: &str) -> Result<Correction> {
        let body: CorrectionSearchBody = self
            .http
            .get(
                &format!("{}/api/split/correction_search/", self.store),
                &FullTextParams::new(Some(full_text)),
                "search-correction",
            )
            .await?;
        Ok(body.into())
    }

    /// Redirect configured for a search, if any
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self, args), fields(store = %self.store, attribute_path = %args.attribute_path))]
    pub async fn redirect(&self, args: &SearchRequestArgs) -> Result<Redirect> {
        let path = format!("{}/api/split/redirect_search/{}", self.store, build_path(args));
        let body: RedirectSearchBody = self
            .http
            .get(
                &path,
                &FullTextParams::new(args.full_text.as_deref()),
                "search-redirect",
            )
            .await?;
        Ok(body.into())
    }

    /// Term suggestions for a free text
    ///
    /// # Errors
    /// Returns transport, status or parse errors
    #[tracing::instrument(skip(self), fields(store = %self.store))]
    pub async fn search_suggestions(&self, full_text: &str) -> Result<Option<Value>> {
        let body: SuggestionSearchBody = self
            .http
            .get(
                &format!("{}/api/split/suggestion_search/", self.store),
                &FullTextParams::new(Some(full_text)),
                "search-suggestions",
            )
            .await?;
        Ok(body.suggestion)
    }

    async fn split_search<T, Q>(
        &self,
        endpoint: &str,
        args: &SearchRequestArgs,
        query: &Q,
    ) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let path = format!("{}/api/split/{endpoint}/{}", self.store, build_path(args));
        self.http.get(&path, query, "search-result").await
    }
}

impl ServiceClient for BiggySearchClient {
    const NAME: ServiceName = ServiceName::Search;

    fn new(context: &IoContext, options: &InstanceOptions) -> Result<Self> {
        Self::new(context, options)
    }
}
