//! Typed HTTP clients for the Biggy search platform and its sibling services
//!
//! Every client is bound to an [`IoContext`] (store account, workspace,
//! credentials, operation id) and is obtained through a [`Clients`] registry
//! that constructs each named client at most once per context.

pub mod algolia;
pub mod catalog;
pub mod checkout;
pub mod context;
pub mod error;
pub mod http;
pub mod registry;
pub mod rewriter;
pub mod search;

pub use algolia::{AlgoliaClient, AlgoliaQuery, AlgoliaQueryResult};
pub use catalog::{CatalogClient, CategoryTreeNode};
pub use checkout::CheckoutClient;
pub use context::{InstanceOptions, IoContext};
pub use error::{ClientError, Result, UpstreamStatus};
pub use http::HttpClient;
pub use registry::{Clients, ServiceClient, ServiceName};
pub use rewriter::{InternalRoute, RewriterClient};
pub use search::{
    Banners, BiggySearchClient, Correction, IndexingType, Redirect, SearchMetadata,
    SearchRequestArgs, SuggestionProductsArgs,
};
