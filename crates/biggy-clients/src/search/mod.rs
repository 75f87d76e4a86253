//! Biggy search API client
//!
//! [`path`] holds the pure request construction, [`types`] the argument
//! bundles and response projections, and [`client`] the HTTP calls.

pub mod client;
pub mod path;
pub mod types;

pub use client::BiggySearchClient;
pub use path::{Attribute, SearchParams, build_path, join_path, search_params, suggestion_attributes};
pub use types::{
    Banners, Correction, IndexingType, Redirect, SearchMetadata, SearchRequestArgs,
    SuggestionProductsArgs,
};
