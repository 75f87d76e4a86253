//! Path and parameter construction for search requests
//!
//! Everything here is pure: the same arguments always produce the same path,
//! query parameters and attribute list.

use super::types::{IndexingType, SearchRequestArgs, SuggestionProductsArgs};
use serde::{Deserialize, Serialize};

const TRADE_POLICY: &str = "trade-policy";

/// Trade policy that applies to a request, if any
///
/// An empty policy counts as absent, and XML feeds are never policy scoped.
fn applicable_trade_policy(
    trade_policy: Option<&str>,
    indexing_type: Option<IndexingType>,
) -> Option<&str> {
    let xml = indexing_type.is_some_and(IndexingType::is_xml);
    trade_policy.filter(|policy| !policy.is_empty() && !xml)
}

/// Path below a split search endpoint: the attribute path, followed by
/// `trade-policy/<id>` when a trade policy applies
pub fn build_path(args: &SearchRequestArgs) -> String {
    let segment = applicable_trade_policy(args.trade_policy.as_deref(), args.indexing_type)
        .map(|policy| format!("{TRADE_POLICY}/{policy}"))
        .unwrap_or_default();

    join_path(&args.attribute_path, &segment)
}

/// Join two path fragments, normalizing the result
///
/// Repeated separators collapse, `.` segments are dropped and `..` removes the
/// previous segment. A leading `/` is kept, a trailing one is not. Two empty
/// fragments join to the empty string.
pub fn join_path(base: &str, tail: &str) -> String {
    let absolute = base.starts_with('/') || (base.is_empty() && tail.starts_with('/'));
    let mut segments: Vec<&str> = Vec::new();

    for segment in base.split('/').chain(tail.split('/')) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Query parameters of the metadata, facet and product searches
///
/// `None` fields are omitted from the query string. `bgy_leap` is only ever
/// sent as `true`: the backend treats a `false` value differently from a
/// missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgy_leap: Option<bool>,
}

pub fn search_params(args: &SearchRequestArgs) -> SearchParams {
    SearchParams {
        query: args.query.clone(),
        page: args.page,
        count: args.count,
        sort: args.sort.clone(),
        operator: args.operator.clone(),
        fuzzy: args.fuzzy.clone(),
        bgy_leap: args.leap.then_some(true),
    }
}

/// `?query=<full text>` for the endpoints that search by free text only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FullTextParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a str>,
}

impl<'a> FullTextParams<'a> {
    pub const fn new(full_text: Option<&'a str>) -> Self {
        Self { query: full_text }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// Attribute filters for a product suggestion request
///
/// The caller's key/value pair comes first, and only when both halves are
/// non-empty. The trade-policy pair follows under the same rule as
/// [`build_path`].
pub fn suggestion_attributes(args: &SuggestionProductsArgs) -> Vec<Attribute> {
    let mut attributes = Vec::with_capacity(2);

    if let (Some(key), Some(value)) = (
        args.attribute_key.as_deref().filter(|k| !k.is_empty()),
        args.attribute_value.as_deref().filter(|v| !v.is_empty()),
    ) {
        attributes.push(Attribute {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    if let Some(policy) = applicable_trade_policy(args.trade_policy.as_deref(), args.indexing_type)
    {
        attributes.push(Attribute {
            key: TRADE_POLICY.to_string(),
            value: policy.to_string(),
        });
    }

    attributes
}

/// Body of `POST {store}/api/suggestion_products`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionProductsBody<'a> {
    pub term: &'a str,
    pub attributes: Vec<Attribute>,
}

impl<'a> From<&'a SuggestionProductsArgs> for SuggestionProductsBody<'a> {
    fn from(args: &'a SuggestionProductsArgs) -> Self {
        Self {
            term: &args.term,
            attributes: suggestion_attributes(args),
        }
    }
}
