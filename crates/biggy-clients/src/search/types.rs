//! Argument bundles, raw response schemas and projected results for the
//! Biggy search API

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a store's catalog feed was ingested
///
/// Trade-policy scoping does not apply to XML feeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexingType {
    #[default]
    #[serde(rename = "CATALOG", alias = "API")]
    Catalog,
    #[serde(rename = "XML")]
    Xml,
}

impl IndexingType {
    pub const fn is_xml(self) -> bool {
        matches!(self, Self::Xml)
    }
}

impl std::str::FromStr for IndexingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CATALOG" | "API" => Ok(Self::Catalog),
            "XML" => Ok(Self::Xml),
            other => Err(format!("unknown indexing type: {other}")),
        }
    }
}

/// Arguments shared by the path-scoped search endpoints
///
/// Optional fields that are `None` are left out of the request entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequestArgs {
    pub attribute_path: String,
    pub trade_policy: Option<String>,
    pub indexing_type: Option<IndexingType>,
    pub query: Option<String>,
    pub page: Option<u32>,
    pub count: Option<u32>,
    pub sort: Option<String>,
    pub operator: Option<String>,
    pub fuzzy: Option<String>,
    pub leap: bool,
    pub full_text: Option<String>,
}

impl SearchRequestArgs {
    pub fn new(attribute_path: impl Into<String>) -> Self {
        Self {
            attribute_path: attribute_path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_trade_policy(mut self, trade_policy: impl Into<String>) -> Self {
        self.trade_policy = Some(trade_policy.into());
        self
    }

    #[must_use]
    pub const fn with_indexing_type(mut self, indexing_type: IndexingType) -> Self {
        self.indexing_type = Some(indexing_type);
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    #[must_use]
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    #[must_use]
    pub fn with_fuzzy(mut self, fuzzy: impl Into<String>) -> Self {
        self.fuzzy = Some(fuzzy.into());
        self
    }

    #[must_use]
    pub const fn with_leap(mut self, leap: bool) -> Self {
        self.leap = leap;
        self
    }

    #[must_use]
    pub fn with_full_text(mut self, full_text: impl Into<String>) -> Self {
        self.full_text = Some(full_text.into());
        self
    }
}

/// Arguments for the product suggestion endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionProductsArgs {
    pub term: String,
    pub attribute_key: Option<String>,
    pub attribute_value: Option<String>,
    pub trade_policy: Option<String>,
    pub indexing_type: Option<IndexingType>,
}

// Raw upstream bodies. Only the fields a projection reads are declared.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataSearchBody {
    pub title: Option<Value>,
    pub description: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BannerSearchBody {
    pub banners: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorrectionSearchBody {
    pub correction: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedirectSearchBody {
    pub redirect: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionSearchBody {
    pub suggestion: Option<Value>,
}

// Projected results handed to callers. Absent upstream fields stay absent;
// present ones are passed through whatever their JSON type.

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(rename = "metaTagDescription", skip_serializing_if = "Option::is_none")]
    pub meta_tag_description: Option<Value>,
}

impl From<MetadataSearchBody> for SearchMetadata {
    fn from(body: MetadataSearchBody) -> Self {
        Self {
            title: body.title,
            meta_tag_description: body.description,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Banners {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banners: Option<Value>,
}

impl From<BannerSearchBody> for Banners {
    fn from(body: BannerSearchBody) -> Self {
        Self {
            banners: body.banners,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Correction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<Value>,
}

impl From<CorrectionSearchBody> for Correction {
    fn from(body: CorrectionSearchBody) -> Self {
        Self {
            correction: body.correction,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Redirect {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Value>,
}

impl From<RedirectSearchBody> for Redirect {
    fn from(body: RedirectSearchBody) -> Self {
        Self { url: body.redirect }
    }
}
