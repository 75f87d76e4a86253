//! Command line surface of the biggy CLI

use biggy_clients::{IndexingType, SearchRequestArgs, SuggestionProductsArgs};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

/// Query the Biggy search API and its sibling services for one store
///
/// Results are printed to stdout as JSON; logs go to stderr and the log
/// directory.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Store account (overrides `BIGGY_ACCOUNT` and the config file)
    #[arg(long, short = 'a')]
    pub account: Option<String>,

    /// Store workspace (overrides `BIGGY_WORKSPACE` and the config file)
    #[arg(long, short = 'w')]
    pub workspace: Option<String>,

    /// VTEX auth token sent to checkout, catalog and rewriter
    /// (overrides `BIGGY_AUTH_TOKEN`)
    #[arg(long)]
    pub auth_token: Option<String>,

    /// Optional configuration file path (TOML format)
    #[arg(long, short = 'c')]
    pub config_file: Option<String>,

    /// Log directory path (defaults to OS-specific location)
    #[arg(long)]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Most searched terms of the store
    TopSearches,

    /// Search terms completing a prefix
    SuggestionSearches {
        term: String,
    },

    /// Products suggested for a term
    SuggestionProducts(SuggestionProductsCommand),

    /// Title and meta description of a search page
    Metadata(SearchCommand),

    /// Facets of a search
    Facets(SearchCommand),

    /// Products of a search
    Products(SearchCommand),

    /// Metadata, facets and products of a search, fetched concurrently
    Search(SearchCommand),

    /// Banners of a search
    Banners(SearchCommand),

    /// Redirect of a search
    Redirect(SearchCommand),

    /// Spelling correction for a free text
    Correction {
        full_text: String,
    },

    /// Term suggestions for a free text
    Suggestions {
        full_text: String,
    },

    /// Autocomplete suggestions for a free text
    Autocomplete {
        full_text: String,
    },

    /// Query an Algolia index
    Algolia {
        index: String,
        query: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        hits_per_page: Option<u32>,
        #[arg(long)]
        filters: Option<String>,
    },

    /// Read an order form, or open a new one without an id
    OrderForm {
        id: Option<String>,
    },

    /// Catalog product by its slug
    Product {
        slug: String,
    },

    /// Catalog category tree
    CategoryTree {
        #[arg(long, default_value_t = 3)]
        levels: u8,
    },

    /// Internal route registered for a storefront path
    Route {
        path: String,
    },
}

/// Catalog feed type, as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeedType {
    #[value(name = "catalog", alias = "api")]
    Catalog,
    #[value(name = "xml")]
    Xml,
}

impl From<FeedType> for IndexingType {
    fn from(feed: FeedType) -> Self {
        match feed {
            FeedType::Catalog => Self::Catalog,
            FeedType::Xml => Self::Xml,
        }
    }
}

#[derive(ClapArgs, Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCommand {
    /// Attribute path, e.g. `shoes/color/red`
    #[arg(default_value = "")]
    pub attribute_path: String,

    #[arg(long)]
    pub trade_policy: Option<String>,

    #[arg(long, value_enum)]
    pub indexing_type: Option<FeedType>,

    #[arg(long, short = 'q')]
    pub query: Option<String>,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub count: Option<u32>,

    #[arg(long)]
    pub sort: Option<String>,

    #[arg(long)]
    pub operator: Option<String>,

    #[arg(long)]
    pub fuzzy: Option<String>,

    /// Ask the backend to leap to a broader search when nothing matches
    #[arg(long)]
    pub leap: bool,

    /// Free text used by banners and redirects
    #[arg(long)]
    pub full_text: Option<String>,
}

impl From<SearchCommand> for SearchRequestArgs {
    fn from(command: SearchCommand) -> Self {
        Self {
            attribute_path: command.attribute_path,
            trade_policy: command.trade_policy,
            indexing_type: command.indexing_type.map(IndexingType::from),
            query: command.query,
            page: command.page,
            count: command.count,
            sort: command.sort,
            operator: command.operator,
            fuzzy: command.fuzzy,
            leap: command.leap,
            full_text: command.full_text,
        }
    }
}

#[derive(ClapArgs, Debug, Clone, PartialEq, Eq)]
pub struct SuggestionProductsCommand {
    pub term: String,

    #[arg(long, requires = "attribute_value")]
    pub attribute_key: Option<String>,

    #[arg(long, requires = "attribute_key")]
    pub attribute_value: Option<String>,

    #[arg(long)]
    pub trade_policy: Option<String>,

    #[arg(long, value_enum)]
    pub indexing_type: Option<FeedType>,
}

impl From<SuggestionProductsCommand> for SuggestionProductsArgs {
    fn from(command: SuggestionProductsCommand) -> Self {
        Self {
            term: command.term,
            attribute_key: command.attribute_key,
            attribute_value: command.attribute_value,
            trade_policy: command.trade_policy,
            indexing_type: command.indexing_type.map(IndexingType::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_command() {
        let args = Args::try_parse_from([
            "biggy",
            "--account",
            "storetheme",
            "products",
            "shoes",
            "--trade-policy",
            "1",
            "--indexing-type",
            "xml",
            "--leap",
        ])
        .unwrap();

        assert_eq!(args.account.as_deref(), Some("storetheme"));
        let Command::Products(search) = args.command else {
            panic!("expected products command");
        };

        let request = SearchRequestArgs::from(search);
        assert_eq!(request.attribute_path, "shoes");
        assert_eq!(request.trade_policy.as_deref(), Some("1"));
        assert_eq!(request.indexing_type, Some(IndexingType::Xml));
        assert!(request.leap);
    }

    #[test]
    fn test_attribute_path_defaults_to_empty() {
        let args = Args::try_parse_from(["biggy", "facets", "--query", "runner"]).unwrap();
        let Command::Facets(search) = args.command else {
            panic!("expected facets command");
        };
        assert_eq!(search.attribute_path, "");
        assert!(!search.leap);
    }

    #[test]
    fn test_feed_type_accepts_api_alias() {
        let args = Args::try_parse_from([
            "biggy",
            "suggestion-products",
            "shirt",
            "--indexing-type",
            "api",
        ])
        .unwrap();
        let Command::SuggestionProducts(command) = args.command else {
            panic!("expected suggestion-products command");
        };
        assert_eq!(
            SuggestionProductsArgs::from(command).indexing_type,
            Some(IndexingType::Catalog)
        );
    }

    #[test]
    fn test_attribute_key_requires_value() {
        let result = Args::try_parse_from([
            "biggy",
            "suggestion-products",
            "shirt",
            "--attribute-key",
            "color",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_category_tree_default_levels() {
        let args = Args::try_parse_from(["biggy", "category-tree"]).unwrap();
        assert_eq!(args.command, Command::CategoryTree { levels: 3 });
    }
}
