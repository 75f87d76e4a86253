//! Common error handling utilities and patterns
//!
//! This module provides traits and macros to reduce duplication in error handling
//! across the Biggy crates while maintaining flexibility for crate-specific needs.

/// Common error variants that appear across multiple crates
///
/// This trait provides a standardized interface for common error types
/// while allowing crates to add their own specific variants.
pub trait CommonError: std::error::Error + Send + Sync + 'static {
    /// Create an I/O error variant
    fn io_error(msg: impl Into<String>) -> Self
    where
        Self: Sized;

    /// Create a configuration error variant
    fn config_error(msg: impl Into<String>) -> Self
    where
        Self: Sized;

    /// Create a parsing error variant
    fn parse_error(msg: impl Into<String>) -> Self
    where
        Self: Sized;

    /// Create a generic "other" error variant
    fn other_error(msg: impl Into<String>) -> Self
    where
        Self: Sized;
}

/// Macro to implement common error conversions
///
/// Generates:
/// - `From<std::io::Error>` routed through [`CommonError::io_error`]
/// - `From<anyhow::Error>` routed through [`CommonError::other_error`]
/// - with `with_serde`, `From<serde_json::Error>` routed through
///   [`CommonError::parse_error`]
///
/// The calling crate must depend on `anyhow` (and `serde_json` for the
/// `with_serde` form).
#[macro_export]
macro_rules! impl_common_conversions {
    ($error_type:ident) => {
        impl From<std::io::Error> for $error_type {
            fn from(e: std::io::Error) -> Self {
                <$error_type as $crate::CommonError>::io_error(e.to_string())
            }
        }

        impl From<anyhow::Error> for $error_type {
            fn from(e: anyhow::Error) -> Self {
                <$error_type as $crate::CommonError>::other_error(e.to_string())
            }
        }
    };

    ($error_type:ident, with_serde) => {
        $crate::impl_common_conversions!($error_type);

        impl From<serde_json::Error> for $error_type {
            fn from(e: serde_json::Error) -> Self {
                <$error_type as $crate::CommonError>::parse_error(format!("JSON: {e}"))
            }
        }
    };
}

/// Macro to define a standard error enum with common variants
///
/// This macro creates an error enum with the standard `Io`, `Configuration`,
/// `Parse` and `Other` variants, implements [`CommonError`] for it and
/// declares a crate-local `Result<T>` alias.
///
/// # Example
/// ```no_run
/// # use biggy_common::define_error_enum;
/// define_error_enum! {
///     pub enum GatewayError {
///         #[error("Upstream error: {0}")]
///         Upstream(String),
///     }
/// }
/// ```
#[macro_export]
macro_rules! define_error_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident($variant_type:ty),
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, thiserror::Error)]
        pub enum $name {
            #[error("IO error: {0}")]
            Io(String),

            #[error("Configuration error: {0}")]
            Configuration(String),

            #[error("Parse error: {0}")]
            Parse(String),

            #[error("Other error: {0}")]
            Other(String),

            $(
                $(#[$variant_meta])*
                $variant($variant_type),
            )*
        }

        impl $crate::CommonError for $name {
            fn io_error(msg: impl Into<String>) -> Self {
                Self::Io(msg.into())
            }

            fn config_error(msg: impl Into<String>) -> Self {
                Self::Configuration(msg.into())
            }

            fn parse_error(msg: impl Into<String>) -> Self {
                Self::Parse(msg.into())
            }

            fn other_error(msg: impl Into<String>) -> Self {
                Self::Other(msg.into())
            }
        }

        /// Specialized Result type
        pub type Result<T> = std::result::Result<T, $name>;
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    mod generated {
        crate::define_error_enum! {
            pub enum SampleError {
                #[error("Upstream error: {0}")]
                Upstream(String),
            }
        }

        crate::impl_common_conversions!(SampleError, with_serde);
    }

    use generated::SampleError;

    #[test]
    fn test_common_error_trait() {
        let io_err = SampleError::io_error("file not found");
        assert_eq!(io_err.to_string(), "IO error: file not found");

        let config_err = SampleError::config_error("missing API key");
        assert_eq!(
            config_err.to_string(),
            "Configuration error: missing API key"
        );
    }

    #[test]
    fn test_custom_variant_is_kept() {
        let err = SampleError::Upstream("503".to_string());
        assert_eq!(err.to_string(), "Upstream error: 503");
    }

    #[test]
    fn test_serde_conversion_maps_to_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SampleError = json_err.into();
        assert!(matches!(err, SampleError::Parse(ref msg) if msg.starts_with("JSON: ")));
    }
}
