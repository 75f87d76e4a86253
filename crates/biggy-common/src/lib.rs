//! Common utilities and patterns shared across the Biggy client crates
//!
//! This crate provides shared error handling, request correlation and
//! process initialization so the client, config and CLI crates stay small.

pub mod error;
pub mod init;

pub use error::CommonError;
pub use init::initialize_environment;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlation ID used as the operation id of an owning context
///
/// Every outbound request made through one context carries the same id, which
/// lets upstream logs be joined with ours.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// Generate a new correlation ID using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CorrelationId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<&str> for CorrelationId {
    fn from(id: &str) -> Self {
        Uuid::try_parse(id).map_or_else(|_| Self(Uuid::new_v4()), Self)
    }
}
