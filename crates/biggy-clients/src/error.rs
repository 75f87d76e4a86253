//! Error types for the service clients

use crate::registry::ServiceName;
use biggy_common::{define_error_enum, impl_common_conversions};
use std::fmt;

/// A non-2xx answer from an upstream service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamStatus {
    pub status: u16,
    pub url: String,
    pub body: String,
}

impl fmt::Display for UpstreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {} from {}", self.status, self.url)?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

define_error_enum! {
    /// Errors surfaced by the service clients and the registry
    pub enum ClientError {
        #[error("Transport error: {0}")]
        Transport(reqwest::Error),

        #[error("Upstream returned {0}")]
        Status(UpstreamStatus),

        #[error("GraphQL error: {0}")]
        GraphQl(String),

        #[error("Client registered as '{0}' has a different type")]
        ClientTypeMismatch(ServiceName),
    }
}

impl_common_conversions!(ClientError, with_serde);

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e)
    }
}

impl ClientError {
    /// HTTP status of an upstream rejection, if that is what this error is
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status(upstream) => Some(upstream.status),
            _ => None,
        }
    }
}
