//! The remote-call error taxonomy.
//!
//! Each variant carries the operation name (service, method, path) so the
//! boundary can log and map HTTP statuses without re-deriving context.

use termhub_registry::RegistryError;

/// Errors surfaced by the RPC gateway and the typed accessors.
#[derive(Debug, thiserror::Error)]
pub enum RemoteCallError {
    /// The registry produced no healthy instance; no request was attempted.
    #[error("Service discovery failed for '{service}': {source}")]
    Discovery {
        service: String,
        #[source]
        source: RegistryError,
    },

    /// The HTTP exchange itself failed (connect, timeout, body read).
    #[error("{method} {path} to '{service}' failed: {source}")]
    Transport {
        service: String,
        method: String,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered with HTTP >= 400, or its envelope carried a
    /// `status_code` other than 200.
    #[error("'{service}' returned status {status} for {method} {path}: {message}")]
    Remote {
        service: String,
        method: String,
        path: String,
        status: u16,
        message: String,
    },

    /// The response body (or a request payload) failed JSON (de)serialization.
    #[error("Malformed payload for '{service}' {path}: {source}")]
    Decode {
        service: String,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request context is missing a value the call requires.
    #[error("Request context error: {0}")]
    AuthContext(String),
}

impl RemoteCallError {
    pub(crate) fn discovery(service: impl Into<String>, source: RegistryError) -> Self {
        Self::Discovery {
            service: service.into(),
            source,
        }
    }

    pub(crate) fn transport(
        service: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
        source: reqwest::Error,
    ) -> Self {
        Self::Transport {
            service: service.into(),
            method: method.into(),
            path: path.into(),
            source,
        }
    }

    pub(crate) fn remote(
        service: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        Self::Remote {
            service: service.into(),
            method: method.into(),
            path: path.into(),
            status,
            message: message.into(),
        }
    }

    pub(crate) fn decode(
        service: impl Into<String>,
        path: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self::Decode {
            service: service.into(),
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing_token() -> Self {
        Self::AuthContext("bearer token not present in request context".to_string())
    }

    pub(crate) fn missing_locale() -> Self {
        Self::AuthContext("app language not present in request context".to_string())
    }

    /// The remote HTTP or envelope status, when this is a remote failure.
    pub fn remote_status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
