//! Per-request context threaded through every downstream call.
//!
//! Replaces ambient keyed-context lookups with an explicit parameter:
//! fields are optional and validated at the point of use, so a call that
//! requires authentication fails fast instead of proceeding
//! unauthenticated.

use crate::error::RemoteCallError;

/// Header carrying the caller's locale id to downstream services.
pub const APP_LANGUAGE_HEADER: &str = "X-App-Language";

/// The per-inbound-request bundle of authentication token and locale.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    bearer_token: Option<String>,
    locale: Option<u32>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        if !token.is_empty() {
            self.bearer_token = Some(token);
        }
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: u32) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    pub fn locale(&self) -> Option<u32> {
        self.locale
    }

    /// The bearer token, or a typed auth-context failure when absent.
    pub fn require_token(&self) -> Result<&str, RemoteCallError> {
        self.bearer_token
            .as_deref()
            .ok_or_else(RemoteCallError::missing_token)
    }

    /// The locale id, or a typed auth-context failure when absent.
    pub fn require_locale(&self) -> Result<u32, RemoteCallError> {
        self.locale.ok_or_else(RemoteCallError::missing_locale)
    }

    /// Outbound headers derived from this context (currently the locale).
    pub fn outbound_headers(&self) -> Vec<(&'static str, String)> {
        match self.locale {
            Some(locale) => vec![(APP_LANGUAGE_HEADER, locale.to_string())],
            None => Vec::new(),
        }
    }
}
