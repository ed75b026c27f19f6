//! Localized-message store accessor.
//!
//! Terms and holidays keep their display strings in a sibling message
//! store, keyed by record type and id. Uploads and deletes are
//! mutation-only: the acknowledgement payload is discarded but every
//! transport and remote failure still bubbles.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use termhub_registry::ServiceLocator;

use crate::client::RpcClient;
use crate::context::RequestContext;
use crate::dto::{LocalizedMessage, UploadMessageBatch};
use crate::envelope::{decode_ack, decode_data};
use crate::error::RemoteCallError;

#[async_trait]
pub trait MessageCatalog: Send + Sync {
    /// Upserts a batch of localized messages.
    async fn upload_messages(
        &self,
        ctx: &RequestContext,
        batch: &UploadMessageBatch,
    ) -> Result<(), RemoteCallError>;

    /// All localizations attached to one record.
    async fn messages(
        &self,
        ctx: &RequestContext,
        kind: &str,
        type_id: &str,
    ) -> Result<Vec<LocalizedMessage>, RemoteCallError>;

    /// The localization for the context locale; requires a locale in the
    /// request context.
    async fn message_by_language(
        &self,
        ctx: &RequestContext,
        kind: &str,
        type_id: &str,
    ) -> Result<LocalizedMessage, RemoteCallError>;

    /// Drops every localization attached to one record.
    async fn delete_by_type(
        &self,
        ctx: &RequestContext,
        kind: &str,
        type_id: &str,
    ) -> Result<(), RemoteCallError>;
}

pub struct RemoteMessageCatalog {
    service: String,
    locator: Arc<dyn ServiceLocator>,
    http: reqwest::Client,
}

impl RemoteMessageCatalog {
    pub fn new(
        service: impl Into<String>,
        locator: Arc<dyn ServiceLocator>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            service: service.into(),
            locator,
            http,
        }
    }

    fn client(&self, ctx: &RequestContext) -> Result<RpcClient, RemoteCallError> {
        let token = ctx.require_token()?;
        Ok(
            RpcClient::new(&self.service, Arc::clone(&self.locator), self.http.clone())
                .with_bearer(token),
        )
    }
}

#[async_trait]
impl MessageCatalog for RemoteMessageCatalog {
    async fn upload_messages(
        &self,
        ctx: &RequestContext,
        batch: &UploadMessageBatch,
    ) -> Result<(), RemoteCallError> {
        let client = self.client(ctx)?;
        let path = "/v1/gateway/messages";
        let body = serde_json::to_value(batch)
            .map_err(|e| RemoteCallError::decode(&self.service, path, e))?;
        let response = client
            .call(Method::POST, path, Some(&body), &ctx.outbound_headers())
            .await?;
        decode_ack(&self.service, "POST", path, &response)
    }

    async fn messages(
        &self,
        ctx: &RequestContext,
        kind: &str,
        type_id: &str,
    ) -> Result<Vec<LocalizedMessage>, RemoteCallError> {
        let client = self.client(ctx)?;
        let path = format!("/v1/gateway/messages?type={kind}&type_id={type_id}");
        let body = client
            .call(Method::GET, &path, None, &ctx.outbound_headers())
            .await?;
        decode_data(&self.service, "GET", &path, &body)
    }

    async fn message_by_language(
        &self,
        ctx: &RequestContext,
        kind: &str,
        type_id: &str,
    ) -> Result<LocalizedMessage, RemoteCallError> {
        let language_id = ctx.require_locale()?;
        let client = self.client(ctx)?;
        let path = format!(
            "/v1/gateway/messages/get-by-language?type={kind}&type_id={type_id}&language_id={language_id}"
        );
        let body = client
            .call(Method::GET, &path, None, &ctx.outbound_headers())
            .await?;
        decode_data(&self.service, "GET", &path, &body)
    }

    async fn delete_by_type(
        &self,
        ctx: &RequestContext,
        kind: &str,
        type_id: &str,
    ) -> Result<(), RemoteCallError> {
        let client = self.client(ctx)?;
        let path = format!("/v1/gateway/messages?type={kind}&type_id={type_id}");
        let response = client
            .call(Method::DELETE, &path, None, &ctx.outbound_headers())
            .await?;
        decode_ack(&self.service, "DELETE", &path, &response)
    }
}
