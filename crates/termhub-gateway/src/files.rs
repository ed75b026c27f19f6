//! File-store accessor.
//!
//! Uploads go out as multipart bodies (one file part plus plain text
//! fields), everything else is the usual JSON envelope exchange. The store
//! partitions its routes by media kind; [`MediaKind`] picks the route
//! segment so one accessor covers all four families.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use termhub_registry::ServiceLocator;

use crate::client::RpcClient;
use crate::context::RequestContext;
use crate::dto::{FileUpload, FileUrlRequest, UploadedFile};
use crate::envelope::{decode_ack, decode_data};
use crate::error::RemoteCallError;

/// The media families the file store distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Pdf,
}

impl MediaKind {
    /// The route segment the file store uses for this family.
    fn segment(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Video => "videos",
            Self::Audio => "audios",
            Self::Pdf => "pdfs",
        }
    }
}

#[async_trait]
pub trait FileStore: Send + Sync {
    async fn upload(
        &self,
        ctx: &RequestContext,
        kind: MediaKind,
        upload: FileUpload,
    ) -> Result<UploadedFile, RemoteCallError>;

    async fn delete(
        &self,
        ctx: &RequestContext,
        kind: MediaKind,
        key: &str,
    ) -> Result<(), RemoteCallError>;

    /// A presigned access URL for a stored object.
    async fn file_url(
        &self,
        ctx: &RequestContext,
        kind: MediaKind,
        request: &FileUrlRequest,
    ) -> Result<String, RemoteCallError>;
}

pub struct RemoteFileStore {
    service: String,
    locator: Arc<dyn ServiceLocator>,
    http: reqwest::Client,
}

impl RemoteFileStore {
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

fn multipart_body(upload: FileUpload) -> Form {
    let part = Part::bytes(upload.content).file_name(upload.file_name.clone());
    let mut form = Form::new()
        .part("file", part)
        .text("folder", upload.folder)
        .text("file_name", upload.file_name)
        .text("mode", upload.mode);
    if let Some(image_name) = upload.image_name {
        form = form.text("image_name", image_name);
    }
    form
}

#[async_trait]
impl FileStore for RemoteFileStore {
    async fn upload(
        &self,
        ctx: &RequestContext,
        kind: MediaKind,
        upload: FileUpload,
    ) -> Result<UploadedFile, RemoteCallError> {
        let client = self.client(ctx)?;
        let path = format!("/v1/gateway/{}/upload", kind.segment());
        let body = client
            .call_multipart(
                Method::POST,
                &path,
                multipart_body(upload),
                &ctx.outbound_headers(),
            )
            .await?;
        decode_data(&self.service, "POST", &path, &body)
    }

    async fn delete(
        &self,
        ctx: &RequestContext,
        kind: MediaKind,
        key: &str,
    ) -> Result<(), RemoteCallError> {
        let client = self.client(ctx)?;
        let path = format!("/v1/gateway/{}/{key}", kind.segment());
        let response = client
            .call(Method::DELETE, &path, None, &ctx.outbound_headers())
            .await?;
        decode_ack(&self.service, "DELETE", &path, &response)
    }

    async fn file_url(
        &self,
        ctx: &RequestContext,
        kind: MediaKind,
        request: &FileUrlRequest,
    ) -> Result<String, RemoteCallError> {
        let client = self.client(ctx)?;
        let path = format!("/v1/gateway/{}/get-url", kind.segment());
        let body = serde_json::to_value(request)
            .map_err(|e| RemoteCallError::decode(&self.service, &path, e))?;
        let response = client
            .call(Method::POST, &path, Some(&body), &ctx.outbound_headers())
            .await?;
        decode_data(&self.service, "POST", &path, &response)
    }
}
