//! The RPC gateway client.
//!
//! One [`RpcClient`] owns a logical service name and an optional bearer
//! credential, both immutable after construction. On each call it asks the
//! locator for a live address (never cached), builds the HTTP request, and
//! classifies the outcome. Envelope decoding is the caller's
//! responsibility, which keeps the client payload-type-agnostic.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use termhub_registry::ServiceLocator;

use crate::error::RemoteCallError;

pub struct RpcClient {
    service: String,
    bearer: Option<String>,
    locator: Arc<dyn ServiceLocator>,
    http: reqwest::Client,
}

impl RpcClient {
    pub fn new(
        service: impl Into<String>,
        locator: Arc<dyn ServiceLocator>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            service: service.into(),
            bearer: None,
            locator,
            http,
        }
    }

    /// Attaches the bearer credential sent as `Authorization: Bearer …`.
    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        if !token.is_empty() {
            self.bearer = Some(token);
        }
        self
    }

    pub fn service_name(&self) -> &str {
        &self.service
    }

    /// Performs a JSON call against the owning service.
    ///
    /// Resolution failure is returned immediately as
    /// [`RemoteCallError::Discovery`] without attempting any request. Any
    /// response status >= 400 is a [`RemoteCallError::Remote`]; the body is
    /// not parsed in that case. On success the full body is returned
    /// verbatim.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: &[(&str, String)],
    ) -> Result<Bytes, RemoteCallError> {
        let url = self.resolve_url(path).await?;

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        self.execute(request, method, path, &url, headers).await
    }

    /// Performs a multipart call; the caller supplies the pre-built form,
    /// which owns the body and the boundary content-type (file-bearing
    /// parts plus plain text fields).
    pub async fn call_multipart(
        &self,
        method: Method,
        path: &str,
        form: reqwest::multipart::Form,
        headers: &[(&str, String)],
    ) -> Result<Bytes, RemoteCallError> {
        let url = self.resolve_url(path).await?;

        let request = self.http.request(method.clone(), &url).multipart(form);

        self.execute(request, method, path, &url, headers).await
    }

    async fn resolve_url(&self, path: &str) -> Result<String, RemoteCallError> {
        let endpoint = self.locator.resolve(&self.service).await.map_err(|e| {
            tracing::error!(service = %self.service, error = %e, "service discovery failed");
            RemoteCallError::discovery(&self.service, e)
        })?;

        Ok(format!("http://{}:{}{}", endpoint.host, endpoint.port, path))
    }

    async fn execute(
        &self,
        mut request: reqwest::RequestBuilder,
        method: Method,
        path: &str,
        url: &str,
        headers: &[(&str, String)],
    ) -> Result<Bytes, RemoteCallError> {
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(
                service = %self.service,
                url = %url,
                method = %method,
                error = %e,
                "http call failed"
            );
            RemoteCallError::transport(&self.service, method.as_str(), path, e)
        })?;

        let status = response.status();
        if status.as_u16() >= 400 {
            tracing::warn!(
                service = %self.service,
                url = %url,
                method = %method,
                status_code = status.as_u16(),
                "http error"
            );
            return Err(RemoteCallError::remote(
                &self.service,
                method.as_str(),
                path,
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status"),
            ));
        }

        response.bytes().await.map_err(|e| {
            tracing::error!(
                service = %self.service,
                url = %url,
                method = %method,
                error = %e,
                "read response body failed"
            );
            RemoteCallError::transport(&self.service, method.as_str(), path, e)
        })
    }
}
