//! Organization-directory accessor.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use termhub_registry::ServiceLocator;

use crate::client::RpcClient;
use crate::context::RequestContext;
use crate::dto::OrganizationInfo;
use crate::envelope::decode_data;
use crate::error::RemoteCallError;

/// Organization lookups against the organization directory.
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    async fn organization_info(
        &self,
        ctx: &RequestContext,
        organization_id: &str,
    ) -> Result<OrganizationInfo, RemoteCallError>;

    async fn all_organizations(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<OrganizationInfo>, RemoteCallError>;
}

pub struct RemoteOrganizationDirectory {
    service: String,
    locator: Arc<dyn ServiceLocator>,
    http: reqwest::Client,
}

impl RemoteOrganizationDirectory {
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
impl OrganizationDirectory for RemoteOrganizationDirectory {
    async fn organization_info(
        &self,
        ctx: &RequestContext,
        organization_id: &str,
    ) -> Result<OrganizationInfo, RemoteCallError> {
        let client = self.client(ctx)?;
        let path = format!("/v1/organization/{organization_id}");
        let body = client
            .call(Method::GET, &path, None, &ctx.outbound_headers())
            .await?;
        decode_data(&self.service, "GET", &path, &body)
    }

    async fn all_organizations(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<OrganizationInfo>, RemoteCallError> {
        let client = self.client(ctx)?;
        let path = "/v1/gateway/organizations";
        let body = client
            .call(Method::GET, path, None, &ctx.outbound_headers())
            .await?;
        decode_data(&self.service, "GET", path, &body)
    }
}
