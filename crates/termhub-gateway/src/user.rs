//! Identity-service accessor.
//!
//! The capability set the rest of the service depends on for user, student,
//! and teacher lookups. [`RemoteUserDirectory`] is the direct
//! implementation; `termhub-cache` provides a cached one behind the same
//! trait, so call sites never know whether caching is present.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use termhub_registry::ServiceLocator;

use crate::client::RpcClient;
use crate::context::RequestContext;
use crate::dto::{CurrentUser, StudentInfo, TeacherInfo};
use crate::envelope::decode_data;
use crate::error::RemoteCallError;

/// User, student, and teacher lookups against the identity service.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// The user the bearer token belongs to.
    async fn current_user(&self, ctx: &RequestContext) -> Result<CurrentUser, RemoteCallError>;

    async fn student_info(
        &self,
        ctx: &RequestContext,
        student_id: &str,
    ) -> Result<StudentInfo, RemoteCallError>;

    async fn teacher_info(
        &self,
        ctx: &RequestContext,
        teacher_id: &str,
    ) -> Result<TeacherInfo, RemoteCallError>;

    /// The teacher record a user holds inside one organization.
    async fn teacher_by_user_and_org(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        organization_id: &str,
    ) -> Result<TeacherInfo, RemoteCallError>;

    /// The user account behind a teacher record.
    async fn user_by_teacher(
        &self,
        ctx: &RequestContext,
        teacher_id: &str,
    ) -> Result<CurrentUser, RemoteCallError>;
}

pub struct RemoteUserDirectory {
    service: String,
    locator: Arc<dyn ServiceLocator>,
    http: reqwest::Client,
}

impl RemoteUserDirectory {
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
impl UserDirectory for RemoteUserDirectory {
    async fn current_user(&self, ctx: &RequestContext) -> Result<CurrentUser, RemoteCallError> {
        let client = self.client(ctx)?;
        let path = "/v1/user/current-user";
        let body = client
            .call(Method::GET, path, None, &ctx.outbound_headers())
            .await?;
        decode_data(&self.service, "GET", path, &body)
    }

    async fn student_info(
        &self,
        ctx: &RequestContext,
        student_id: &str,
    ) -> Result<StudentInfo, RemoteCallError> {
        let client = self.client(ctx)?;
        let path = format!("/v1/gateway/students/{student_id}");
        let body = client
            .call(Method::GET, &path, None, &ctx.outbound_headers())
            .await?;
        decode_data(&self.service, "GET", &path, &body)
    }

    async fn teacher_info(
        &self,
        ctx: &RequestContext,
        teacher_id: &str,
    ) -> Result<TeacherInfo, RemoteCallError> {
        let client = self.client(ctx)?;
        let path = format!("/v1/gateway/teachers/{teacher_id}");
        let body = client
            .call(Method::GET, &path, None, &ctx.outbound_headers())
            .await?;
        decode_data(&self.service, "GET", &path, &body)
    }

    async fn teacher_by_user_and_org(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        organization_id: &str,
    ) -> Result<TeacherInfo, RemoteCallError> {
        let client = self.client(ctx)?;
        let path = format!("/v1/gateway/teachers/user/{user_id}/organization/{organization_id}");
        let body = client
            .call(Method::GET, &path, None, &ctx.outbound_headers())
            .await?;
        decode_data(&self.service, "GET", &path, &body)
    }

    async fn user_by_teacher(
        &self,
        ctx: &RequestContext,
        teacher_id: &str,
    ) -> Result<CurrentUser, RemoteCallError> {
        let client = self.client(ctx)?;
        let path = format!("/v1/gateway/teachers/{teacher_id}/user");
        let body = client
            .call(Method::GET, &path, None, &ctx.outbound_headers())
            .await?;
        decode_data(&self.service, "GET", &path, &body)
    }
}
