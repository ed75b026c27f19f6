//! Term business rules.
//!
//! Listing is role-gated: super admins see every organization, org admins
//! see their own, everyone else is denied. Bulk upload is upsert-or-create
//! and restricted to org admins.

use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use termhub_core::Term;
use termhub_gateway::{CurrentUser, OrganizationDirectory, RequestContext, UserDirectory};
use termhub_storage::TermStore;

use crate::dto::{TermsByOrg, UploadTermItem, UpsertTermRequest, map_terms};
use crate::error::ApiError;

use super::{parse_id, parse_range};

pub struct TermService {
    terms: Arc<dyn TermStore>,
    users: Arc<dyn UserDirectory>,
    organizations: Arc<dyn OrganizationDirectory>,
}

impl TermService {
    pub fn new(
        terms: Arc<dyn TermStore>,
        users: Arc<dyn UserDirectory>,
        organizations: Arc<dyn OrganizationDirectory>,
    ) -> Self {
        Self {
            terms,
            users,
            organizations,
        }
    }

    /// The organization the caller administers, or a denial.
    fn require_org_admin(user: &CurrentUser) -> Result<&str, ApiError> {
        if user.is_super_admin {
            return Err(ApiError::Forbidden(
                "access denied: super admin cannot perform this action".into(),
            ));
        }
        user.admin_organization_id().ok_or_else(|| {
            ApiError::Forbidden("access denied: user is not an organization admin".into())
        })
    }

    pub async fn create(
        &self,
        user: &CurrentUser,
        req: UpsertTermRequest,
    ) -> Result<Term, ApiError> {
        let organization_id = Self::require_org_admin(user)?;
        let (start_date, end_date) = parse_range(&req.title, &req.start_date, &req.end_date)?;

        let now = OffsetDateTime::now_utc();
        let term = Term {
            id: Uuid::new_v4(),
            organization_id: organization_id.to_string(),
            title: req.title,
            color: req.color,
            published_mobile: req.published_mobile,
            published_desktop: req.published_desktop,
            published_teacher: req.published_teacher,
            published_parent: req.published_parent,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
        };

        Ok(self.terms.create(term).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Term, ApiError> {
        let id = parse_id(id)?;
        self.terms
            .get(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("term not found: {id}")))
    }

    pub async fn update(&self, id: &str, req: UpsertTermRequest) -> Result<Term, ApiError> {
        let mut existing = self.get(id).await?;
        let (start_date, end_date) = parse_range(&req.title, &req.start_date, &req.end_date)?;

        existing.title = req.title;
        existing.color = req.color;
        existing.published_mobile = req.published_mobile;
        existing.published_desktop = req.published_desktop;
        existing.published_teacher = req.published_teacher;
        existing.published_parent = req.published_parent;
        existing.start_date = start_date;
        existing.end_date = end_date;

        Ok(self.terms.update(existing).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let id = parse_id(id)?;
        Ok(self.terms.delete(id).await?)
    }

    /// Terms grouped per organization, scoped by the caller's role.
    pub async fn list_for_admin(
        &self,
        ctx: &RequestContext,
        user: &CurrentUser,
    ) -> Result<Vec<TermsByOrg>, ApiError> {
        if user.is_super_admin {
            let organizations = self.organizations.all_organizations(ctx).await?;
            let mut result = Vec::with_capacity(organizations.len());
            for org in organizations {
                let terms = self.terms.list_by_org(&org.id).await?;
                result.push(TermsByOrg {
                    organization_name: org.organization_name,
                    terms: map_terms(&terms),
                });
            }
            return Ok(result);
        }

        if let Some(organization_id) = user.admin_organization_id() {
            let terms = self.terms.list_by_org(organization_id).await?;
            let org = self.organizations.organization_info(ctx, organization_id).await?;
            return Ok(vec![TermsByOrg {
                organization_name: org.organization_name,
                terms: map_terms(&terms),
            }]);
        }

        Err(ApiError::Forbidden(
            "access denied: user is not an organization admin".into(),
        ))
    }

    /// The term running today in the caller's organization; `None` when no
    /// term is running (not an error).
    pub async fn current_term(&self, user: &CurrentUser) -> Result<Option<Term>, ApiError> {
        let organization_id = user
            .admin_organization_id()
            .map(str::to_string)
            .or_else(|| {
                (!user.organization_id_active.is_empty())
                    .then(|| user.organization_id_active.clone())
            })
            .ok_or_else(|| {
                ApiError::BadRequest("current user has no active organization".into())
            })?;

        let today = OffsetDateTime::now_utc().date();
        Ok(self.terms.current_by_org(&organization_id, today).await?)
    }

    /// Upsert-or-create for a batch of terms. Restricted to org admins;
    /// each entry with an id must already exist.
    pub async fn upload(
        &self,
        user: &CurrentUser,
        items: Vec<UploadTermItem>,
    ) -> Result<(), ApiError> {
        let organization_id = Self::require_org_admin(user)?.to_string();

        for item in items {
            let (start_date, end_date) =
                parse_range(&item.title, &item.start_date, &item.end_date)?;

            if !item.id.is_empty() {
                let id = parse_id(&item.id)?;
                let mut existing = self
                    .terms
                    .get(id)
                    .await?
                    .ok_or_else(|| ApiError::NotFound(format!("term not found: {id}")))?;

                existing.title = item.title;
                existing.color = item.color;
                existing.published_mobile = item.published_mobile;
                existing.published_desktop = item.published_desktop;
                existing.published_teacher = item.published_teacher;
                existing.published_parent = item.published_parent;
                existing.start_date = start_date;
                existing.end_date = end_date;

                self.terms.update(existing).await?;
            } else {
                let now = OffsetDateTime::now_utc();
                let term = Term {
                    id: Uuid::new_v4(),
                    organization_id: organization_id.clone(),
                    title: item.title,
                    color: item.color,
                    published_mobile: item.published_mobile,
                    published_desktop: item.published_desktop,
                    published_teacher: item.published_teacher,
                    published_parent: item.published_parent,
                    start_date,
                    end_date,
                    created_at: now,
                    updated_at: now,
                };
                self.terms.create(term).await?;
            }
        }

        Ok(())
    }

    pub async fn terms_by_org(&self, organization_id: &str) -> Result<Vec<Term>, ApiError> {
        Ok(self.terms.list_by_org(organization_id).await?)
    }

    /// Terms visible to a student: those of the student's organization,
    /// with the student record resolved through the (possibly cached)
    /// user directory.
    pub async fn terms_for_student(
        &self,
        ctx: &RequestContext,
        student_id: &str,
    ) -> Result<Vec<Term>, ApiError> {
        let student = self.users.student_info(ctx, student_id).await?;
        Ok(self.terms.list_by_org(&student.organization_id).await?)
    }
}
