//! Holiday business rules.
//!
//! The bulk upload processes deletes first, then upserts, keeping the
//! localized-message store in sync: deleted holidays drop their messages
//! (best effort), upserted holidays push their title for the request
//! locale.

use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use termhub_core::Holiday;
use termhub_gateway::{
    CurrentUser, MessageCatalog, OrganizationDirectory, RequestContext, UploadMessage,
    UploadMessageBatch,
};
use termhub_storage::HolidayStore;

use crate::constants::{HOLIDAY_TITLE_KEY, HOLIDAY_TYPE};
use crate::dto::{HolidayResponse, HolidaysByOrg, UploadHolidayItem, UploadHolidaysRequest};
use crate::error::ApiError;

use super::{parse_id, parse_range};

pub struct HolidayService {
    holidays: Arc<dyn HolidayStore>,
    organizations: Arc<dyn OrganizationDirectory>,
    messages: Arc<dyn MessageCatalog>,
}

impl HolidayService {
    pub fn new(
        holidays: Arc<dyn HolidayStore>,
        organizations: Arc<dyn OrganizationDirectory>,
        messages: Arc<dyn MessageCatalog>,
    ) -> Self {
        Self {
            holidays,
            organizations,
            messages,
        }
    }

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

    fn title_message(holiday_id: Uuid, item: &UploadHolidayItem, language_id: u32) -> UploadMessageBatch {
        UploadMessageBatch {
            message_languages: vec![UploadMessage {
                type_id: holiday_id.to_string(),
                kind: HOLIDAY_TYPE.to_string(),
                key: HOLIDAY_TITLE_KEY.to_string(),
                value: item.title.clone(),
                language_id,
            }],
        }
    }

    pub async fn upload(
        &self,
        ctx: &RequestContext,
        user: &CurrentUser,
        req: UploadHolidaysRequest,
    ) -> Result<(), ApiError> {
        let organization_id = Self::require_org_admin(user)?.to_string();

        // 1. Deletes, each followed by a best-effort message cleanup.
        for id in &req.delete_ids {
            let holiday_id = parse_id(id)?;
            self.holidays.delete(holiday_id).await?;

            if let Err(e) = self.messages.delete_by_type(ctx, HOLIDAY_TYPE, id).await {
                tracing::warn!(holiday_id = %id, error = %e, "failed to delete holiday messages");
            }
        }

        // 2. Upserts; the message push is part of the operation and its
        //    failure is surfaced.
        for item in req.holidays {
            let (start_date, end_date) =
                parse_range(&item.title, &item.start_date, &item.end_date)?;

            let holiday_id = if !item.id.is_empty() {
                let id = parse_id(&item.id)?;
                let mut existing = self
                    .holidays
                    .get(id)
                    .await?
                    .ok_or_else(|| ApiError::NotFound(format!("holiday not found: {id}")))?;

                existing.title = item.title.clone();
                existing.color = item.color.clone();
                existing.published_mobile = item.published_mobile;
                existing.published_desktop = item.published_desktop;
                existing.start_date = start_date;
                existing.end_date = end_date;

                self.holidays.update(existing).await?;
                id
            } else {
                let now = OffsetDateTime::now_utc();
                let holiday = Holiday {
                    id: Uuid::new_v4(),
                    organization_id: organization_id.clone(),
                    title: item.title.clone(),
                    color: item.color.clone(),
                    published_mobile: item.published_mobile,
                    published_desktop: item.published_desktop,
                    start_date,
                    end_date,
                    created_at: now,
                    updated_at: now,
                };
                self.holidays.create(holiday).await?.id
            };

            self.messages
                .upload_messages(ctx, &Self::title_message(holiday_id, &item, req.language_id))
                .await?;
        }

        Ok(())
    }

    /// Holidays grouped per organization for the web console. Super admins
    /// get an empty grouping; org admins get their own organization.
    pub async fn holidays_for_web(
        &self,
        ctx: &RequestContext,
        user: &CurrentUser,
    ) -> Result<Vec<HolidaysByOrg>, ApiError> {
        if user.is_super_admin {
            return Ok(Vec::new());
        }

        let organization_id = user.admin_organization_id().ok_or_else(|| {
            ApiError::Forbidden("access denied: user is not an organization admin".into())
        })?;

        let holidays = self.holidays.list_by_org(organization_id).await?;
        let org = self
            .organizations
            .organization_info(ctx, organization_id)
            .await?;

        Ok(vec![HolidaysByOrg {
            organization_name: org.organization_name,
            holidays: holidays.iter().map(HolidayResponse::from).collect(),
        }])
    }
}
