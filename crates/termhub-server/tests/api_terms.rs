use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use termhub_gateway::{
    CurrentUser, FileStore, FileUpload, FileUrlRequest, LocalizedMessage, MediaKind,
    MessageCatalog, OrganizationAdmin, OrganizationDirectory, OrganizationInfo, RemoteCallError,
    RequestContext, StudentInfo, TeacherInfo, UploadMessageBatch, UploadedFile, UserDirectory,
};
use termhub_server::{AppConfig, AppState, router};
use termhub_storage::{HolidayStore, MemoryStore, TermStore};

// =========================================================================
// Stub accessors
// =========================================================================

struct StubUsers {
    user: CurrentUser,
    reject: bool,
}

#[async_trait]
impl UserDirectory for StubUsers {
    async fn current_user(&self, _ctx: &RequestContext) -> Result<CurrentUser, RemoteCallError> {
        if self.reject {
            return Err(RemoteCallError::Remote {
                service: "identity-service".into(),
                method: "GET".into(),
                path: "/v1/user/current-user".into(),
                status: 401,
                message: "token rejected".into(),
            });
        }
        Ok(self.user.clone())
    }

    async fn student_info(
        &self,
        _ctx: &RequestContext,
        student_id: &str,
    ) -> Result<StudentInfo, RemoteCallError> {
        Ok(StudentInfo {
            id: student_id.to_string(),
            organization_id: "org-1".into(),
            ..StudentInfo::default()
        })
    }

    async fn teacher_info(
        &self,
        _ctx: &RequestContext,
        teacher_id: &str,
    ) -> Result<TeacherInfo, RemoteCallError> {
        Ok(TeacherInfo {
            id: teacher_id.to_string(),
            ..TeacherInfo::default()
        })
    }

    async fn teacher_by_user_and_org(
        &self,
        _ctx: &RequestContext,
        _user_id: &str,
        _organization_id: &str,
    ) -> Result<TeacherInfo, RemoteCallError> {
        Ok(TeacherInfo::default())
    }

    async fn user_by_teacher(
        &self,
        _ctx: &RequestContext,
        _teacher_id: &str,
    ) -> Result<CurrentUser, RemoteCallError> {
        Ok(CurrentUser::default())
    }
}

struct StubOrganizations;

#[async_trait]
impl OrganizationDirectory for StubOrganizations {
    async fn organization_info(
        &self,
        _ctx: &RequestContext,
        organization_id: &str,
    ) -> Result<OrganizationInfo, RemoteCallError> {
        Ok(OrganizationInfo {
            id: organization_id.to_string(),
            organization_name: format!("Org {organization_id}"),
            ..OrganizationInfo::default()
        })
    }

    async fn all_organizations(
        &self,
        _ctx: &RequestContext,
    ) -> Result<Vec<OrganizationInfo>, RemoteCallError> {
        Ok(vec![
            OrganizationInfo {
                id: "org-1".into(),
                organization_name: "North Campus".into(),
                ..OrganizationInfo::default()
            },
            OrganizationInfo {
                id: "org-2".into(),
                organization_name: "South Campus".into(),
                ..OrganizationInfo::default()
            },
        ])
    }
}

#[derive(Default)]
struct StubMessages {
    uploads: AtomicUsize,
    deletes: AtomicUsize,
}

#[async_trait]
impl MessageCatalog for StubMessages {
    async fn upload_messages(
        &self,
        _ctx: &RequestContext,
        _batch: &UploadMessageBatch,
    ) -> Result<(), RemoteCallError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn messages(
        &self,
        _ctx: &RequestContext,
        _kind: &str,
        _type_id: &str,
    ) -> Result<Vec<LocalizedMessage>, RemoteCallError> {
        Ok(Vec::new())
    }

    async fn message_by_language(
        &self,
        _ctx: &RequestContext,
        _kind: &str,
        _type_id: &str,
    ) -> Result<LocalizedMessage, RemoteCallError> {
        Ok(LocalizedMessage::default())
    }

    async fn delete_by_type(
        &self,
        _ctx: &RequestContext,
        _kind: &str,
        _type_id: &str,
    ) -> Result<(), RemoteCallError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct StubFiles;

#[async_trait]
impl FileStore for StubFiles {
    async fn upload(
        &self,
        _ctx: &RequestContext,
        _kind: MediaKind,
        _upload: FileUpload,
    ) -> Result<UploadedFile, RemoteCallError> {
        Ok(UploadedFile::default())
    }

    async fn delete(
        &self,
        _ctx: &RequestContext,
        _kind: MediaKind,
        _key: &str,
    ) -> Result<(), RemoteCallError> {
        Ok(())
    }

    async fn file_url(
        &self,
        _ctx: &RequestContext,
        _kind: MediaKind,
        _request: &FileUrlRequest,
    ) -> Result<String, RemoteCallError> {
        Ok(String::new())
    }
}

// =========================================================================
// Harness
// =========================================================================

fn org_admin() -> CurrentUser {
    CurrentUser {
        id: "u1".into(),
        organization_admin: Some(OrganizationAdmin {
            id: "org-1".into(),
            organization_name: "North Campus".into(),
            ..OrganizationAdmin::default()
        }),
        ..CurrentUser::default()
    }
}

fn super_admin() -> CurrentUser {
    CurrentUser {
        id: "root".into(),
        is_super_admin: true,
        ..CurrentUser::default()
    }
}

struct Harness {
    state: AppState,
    store: Arc<MemoryStore>,
    messages: Arc<StubMessages>,
}

fn harness_with(user: CurrentUser, reject: bool) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let messages = Arc::new(StubMessages::default());
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        terms: Arc::clone(&store) as Arc<dyn TermStore>,
        holidays: Arc::clone(&store) as Arc<dyn HolidayStore>,
        users: Arc::new(StubUsers { user, reject }),
        organizations: Arc::new(StubOrganizations),
        messages: Arc::clone(&messages) as Arc<dyn MessageCatalog>,
        files: Arc::new(StubFiles),
    };
    Harness {
        state,
        store,
        messages,
    }
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn authed(request: axum::http::request::Builder) -> axum::http::request::Builder {
    request.header("Authorization", "Bearer abc")
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn healthz_is_public() {
    let harness = harness_with(org_admin(), false);
    let request = Request::builder()
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(harness.state, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_authorization_header_is_forbidden() {
    let harness = harness_with(org_admin(), false);
    let request = Request::builder()
        .uri("/v1/terms")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(harness.state, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_authorization_header_is_unauthorized() {
    let harness = harness_with(org_admin(), false);
    let request = Request::builder()
        .uri("/v1/terms")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(harness.state, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rejected_token_is_unauthorized() {
    let harness = harness_with(org_admin(), true);
    let request = authed(Request::builder().uri("/v1/terms"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(harness.state, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn upload_terms_creates_records_for_org_admin() {
    let harness = harness_with(org_admin(), false);

    let payload = json!([{
        "title": "Fall 2025",
        "color": "#ff8800",
        "published_mobile": true,
        "published_desktop": true,
        "start_date": "2025-09-01",
        "end_date": "2025-12-19"
    }]);

    let request = authed(
        Request::builder()
            .method("POST")
            .uri("/v1/terms/upload")
            .header("Content-Type", "application/json"),
    )
    .body(Body::from(payload.to_string()))
    .unwrap();

    let (status, body) = send(harness.state.clone(), request).await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["status_code"], 200);

    let stored = TermStore::list_by_org(harness.store.as_ref(), "org-1")
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Fall 2025");
}

#[tokio::test]
async fn upload_terms_is_denied_for_super_admin() {
    let harness = harness_with(super_admin(), false);

    let payload = json!([{
        "title": "Fall 2025",
        "start_date": "2025-09-01",
        "end_date": "2025-12-19"
    }]);

    let request = authed(
        Request::builder()
            .method("POST")
            .uri("/v1/terms/upload")
            .header("Content-Type", "application/json"),
    )
    .body(Body::from(payload.to_string()))
    .unwrap();

    let (status, body) = send(harness.state, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error_code"], "ERR_FORBIDDEN");
}

#[tokio::test]
async fn upload_terms_rejects_inverted_date_range() {
    let harness = harness_with(org_admin(), false);

    let payload = json!([{
        "title": "Backwards",
        "start_date": "2025-12-19",
        "end_date": "2025-09-01"
    }]);

    let request = authed(
        Request::builder()
            .method("POST")
            .uri("/v1/terms/upload")
            .header("Content-Type", "application/json"),
    )
    .body(Body::from(payload.to_string()))
    .unwrap();

    let (status, body) = send(harness.state.clone(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "ERR_INVALID_REQUEST");

    let stored = TermStore::list_by_org(harness.store.as_ref(), "org-1")
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn list_terms_groups_every_org_for_super_admin() {
    let harness = harness_with(super_admin(), false);

    for (org, title) in [("org-1", "North Fall"), ("org-2", "South Fall")] {
        let payload = json!([{
            "title": title,
            "start_date": "2025-09-01",
            "end_date": "2025-12-19"
        }]);
        // Seed through the admin path of each org.
        let seeded = harness_with(
            CurrentUser {
                id: "admin".into(),
                organization_admin: Some(OrganizationAdmin {
                    id: org.into(),
                    ..OrganizationAdmin::default()
                }),
                ..CurrentUser::default()
            },
            false,
        );
        // Reuse the same storage so the super-admin view sees both.
        let state = AppState {
            terms: harness.state.terms.clone(),
            holidays: harness.state.holidays.clone(),
            ..seeded.state
        };
        let request = authed(
            Request::builder()
                .method("POST")
                .uri("/v1/terms/upload")
                .header("Content-Type", "application/json"),
        )
        .body(Body::from(payload.to_string()))
        .unwrap();
        let (status, _) = send(state, request).await;
        assert_eq!(status, StatusCode::OK);
    }

    let request = authed(Request::builder().uri("/v1/terms"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(harness.state, request).await;
    assert_eq!(status, StatusCode::OK);

    let groups = body["data"]["terms_org"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["organization_name"], "North Campus");
    assert_eq!(groups[0]["terms"][0]["title"], "North Fall");
    assert_eq!(groups[1]["terms"][0]["title"], "South Fall");
}

#[tokio::test]
async fn terms_for_student_uses_student_organization() {
    let harness = harness_with(org_admin(), false);

    // Seed a term in the student's organization.
    let payload = json!([{
        "title": "Fall 2025",
        "start_date": "2025-09-01",
        "end_date": "2025-12-19"
    }]);
    let request = authed(
        Request::builder()
            .method("POST")
            .uri("/v1/terms/upload")
            .header("Content-Type", "application/json"),
    )
    .body(Body::from(payload.to_string()))
    .unwrap();
    let (status, _) = send(harness.state.clone(), request).await;
    assert_eq!(status, StatusCode::OK);

    let request = authed(Request::builder().uri("/v1/terms/student/s1"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(harness.state, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["terms"][0]["title"], "Fall 2025");
}

#[tokio::test]
async fn holiday_upload_upserts_deletes_and_syncs_messages() {
    let harness = harness_with(org_admin(), false);

    // Create a holiday to delete later.
    let create = json!({
        "language_id": 1,
        "holidays": [{
            "title": "Tet",
            "color": "#cc0000",
            "published_mobile": true,
            "published_desktop": true,
            "start_date": "2026-02-16",
            "end_date": "2026-02-22"
        }]
    });
    let request = authed(
        Request::builder()
            .method("POST")
            .uri("/v1/holidays/upload")
            .header("Content-Type", "application/json"),
    )
    .body(Body::from(create.to_string()))
    .unwrap();
    let (status, _) = send(harness.state.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(harness.messages.uploads.load(Ordering::SeqCst), 1);

    let stored = HolidayStore::list_by_org(harness.store.as_ref(), "org-1")
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    let holiday_id = stored[0].id.to_string();

    // Delete it; the message cleanup must be attempted too.
    let delete = json!({
        "language_id": 1,
        "delete_ids": [holiday_id],
        "holidays": []
    });
    let request = authed(
        Request::builder()
            .method("POST")
            .uri("/v1/holidays/upload")
            .header("Content-Type", "application/json"),
    )
    .body(Body::from(delete.to_string()))
    .unwrap();
    let (status, _) = send(harness.state.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(harness.messages.deletes.load(Ordering::SeqCst), 1);

    let stored = HolidayStore::list_by_org(harness.store.as_ref(), "org-1")
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn holidays_for_web_returns_org_grouping() {
    let harness = harness_with(org_admin(), false);

    let create = json!({
        "language_id": 1,
        "holidays": [{
            "title": "Tet",
            "start_date": "2026-02-16",
            "end_date": "2026-02-22"
        }]
    });
    let request = authed(
        Request::builder()
            .method("POST")
            .uri("/v1/holidays/upload")
            .header("Content-Type", "application/json"),
    )
    .body(Body::from(create.to_string()))
    .unwrap();
    let (status, _) = send(harness.state.clone(), request).await;
    assert_eq!(status, StatusCode::OK);

    let request = authed(Request::builder().uri("/v1/holidays"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(harness.state, request).await;
    assert_eq!(status, StatusCode::OK);

    let groups = body["data"]["holidays_org"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["organization_name"], "Org org-1");
    assert_eq!(groups[0]["holidays"][0]["title"], "Tet");
}

#[tokio::test]
async fn term_crud_round_trip_over_http() {
    let harness = harness_with(org_admin(), false);

    let create = json!({
        "title": "Spring 2026",
        "color": "#3366cc",
        "start_date": "2026-01-05",
        "end_date": "2026-03-27"
    });
    let request = authed(
        Request::builder()
            .method("POST")
            .uri("/v1/terms")
            .header("Content-Type", "application/json"),
    )
    .body(Body::from(create.to_string()))
    .unwrap();
    let (status, body) = send(harness.state.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let request = authed(Request::builder().uri(format!("/v1/terms/{id}")))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(harness.state.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Spring 2026");

    let update = json!({
        "title": "Spring 2026 (revised)",
        "color": "#3366cc",
        "start_date": "2026-01-05",
        "end_date": "2026-04-03"
    });
    let request = authed(
        Request::builder()
            .method("PUT")
            .uri(format!("/v1/terms/{id}"))
            .header("Content-Type", "application/json"),
    )
    .body(Body::from(update.to_string()))
    .unwrap();
    let (status, body) = send(harness.state.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["end_date"], "2026-04-03");

    let request = authed(
        Request::builder()
            .method("DELETE")
            .uri(format!("/v1/terms/{id}")),
    )
    .body(Body::empty())
    .unwrap();
    let (status, _) = send(harness.state.clone(), request).await;
    assert_eq!(status, StatusCode::OK);

    let request = authed(Request::builder().uri(format!("/v1/terms/{id}")))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(harness.state, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "ERR_NOT_FOUND");
}
