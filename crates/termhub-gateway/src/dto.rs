//! Payload types carried inside downstream envelopes.
//!
//! Field names are wire-exact; everything except identifiers defaults so a
//! sparse envelope still decodes.

use serde::{Deserialize, Serialize};

/// The authenticated user as reported by the identity service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub is_deactive: bool,
    #[serde(default)]
    pub is_super_admin: bool,
    #[serde(default)]
    pub organization_id_active: String,
    #[serde(default, rename = "organizations")]
    pub organization_ids: Vec<String>,
    #[serde(default)]
    pub roles: Option<Vec<Role>>,
    #[serde(default)]
    pub organization_admin: Option<OrganizationAdmin>,
}

impl CurrentUser {
    /// The organization this user administers, when they are an org admin.
    pub fn admin_organization_id(&self) -> Option<&str> {
        self.organization_admin
            .as_ref()
            .map(|admin| admin.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: i64,
    #[serde(default, rename = "role")]
    pub role_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationAdmin {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}

/// A student record as reported by the identity service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub organization_id: String,
}

/// A teacher record as reported by the identity service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeacherInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub organization_id: String,
    #[serde(default)]
    pub user_id: String,
}

/// An organization as reported by the organization directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub managers: Vec<OrganizationManager>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationManager {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_nick_name: String,
    #[serde(default)]
    pub is_manager: bool,
}

/// One localized message from the message store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedMessage {
    #[serde(default)]
    pub type_id: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub key: String,
    #[serde(default, rename = "message")]
    pub value: String,
    #[serde(default)]
    pub language_id: u32,
}

/// One message to upsert into the message store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadMessage {
    pub type_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub key: String,
    #[serde(rename = "message")]
    pub value: String,
    pub language_id: u32,
}

/// A batch of message upserts, the shape the message store accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadMessageBatch {
    pub message_languages: Vec<UploadMessage>,
}

/// A file to push to the file store, with its multipart text fields.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub folder: String,
    pub mode: String,
    pub image_name: Option<String>,
    pub content: Vec<u8>,
}

/// Request for a presigned access URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUrlRequest {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// The file store's answer to an upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_name: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}
