//! Registry-backed RPC gateway and typed remote accessors.
//!
//! Every cross-service call in TermHub goes through this crate:
//!
//! - [`RpcClient`] - resolves the owning service through a
//!   [`termhub_registry::ServiceLocator`] on every call, performs the HTTP
//!   exchange, and classifies failures ([`RemoteCallError`])
//! - [`Envelope`] - the fixed `{status_code, message, data}` wire shape of
//!   every downstream JSON response
//! - [`RequestContext`] - the per-inbound-request bearer token and locale,
//!   threaded explicitly through every call boundary
//! - capability traits ([`UserDirectory`], [`OrganizationDirectory`],
//!   [`MessageCatalog`], [`FileStore`]) with one remote implementation
//!   each, fixing path templates and envelope payload types
//!
//! # Failure semantics
//!
//! Nothing in this crate retries. Every failure is surfaced to the caller
//! with the operation name (service, method, path) attached; retry policy,
//! if any, belongs to the caller. An inbound request's cancellation drops
//! the call future, which aborts the outbound exchange promptly.

pub mod client;
pub mod context;
pub mod dto;
pub mod envelope;
pub mod error;
pub mod files;
pub mod messages;
pub mod organization;
pub mod user;

pub use client::RpcClient;
pub use context::{APP_LANGUAGE_HEADER, RequestContext};
pub use dto::{
    CurrentUser, FileUpload, FileUrlRequest, LocalizedMessage, OrganizationAdmin, OrganizationInfo,
    OrganizationManager, Role, StudentInfo, TeacherInfo, UploadMessage, UploadMessageBatch,
    UploadedFile,
};
pub use envelope::Envelope;
pub use error::RemoteCallError;
pub use files::{FileStore, MediaKind, RemoteFileStore};
pub use messages::{MessageCatalog, RemoteMessageCatalog};
pub use organization::{OrganizationDirectory, RemoteOrganizationDirectory};
pub use user::{RemoteUserDirectory, UserDirectory};
