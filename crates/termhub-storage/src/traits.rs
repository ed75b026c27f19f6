//! Storage traits for term and holiday records.

use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

use termhub_core::{Holiday, Term};

use crate::error::StorageError;

/// Persistence contract for academic terms.
///
/// `create` stamps `created_at`/`updated_at`; `update` refreshes
/// `updated_at`. Listing methods return records sorted by start date.
#[async_trait]
pub trait TermStore: Send + Sync {
    /// Inserts a new term and returns it with its timestamps set.
    async fn create(&self, term: Term) -> Result<Term, StorageError>;

    /// Reads a term by ID; `Ok(None)` when absent.
    async fn get(&self, id: Uuid) -> Result<Option<Term>, StorageError>;

    /// Replaces an existing term.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no term with that ID exists.
    async fn update(&self, term: Term) -> Result<Term, StorageError>;

    /// Deletes a term by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no term with that ID exists.
    async fn delete(&self, id: Uuid) -> Result<(), StorageError>;

    /// All terms of one organization.
    async fn list_by_org(&self, organization_id: &str) -> Result<Vec<Term>, StorageError>;

    /// The organization's term containing `today`; `Ok(None)` when no term
    /// is running (not an error).
    async fn current_by_org(
        &self,
        organization_id: &str,
        today: Date,
    ) -> Result<Option<Term>, StorageError>;

    /// The organization's latest term ending before the given term starts.
    async fn previous_term(
        &self,
        organization_id: &str,
        before: Uuid,
    ) -> Result<Option<Term>, StorageError>;
}

/// Persistence contract for holidays.
#[async_trait]
pub trait HolidayStore: Send + Sync {
    async fn create(&self, holiday: Holiday) -> Result<Holiday, StorageError>;

    async fn get(&self, id: Uuid) -> Result<Option<Holiday>, StorageError>;

    async fn update(&self, holiday: Holiday) -> Result<Holiday, StorageError>;

    async fn delete(&self, id: Uuid) -> Result<(), StorageError>;

    async fn list_by_org(&self, organization_id: &str) -> Result<Vec<Holiday>, StorageError>;
}
