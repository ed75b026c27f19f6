//! In-memory storage backend.
//!
//! Backs tests and single-node deployments; the same maps serve both
//! record kinds, partitioned by type.

use async_trait::async_trait;
use dashmap::DashMap;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use termhub_core::{Holiday, Term};

use crate::error::StorageError;
use crate::traits::{HolidayStore, TermStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    terms: DashMap<Uuid, Term>,
    holidays: DashMap<Uuid, Holiday>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_terms_by_org(&self, organization_id: &str) -> Vec<Term> {
        let mut terms: Vec<Term> = self
            .terms
            .iter()
            .filter(|entry| entry.organization_id == organization_id)
            .map(|entry| entry.clone())
            .collect();
        terms.sort_by_key(|t| t.start_date);
        terms
    }
}

#[async_trait]
impl TermStore for MemoryStore {
    async fn create(&self, mut term: Term) -> Result<Term, StorageError> {
        let now = OffsetDateTime::now_utc();
        term.created_at = now;
        term.updated_at = now;
        self.terms.insert(term.id, term.clone());
        tracing::debug!(term_id = %term.id, org_id = %term.organization_id, "term created");
        Ok(term)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Term>, StorageError> {
        Ok(self.terms.get(&id).map(|entry| entry.clone()))
    }

    async fn update(&self, mut term: Term) -> Result<Term, StorageError> {
        if !self.terms.contains_key(&term.id) {
            return Err(StorageError::not_found("term", term.id.to_string()));
        }
        term.updated_at = OffsetDateTime::now_utc();
        self.terms.insert(term.id, term.clone());
        Ok(term)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StorageError> {
        self.terms
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found("term", id.to_string()))
    }

    async fn list_by_org(&self, organization_id: &str) -> Result<Vec<Term>, StorageError> {
        Ok(self.sorted_terms_by_org(organization_id))
    }

    async fn current_by_org(
        &self,
        organization_id: &str,
        today: Date,
    ) -> Result<Option<Term>, StorageError> {
        Ok(self
            .sorted_terms_by_org(organization_id)
            .into_iter()
            .find(|term| term.contains(today)))
    }

    async fn previous_term(
        &self,
        organization_id: &str,
        before: Uuid,
    ) -> Result<Option<Term>, StorageError> {
        let reference = self
            .terms
            .get(&before)
            .map(|entry| entry.clone())
            .ok_or_else(|| StorageError::not_found("term", before.to_string()))?;

        Ok(self
            .sorted_terms_by_org(organization_id)
            .into_iter()
            .filter(|term| term.id != before && term.end_date < reference.start_date)
            .max_by_key(|term| term.end_date))
    }
}

#[async_trait]
impl HolidayStore for MemoryStore {
    async fn create(&self, mut holiday: Holiday) -> Result<Holiday, StorageError> {
        let now = OffsetDateTime::now_utc();
        holiday.created_at = now;
        holiday.updated_at = now;
        self.holidays.insert(holiday.id, holiday.clone());
        Ok(holiday)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Holiday>, StorageError> {
        Ok(self.holidays.get(&id).map(|entry| entry.clone()))
    }

    async fn update(&self, mut holiday: Holiday) -> Result<Holiday, StorageError> {
        if !self.holidays.contains_key(&holiday.id) {
            return Err(StorageError::not_found("holiday", holiday.id.to_string()));
        }
        holiday.updated_at = OffsetDateTime::now_utc();
        self.holidays.insert(holiday.id, holiday.clone());
        Ok(holiday)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StorageError> {
        self.holidays
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found("holiday", id.to_string()))
    }

    async fn list_by_org(&self, organization_id: &str) -> Result<Vec<Holiday>, StorageError> {
        let mut holidays: Vec<Holiday> = self
            .holidays
            .iter()
            .filter(|entry| entry.organization_id == organization_id)
            .map(|entry| entry.clone())
            .collect();
        holidays.sort_by_key(|h| h.start_date);
        Ok(holidays)
    }
}
