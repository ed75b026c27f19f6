//! Domain records managed by TermHub.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// An academic term belonging to one organization.
///
/// The `published_*` flags control which client surfaces may display the
/// term; they are opaque to this service and simply round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: Uuid,
    pub organization_id: String,
    pub title: String,
    pub color: String,
    pub published_mobile: bool,
    pub published_desktop: bool,
    pub published_teacher: bool,
    pub published_parent: bool,
    pub start_date: Date,
    pub end_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Term {
    /// True when `date` falls inside the term, bounds included.
    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// A holiday belonging to one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: Uuid,
    pub organization_id: String,
    pub title: String,
    pub color: String,
    pub published_mobile: bool,
    pub published_desktop: bool,
    pub start_date: Date,
    pub end_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
