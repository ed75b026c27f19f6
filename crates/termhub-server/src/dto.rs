//! Request and response shapes for the term/holiday API, with mappers to
//! and from the domain model. Dates cross the wire as `YYYY-MM-DD`
//! strings.

use serde::{Deserialize, Serialize};

use termhub_core::{Holiday, Term, format_date};

// =========================================================================
// Terms
// =========================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertTermRequest {
    pub title: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub published_mobile: bool,
    #[serde(default)]
    pub published_desktop: bool,
    #[serde(default)]
    pub published_teacher: bool,
    #[serde(default)]
    pub published_parent: bool,
    pub start_date: String,
    pub end_date: String,
}

/// One entry of a bulk term upload; an empty/absent id means "create".
#[derive(Debug, Clone, Deserialize)]
pub struct UploadTermItem {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub published_mobile: bool,
    #[serde(default)]
    pub published_desktop: bool,
    #[serde(default)]
    pub published_teacher: bool,
    #[serde(default)]
    pub published_parent: bool,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermResponse {
    pub id: String,
    pub title: String,
    pub color: String,
    pub published_mobile: bool,
    pub published_desktop: bool,
    pub published_teacher: bool,
    pub published_parent: bool,
    pub start_date: String,
    pub end_date: String,
}

impl From<&Term> for TermResponse {
    fn from(term: &Term) -> Self {
        Self {
            id: term.id.to_string(),
            title: term.title.clone(),
            color: term.color.clone(),
            published_mobile: term.published_mobile,
            published_desktop: term.published_desktop,
            published_teacher: term.published_teacher,
            published_parent: term.published_parent,
            start_date: format_date(term.start_date),
            end_date: format_date(term.end_date),
        }
    }
}

pub fn map_terms(terms: &[Term]) -> Vec<TermResponse> {
    terms.iter().map(TermResponse::from).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermListResponse {
    pub terms: Vec<TermResponse>,
}

/// One organization's terms, as listed for admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermsByOrg {
    pub organization_name: String,
    pub terms: Vec<TermResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermsByOrgListResponse {
    pub terms_org: Vec<TermsByOrg>,
}

// =========================================================================
// Holidays
// =========================================================================

/// Bulk holiday mutation: deletes first, then upserts.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadHolidaysRequest {
    pub language_id: u32,
    #[serde(default)]
    pub delete_ids: Vec<String>,
    #[serde(default)]
    pub holidays: Vec<UploadHolidayItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadHolidayItem {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub published_mobile: bool,
    #[serde(default)]
    pub published_desktop: bool,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayResponse {
    pub id: String,
    pub title: String,
    pub color: String,
    pub published_mobile: bool,
    pub published_desktop: bool,
    pub start_date: String,
    pub end_date: String,
}

impl From<&Holiday> for HolidayResponse {
    fn from(holiday: &Holiday) -> Self {
        Self {
            id: holiday.id.to_string(),
            title: holiday.title.clone(),
            color: holiday.color.clone(),
            published_mobile: holiday.published_mobile,
            published_desktop: holiday.published_desktop,
            start_date: format_date(holiday.start_date),
            end_date: format_date(holiday.end_date),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidaysByOrg {
    pub organization_name: String,
    pub holidays: Vec<HolidayResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidaysByOrgListResponse {
    pub holidays_org: Vec<HolidaysByOrg>,
}
