//! Record-type and message-key names shared with the localized-message
//! store.

pub const TERM_TYPE: &str = "term";
pub const TERM_WORD_KEY: &str = "term_word";
pub const HOLIDAY_TYPE: &str = "holiday";
pub const HOLIDAY_TITLE_KEY: &str = "holiday_title";
