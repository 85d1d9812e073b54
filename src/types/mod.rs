use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

mod subscriber;
pub use subscriber::*;

/// One row of the scraped ritual calendar, as handed over by the scraper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDayRecord {
    pub date: String,
    pub tithi: String,
    #[serde(default)]
    pub events: Vec<String>,
}

impl RawDayRecord {
    pub fn new(date: &str, tithi: &str, events: &[&str]) -> Self {
        Self {
            date: date.to_string(),
            tithi: tithi.to_string(),
            events: events.iter().map(|e| e.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastingEvent {
    pub timezone: String,
    pub name: String,
    pub fasting_date: NaiveDate,
    pub paran_date: NaiveDate,
    pub paran_start: String,
    pub paran_end: String,
    pub is_dvadasi: bool,
    pub notes: Option<String>,
}

/// A fasting event as persisted, carrying the row id notification records point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub id: i64,
    #[serde(flatten)]
    pub event: FastingEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Reminder,
    Paran,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Reminder => "reminder",
            NotificationKind::Paran => "paran",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSummary {
    pub sent: u32,
    pub errors: u32,
}
