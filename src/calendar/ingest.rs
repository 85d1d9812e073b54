use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::calendar::{derive, DerivationConfig};
use crate::error::CalendarError;
use crate::store::Store;
use crate::types::RawDayRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub derived: usize,
    pub inserted: usize,
    pub existing: usize,
}

/// Reads a scraper dump: a JSON array of `{date, tithi, events}` objects.
pub fn load_raw_days(path: impl AsRef<Path>) -> Result<Vec<RawDayRecord>, CalendarError> {
    let json = fs::read_to_string(path)?;
    let days = serde_json::from_str(&json)?;
    Ok(days)
}

/// Derives events for `timezone` and stores the ones not stored yet.
///
/// Existing events are never overwritten, so re-running an ingest over an
/// overlapping scrape is harmless.
pub async fn ingest(
    store: &dyn Store,
    timezone: &str,
    days: &[RawDayRecord],
    config: &DerivationConfig,
) -> Result<IngestSummary, Box<dyn std::error::Error + Send + Sync>> {
    let events = derive(timezone, days, config)?;
    log::info!("Derived {} ekadasi events for {} from {} days", events.len(), timezone, days.len());

    let mut summary = IngestSummary {
        derived: events.len(),
        ..IngestSummary::default()
    };

    for event in &events {
        if store.insert_event_if_absent(event).await? {
            log::info!("Inserted: {} - {}", event.name, event.fasting_date);
            summary.inserted += 1;
        } else {
            log::debug!("Already stored: {} - {}", event.name, event.fasting_date);
            summary.existing += 1;
        }
    }

    Ok(summary)
}
