//! Turns a scraped day-by-day ritual calendar into fasting events.
//!
//! Each fasting day is paired with the first following day that carries a
//! "Break fast HH:MM - HH:MM" window. Days the calendar marks "not suitable
//! for fasting" and fasts that fall on Dvādaśī are recorded in the event
//! notes. A fasting day without a break-fast window inside the lookahead is
//! dropped.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::CalendarError;
use crate::types::{FastingEvent, RawDayRecord};

mod ingest;
pub use ingest::*;

pub const DEFAULT_PARAN_LOOKAHEAD_DAYS: usize = 4;

pub const SHIFTED_NOTE: &str = "Ekādaśī shifted by the lunar calendar";
pub const DVADASI_NOTE: &str = "Mahādvādaśī: fast observed on Dvādaśī, break the fast with grains";

static RE_FASTING_FOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)FASTING FOR (.+?) EKĀDAŚĪ").expect("valid regex"));
static RE_FAST_TILL_NOON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.+?) ~.+Fast till noon").expect("valid regex"));
static RE_BREAK_FAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Break fast (\d{2}:\d{2}) - (\d{2}:\d{2})").expect("valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationConfig {
    /// How many days after a fast are searched for its break-fast window.
    pub paran_lookahead_days: usize,
    /// Year assumed for the first record when the scraped dates omit it.
    pub reference_year: Option<i32>,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            paran_lookahead_days: DEFAULT_PARAN_LOOKAHEAD_DAYS,
            reference_year: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BreakFast {
    start: String,
    end: String,
}

/// A raw day after classification.
#[derive(Debug, Clone)]
struct CalendarDay {
    date: NaiveDate,
    tithi: String,
    is_fasting: bool,
    fasting_name: Option<String>,
    not_suitable: bool,
    break_fast: Option<BreakFast>,
    is_dvadasi: bool,
}

impl CalendarDay {
    fn classify(raw: &RawDayRecord, date: NaiveDate) -> Self {
        let is_fasting = raw
            .events
            .iter()
            .any(|e| e.contains("FASTING FOR") || e.contains("Fast till noon"));
        let not_suitable = raw
            .events
            .iter()
            .any(|e| e.contains("not suitable for fasting"));

        Self {
            date,
            tithi: raw.tithi.clone(),
            is_fasting,
            fasting_name: extract_fasting_name(&raw.events),
            not_suitable,
            break_fast: extract_break_fast(&raw.events),
            is_dvadasi: raw.tithi.contains("Dvādaśī") && is_fasting,
        }
    }
}

fn extract_fasting_name(events: &[String]) -> Option<String> {
    for event in events {
        if let Some(caps) = RE_FASTING_FOR.captures(event) {
            return Some(format!("{} Ekādaśī", &caps[1]));
        }
        if event.contains("Fast till noon") {
            if let Some(caps) = RE_FAST_TILL_NOON.captures(event) {
                return Some(caps[1].trim().to_string());
            }
        }
    }
    None
}

fn extract_break_fast(events: &[String]) -> Option<BreakFast> {
    events.iter().find_map(|event| {
        RE_BREAK_FAST.captures(event).map(|caps| BreakFast {
            start: caps[1].to_string(),
            end: caps[2].to_string(),
        })
    })
}

fn month_number(abbrev: &str) -> Option<u32> {
    let month = match abbrev.get(..3)?.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Day, month and optional year out of "26 Dec 2024", "Thu 26 Dec" and similar.
fn parse_display_date(text: &str) -> Option<(u32, u32, Option<i32>)> {
    let tokens: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    let day_pos = tokens.iter().position(|t| t.parse::<u32>().is_ok())?;
    let day = tokens[day_pos].parse().ok()?;
    let month = month_number(tokens.get(day_pos + 1)?)?;
    let year = match tokens.get(day_pos + 2) {
        Some(t) => Some(t.parse().ok()?),
        None => None,
    };
    Some((day, month, year))
}

/// Parses every record's date, inferring missing years from the previous record.
fn resolve_dates(days: &[RawDayRecord], reference_year: Option<i32>) -> Result<Vec<NaiveDate>, CalendarError> {
    let mut dates = Vec::with_capacity(days.len());
    let mut previous: Option<NaiveDate> = None;

    for raw in days {
        let invalid = || CalendarError::InvalidDate(raw.date.clone());
        let (day, month, year) = parse_display_date(&raw.date).ok_or_else(invalid)?;

        let year = match (year, previous) {
            (Some(y), _) => y,
            (None, Some(prev)) if month < prev.month() => prev.year() + 1,
            (None, Some(prev)) => prev.year(),
            (None, None) => reference_year.ok_or_else(invalid)?,
        };

        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
        dates.push(date);
        previous = Some(date);
    }

    Ok(dates)
}

/// Derives the fasting events of one timezone from its raw calendar days.
///
/// Pure: the same input always yields the same events, in source order.
pub fn derive(
    timezone: &str,
    days: &[RawDayRecord],
    config: &DerivationConfig,
) -> Result<Vec<FastingEvent>, CalendarError> {
    let dates = resolve_dates(days, config.reference_year)?;
    let days: Vec<CalendarDay> = days
        .iter()
        .zip(dates)
        .map(|(raw, date)| CalendarDay::classify(raw, date))
        .collect();

    let mut events = Vec::new();

    for (i, day) in days.iter().enumerate() {
        if day.tithi == "Ekādaśī" && day.not_suitable {
            log::info!("{}: Ekādaśī of {} moves to the next day", timezone, day.date);
        }

        let name = match (&day.fasting_name, day.is_fasting) {
            (Some(name), true) => name,
            _ => continue,
        };

        let lookahead_end = (i + 1 + config.paran_lookahead_days).min(days.len());
        let paran = days[i + 1..lookahead_end]
            .iter()
            .find_map(|d| d.break_fast.as_ref().map(|bf| (d.date, bf)));

        let Some((paran_date, break_fast)) = paran else {
            log::warn!(
                "{}: no break-fast window within {} days of {} ({}), skipping",
                timezone,
                config.paran_lookahead_days,
                name,
                day.date
            );
            continue;
        };

        let mut notes: Option<String> = None;
        if i > 0 && days[i - 1].not_suitable {
            notes = Some(SHIFTED_NOTE.to_string());
        }
        if day.is_dvadasi {
            notes = Some(match notes {
                Some(n) => format!("{}. {}", n, DVADASI_NOTE),
                None => DVADASI_NOTE.to_string(),
            });
        }

        events.push(FastingEvent {
            timezone: timezone.to_string(),
            name: name.clone(),
            fasting_date: day.date,
            paran_date,
            paran_start: break_fast.start.clone(),
            paran_end: break_fast.end.clone(),
            is_dvadasi: day.is_dvadasi,
            notes,
        });
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_dates() {
        assert_eq!(parse_display_date("26 Dec 2024"), Some((26, 12, Some(2024))));
        assert_eq!(parse_display_date("Thu, 26 Dec"), Some((26, 12, None)));
        assert_eq!(parse_display_date("1 September 2025"), Some((1, 9, Some(2025))));
        assert_eq!(parse_display_date("Dec 26"), None);
    }

    #[test]
    fn extracts_noon_fast_name() {
        let events = vec!["Śrī Rāma Navamī ~ Appearance of Lord Rāmacandra (Fast till noon)".to_string()];
        assert_eq!(extract_fasting_name(&events), Some("Śrī Rāma Navamī".to_string()));
    }

    #[test]
    fn extracts_break_fast_window() {
        let events = vec![
            "Some festival".to_string(),
            "Break fast 06:52 - 10:41 (Daylight saving not considered)".to_string(),
        ];
        assert_eq!(
            extract_break_fast(&events),
            Some(BreakFast { start: "06:52".to_string(), end: "10:41".to_string() })
        );
    }

    #[test]
    fn fasting_name_is_case_insensitive() {
        let events = vec!["Fasting for Mokṣadā Ekādaśī".to_string()];
        assert_eq!(extract_fasting_name(&events), Some("Mokṣadā Ekādaśī".to_string()));
    }
}
