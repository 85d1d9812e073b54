use std::fmt;

use crate::types::Channel;

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Poisoned,
    InvalidRow(String),
}

impl std::error::Error for StoreError {}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Sqlite(e) => write!(f, "SQLite error: {}", e),
            StoreError::Poisoned => write!(f, "Store connection lock poisoned"),
            StoreError::InvalidRow(msg) => write!(f, "Invalid stored row: {}", msg),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Sqlite(err)
    }
}

#[derive(Debug)]
pub enum DeliveryError {
    Telegram(teloxide::RequestError),
    Http(reqwest::Error),
    Rejected { status: u16, body: String },
    InvalidAddress(String),
    NoSender(Channel),
}

impl std::error::Error for DeliveryError {}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::Telegram(e) => write!(f, "Telegram error: {}", e),
            DeliveryError::Http(e) => write!(f, "HTTP error: {}", e),
            DeliveryError::Rejected { status, body } => {
                write!(f, "Delivery rejected with status {}: {}", status, body)
            }
            DeliveryError::InvalidAddress(addr) => write!(f, "Invalid address '{}'", addr),
            DeliveryError::NoSender(channel) => write!(f, "No sender configured for {}", channel),
        }
    }
}

impl From<teloxide::RequestError> for DeliveryError {
    fn from(err: teloxide::RequestError) -> Self {
        DeliveryError::Telegram(err)
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        DeliveryError::Http(err)
    }
}

#[derive(Debug)]
pub enum CalendarError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidDate(String),
}

impl std::error::Error for CalendarError {}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarError::Io(e) => write!(f, "IO error: {}", e),
            CalendarError::Json(e) => write!(f, "Raw calendar JSON error: {}", e),
            CalendarError::InvalidDate(text) => write!(f, "Cannot parse calendar date '{}'", text),
        }
    }
}

impl From<std::io::Error> for CalendarError {
    fn from(err: std::io::Error) -> Self {
        CalendarError::Io(err)
    }
}

impl From<serde_json::Error> for CalendarError {
    fn from(err: serde_json::Error) -> Self {
        CalendarError::Json(err)
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    Empty,
}

impl std::error::Error for CatalogError {}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "IO error: {}", e),
            CatalogError::Csv(e) => write!(f, "Location CSV error: {}", e),
            CatalogError::Empty => write!(f, "Location catalog has no entries"),
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        CatalogError::Csv(err)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "Missing configuration value {}", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "Invalid value '{}' for {}", value, key)
            }
        }
    }
}
