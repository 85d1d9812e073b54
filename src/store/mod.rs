use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::StoreError;
use crate::types::{
    Channel, FastingEvent, Language, NotificationKind, SenderProfile, StoredEvent, Subscriber,
};

mod sqlite;
pub use sqlite::*;

/// Durable storage for events, subscribers and the notification log.
#[async_trait]
pub trait Store: Send + Sync {
    /// Stores the event unless one already exists for its (timezone, fasting date).
    /// Returns whether a row was written.
    async fn insert_event_if_absent(&self, event: &FastingEvent) -> Result<bool, StoreError>;

    async fn event_on(&self, timezone: &str, date: NaiveDate) -> Result<Option<StoredEvent>, StoreError>;

    async fn event_with_paran_on(
        &self,
        timezone: &str,
        date: NaiveDate,
    ) -> Result<Option<StoredEvent>, StoreError>;

    /// First event fasting on or after `from`.
    async fn next_event(&self, timezone: &str, from: NaiveDate) -> Result<Option<StoredEvent>, StoreError>;

    async fn events_for(&self, timezone: &str) -> Result<Vec<StoredEvent>, StoreError>;

    async fn active_subscribers(&self) -> Result<Vec<Subscriber>, StoreError>;

    async fn subscriber(&self, channel: Channel, address: &str) -> Result<Option<Subscriber>, StoreError>;

    /// Creates the subscriber, or reactivates it and moves it to `timezone`.
    async fn subscribe(
        &self,
        channel: Channel,
        address: &str,
        timezone: &str,
        profile: &SenderProfile,
    ) -> Result<Subscriber, StoreError>;

    /// Marks an active subscriber inactive. Returns false if there was none.
    async fn deactivate(&self, channel: Channel, address: &str) -> Result<bool, StoreError>;

    async fn set_language(
        &self,
        channel: Channel,
        address: &str,
        language: Language,
    ) -> Result<bool, StoreError>;

    async fn has_notification(
        &self,
        subscriber_id: i64,
        event_id: i64,
        kind: NotificationKind,
    ) -> Result<bool, StoreError>;

    /// Appends to the notification log if the (subscriber, event, kind) entry is
    /// absent, as one atomic statement. Returns false when another writer got there
    /// first.
    async fn record_notification(
        &self,
        subscriber_id: i64,
        event_id: i64,
        kind: NotificationKind,
    ) -> Result<bool, StoreError>;
}
