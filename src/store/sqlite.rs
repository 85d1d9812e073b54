use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::error::StoreError;
use crate::store::Store;
use crate::types::{
    Channel, FastingEvent, Language, NotificationKind, SenderProfile, StoredEvent, Subscriber,
};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS ekadasis (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timezone TEXT NOT NULL,
        name TEXT NOT NULL,
        date TEXT NOT NULL,              -- fasting date, YYYY-MM-DD
        paran_date TEXT NOT NULL,
        paran_start TEXT NOT NULL,       -- HH:MM, local to timezone
        paran_end TEXT NOT NULL,
        is_dvadasi INTEGER NOT NULL DEFAULT 0,
        notes TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE (timezone, date)
    );
    CREATE INDEX IF NOT EXISTS idx_ekadasis_paran ON ekadasis (timezone, paran_date);

    CREATE TABLE IF NOT EXISTS subscribers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        channel TEXT NOT NULL,           -- 'telegram' | 'whatsapp'
        address TEXT NOT NULL,           -- chat id or phone number
        timezone TEXT NOT NULL DEFAULT 'America/Mexico_City',
        active INTEGER NOT NULL DEFAULT 1,
        language TEXT NOT NULL DEFAULT 'es',
        username TEXT,
        first_name TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE (channel, address)
    );

    -- Write-once log: one row per (subscriber, event, kind), ever.
    CREATE TABLE IF NOT EXISTS notifications (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        subscriber_id INTEGER NOT NULL REFERENCES subscribers (id),
        ekadasi_id INTEGER NOT NULL REFERENCES ekadasis (id),
        kind TEXT NOT NULL CHECK (kind IN ('reminder', 'paran')),
        sent_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE (subscriber_id, ekadasi_id, kind)
    );
";

const EVENT_COLUMNS: &str =
    "id, timezone, name, date, paran_date, paran_start, paran_end, is_dvadasi, notes";
const SUBSCRIBER_COLUMNS: &str =
    "id, channel, address, timezone, active, language, username, first_name";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn query_event(
        &self,
        filter: &str,
        timezone: &str,
        date: NaiveDate,
    ) -> Result<Option<StoredEvent>, StoreError> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM ekadasis WHERE timezone = ?1 AND {} ORDER BY date LIMIT 1",
            EVENT_COLUMNS, filter
        );
        let event = conn
            .query_row(&sql, params![timezone, date], event_from_row)
            .optional()?;
        Ok(event)
    }
}

fn event_from_row(row: &Row<'_>) -> rusqlite::Result<StoredEvent> {
    Ok(StoredEvent {
        id: row.get(0)?,
        event: FastingEvent {
            timezone: row.get(1)?,
            name: row.get(2)?,
            fasting_date: row.get(3)?,
            paran_date: row.get(4)?,
            paran_start: row.get(5)?,
            paran_end: row.get(6)?,
            is_dvadasi: row.get(7)?,
            notes: row.get(8)?,
        },
    })
}

fn parse_column<T: std::str::FromStr<Err = String>>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    text.parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

fn subscriber_from_row(row: &Row<'_>) -> rusqlite::Result<Subscriber> {
    Ok(Subscriber {
        id: row.get(0)?,
        channel: parse_column(row, 1)?,
        address: row.get(2)?,
        timezone: row.get(3)?,
        active: row.get(4)?,
        language: parse_column(row, 5)?,
        username: row.get(6)?,
        first_name: row.get(7)?,
    })
}

fn find_subscriber(
    conn: &Connection,
    channel: Channel,
    address: &str,
) -> Result<Option<Subscriber>, StoreError> {
    let sql = format!(
        "SELECT {} FROM subscribers WHERE channel = ?1 AND address = ?2",
        SUBSCRIBER_COLUMNS
    );
    let subscriber = conn
        .query_row(&sql, params![channel.as_str(), address], subscriber_from_row)
        .optional()?;
    Ok(subscriber)
}

#[async_trait]
impl Store for SqliteStore {
    async fn insert_event_if_absent(&self, event: &FastingEvent) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "INSERT OR IGNORE INTO ekadasis
                (timezone, name, date, paran_date, paran_start, paran_end, is_dvadasi, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                event.timezone,
                event.name,
                event.fasting_date,
                event.paran_date,
                event.paran_start,
                event.paran_end,
                event.is_dvadasi,
                event.notes,
            ],
        )?;
        Ok(changed == 1)
    }

    async fn event_on(&self, timezone: &str, date: NaiveDate) -> Result<Option<StoredEvent>, StoreError> {
        self.query_event("date = ?2", timezone, date)
    }

    async fn event_with_paran_on(
        &self,
        timezone: &str,
        date: NaiveDate,
    ) -> Result<Option<StoredEvent>, StoreError> {
        self.query_event("paran_date = ?2", timezone, date)
    }

    async fn next_event(&self, timezone: &str, from: NaiveDate) -> Result<Option<StoredEvent>, StoreError> {
        self.query_event("date >= ?2", timezone, from)
    }

    async fn events_for(&self, timezone: &str) -> Result<Vec<StoredEvent>, StoreError> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM ekadasis WHERE timezone = ?1 ORDER BY date",
            EVENT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let events = stmt
            .query_map(params![timezone], event_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(events)
    }

    async fn active_subscribers(&self) -> Result<Vec<Subscriber>, StoreError> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM subscribers WHERE active = 1 ORDER BY id",
            SUBSCRIBER_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let subscribers = stmt
            .query_map([], subscriber_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(subscribers)
    }

    async fn subscriber(&self, channel: Channel, address: &str) -> Result<Option<Subscriber>, StoreError> {
        let conn = self.conn()?;
        find_subscriber(&conn, channel, address)
    }

    async fn subscribe(
        &self,
        channel: Channel,
        address: &str,
        timezone: &str,
        profile: &SenderProfile,
    ) -> Result<Subscriber, StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO subscribers (channel, address, timezone, active, username, first_name)
             VALUES (?1, ?2, ?3, 1, ?4, ?5)
             ON CONFLICT (channel, address) DO UPDATE SET
                timezone = excluded.timezone,
                active = 1,
                username = COALESCE(excluded.username, subscribers.username),
                first_name = COALESCE(excluded.first_name, subscribers.first_name)",
            params![
                channel.as_str(),
                address,
                timezone,
                profile.username,
                profile.first_name,
            ],
        )?;

        find_subscriber(&conn, channel, address)?.ok_or_else(|| {
            StoreError::InvalidRow(format!("subscriber {}:{} vanished after upsert", channel, address))
        })
    }

    async fn deactivate(&self, channel: Channel, address: &str) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE subscribers SET active = 0 WHERE channel = ?1 AND address = ?2 AND active = 1",
            params![channel.as_str(), address],
        )?;
        Ok(changed == 1)
    }

    async fn set_language(
        &self,
        channel: Channel,
        address: &str,
        language: Language,
    ) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE subscribers SET language = ?3 WHERE channel = ?1 AND address = ?2",
            params![channel.as_str(), address, language.as_str()],
        )?;
        Ok(changed == 1)
    }

    async fn has_notification(
        &self,
        subscriber_id: i64,
        event_id: i64,
        kind: NotificationKind,
    ) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM notifications
                 WHERE subscriber_id = ?1 AND ekadasi_id = ?2 AND kind = ?3",
                params![subscriber_id, event_id, kind.as_str()],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    async fn record_notification(
        &self,
        subscriber_id: i64,
        event_id: i64,
        kind: NotificationKind,
    ) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "INSERT OR IGNORE INTO notifications (subscriber_id, ekadasi_id, kind) VALUES (?1, ?2, ?3)",
            params![subscriber_id, event_id, kind.as_str()],
        )?;
        Ok(changed == 1)
    }
}
