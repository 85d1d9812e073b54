#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use ekadasi_reminder_bot::*;
    use std::sync::{Arc, Mutex};

    const TZ: &str = "America/Mexico_City";

    #[derive(Default)]
    struct MockSender {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl MockSender {
        fn messages(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessageSender for MockSender {
        async fn send(&self, address: &str, text: &str) -> Result<(), DeliveryError> {
            self.sent.lock().unwrap().push((address.to_string(), text.to_string()));
            Ok(())
        }
    }

    struct FailingSender;

    #[async_trait]
    impl MessageSender for FailingSender {
        async fn send(&self, _address: &str, _text: &str) -> Result<(), DeliveryError> {
            Err(DeliveryError::Rejected {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    /// Stands in for a second dispatch run that records the same notification
    /// while this run is still sending.
    struct RacingSender {
        other: Arc<SqliteStore>,
        subscriber_id: i64,
        event_id: i64,
    }

    #[async_trait]
    impl MessageSender for RacingSender {
        async fn send(&self, _address: &str, _text: &str) -> Result<(), DeliveryError> {
            self.other
                .record_notification(self.subscriber_id, self.event_id, NotificationKind::Reminder)
                .await
                .unwrap();
            Ok(())
        }
    }

    /// Delegates to SQLite but fails every event lookup for one timezone.
    struct FlakyStore {
        inner: SqliteStore,
        broken_timezone: &'static str,
    }

    #[async_trait]
    impl Store for FlakyStore {
        async fn insert_event_if_absent(&self, event: &FastingEvent) -> Result<bool, StoreError> {
            self.inner.insert_event_if_absent(event).await
        }

        async fn event_on(&self, timezone: &str, date: NaiveDate) -> Result<Option<StoredEvent>, StoreError> {
            if timezone == self.broken_timezone {
                return Err(StoreError::Poisoned);
            }
            self.inner.event_on(timezone, date).await
        }

        async fn event_with_paran_on(
            &self,
            timezone: &str,
            date: NaiveDate,
        ) -> Result<Option<StoredEvent>, StoreError> {
            self.inner.event_with_paran_on(timezone, date).await
        }

        async fn next_event(&self, timezone: &str, from: NaiveDate) -> Result<Option<StoredEvent>, StoreError> {
            self.inner.next_event(timezone, from).await
        }

        async fn events_for(&self, timezone: &str) -> Result<Vec<StoredEvent>, StoreError> {
            self.inner.events_for(timezone).await
        }

        async fn active_subscribers(&self) -> Result<Vec<Subscriber>, StoreError> {
            self.inner.active_subscribers().await
        }

        async fn subscriber(&self, channel: Channel, address: &str) -> Result<Option<Subscriber>, StoreError> {
            self.inner.subscriber(channel, address).await
        }

        async fn subscribe(
            &self,
            channel: Channel,
            address: &str,
            timezone: &str,
            profile: &SenderProfile,
        ) -> Result<Subscriber, StoreError> {
            self.inner.subscribe(channel, address, timezone, profile).await
        }

        async fn deactivate(&self, channel: Channel, address: &str) -> Result<bool, StoreError> {
            self.inner.deactivate(channel, address).await
        }

        async fn set_language(&self, channel: Channel, address: &str, language: Language) -> Result<bool, StoreError> {
            self.inner.set_language(channel, address, language).await
        }

        async fn has_notification(
            &self,
            subscriber_id: i64,
            event_id: i64,
            kind: NotificationKind,
        ) -> Result<bool, StoreError> {
            self.inner.has_notification(subscriber_id, event_id, kind).await
        }

        async fn record_notification(
            &self,
            subscriber_id: i64,
            event_id: i64,
            kind: NotificationKind,
        ) -> Result<bool, StoreError> {
            self.inner.record_notification(subscriber_id, event_id, kind).await
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(timezone: &str, name: &str, fasting: NaiveDate, paran: NaiveDate, is_dvadasi: bool) -> FastingEvent {
        FastingEvent {
            timezone: timezone.to_string(),
            name: name.to_string(),
            fasting_date: fasting,
            paran_date: paran,
            paran_start: "07:15".to_string(),
            paran_end: "09:45".to_string(),
            is_dvadasi,
            notes: None,
        }
    }

    async fn seeded_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .insert_event_if_absent(&event(TZ, "Utpannā Ekādaśī", ymd(2024, 12, 26), ymd(2024, 12, 27), false))
            .await
            .unwrap();
        store
            .insert_event_if_absent(&event(TZ, "Mokṣadā Ekādaśī", ymd(2024, 12, 28), ymd(2024, 12, 29), true))
            .await
            .unwrap();
        store
    }

    async fn subscribe(store: &SqliteStore, channel: Channel, address: &str, timezone: &str) -> Subscriber {
        store
            .subscribe(channel, address, timezone, &SenderProfile::default())
            .await
            .unwrap()
    }

    fn telegram(sender: Arc<dyn MessageSender>) -> Senders {
        Senders::new().with(Channel::Telegram, sender)
    }

    #[tokio::test]
    async fn test_reminder_is_sent_the_day_before() {
        let store = seeded_store().await;
        let sub = subscribe(&store, Channel::Telegram, "100", TZ).await;
        let mock = Arc::new(MockSender::default());

        let summary = dispatch(&store, &telegram(mock.clone()), ymd(2024, 12, 25)).await.unwrap();

        assert_eq!(summary, DispatchSummary { sent: 1, errors: 0 });
        let messages = mock.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, "100");
        assert!(messages[0].1.contains("Mañana es Utpannā Ekādaśī"));
        assert!(messages[0].1.contains("07:15 - 09:45"));

        let ev = store.event_on(TZ, ymd(2024, 12, 26)).await.unwrap().unwrap();
        assert!(store.has_notification(sub.id, ev.id, NotificationKind::Reminder).await.unwrap());
    }

    #[tokio::test]
    async fn test_second_run_sends_nothing() {
        let store = seeded_store().await;
        subscribe(&store, Channel::Telegram, "100", TZ).await;
        let mock = Arc::new(MockSender::default());
        let senders = telegram(mock.clone());

        let first = dispatch(&store, &senders, ymd(2024, 12, 27)).await.unwrap();
        let second = dispatch(&store, &senders, ymd(2024, 12, 27)).await.unwrap();

        assert_eq!(first.sent, 2);
        assert_eq!(second, DispatchSummary { sent: 0, errors: 0 });
        assert_eq!(mock.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_reminder_and_paran_on_the_same_day() {
        let store = seeded_store().await;
        subscribe(&store, Channel::Telegram, "100", TZ).await;
        let mock = Arc::new(MockSender::default());

        // 27 Dec: paran for the 26th, reminder for the 28th.
        let summary = dispatch(&store, &telegram(mock.clone()), ymd(2024, 12, 27)).await.unwrap();
        assert_eq!(summary.sent, 2);

        let texts: Vec<String> = mock.messages().into_iter().map(|(_, t)| t).collect();
        assert!(texts.iter().any(|t| t.contains("Mañana es Mokṣadā Ekādaśī")));
        assert!(texts.iter().any(|t| t.starts_with("🍽️ Paran")));
    }

    #[tokio::test]
    async fn test_paran_on_dvadasi_mentions_grains() {
        let store = seeded_store().await;
        let sub = subscribe(&store, Channel::Telegram, "100", TZ).await;
        store.set_language(Channel::Telegram, "100", Language::En).await.unwrap();
        let mock = Arc::new(MockSender::default());

        let summary = dispatch(&store, &telegram(mock.clone()), ymd(2024, 12, 29)).await.unwrap();
        assert_eq!(summary.sent, 1);
        let messages = mock.messages();
        assert!(messages[0].1.contains("Today between 07:15 and 09:45"));
        assert!(messages[0].1.contains("break the fast with grains"));

        let ev = store.event_on(TZ, ymd(2024, 12, 28)).await.unwrap().unwrap();
        assert!(store.has_notification(sub.id, ev.id, NotificationKind::Paran).await.unwrap());
        assert!(!store.has_notification(sub.id, ev.id, NotificationKind::Reminder).await.unwrap());
    }

    #[tokio::test]
    async fn test_timezone_without_events_is_a_no_op() {
        let store = seeded_store().await;
        subscribe(&store, Channel::Telegram, "200", "America/Lima").await;
        let mock = Arc::new(MockSender::default());

        let summary = dispatch(&store, &telegram(mock.clone()), ymd(2024, 12, 25)).await.unwrap();

        assert_eq!(summary, DispatchSummary { sent: 0, errors: 0 });
        assert!(mock.messages().is_empty());
    }

    #[tokio::test]
    async fn test_inactive_subscribers_are_skipped() {
        let store = seeded_store().await;
        subscribe(&store, Channel::Telegram, "100", TZ).await;
        store.deactivate(Channel::Telegram, "100").await.unwrap();
        let mock = Arc::new(MockSender::default());

        let summary = dispatch(&store, &telegram(mock.clone()), ymd(2024, 12, 25)).await.unwrap();
        assert_eq!(summary.sent, 0);
        assert!(mock.messages().is_empty());
    }

    #[tokio::test]
    async fn test_failed_send_is_retried_next_run() {
        let store = seeded_store().await;
        let sub = subscribe(&store, Channel::Telegram, "100", TZ).await;

        let failed = dispatch(&store, &telegram(Arc::new(FailingSender)), ymd(2024, 12, 25)).await.unwrap();
        assert_eq!(failed, DispatchSummary { sent: 0, errors: 1 });

        let ev = store.event_on(TZ, ymd(2024, 12, 26)).await.unwrap().unwrap();
        assert!(!store.has_notification(sub.id, ev.id, NotificationKind::Reminder).await.unwrap());

        let mock = Arc::new(MockSender::default());
        let retried = dispatch(&store, &telegram(mock.clone()), ymd(2024, 12, 25)).await.unwrap();
        assert_eq!(retried, DispatchSummary { sent: 1, errors: 0 });
        assert!(store.has_notification(sub.id, ev.id, NotificationKind::Reminder).await.unwrap());
    }

    #[tokio::test]
    async fn test_both_checks_run_even_when_sends_fail() {
        let store = seeded_store().await;
        subscribe(&store, Channel::Telegram, "100", TZ).await;

        let summary = dispatch(&store, &telegram(Arc::new(FailingSender)), ymd(2024, 12, 27)).await.unwrap();
        assert_eq!(summary, DispatchSummary { sent: 0, errors: 2 });
    }

    #[tokio::test]
    async fn test_one_failing_subscriber_does_not_block_others() {
        let store = seeded_store().await;
        subscribe(&store, Channel::WhatsApp, "+5215512345678", TZ).await;
        subscribe(&store, Channel::Telegram, "100", TZ).await;
        let mock = Arc::new(MockSender::default());

        // No WhatsApp sender configured.
        let summary = dispatch(&store, &telegram(mock.clone()), ymd(2024, 12, 25)).await.unwrap();

        assert_eq!(summary, DispatchSummary { sent: 1, errors: 1 });
        assert_eq!(mock.messages()[0].0, "100");
    }

    #[tokio::test]
    async fn test_store_failure_aborts_the_run() {
        let inner = seeded_store().await;
        let first = subscribe(&inner, Channel::Telegram, "100", TZ).await;
        subscribe(&inner, Channel::Telegram, "200", "America/Lima").await;
        let last = subscribe(&inner, Channel::Telegram, "300", TZ).await;
        let store = FlakyStore {
            inner,
            broken_timezone: "America/Lima",
        };
        let mock = Arc::new(MockSender::default());

        let result = dispatch(&store, &telegram(mock.clone()), ymd(2024, 12, 25)).await;
        assert!(matches!(result, Err(StoreError::Poisoned)));

        // Subscribers before the failure were served, the rest untouched.
        let ev = store.event_on(TZ, ymd(2024, 12, 26)).await.unwrap().unwrap();
        assert!(store.has_notification(first.id, ev.id, NotificationKind::Reminder).await.unwrap());
        assert!(!store.has_notification(last.id, ev.id, NotificationKind::Reminder).await.unwrap());
        let addresses: Vec<String> = mock.messages().into_iter().map(|(a, _)| a).collect();
        assert_eq!(addresses, vec!["100"]);
    }

    #[tokio::test]
    async fn test_reminder_across_year_boundary() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .insert_event_if_absent(&event(TZ, "Putradā Ekādaśī", ymd(2025, 1, 1), ymd(2025, 1, 2), false))
            .await
            .unwrap();
        subscribe(&store, Channel::Telegram, "100", TZ).await;
        let mock = Arc::new(MockSender::default());

        let summary = dispatch(&store, &telegram(mock.clone()), ymd(2024, 12, 31)).await.unwrap();
        assert_eq!(summary.sent, 1);
        assert!(mock.messages()[0].1.contains("1 de enero"));
    }

    #[tokio::test]
    async fn test_lost_race_still_counts_one_send_and_one_record() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ekadasi.db");
        let store = SqliteStore::open(&path).unwrap();
        let other = Arc::new(SqliteStore::open(&path).unwrap());

        store
            .insert_event_if_absent(&event(TZ, "Utpannā Ekādaśī", ymd(2024, 12, 26), ymd(2024, 12, 27), false))
            .await
            .unwrap();
        let sub = subscribe(&store, Channel::Telegram, "100", TZ).await;
        let ev = store.event_on(TZ, ymd(2024, 12, 26)).await.unwrap().unwrap();

        let racing = Arc::new(RacingSender {
            other: other.clone(),
            subscriber_id: sub.id,
            event_id: ev.id,
        });
        let summary = dispatch(&store, &telegram(racing), ymd(2024, 12, 25)).await.unwrap();
        assert_eq!(summary, DispatchSummary { sent: 1, errors: 0 });

        // The other run's record stands; a later pass finds it and sends nothing.
        let mock = Arc::new(MockSender::default());
        let again = dispatch(other.as_ref(), &telegram(mock.clone()), ymd(2024, 12, 25)).await.unwrap();
        assert_eq!(again.sent, 0);
        assert!(mock.messages().is_empty());
    }
}
