//! Daily notification dispatch.
//!
//! For each active subscriber: a reminder when their timezone has an Ekādaśī
//! tomorrow, and a paran message when today is a paran day. Every
//! (subscriber, event, kind) is sent at most once: the notification log is
//! checked before sending and written only after a successful send.

use chrono::{Days, NaiveDate, Timelike, Utc};
use std::sync::Arc;
use tokio::time::{interval, Duration};

use crate::delivery::Senders;
use crate::error::StoreError;
use crate::messages;
use crate::state::BotState;
use crate::store::Store;
use crate::types::{DispatchSummary, NotificationKind, StoredEvent, Subscriber};

enum Outcome {
    Sent,
    AlreadySent,
    Failed,
}

/// Runs one dispatch pass for `today`.
///
/// Delivery failures are counted and leave no record, so the next run retries
/// them. Store failures stop the run.
pub async fn dispatch(
    store: &dyn Store,
    senders: &Senders,
    today: NaiveDate,
) -> Result<DispatchSummary, StoreError> {
    let tomorrow = today.checked_add_days(Days::new(1));

    let subscribers = store.active_subscribers().await?;
    log::info!("Dispatching for {} active subscribers (today {})", subscribers.len(), today);

    let mut summary = DispatchSummary { sent: 0, errors: 0 };

    for subscriber in &subscribers {
        if let Some(tomorrow) = tomorrow {
            if let Some(event) = store.event_on(&subscriber.timezone, tomorrow).await? {
                let outcome = notify(store, senders, subscriber, &event, NotificationKind::Reminder).await?;
                tally(&mut summary, outcome);
            }
        }

        if let Some(event) = store.event_with_paran_on(&subscriber.timezone, today).await? {
            let outcome = notify(store, senders, subscriber, &event, NotificationKind::Paran).await?;
            tally(&mut summary, outcome);
        }
    }

    log::info!("Dispatch finished: {} sent, {} errors", summary.sent, summary.errors);
    Ok(summary)
}

fn tally(summary: &mut DispatchSummary, outcome: Outcome) {
    match outcome {
        Outcome::Sent => summary.sent += 1,
        Outcome::Failed => summary.errors += 1,
        Outcome::AlreadySent => {}
    }
}

async fn notify(
    store: &dyn Store,
    senders: &Senders,
    subscriber: &Subscriber,
    stored: &StoredEvent,
    kind: NotificationKind,
) -> Result<Outcome, StoreError> {
    if store.has_notification(subscriber.id, stored.id, kind).await? {
        return Ok(Outcome::AlreadySent);
    }

    let text = match kind {
        NotificationKind::Reminder => messages::reminder(subscriber.language, &stored.event),
        NotificationKind::Paran => messages::paran(subscriber.language, &stored.event),
    };

    if let Err(e) = senders.send(subscriber.channel, &subscriber.address, &text).await {
        log::error!(
            "Failed to send {} for {} to {}:{}: {}",
            kind,
            stored.event.name,
            subscriber.channel,
            subscriber.address,
            e
        );
        return Ok(Outcome::Failed);
    }

    if !store.record_notification(subscriber.id, stored.id, kind).await? {
        log::warn!(
            "{} for {} to subscriber {} was already recorded by another run",
            kind,
            stored.event.name,
            subscriber.id
        );
    }

    log::info!("Sent {} for {} to {}:{}", kind, stored.event.name, subscriber.channel, subscriber.address);
    Ok(Outcome::Sent)
}

/// Background loop: runs `dispatch` once per UTC day, at or after the configured hour.
pub async fn start_daily_dispatch(state: Arc<BotState>) {
    let mut ticker = interval(Duration::from_secs(60));
    let mut last_run: Option<NaiveDate> = None;

    loop {
        ticker.tick().await;

        let now = Utc::now();
        let today = now.date_naive();
        if last_run == Some(today) || now.hour() < state.config.dispatch_hour_utc {
            continue;
        }

        match dispatch(state.store.as_ref(), &state.senders, today).await {
            Ok(summary) => {
                log::info!("Daily dispatch for {}: {} sent, {} errors", today, summary.sent, summary.errors);
                last_run = Some(today);
            }
            Err(e) => {
                log::error!("Daily dispatch for {} aborted: {}. Retrying next tick", today, e);
            }
        }
    }
}
