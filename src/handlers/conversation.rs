use chrono::NaiveDate;

use crate::commands::Command;
use crate::config::DEFAULT_TIMEZONE;
use crate::error::StoreError;
use crate::location::Catalog;
use crate::messages;
use crate::store::Store;
use crate::types::{Channel, Language, SenderProfile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub language: Language,
    /// Whether the channel should offer the quick-pick locations alongside the text.
    pub quick_pick: bool,
}

impl Reply {
    fn plain(language: Language, text: String) -> Self {
        Self { text, language, quick_pick: false }
    }

    fn with_quick_pick(language: Language, text: String) -> Self {
        Self { text, language, quick_pick: true }
    }
}

/// Builds the reply to one inbound message. Every input gets a reply: a
/// command, a quick code or a resolvable location acts on it, anything else
/// falls back to the welcome prompt (or the command list for subscribers).
pub async fn respond(
    store: &dyn Store,
    catalog: &Catalog,
    channel: Channel,
    address: &str,
    profile: &SenderProfile,
    text: &str,
    today: NaiveDate,
) -> Result<Reply, StoreError> {
    let existing = store.subscriber(channel, address).await?;
    let is_subscribed = existing.as_ref().is_some_and(|s| s.active);
    let lang = existing.as_ref().map(|s| s.language).unwrap_or_default();

    let reply = match Command::parse(text) {
        Some(Command::Start) => Reply::with_quick_pick(lang, messages::welcome(lang)),
        Some(Command::Stop) => {
            if store.deactivate(channel, address).await? {
                log::info!("Unsubscribed {}:{}", channel, address);
                Reply::plain(lang, messages::unsubscribed(lang))
            } else {
                Reply::plain(lang, messages::not_subscribed(lang))
            }
        }
        Some(Command::Next) => {
            let timezone = existing
                .as_ref()
                .map(|s| s.timezone.as_str())
                .unwrap_or(DEFAULT_TIMEZONE);
            match store.next_event(timezone, today).await? {
                Some(stored) => Reply::plain(lang, messages::next_event(lang, &stored.event)),
                None => Reply::plain(lang, messages::no_events(lang)),
            }
        }
        Some(Command::English) => switch_language(store, channel, address, existing.is_some(), Language::En).await?,
        Some(Command::Spanish) => switch_language(store, channel, address, existing.is_some(), Language::Es).await?,
        Some(Command::City) => Reply::plain(lang, messages::city_prompt(lang)),
        Some(Command::Rules) => Reply::plain(lang, messages::fasting_rules(lang)),
        Some(Command::Help) => Reply::plain(lang, messages::commands(lang)),
        None => match catalog.lookup(text) {
            Some(location) => {
                store.subscribe(channel, address, &location.timezone, profile).await?;
                log::info!(
                    "Subscribed {}:{} to {} ({})",
                    channel,
                    address,
                    location.label,
                    location.timezone
                );
                Reply::plain(lang, messages::subscribed(lang, location))
            }
            None if is_subscribed => Reply::plain(lang, messages::already_subscribed(lang)),
            None => Reply::with_quick_pick(lang, messages::welcome(lang)),
        },
    };

    Ok(reply)
}

async fn switch_language(
    store: &dyn Store,
    channel: Channel,
    address: &str,
    known: bool,
    language: Language,
) -> Result<Reply, StoreError> {
    if known {
        store.set_language(channel, address, language).await?;
    }
    Ok(Reply::plain(language, messages::language_changed(language)))
}
