use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use teloxide::prelude::*;

use ekadasi_reminder_bot::{
    dispatch, ingest, load_catalog, load_raw_days, schema, start_daily_dispatch, BotState, Channel,
    Command, Config, Senders, SqliteStore, Store, TelegramSender, WhatsAppSender,
};

#[derive(Parser)]
#[command(name = "ekadasi-bot", about = "Ekādaśī fasting reminders over Telegram and WhatsApp")]
struct Cli {
    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the Telegram bot together with the daily notification loop (default)
    Run,
    /// Derive events from a scraped calendar dump and store the new ones
    Ingest {
        /// IANA timezone the dump was scraped for, e.g. America/Mexico_City
        timezone: String,
        /// JSON array of {date, tithi, events}
        file: PathBuf,
        /// Year of the first record when the dump omits years
        #[arg(long)]
        year: Option<i32>,
    },
    /// Send the notifications due today once, then exit
    Notify {
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Print the stored events of a timezone as JSON
    Events { timezone: String },
}

fn build_senders(config: &Config, bot: Option<Bot>) -> Senders {
    let mut senders = Senders::new();
    if let Some(bot) = bot {
        senders = senders.with(Channel::Telegram, Arc::new(TelegramSender::new(bot)));
    }
    if let Some(twilio) = &config.twilio {
        senders = senders.with(Channel::WhatsApp, Arc::new(WhatsAppSender::new(twilio.clone())));
    }

    let channels: Vec<String> = senders.channels().map(|c| c.to_string()).collect();
    log::info!("Delivery channels enabled: {:?}", channels);
    senders
}

async fn run_bot(config: Config, store: Arc<dyn Store>) -> Result<(), Box<dyn Error + Send + Sync>> {
    Config::require_telegram_token()?;
    let bot = Bot::from_env();

    let catalog = load_catalog(&config)?;
    let senders = build_senders(&config, Some(bot.clone()));

    let state = Arc::new(BotState {
        store,
        catalog,
        senders,
        config,
    });

    if let Err(e) = bot.set_my_commands(Command::menu()).await {
        log::warn!("Failed to register the command menu: {}", e);
    }

    let dispatch_state = state.clone();
    tokio::spawn(async move {
        start_daily_dispatch(dispatch_state).await;
    });

    log::info!("Starting command dispatching...");
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let store: Arc<dyn Store> = Arc::new(SqliteStore::open(&config.database_path)?);
    log::info!("Using database {}", config.database_path.display());

    match cli.command.unwrap_or(Cmd::Run) {
        Cmd::Run => run_bot(config, store).await?,
        Cmd::Ingest { timezone, file, year } => {
            let days = load_raw_days(&file)?;
            log::info!("Loaded {} raw days from {}", days.len(), file.display());

            let summary = ingest(store.as_ref(), &timezone, &days, &config.derivation_config(year)).await?;
            log::info!(
                "Ingest for {}: {} derived, {} inserted, {} already stored",
                timezone,
                summary.derived,
                summary.inserted,
                summary.existing
            );
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Cmd::Notify { date } => {
            let bot = Config::require_telegram_token().ok().map(|_| Bot::from_env());
            let senders = build_senders(&config, bot);
            let today = date.unwrap_or_else(|| Utc::now().date_naive());

            let summary = dispatch(store.as_ref(), &senders, today).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Cmd::Events { timezone } => {
            let events = store.events_for(&timezone).await?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
    }

    Ok(())
}
