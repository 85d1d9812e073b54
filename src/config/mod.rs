use std::env;
use std::path::PathBuf;

use crate::calendar::{DerivationConfig, DEFAULT_PARAN_LOOKAHEAD_DAYS};
use crate::delivery::TwilioConfig;
use crate::error::ConfigError;

pub const DEFAULT_TIMEZONE: &str = "America/Mexico_City";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    /// Set only when all three Twilio variables are present.
    pub twilio: Option<TwilioConfig>,
    pub dispatch_hour_utc: u32,
    pub paran_lookahead_days: usize,
    pub locations_csv: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("ekadasi.db"),
            twilio: None,
            dispatch_hour_utc: 13,
            paran_lookahead_days: DEFAULT_PARAN_LOOKAHEAD_DAYS,
            locations_csv: None,
        }
    }
}

impl Config {
    /// Reads the process environment (after `.env` has been loaded by the caller).
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let twilio = match (
            var("TWILIO_ACCOUNT_SID"),
            var("TWILIO_AUTH_TOKEN"),
            var("TWILIO_WHATSAPP_FROM"),
        ) {
            (Some(account_sid), Some(auth_token), Some(from)) => Some(TwilioConfig {
                account_sid,
                auth_token,
                from,
            }),
            (None, None, None) => None,
            _ => {
                log::warn!("Incomplete Twilio configuration, WhatsApp delivery disabled");
                None
            }
        };

        let dispatch_hour_utc = match var("DISPATCH_HOUR_UTC") {
            Some(v) => match v.trim().parse::<u32>() {
                Ok(h) if h < 24 => h,
                _ => return Err(ConfigError::Invalid { key: "DISPATCH_HOUR_UTC", value: v }),
            },
            None => defaults.dispatch_hour_utc,
        };

        let paran_lookahead_days = match var("PARAN_LOOKAHEAD_DAYS") {
            Some(v) => match v.trim().parse::<usize>() {
                Ok(d) if d > 0 => d,
                _ => return Err(ConfigError::Invalid { key: "PARAN_LOOKAHEAD_DAYS", value: v }),
            },
            None => defaults.paran_lookahead_days,
        };

        Ok(Config {
            database_path: var("DATABASE_PATH").map(PathBuf::from).unwrap_or(defaults.database_path),
            twilio,
            dispatch_hour_utc,
            paran_lookahead_days,
            locations_csv: var("LOCATIONS_CSV").map(PathBuf::from),
        })
    }

    pub fn derivation_config(&self, reference_year: Option<i32>) -> DerivationConfig {
        DerivationConfig {
            paran_lookahead_days: self.paran_lookahead_days,
            reference_year,
        }
    }

    /// Telegram needs its token before the bot starts; fail early with a clear message.
    pub fn require_telegram_token() -> Result<(), ConfigError> {
        match env::var("TELOXIDE_TOKEN") {
            Ok(v) if !v.trim().is_empty() => Ok(()),
            _ => Err(ConfigError::Missing("TELOXIDE_TOKEN")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_path, PathBuf::from("ekadasi.db"));
        assert_eq!(config.dispatch_hour_utc, 13);
        assert_eq!(config.paran_lookahead_days, 4);
        assert!(config.twilio.is_none());
    }

    #[test]
    fn twilio_needs_all_three_values() {
        let partial = Config::from_lookup(lookup(&[("TWILIO_ACCOUNT_SID", "AC1")])).unwrap();
        assert!(partial.twilio.is_none());

        let full = Config::from_lookup(lookup(&[
            ("TWILIO_ACCOUNT_SID", "AC1"),
            ("TWILIO_AUTH_TOKEN", "secret"),
            ("TWILIO_WHATSAPP_FROM", "whatsapp:+14155238886"),
        ]))
        .unwrap();
        assert_eq!(full.twilio.unwrap().account_sid, "AC1");
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Config::from_lookup(lookup(&[("DISPATCH_HOUR_UTC", "24")])).is_err());
        assert!(Config::from_lookup(lookup(&[("PARAN_LOOKAHEAD_DAYS", "0")])).is_err());
        let config = Config::from_lookup(lookup(&[("PARAN_LOOKAHEAD_DAYS", "6")])).unwrap();
        assert_eq!(config.paran_lookahead_days, 6);
    }
}
