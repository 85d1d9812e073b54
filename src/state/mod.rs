use std::sync::Arc;

use crate::config::Config;
use crate::delivery::Senders;
use crate::location::Catalog;
use crate::store::Store;

pub struct BotState {
    pub store: Arc<dyn Store>,
    pub catalog: &'static Catalog,
    pub senders: Senders,
    pub config: Config,
}

/// Picks the location catalog: the CSV override when configured, the built-in table otherwise.
/// The result lives for the rest of the process.
pub fn load_catalog(config: &Config) -> Result<&'static Catalog, Box<dyn std::error::Error + Send + Sync>> {
    match &config.locations_csv {
        Some(path) => {
            let catalog = Catalog::from_csv(path)?;
            log::info!("Loaded {} locations from {}", catalog.len(), path.display());
            Ok(Box::leak(Box::new(catalog)))
        }
        None => {
            let catalog = Catalog::builtin();
            log::info!("Using {} built-in locations", catalog.len());
            Ok(catalog)
        }
    }
}
