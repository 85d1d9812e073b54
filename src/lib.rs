mod types;
mod error;
mod config;
mod location;
mod calendar;
mod store;
mod delivery;
mod scheduler;
mod commands;
mod handlers;
mod keyboard;
mod state;
pub mod messages;

pub use types::*;
pub use error::*;
pub use config::*;
pub use location::*;
pub use calendar::*;
pub use store::*;
pub use delivery::*;
pub use scheduler::*;
pub use commands::*;
pub use handlers::*;
pub use keyboard::*;
pub use state::*;
