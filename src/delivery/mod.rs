use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::DeliveryError;
use crate::types::Channel;

mod telegram;
mod whatsapp;
pub use telegram::*;
pub use whatsapp::*;

/// One outbound channel. A failed send is terminal for that attempt.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, address: &str, text: &str) -> Result<(), DeliveryError>;
}

/// Senders keyed by channel; channels without credentials are simply absent.
#[derive(Clone, Default)]
pub struct Senders {
    senders: HashMap<Channel, Arc<dyn MessageSender>>,
}

impl Senders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, channel: Channel, sender: Arc<dyn MessageSender>) -> Self {
        self.senders.insert(channel, sender);
        self
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.senders.keys()
    }

    pub async fn send(&self, channel: Channel, address: &str, text: &str) -> Result<(), DeliveryError> {
        match self.senders.get(&channel) {
            Some(sender) => sender.send(address, text).await,
            None => Err(DeliveryError::NoSender(channel)),
        }
    }
}
