use async_trait::async_trait;
use teloxide::prelude::*;

use crate::delivery::MessageSender;
use crate::error::DeliveryError;

pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send(&self, address: &str, text: &str) -> Result<(), DeliveryError> {
        let chat_id: i64 = address
            .parse()
            .map_err(|_| DeliveryError::InvalidAddress(address.to_string()))?;

        self.bot.send_message(ChatId(chat_id), text).await?;
        Ok(())
    }
}
