//! WhatsApp delivery through the Twilio Messages API.

use async_trait::async_trait;

use crate::delivery::MessageSender;
use crate::error::DeliveryError;

const TWILIO_API: &str = "https://api.twilio.com/2010-04-01";

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number, e.g. `whatsapp:+14155238886`.
    pub from: String,
}

pub struct WhatsAppSender {
    config: TwilioConfig,
    client: reqwest::Client,
}

impl WhatsAppSender {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

/// Twilio expects WhatsApp numbers as `whatsapp:+<E.164>`.
pub fn whatsapp_address(address: &str) -> String {
    if address.starts_with("whatsapp:") {
        address.to_string()
    } else {
        format!("whatsapp:{}", address)
    }
}

#[async_trait]
impl MessageSender for WhatsAppSender {
    async fn send(&self, address: &str, text: &str) -> Result<(), DeliveryError> {
        if address.trim().is_empty() {
            return Err(DeliveryError::InvalidAddress(address.to_string()));
        }

        let url = format!("{}/Accounts/{}/Messages.json", TWILIO_API, self.config.account_sid);
        let to = whatsapp_address(address);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[("From", self.config.from.as_str()), ("To", to.as_str()), ("Body", text)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected { status, body });
        }

        log::debug!("WhatsApp message accepted by Twilio for {}", to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_bare_numbers() {
        assert_eq!(whatsapp_address("+525512345678"), "whatsapp:+525512345678");
        assert_eq!(whatsapp_address("whatsapp:+525512345678"), "whatsapp:+525512345678");
    }
}
