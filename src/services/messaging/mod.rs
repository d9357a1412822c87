pub mod twilio;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    WhatsApp,
    Email,
    Sms,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::WhatsApp => "whatsapp",
            Channel::Email => "email",
            Channel::Sms => "sms",
        }
    }
}

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    async fn send_message(&self, channel: Channel, to: &str, body: &str) -> anyhow::Result<()>;
}
