use anyhow::Context;
use async_trait::async_trait;

use super::{Channel, MessagingProvider};

pub struct TwilioProvider {
    account_sid: String,
    auth_token: String,
    from_number: String,
    client: reqwest::Client,
}

impl TwilioProvider {
    pub fn new(account_sid: String, auth_token: String, from_number: String) -> Self {
        Self {
            account_sid,
            auth_token,
            from_number,
            client: reqwest::Client::new(),
        }
    }
}

/// Twilio routes WhatsApp through the same Messages API with prefixed numbers.
fn address(channel: Channel, number: &str) -> anyhow::Result<String> {
    match channel {
        Channel::Sms => Ok(number.to_string()),
        Channel::WhatsApp => Ok(format!("whatsapp:{number}")),
        Channel::Email => anyhow::bail!("Twilio cannot deliver email reminders"),
    }
}

#[async_trait]
impl MessagingProvider for TwilioProvider {
    async fn send_message(&self, channel: Channel, to: &str, body: &str) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.account_sid.is_empty(),
            "Twilio is not configured (TWILIO_ACCOUNT_SID is empty)"
        );
        let to = address(channel, to)?;
        let from = address(channel, &self.from_number)?;

        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );

        self.client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to.as_str()), ("From", from.as_str()), ("Body", body)])
            .send()
            .await
            .context("failed to send Twilio message")?
            .error_for_status()
            .context("Twilio API returned error")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_address_prefixed() {
        assert_eq!(address(Channel::WhatsApp, "+15550123").unwrap(), "whatsapp:+15550123");
        assert_eq!(address(Channel::Sms, "+15550123").unwrap(), "+15550123");
    }

    #[test]
    fn test_email_not_supported() {
        assert!(address(Channel::Email, "alice@example.com").is_err());
    }

    #[tokio::test]
    async fn test_unconfigured_provider_fails_fast() {
        let provider = TwilioProvider::new(String::new(), String::new(), String::new());
        let result = provider
            .send_message(Channel::Sms, "+15550123", "hello")
            .await;
        assert!(result.is_err());
    }
}
