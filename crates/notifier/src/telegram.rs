// In crates/notifier/src/telegram.rs

use crate::{Error, Notifier, Result};
use app_config::types::TelegramSettings;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends notifications through the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    http_client: reqwest::Client,
    url: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(settings: &TelegramSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(Self {
            http_client,
            url: format!(
                "{}/bot{}/sendMessage",
                settings.api_base_url.trim_end_matches('/'),
                settings.bot_token
            ),
            chat_id: settings.chat_id.clone(),
        })
    }

    /// Sends `text`, surfacing any failure.
    pub async fn send(&self, text: &str) -> Result<()> {
        let response: TelegramResponse = self
            .http_client
            .post(&self.url)
            .json(&SendMessage { chat_id: &self.chat_id, text })
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            return Err(Error::Rejected(response.description.unwrap_or_default()));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "TelegramNotifier"
    }

    async fn notify(&self, text: &str) {
        if let Err(e) = self.send(text).await {
            tracing::error!(error = %e, "Telegram send failed.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::TcpListener;

    fn settings(api_base_url: &str) -> TelegramSettings {
        TelegramSettings {
            bot_token: "123:abc".into(),
            chat_id: "42".into(),
            api_base_url: api_base_url.into(),
            request_timeout_secs: 1,
        }
    }

    #[test]
    fn builds_send_message_url() {
        let notifier = TelegramNotifier::new(&settings("https://api.telegram.org/")).unwrap();
        assert_eq!(notifier.url, "https://api.telegram.org/bot123:abc/sendMessage");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_swallowed() {
        // Port 9 (discard) is closed on test machines; the send fails fast.
        let notifier = TelegramNotifier::new(&settings("http://127.0.0.1:9")).unwrap();
        assert!(notifier.send("hello").await.is_err());
        notifier.notify("hello").await;
    }

    #[tokio::test]
    async fn silent_endpoint_times_out() {
        // The kernel completes the handshake, but nothing ever answers.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let notifier = TelegramNotifier::new(&settings(&url)).unwrap();

        let sent = tokio::time::timeout(Duration::from_secs(10), notifier.send("hello")).await;
        assert!(matches!(sent, Ok(Err(Error::RequestFailed(_)))));

        let notified = tokio::time::timeout(Duration::from_secs(10), notifier.notify("hello")).await;
        assert!(notified.is_ok());
        drop(listener);
    }
}
