//! Telegram Bot API notifier

use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::TelegramConfig;
use crate::error::NotifyError;
use crate::services::notifier::Notifier;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramNotifier {
    config: TelegramConfig,
    http: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder().timeout(SEND_TIMEOUT).build()?;
        Ok(Self::with_client(config, http))
    }

    pub fn with_client(config: TelegramConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_url.trim_end_matches('/'),
            self.config.token
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("chat_id", self.config.chat_id.as_str()),
                ("text", message),
                ("parse_mode", "Markdown"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body: SendMessageResponse = response.json().await?;
        if !status.is_success() || !body.ok {
            return Err(NotifyError::Rejected(
                body.description
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            ));
        }

        debug!(chat_id = %self.config.chat_id, "Telegram: message delivered");
        Ok(())
    }
}
