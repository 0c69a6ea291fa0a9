use reqwest::Client;
use serde::Serialize;

use crate::error::WheelError;

#[derive(Serialize)]
struct SlackMessage<'a> {
    text: &'a str,
}

async fn post_text(client: &Client, url: &str, text: &str) -> Result<(), WheelError> {
    let response = client
        .post(url)
        .json(&SlackMessage { text })
        .send()
        .await
        .map_err(|error| WheelError::Network(error.to_string()))?;
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(WheelError::Webhook {
        status: status.as_u16(),
        body,
    })
}

/// Slack incoming webhook. Posts are one-shot: no retries.
#[cfg(not(target_arch = "wasm32"))]
pub struct SlackWebhook {
    url: String,
    client: Client,
    runtime: tokio::runtime::Runtime,
}

#[cfg(not(target_arch = "wasm32"))]
impl SlackWebhook {
    pub fn new(url: &str) -> Result<Self, WheelError> {
        Self::with_client(url, Client::new())
    }

    fn with_client(url: &str, client: Client) -> Result<Self, WheelError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            url: url.to_string(),
            client,
            runtime,
        })
    }

    pub fn post(&self, text: &str) -> Result<(), WheelError> {
        log::info!("Posting assignment to {}", self.url);
        self.runtime
            .block_on(post_text(&self.client, &self.url, text))
    }
}

/// Slack incoming webhook. Posts are fire-and-forget; failures are logged.
#[cfg(target_arch = "wasm32")]
pub struct SlackWebhook {
    url: String,
    client: Client,
}

#[cfg(target_arch = "wasm32")]
impl SlackWebhook {
    pub fn new(url: &str) -> Result<Self, WheelError> {
        Ok(Self {
            url: url.to_string(),
            client: Client::new(),
        })
    }

    pub fn post(&self, text: &str) -> Result<(), WheelError> {
        let client = self.client.clone();
        let url = self.url.clone();
        let text = text.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            match post_text(&client, &url, &text).await {
                Ok(()) => log::info!("Posted to Slack."),
                Err(error) => log::error!("{error}"),
            }
        });
        Ok(())
    }
}
