//! Telegram Bot API client.
//!
//! Only the two calls the monitor needs are implemented: `getMe` to check the
//! token at startup and `sendMessage` for alerts.

use std::time::Duration;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, info};
use url::Url;

use super::Notifier;
use crate::error::NotifyError;

/// Envelope of every Bot API reply
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    error_code: Option<i64>,
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    pub first_name: String,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

/// Message id is the only part of the reply we look at.
#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

pub struct TelegramNotifier {
    client: reqwest::Client,
    api_url: Url,
    token: String,
    bot: BotUser,
}

impl TelegramNotifier {
    /// Build a client and verify the bot token with `getMe`.
    pub async fn connect(api_url: Url, token: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Client(e.into()))?;

        let token = token.to_string();
        let bot: BotUser = call(&client, &api_url, &token, "getMe", None::<&()>).await?;
        info!(
            bot_id = bot.id,
            "Authorized on Telegram account {}",
            bot.username.as_deref().unwrap_or(&bot.first_name)
        );

        Ok(Self { client, api_url, token, bot })
    }

    pub fn bot(&self) -> &BotUser {
        &self.bot
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
        let message = SendMessage { chat_id, text };
        let sent: SentMessage =
            call(&self.client, &self.api_url, &self.token, "sendMessage", Some(&message)).await?;
        debug!(chat_id, message_id = sent.message_id, "Notification delivered");
        Ok(())
    }
}

fn method_url(api_url: &Url, token: &str, method: &str) -> String {
    format!("{}/bot{}/{}", api_url.as_str().trim_end_matches('/'), token, method)
}

/// Perform one Bot API call. Errors never include the request URL, which embeds the token.
async fn call<T, B>(
    client: &reqwest::Client,
    api_url: &Url,
    token: &str,
    method: &str,
    body: Option<&B>,
) -> Result<T, NotifyError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let url = method_url(api_url, token, method);
    let request = match body {
        Some(body) => client.post(url).json(body),
        None => client.get(url),
    };

    let response =
        request.send().await.map_err(|e| NotifyError::Transport(e.without_url().into()))?;
    let status = response.status();

    let reply: ApiResponse<T> = response.json().await.map_err(|e| {
        NotifyError::Malformed(format!("HTTP {status}: {}", e.without_url()).into())
    })?;

    match reply {
        ApiResponse { ok: true, result: Some(result), .. } => Ok(result),
        ApiResponse { ok: true, result: None, .. } => {
            Err(NotifyError::Malformed(format!("{method} reply has no result").into()))
        }
        ApiResponse { error_code, description, .. } => Err(NotifyError::Rejected {
            code: error_code.or(Some(i64::from(status.as_u16()))),
            description: description.unwrap_or_else(|| status.to_string()),
        }),
    }
}
