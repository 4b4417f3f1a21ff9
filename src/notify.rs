use crate::config::Config;
use crate::error::MonitorError;
use crate::http;
use crate::types::RankObservation;
use log::{info, warn};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

pub fn send_message_url(cfg: &Config) -> String {
    format!("{}/bot{}/sendMessage", cfg.telegram_api_url, cfg.bot_token)
}

/// Deliver one text message through the Telegram Bot API. The reply's `ok`
/// flag is the only success signal.
pub async fn send_message(client: &Client, cfg: &Config, text: &str) -> Result<(), MonitorError> {
    let payload = SendMessage {
        chat_id: &cfg.chat_id,
        text,
    };
    let raw = http::post_json(client, "telegram sendMessage", &send_message_url(cfg), &payload, None)
        .await
        .map_err(|e| MonitorError::NotifyFailed {
            // reqwest errors embed the URL, which carries the bot token.
            message: format!("request failed: {}", e.without_url()),
            body: None,
        })?;
    let acked = serde_json::from_str::<Value>(&raw.body)
        .ok()
        .and_then(|v| v.get("ok").and_then(Value::as_bool))
        .unwrap_or(false);
    if acked {
        Ok(())
    } else {
        Err(MonitorError::NotifyFailed {
            message: format!("HTTP {} without ok=true", raw.status),
            body: Some(raw.body),
        })
    }
}

/// Send and swallow failures. Delivery never decides the exit code.
pub async fn notify_best_effort(client: &Client, cfg: &Config, text: &str) -> bool {
    match send_message(client, cfg, text).await {
        Ok(()) => {
            info!("Notification sent to chat {}", cfg.chat_id);
            true
        }
        Err(e) => {
            match e.raw_body() {
                Some(body) => warn!("{}; response: {}", e, body),
                None => warn!("{}", e),
            }
            false
        }
    }
}

pub fn change_message(name: &str, obs: &RankObservation, previous: Option<&str>) -> String {
    format!(
        "📊 Update peringkat {}\nPeringkat: {} (sebelumnya: {})\nKuota: {}",
        name,
        obs.rank,
        previous.unwrap_or("-"),
        obs.quota
    )
}

pub fn failure_message(name: &str, err: &MonitorError) -> String {
    let mut text = format!("⚠️ Pemantauan peringkat {} gagal\n{}", name, err);
    if matches!(err, MonitorError::CredentialExpired { .. }) {
        text.push_str("\nPerbarui AUTH_TOKEN lalu jalankan ulang.");
    }
    text
}
