use crate::config::Config;
use crate::error::MonitorError;
use crate::http::{self, RawResponse};
use crate::types::RankObservation;
use log::{debug, info};
use reqwest::{Client, StatusCode};
use serde_json::Value;

pub const USER_ID_FIELD: &str = "pengguna_id";
pub const RANK_FIELD: &str = "peringkat";
pub const QUOTA_FIELD: &str = "kuota";

/// Single POST to the ranking endpoint. Transport failures (connect, DNS,
/// timeout) become `FetchFailed`; the status is left for `classify_response`.
pub async fn fetch_rank(client: &Client, cfg: &Config) -> Result<RawResponse, MonitorError> {
    let body = serde_json::json!({ USER_ID_FIELD: cfg.pengguna_id });
    let auth = http::auth_header(&cfg.auth_token)?;
    http::post_json(client, "ranking API", &cfg.rank_api_url, &body, Some(auth))
        .await
        .map_err(|e| {
            let message = if e.is_timeout() {
                format!("request timed out after {}s", cfg.timeout_secs)
            } else {
                format!("request failed: {}", e)
            };
            MonitorError::fetch(message, None)
        })
}

/// Check both the transport status and the status embedded in the payload.
pub fn classify_response(raw: &RawResponse) -> Result<Value, MonitorError> {
    let body = || Some(raw.body.clone());
    if raw.status == StatusCode::UNAUTHORIZED {
        return Err(MonitorError::CredentialExpired { body: body() });
    }
    if raw.status != StatusCode::OK {
        return Err(MonitorError::fetch(format!("HTTP {}", raw.status), body()));
    }
    if raw.body.trim().is_empty() {
        return Err(MonitorError::fetch("empty response body", body()));
    }
    let value: Value = serde_json::from_str(&raw.body)
        .map_err(|e| MonitorError::fetch(format!("response is not JSON: {}", e), body()))?;

    // Expiry wording only counts when the payload carries no reading;
    // a populated data[0] is authoritative whatever the message says.
    let embedded = http::embedded_status(&value);
    let session_gone =
        embedded != Some(200) && !has_first_entry(&value) && payload_reports_expiry(&value);
    if embedded == Some(401) || session_gone {
        return Err(MonitorError::CredentialExpired { body: body() });
    }
    if let Some(code) = embedded.filter(|c| *c != 200) {
        return Err(MonitorError::fetch(format!("embedded status_code {}", code), body()));
    }
    Ok(value)
}

fn has_first_entry(v: &Value) -> bool {
    v.get("data")
        .and_then(Value::as_array)
        .and_then(|d| d.first())
        .is_some_and(|first| !first.is_null())
}

fn payload_reports_expiry(v: &Value) -> bool {
    ["message", "error", "detail"]
        .iter()
        .filter_map(|k| v.get(*k).and_then(Value::as_str))
        .map(str::to_lowercase)
        .any(|m| {
            m.contains("expired")
                || m.contains("unauthorized")
                || m.contains("unauthenticated")
                || (m.contains("token") && m.contains("invalid"))
        })
}

/// Pull `peringkat` and `kuota` out of `data[0]`.
pub fn parse_observation(value: &Value, raw_body: &str) -> Result<RankObservation, MonitorError> {
    let data = value
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| MonitorError::parse("missing data list", raw_body))?;
    let first = data
        .first()
        .ok_or_else(|| MonitorError::parse("empty data list (session expired or API shape changed)", raw_body))?;

    let rank = match first.get(RANK_FIELD) {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        None | Some(Value::Null) => {
            return Err(MonitorError::parse("peringkat is missing or null", raw_body))
        }
        Some(other) => {
            return Err(MonitorError::parse(
                format!("peringkat has unsupported value {}", other),
                raw_body,
            ))
        }
    };
    let quota = match first.get(QUOTA_FIELD) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| MonitorError::parse("kuota is missing, null or not an integer", raw_body))?;

    Ok(RankObservation { rank, quota })
}

/// Fetch, validate and parse in one go.
pub async fn check_rank(client: &Client, cfg: &Config) -> Result<RankObservation, MonitorError> {
    info!("Fetching rank for pengguna_id={}", cfg.pengguna_id);
    let raw = fetch_rank(client, cfg).await?;
    debug!("Ranking API body: {}", raw.body);
    let value = classify_response(&raw)?;
    let obs = parse_observation(&value, &raw.body)?;
    info!("Current rank: {} (quota {})", obs.rank, obs.quota);
    Ok(obs)
}
