use crate::config::Config;
use crate::error::MonitorError;
use log::debug;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Status and untouched body of an upstream reply.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

pub fn build_client(cfg: &Config) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(cfg.user_agent.clone())
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .use_rustls_tls()
        .build()
}

pub fn auth_header(token: &str) -> Result<HeaderValue, MonitorError> {
    HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| MonitorError::ConfigInvalid {
        name: "AUTH_TOKEN".into(),
        reason: e.to_string(),
    })
}

/// POST a JSON body and hand back status plus raw text. Only transport
/// errors (including a body that cannot be read) are reported here; status
/// interpretation belongs to the caller. `label` names the endpoint in logs,
/// since some URLs carry credentials.
pub async fn post_json<B: Serialize + ?Sized>(
    client: &Client,
    label: &str,
    url: &str,
    body: &B,
    authorization: Option<HeaderValue>,
) -> reqwest::Result<RawResponse> {
    let mut req = client
        .post(url)
        .header(ACCEPT, HeaderValue::from_static("application/json"))
        .json(body);
    if let Some(auth) = authorization {
        req = req.header(AUTHORIZATION, auth);
    }
    let res = req.send().await?;
    let status = res.status();
    let body = res.text().await?;
    debug!("POST {} -> {} ({} bytes)", label, status, body.len());
    Ok(RawResponse { status, body })
}

/// Status code embedded in a JSON payload, if the API put one there.
/// Accepts both `"status_code": 200` and `"status_code": "200"`.
pub fn embedded_status(v: &Value) -> Option<u16> {
    let raw = v.get("status_code").or_else(|| v.get("statusCode"))?;
    match raw {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u16>().ok(),
        _ => None,
    }
}
