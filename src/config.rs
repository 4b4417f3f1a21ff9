use crate::error::MonitorError;
use std::env;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_RANK_API_URL: &str = "https://api.spmb.id/v1/pendaftaran/peringkat";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_DISPLAY_NAME: &str = "Siswa";
pub const DEFAULT_STATE_FILE: &str = "last_rank.txt";
pub const DEFAULT_LOG_FILE: &str = "rank_monitor.log";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration for one monitoring run.
/// Built once at startup and handed to every component by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub auth_token: String,
    pub pengguna_id: String,
    pub bot_token: String,
    pub chat_id: String,
    pub display_name: String,
    pub rank_api_url: String,
    pub telegram_api_url: String,
    pub timeout_secs: u64,
    pub state_file: PathBuf,
    pub log_file: PathBuf,
    pub user_agent: String,
}

impl Config {
    /// Load configuration from the environment, after merging a `.env` file
    /// from the working directory when present.
    ///
    /// Env vars:
    /// - AUTH_TOKEN [required]
    /// - PENGGUNA_ID [required]
    /// - TELEGRAM_BOT_TOKEN [required]
    /// - TELEGRAM_CHAT_ID [required]
    /// - NAMA_SISWA (default: Siswa)
    /// - RANK_API_URL (default: built-in ranking endpoint)
    /// - TELEGRAM_API_URL (default: https://api.telegram.org)
    /// - RANK_HTTP_TIMEOUT_SECS (default: 30)
    /// - RANK_STATE_FILE (default: last_rank.txt)
    /// - RANK_LOG_FILE (default: rank_monitor.log)
    pub fn from_env() -> Result<Self, MonitorError> {
        // Real environment wins over .env entries; dotenvy never overrides.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, MonitorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &str| optional(key).ok_or_else(|| MonitorError::ConfigMissing(key.into()));

        let auth_token = required("AUTH_TOKEN")?;
        let pengguna_id = required("PENGGUNA_ID")?;
        let bot_token = required("TELEGRAM_BOT_TOKEN")?;
        let chat_id = required("TELEGRAM_CHAT_ID")?;

        let display_name =
            optional("NAMA_SISWA").unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());
        let rank_api_url = match optional("RANK_API_URL") {
            Some(u) => validate_url("RANK_API_URL", &u)?,
            None => DEFAULT_RANK_API_URL.to_string(),
        };
        let telegram_api_url = match optional("TELEGRAM_API_URL") {
            Some(u) => validate_url("TELEGRAM_API_URL", &u)?,
            None => DEFAULT_TELEGRAM_API_URL.to_string(),
        };
        let timeout_secs = optional("RANK_HTTP_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let state_file = optional("RANK_STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));
        let log_file = optional("RANK_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
        let user_agent = format!("rank-monitor/{}", env!("CARGO_PKG_VERSION"));

        Ok(Self {
            auth_token,
            pengguna_id,
            bot_token,
            chat_id,
            display_name,
            rank_api_url,
            telegram_api_url: telegram_api_url.trim_end_matches('/').to_string(),
            timeout_secs,
            state_file,
            log_file,
            user_agent,
        })
    }
}

fn validate_url(name: &str, raw: &str) -> Result<String, MonitorError> {
    let invalid = |reason: String| MonitorError::ConfigInvalid {
        name: name.to_string(),
        reason,
    };
    let parsed = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}
