#![allow(dead_code)]

use assert_cmd::Command;
use httpmock::prelude::*;
use httpmock::Mock;
use std::path::PathBuf;
use tempfile::TempDir;

pub const RANK_PATH: &str = "/api/pendaftaran/peringkat";
pub const SEND_PATH: &str = "/botb1/sendMessage";

/// Mock ranking API + mock Telegram API + scratch working directory.
pub struct Harness {
    pub dir: TempDir,
    pub rank_api: MockServer,
    pub telegram: MockServer,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            rank_api: MockServer::start(),
            telegram: MockServer::start(),
        }
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.path().join("last_rank.txt")
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join("rank_monitor.log")
    }

    pub fn write_state(&self, rank: &str) {
        std::fs::write(self.state_path(), format!("{}\n", rank)).unwrap();
    }

    pub fn read_state(&self) -> Option<String> {
        std::fs::read_to_string(self.state_path())
            .ok()
            .map(|s| s.trim().to_string())
    }

    /// Ranking endpoint answering with the given status and raw body.
    pub fn rank_reply(&self, status: u16, body: &str) -> Mock<'_> {
        let body = body.to_string();
        self.rank_api.mock(|when, then| {
            when.method(POST)
                .path(RANK_PATH)
                .header("authorization", "Bearer tok")
                .json_body(serde_json::json!({"pengguna_id": "u1"}));
            then.status(status)
                .header("content-type", "application/json")
                .body(body);
        })
    }

    /// Telegram sendMessage that acknowledges every message.
    pub fn telegram_ok(&self) -> Mock<'_> {
        self.telegram.mock(|when, then| {
            when.method(POST)
                .path(SEND_PATH)
                .json_body_partial(r#"{"chat_id":"c1"}"#);
            then.status(200)
                .json_body(serde_json::json!({"ok": true, "result": {"message_id": 1}}));
        })
    }

    /// Command with the four required values pointed at the mock servers.
    pub fn command(&self) -> Command {
        let mut cmd = self.bare_command();
        cmd.env("AUTH_TOKEN", "tok")
            .env("PENGGUNA_ID", "u1")
            .env("TELEGRAM_BOT_TOKEN", "b1")
            .env("TELEGRAM_CHAT_ID", "c1");
        cmd
    }

    /// Command with endpoints wired up but no secrets. RUST_LOG is cleared,
    /// so the level defaults to info unless a test passes `--log-level`.
    pub fn bare_command(&self) -> Command {
        let mut cmd = Command::cargo_bin("rank-monitor").unwrap();
        cmd.env_clear()
            .current_dir(self.dir.path())
            .env("RANK_API_URL", self.rank_api.url(RANK_PATH))
            .env("TELEGRAM_API_URL", self.telegram.base_url());
        cmd
    }
}
