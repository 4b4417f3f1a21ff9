use log::{error, warn};
use rank_monitor::config::{Config, DEFAULT_LOG_FILE};
use rank_monitor::monitor::{self, RunOptions};
use rank_monitor::{activity, cli};
use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")] // one sequential check per process
async fn main() -> anyhow::Result<ExitCode> {
    let matches = cli::build_cli().get_matches();
    let opts = cli::CliOptions::from_matches(&matches);

    if opts.version {
        println!("rank-monitor {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    let loaded = Config::from_env();
    let log_file = opts
        .log_file
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.log_file.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    if let Some(e) = activity::init(opts.log_level.as_deref(), &log_file) {
        warn!("Activity log {} unavailable ({}); logging to terminal only", log_file.display(), e);
    }

    let mut cfg = match loaded {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return Ok(ExitCode::from(e.exit_code()));
        }
    };
    if let Some(path) = opts.state_file {
        cfg.state_file = path;
    }
    cfg.log_file = log_file;

    let code = monitor::run(
        &cfg,
        RunOptions {
            dry_run: opts.dry_run,
        },
    )
    .await;
    Ok(ExitCode::from(code))
}
