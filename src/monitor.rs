use crate::config::Config;
use crate::error::MonitorError;
use crate::http;
use crate::notify;
use crate::rank;
use crate::state::StateStore;
use crate::types::Outcome;
use log::{error, info, warn};
use reqwest::Client;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Fetch and compare only; never write state or send messages.
    pub dry_run: bool,
}

/// String equality after trimming. No prior value always counts as a change,
/// so the first run always notifies.
pub fn rank_changed(current: &str, last: Option<&str>) -> bool {
    match last {
        Some(prev) => prev.trim() != current.trim(),
        None => true,
    }
}

pub async fn run_once(
    client: &Client,
    cfg: &Config,
    store: &StateStore,
    opts: RunOptions,
) -> Result<Outcome, MonitorError> {
    let observation = rank::check_rank(client, cfg).await?;
    let previous = store.load()?;

    if !rank_changed(&observation.rank, previous.as_deref()) {
        info!("Rank unchanged at {}; nothing to do", observation.rank);
        return Ok(Outcome::Unchanged {
            rank: observation.rank,
        });
    }

    match previous.as_deref() {
        Some(prev) => info!("Rank changed: {} -> {}", prev, observation.rank),
        None => info!("No stored rank yet; recording {}", observation.rank),
    }

    if opts.dry_run {
        info!("Dry run: skipping state write and notification");
    } else {
        store.save(&observation.rank)?;
        info!("Stored rank {} in {}", observation.rank, store.path().display());
        let text = notify::change_message(&cfg.display_name, &observation, previous.as_deref());
        notify::notify_best_effort(client, cfg, &text).await;
    }

    Ok(Outcome::Changed {
        observation,
        previous,
    })
}

/// Run once and turn the result into a process exit status.
pub async fn run(cfg: &Config, opts: RunOptions) -> u8 {
    let client = match http::build_client(cfg) {
        Ok(c) => c,
        Err(e) => {
            let err = MonitorError::fetch(format!("cannot build HTTP client: {}", e), None);
            error!("{}", err);
            return err.exit_code();
        }
    };
    let store = StateStore::new(&cfg.state_file);

    match run_once(&client, cfg, &store, opts).await {
        Ok(outcome) => {
            info!("{}", outcome.summary());
            0
        }
        Err(e) => {
            report_failure(&e);
            if e.should_notify() {
                if opts.dry_run {
                    info!("Dry run: not sending failure notification");
                } else {
                    let text = notify::failure_message(&cfg.display_name, &e);
                    notify::notify_best_effort(&client, cfg, &text).await;
                }
            }
            e.exit_code()
        }
    }
}

fn report_failure(e: &MonitorError) {
    error!("{}", e);
    if let Some(body) = e.raw_body() {
        error!("Raw response: {}", body);
    }
    if let MonitorError::CredentialExpired { .. } = e {
        warn!("AUTH_TOKEN must be renewed (tokens last about 24h); copy a fresh one into the environment or .env");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_is_always_a_change() {
        assert!(rank_changed("150", None));
    }

    #[test]
    fn comparison_is_string_based_and_trimmed() {
        assert!(!rank_changed("150", Some("150")));
        assert!(!rank_changed("150", Some(" 150\n")));
        assert!(rank_changed("149", Some("150")));
        // No numeric coercion: "150.0" differs from "150".
        assert!(rank_changed("150.0", Some("150")));
    }
}
