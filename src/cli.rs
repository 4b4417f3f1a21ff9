use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

pub struct CliOptions {
    pub log_level: Option<String>,
    pub version: bool,
    pub state_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub dry_run: bool,
}

pub fn build_cli() -> Command {
    Command::new("rank-monitor")
        .about("Check an admissions rank once and notify Telegram when it changes")
        .disable_version_flag(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .num_args(1)
                .help("Override RUST_LOG level (e.g., info, debug)"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .help("Print version and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("state-file")
                .long("state-file")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Last-known rank file (overrides RANK_STATE_FILE)"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Activity log file (overrides RANK_LOG_FILE)"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Fetch and compare without saving state or sending messages")
                .action(ArgAction::SetTrue),
        )
}

impl CliOptions {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            log_level: m.get_one::<String>("log-level").cloned(),
            version: m.get_flag("version"),
            state_file: m.get_one::<PathBuf>("state-file").cloned(),
            log_file: m.get_one::<PathBuf>("log-file").cloned(),
            dry_run: m.get_flag("dry-run"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let m = build_cli()
            .try_get_matches_from([
                "rank-monitor",
                "--log-level",
                "debug",
                "--state-file",
                "/tmp/r.txt",
                "--log-file",
                "/tmp/r.log",
                "--dry-run",
            ])
            .unwrap();
        let o = CliOptions::from_matches(&m);
        assert_eq!(o.log_level.as_deref(), Some("debug"));
        assert_eq!(o.state_file, Some(PathBuf::from("/tmp/r.txt")));
        assert_eq!(o.log_file, Some(PathBuf::from("/tmp/r.log")));
        assert!(o.dry_run);
        assert!(!o.version);
    }

    #[test]
    fn defaults_are_empty() {
        let m = build_cli().try_get_matches_from(["rank-monitor"]).unwrap();
        let o = CliOptions::from_matches(&m);
        assert!(o.log_level.is_none() && o.state_file.is_none() && !o.dry_run);
    }
}
