use env_logger::{Builder, Env, Target};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Writes every formatted log line to stderr and, when available, appends it
/// to the activity log file. File errors are ignored.
struct Tee {
    file: Option<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        if let Some(f) = self.file.as_mut() {
            let _ = f.write_all(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(f) = self.file.as_mut() {
            let _ = f.flush();
        }
        io::stderr().flush()
    }
}

pub fn format_line(timestamp: &str, level: log::Level, message: &str) -> String {
    format!("{} [{}] {}", timestamp, level, message)
}

/// Install the global logger. An explicit level wins, else RUST_LOG, else info.
/// Returns the open error when the log file could not be used so the caller
/// can report it once logging is up.
pub fn init(level: Option<&str>, log_file: &Path) -> Option<io::Error> {
    let mut builder = match level {
        Some(lvl) => {
            let mut b = Builder::new();
            b.parse_filters(lvl);
            b
        }
        None => Builder::from_env(Env::default().default_filter_or("info")),
    };

    let (file, open_err) = match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(f) => (Some(f), None),
        Err(e) => (None, Some(e)),
    };

    builder
        .format(|buf, record| {
            let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            writeln!(
                buf,
                "{}",
                format_line(&ts, record.level(), &record.args().to_string())
            )
        })
        .target(Target::Pipe(Box::new(Tee { file })));
    // Already initialised (e.g. repeated calls in tests) is fine.
    let _ = builder.try_init();
    open_err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_layout() {
        assert_eq!(
            format_line("2025-06-30 08:00:00", log::Level::Warn, "rank changed"),
            "2025-06-30 08:00:00 [WARN] rank changed"
        );
    }

    #[test]
    fn tee_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activity.log");
        std::fs::write(&path, "old\n").unwrap();
        let file = OpenOptions::new().append(true).open(&path).unwrap();
        let mut tee = Tee { file: Some(file) };
        tee.write_all(b"new\n").unwrap();
        tee.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\nnew\n");
    }
}
