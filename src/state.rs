use crate::error::MonitorError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Last-known rank kept as a single line of plain text.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when no rank has been recorded yet (missing or blank file).
    pub fn load(&self) -> Result<Option<String>, MonitorError> {
        match fs::read_to_string(&self.path) {
            Ok(s) => {
                let v = s.trim();
                Ok((!v.is_empty()).then(|| v.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the stored rank. Writes a sibling temp file first and renames
    /// it into place so a crash never leaves a truncated file behind.
    pub fn save(&self, rank: &str) -> Result<(), MonitorError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.tmp_path();
        {
            let mut f = fs::File::create(&tmp)?;
            writeln!(f, "{}", rank.trim())?;
            f.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "last_rank".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
