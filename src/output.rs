//! Where rendered labels are written.

use crate::timestamp::file_stamp;
use crate::LabelError;
use chrono::{Datelike, Timelike};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_PREFIX: &str = "logistics_label";

/// Labels go to an application-owned directory under timestamped names, falling
/// back once to a scratch directory when the preferred one can't be written.
///
/// File names only have second resolution: two labels saved within the same
/// second share a name and the later one replaces the earlier.
#[derive(Debug, Clone)]
pub struct OutputPolicy {
    pub preferred_dir: PathBuf,
    pub fallback_dir: PathBuf,
    pub file_prefix: String,
}

/// Where a label ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
    Preferred(PathBuf),
    /// The preferred location failed with the given reason
    Fallback { path: PathBuf, reason: String },
}

impl Saved {
    pub fn path(&self) -> &Path {
        match self {
            Saved::Preferred(path) => path,
            Saved::Fallback { path, .. } => path,
        }
    }
}

impl OutputPolicy {
    pub fn new(preferred_dir: impl Into<PathBuf>) -> OutputPolicy {
        OutputPolicy {
            preferred_dir: preferred_dir.into(),
            fallback_dir: std::env::temp_dir(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }

    pub fn with_fallback_dir(mut self, dir: impl Into<PathBuf>) -> OutputPolicy {
        self.fallback_dir = dir.into();
        self
    }

    /// `$HOME/Documents/TEMU-Labels`, or a directory of that name under the
    /// current directory when no home directory is known
    pub fn default_dir() -> PathBuf {
        std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Documents")
            .join("TEMU-Labels")
    }

    pub fn file_name<T: Datelike + Timelike>(&self, at: &T) -> String {
        format!("{}_{}.pdf", self.file_prefix, file_stamp(at))
    }

    /// Write `bytes` under a name stamped with `at`
    pub fn save<T: Datelike + Timelike>(&self, bytes: &[u8], at: &T) -> Result<Saved, LabelError> {
        let file_name = self.file_name(at);
        let preferred = self.preferred_dir.join(&file_name);

        let attempt = std::fs::create_dir_all(&self.preferred_dir)
            .and_then(|_| std::fs::write(&preferred, bytes));
        let reason = match attempt {
            Ok(()) => {
                tracing::info!(path = %preferred.display(), "label saved");
                return Ok(Saved::Preferred(preferred));
            }
            Err(err) => err,
        };

        let fallback = self.fallback_dir.join(&file_name);
        tracing::warn!(
            preferred = %preferred.display(),
            fallback = %fallback.display(),
            error = %reason,
            "could not save label, retrying in fallback directory"
        );

        std::fs::write(&fallback, bytes).map_err(|source| LabelError::Save {
            path: fallback.clone(),
            source,
        })?;
        tracing::info!(path = %fallback.display(), "label saved");

        Ok(Saved::Fallback {
            path: fallback,
            reason: reason.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 17)
            .and_then(|d| d.and_hms_opt(12, 30, 45))
            .unwrap()
    }

    #[test]
    fn creates_the_preferred_directory() {
        let root = tempfile::tempdir().unwrap();
        let policy = OutputPolicy::new(root.path().join("nested").join("labels"));

        let saved = policy.save(b"%PDF-", &noon()).unwrap();
        let expected = root
            .path()
            .join("nested")
            .join("labels")
            .join("logistics_label_20250317-123045.pdf");
        assert_eq!(saved, Saved::Preferred(expected.clone()));
        assert_eq!(std::fs::read(expected).unwrap(), b"%PDF-");
    }

    #[test]
    fn falls_back_when_the_preferred_directory_is_unusable() {
        let root = tempfile::tempdir().unwrap();
        // a regular file where the directory should be
        let blocker = root.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let fallback = root.path().join("tmp");
        std::fs::create_dir(&fallback).unwrap();

        let policy = OutputPolicy::new(blocker.join("labels")).with_fallback_dir(&fallback);
        let saved = policy.save(b"label", &noon()).unwrap();

        assert!(matches!(saved, Saved::Fallback { .. }));
        assert_eq!(
            saved.path(),
            fallback.join("logistics_label_20250317-123045.pdf")
        );
        assert!(saved.path().exists());
    }

    #[test]
    fn second_failure_is_reported() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let policy = OutputPolicy::new(blocker.join("a")).with_fallback_dir(blocker.join("b"));
        match policy.save(b"label", &noon()) {
            Err(LabelError::Save { path, .. }) => {
                assert_eq!(path, blocker.join("b").join("logistics_label_20250317-123045.pdf"))
            }
            other => panic!("expected a save error, got {other:?}"),
        }
    }

    #[test]
    fn same_second_shares_a_file_name() {
        let policy = OutputPolicy::new("labels");
        assert_eq!(policy.file_name(&noon()), policy.file_name(&noon()));
    }
}
