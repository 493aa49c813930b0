//! Where label fonts come from.

use crate::{LabelError, Weight};
use std::path::{Path, PathBuf};

/// File names of the CJK family labels are typeset in
pub const REGULAR_FONT_FILE: &str = "NotoSansSC-Regular.ttf";
pub const BOLD_FONT_FILE: &str = "NotoSansSC-Bold.ttf";

/// Supplies raw font bytes for each weight of a single CJK-capable family
pub trait FontSource {
    fn load(&self, weight: Weight) -> Result<Vec<u8>, LabelError>;
}

/// Fonts read from a directory holding [REGULAR_FONT_FILE] and [BOLD_FONT_FILE]
#[derive(Debug, Clone)]
pub struct FontDir {
    dir: PathBuf,
}

impl FontDir {
    pub fn new(dir: impl Into<PathBuf>) -> FontDir {
        FontDir { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, weight: Weight) -> PathBuf {
        match weight {
            Weight::Regular => self.dir.join(REGULAR_FONT_FILE),
            Weight::Bold => self.dir.join(BOLD_FONT_FILE),
        }
    }
}

impl FontSource for FontDir {
    fn load(&self, weight: Weight) -> Result<Vec<u8>, LabelError> {
        let path = self.path_for(weight);
        std::fs::read(&path).map_err(|source| LabelError::FontFile { path, source })
    }
}

/// Fonts already in memory, typically `include_bytes!` in the host application
#[derive(Debug, Clone, Default)]
pub struct FontBytes {
    pub regular: Option<Vec<u8>>,
    pub bold: Option<Vec<u8>>,
}

impl FontBytes {
    pub fn new(regular: Vec<u8>, bold: Vec<u8>) -> FontBytes {
        FontBytes {
            regular: Some(regular),
            bold: Some(bold),
        }
    }

    /// A source with no fonts at all; labels fall back to built-in faces
    pub fn none() -> FontBytes {
        FontBytes::default()
    }
}

impl FontSource for FontBytes {
    fn load(&self, weight: Weight) -> Result<Vec<u8>, LabelError> {
        let bytes = match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        };
        bytes.clone().ok_or_else(|| LabelError::FontUnavailable {
            weight,
            reason: "no font bytes supplied".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_dir_reports_the_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let fonts = FontDir::new(dir.path());
        match fonts.load(Weight::Bold) {
            Err(LabelError::FontFile { path, .. }) => {
                assert_eq!(path, dir.path().join(BOLD_FONT_FILE))
            }
            other => panic!("expected a font file error, got {other:?}"),
        }
    }

    #[test]
    fn font_dir_reads_present_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(REGULAR_FONT_FILE), b"regular").unwrap();
        let fonts = FontDir::new(dir.path());
        assert_eq!(fonts.load(Weight::Regular).unwrap(), b"regular");
    }

    #[test]
    fn in_memory_source_without_bytes_is_unavailable() {
        let fonts = FontBytes {
            regular: Some(vec![1, 2, 3]),
            bold: None,
        };
        assert_eq!(fonts.load(Weight::Regular).unwrap(), vec![1, 2, 3]);
        assert!(matches!(
            fonts.load(Weight::Bold),
            Err(LabelError::FontUnavailable {
                weight: Weight::Bold,
                ..
            })
        ));
    }
}
