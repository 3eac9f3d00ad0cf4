//! Error types for harvesting and reporting.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarvestError>;

#[derive(Error, Debug)]
pub enum HarvestError {
    /// The file has a RAW extension but its metadata container could not be parsed.
    #[error("cannot decode metadata of {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: exif::Error,
    },

    /// A ratio-valued tag did not hold `n/d` or a plain number.
    #[error("tag {tag} has malformed value {value:?}{}", in_file(.path))]
    MalformedTag {
        /// File the tag was read from, when known.
        path: Option<PathBuf>,
        tag: String,
        value: String,
    },

    #[error("cannot open {}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed (unreadable directory, broken link, loop).
    #[error("cannot walk directory tree")]
    Walk(#[from] walkdir::Error),

    #[error("unsupported output file extension: {0:?}")]
    UnsupportedOutput(String),

    #[error("cannot write report to {}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl HarvestError {
    pub fn malformed(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedTag {
            path: None,
            tag: tag.into(),
            value: value.into(),
        }
    }

    pub fn malformed_in(
        path: impl Into<PathBuf>,
        tag: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::MalformedTag {
            path: Some(path.into()),
            tag: tag.into(),
            value: value.into(),
        }
    }

    pub fn export<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Export {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Per-file failures that `--skip-unreadable` may step over.
    ///
    /// A walk error on the root itself is not one: there is nothing left to
    /// harvest.
    pub fn is_per_file(&self) -> bool {
        match self {
            HarvestError::Decode { .. }
            | HarvestError::MalformedTag { .. }
            | HarvestError::FileAccess { .. } => true,
            HarvestError::Walk(err) => err.depth() > 0,
            _ => false,
        }
    }
}

fn in_file(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" in {}", path.display()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_tag_names_its_file() {
        let err = HarvestError::malformed_in("shots/odd.nef", "EXIF FNumber", "28/0");
        assert_eq!(
            err.to_string(),
            "tag EXIF FNumber has malformed value \"28/0\" in shots/odd.nef"
        );
        assert!(err.is_per_file());

        let err = HarvestError::malformed("EXIF ExposureTime", "bulb");
        assert_eq!(err.to_string(), "tag EXIF ExposureTime has malformed value \"bulb\"");
    }

    #[test]
    fn missing_root_is_not_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = walkdir::WalkDir::new(&missing)
            .into_iter()
            .next()
            .unwrap()
            .unwrap_err();
        assert_eq!(err.depth(), 0);
        assert!(!HarvestError::from(err).is_per_file());
    }
}
