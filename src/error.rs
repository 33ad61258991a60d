//! Error types for the form store

use std::path::PathBuf;
use thiserror::Error;

/// A field path that does not address a value in the form.
///
/// Paths are typed, so this only surfaces when parsing a dotted path from text
/// or when indexing past the end of a list. Either way it is a caller bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("unknown field path `{0}`")]
    Unknown(String),

    #[error("index {index} out of range for `{list}` (len {len})")]
    OutOfRange {
        list: &'static str,
        index: usize,
        len: usize,
    },
}

/// Errors raised while building a form store
#[derive(Debug, Error)]
pub enum FormError {
    #[error("invalid validation pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("failed to read config {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_path_message() {
        let err = PathError::Unknown("social.myspace".to_string());
        assert_eq!(err.to_string(), "unknown field path `social.myspace`");
    }

    #[test]
    fn test_out_of_range_message() {
        let err = PathError::OutOfRange {
            list: "phNumbers",
            index: 3,
            len: 1,
        };
        assert_eq!(
            err.to_string(),
            "index 3 out of range for `phNumbers` (len 1)"
        );
    }

    #[test]
    fn test_config_read_keeps_io_source() {
        let err = FormError::ConfigRead {
            path: PathBuf::from("/etc/form.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "failed to read config /etc/form.json");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "gone");
    }

    #[test]
    fn test_path_error_converts_into_form_error() {
        let err: FormError = PathError::Unknown("x".to_string()).into();
        assert!(matches!(err, FormError::Path(PathError::Unknown(_))));
    }
}
