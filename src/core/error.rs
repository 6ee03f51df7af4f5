//! Fatal errors. Anything that only affects one package or message is a
//! [`Diagnostic`](super::types::Diagnostic) instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UxrError {
    #[error("message list file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("cannot read message list {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no valid messages found in {}", path.display())]
    InputEmpty { path: PathBuf },

    #[error("no valid IDL files found")]
    NoIdlFiles,

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl UxrError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T, E = UxrError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = UxrError::InputNotFound {
            path: PathBuf::from("msgs.txt"),
        };
        assert_eq!(e.to_string(), "message list file not found: msgs.txt");

        let e = UxrError::NoIdlFiles;
        assert_eq!(e.to_string(), "no valid IDL files found");

        let e = UxrError::io(
            "cannot create uxr_generated",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(e.to_string(), "cannot create uxr_generated: denied");
    }
}
