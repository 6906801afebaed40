//! Errors raised while loading a property file.

use std::path::PathBuf;

use thiserror::Error;

/// Why a property file could not be loaded.
///
/// Reads from a [`PropertyReader`](super::PropertyReader) whose file failed
/// to load report this error as the cause of their failure.
///
/// # Examples
///
/// ```
/// use fncore::properties::PropertyError;
///
/// let error = PropertyError::io("config.properties", std::io::ErrorKind::NotFound.into());
/// assert_eq!(error.to_string(), "could not read property file `config.properties`");
/// ```
#[derive(Debug, Error)]
pub enum PropertyError {
    /// The file could not be opened or was not valid UTF-8.
    #[error("could not read property file `{}`", .path.display())]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl PropertyError {
    /// Creates an [`Io`](PropertyError::Io) error for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
