//! Error taxonomy shared by every component.

use std::path::PathBuf;

/// Result type used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by basket construction, parameter resolution and import
/// planning.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad flag, malformed regex or tag expression
    #[error("basket {basket}: {message}")]
    InvalidArgument {
        /// Diagnostic name of the basket being built
        basket: String,
        /// What was wrong
        message: String,
    },

    /// Path does not exist
    #[error("{}: no such file or directory", path.display())]
    NotFound {
        /// Offending path
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// A directory was required but a file was given
    #[error("{}: not a directory", path.display())]
    NotADirectory {
        /// Offending path
        path: PathBuf,
        /// OS error, when the condition was raised by the OS
        #[source]
        source: Option<std::io::Error>,
    },

    /// Directory holds no recognized source files
    #[error("{}: no sources", path.display())]
    NoSources {
        /// Scanned directory
        path: PathBuf,
    },

    /// Malformed parameter file
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        /// File being parsed
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// What was wrong
        message: String,
    },

    /// Any other I/O failure
    #[error("{}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },
}

/// Discriminant of [`Error`], for comparing kinds rather than messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidArgument`]
    InvalidArgument,
    /// See [`Error::NotFound`]
    NotFound,
    /// See [`Error::NotADirectory`]
    NotADirectory,
    /// See [`Error::NoSources`]
    NoSources,
    /// See [`Error::Parse`]
    ParseError,
    /// See [`Error::Io`]
    Io,
}

impl Error {
    /// Create an invalid-argument error for a basket.
    pub fn invalid_argument(basket: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            basket: basket.into(),
            message: message.into(),
        }
    }

    /// Create a parse error at a given line.
    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Classify an I/O error raised while accessing `path`.
    ///
    /// Not-found and not-a-directory conditions become [`Error::NotFound`]
    /// and [`Error::NotADirectory`]; everything else is kept as [`Error::Io`].
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path, source },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory {
                path,
                source: Some(source),
            },
            _ => Self::Io { path, source },
        }
    }

    /// Kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::NotADirectory { .. } => ErrorKind::NotADirectory,
            Self::NoSources { .. } => ErrorKind::NoSources,
            Self::Parse { .. } => ErrorKind::ParseError,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Whether this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }
}
