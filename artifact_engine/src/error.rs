//! Error types for the Artifact engine
//!
//! Recording-time misuse (sessions, handles) is reported at the call that caused
//! it and is recoverable. Backend failures surfaced during flush or input polling
//! are fatal to the current frame.

use std::fmt;

/// Result type for Artifact engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Artifact engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// A frame session is already open on this render context
    SessionAlreadyOpen,

    /// A recording call was made without an open frame session
    NoActiveSession,

    /// Stale or invalid shader/drawable handle
    UnknownHandle(String),

    /// Failure surfaced by the rendering or input backend
    BackendError(String),

    /// Malformed resource descriptor (shader sources, vertex data, ...)
    InvalidResource(String),

    /// Initialization failed (backend lookup, application init, config)
    InitializationFailed(String),
}

impl Error {
    /// Whether this error is fatal to the current frame
    ///
    /// Only backend failures are fatal; every other variant is programmer
    /// misuse reported at the call site.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::BackendError(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SessionAlreadyOpen => write!(f, "Frame session already open on this render context"),
            Error::NoActiveSession => write!(f, "No active frame session"),
            Error::UnknownHandle(msg) => write!(f, "Unknown handle: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an ERROR with file:line and build an `Error::BackendError` from the message
///
/// # Example
///
/// ```ignore
/// let code = device.query().map_err(|e| engine_err!("artifact::headless", "query failed: {:?}", e))?;
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::artifact::Engine::log_detailed(
            $crate::artifact::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::artifact::Error::BackendError(message)
    }};
}

/// Log an ERROR and return early with `Error::BackendError`
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
