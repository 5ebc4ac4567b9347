//! Rendering error types.

use std::time::Duration;

use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while generating a barcode document.
///
/// The taxonomy mirrors the diagnostic protocol: [`Library`] means the
/// barcode library itself rejected the call, everything else is a failure
/// of the interpreter or of talking to it. There are no retries anywhere —
/// a call either returns a complete document or one of these.
///
/// [`Library`]: RenderError::Library
#[derive(Debug, Error)]
pub enum RenderError {
    /// The barcode library rejected the symbol, payload, or option
    /// combination. The message is the marker-stripped diagnostic text.
    #[error("barcode library error: {0}")]
    Library(String),

    /// The interpreter failed outside the library's error protocol
    /// (malformed program, sandbox violation, crash). The message is the
    /// raw diagnostic text.
    #[error("interpreter error: {0}")]
    Interpreter(String),

    /// The interpreter exceeded its deadline and was killed.
    #[error("interpreter timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// The interpreter executable could not be started at all.
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while feeding the program to the interpreter.
    #[error("interpreter I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// True when the barcode library itself reported the failure, as
    /// opposed to an interpreter- or process-level problem.
    pub fn is_library_error(&self) -> bool {
        matches!(self, Self::Library(_))
    }
}
