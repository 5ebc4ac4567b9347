//! Diagnostic-stream classification for the measurement pass.
//!
//! Exit status alone cannot tell success from failure: the error handler
//! installed by [`crate::document::measurement_program`] quits the
//! interpreter cleanly after reporting a library error, so a zero exit is
//! compatible with both outcomes. The captured stderr text is the real
//! signal, read in this order:
//!
//! 1. marker present — the library rejected the call (whatever the exit
//!    status says);
//! 2. no marker, nonzero exit — the interpreter itself failed;
//! 3. no marker, clean exit — the text is the bounding-box block written
//!    by the measurement device.

use crate::document::LIBRARY_ERROR_MARKER;

/// Outcome of reading the measurement pass's diagnostic stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Clean run; the diagnostic text is the measurement device's
    /// bounding-box descriptor, relocated verbatim into the final document.
    BoundingBox(String),
    /// The barcode library raised an error; carries the marker-stripped
    /// diagnostic text.
    LibraryError(String),
    /// The interpreter failed outside the library's error protocol;
    /// carries the raw diagnostic text.
    InterpreterError(String),
}

/// Classifies captured diagnostics against the marker convention.
///
/// `exited_cleanly` is the subprocess's success flag; it is consulted only
/// after the marker check, never before. A marker somewhere past the start
/// of the text still signals a library error, but only a leading marker is
/// stripped — and only once.
pub fn classify(diagnostics: &str, exited_cleanly: bool) -> Classification {
    let text = diagnostics.trim();

    if text.contains(LIBRARY_ERROR_MARKER) {
        let message = text.strip_prefix(LIBRARY_ERROR_MARKER).unwrap_or(text);
        return Classification::LibraryError(message.to_string());
    }

    if !exited_cleanly {
        return Classification::InterpreterError(text.to_string());
    }

    Classification::BoundingBox(text.to_string())
}
