//! Transport-safe call encoding.
//!
//! Payloads travel to the interpreter as hex string literals (`<...>`), so
//! no byte in the payload can collide with PostScript string syntax — not
//! parentheses, backslashes, angle brackets, nor NUL. The encoding is
//! injective and escape-free: every byte maps to exactly two `[0-9a-f]`
//! digits.

use std::fmt;

use crate::request::{BarcodeRequest, OptionValue, Options};

/// Encodes bytes as lowercase hex, two digits per byte, no separators.
pub fn hex_encode(bytes: impl AsRef<[u8]>) -> String {
    bytes
        .as_ref()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Encodes an option set into the barcode library's directive string.
///
/// Entries are emitted in insertion order: `true` flags as the bare name,
/// `false` flags not at all, everything else as `name=value`. Tokens are
/// joined with single spaces, so identical input order gives byte-identical
/// output.
pub fn encode_options(options: &Options) -> String {
    let tokens: Vec<String> = options
        .iter()
        .filter_map(|(name, value)| match value {
            OptionValue::Bool(true) => Some(name.to_string()),
            OptionValue::Bool(false) => None,
            other => Some(format!("{}={}", name, other)),
        })
        .collect();
    tokens.join(" ")
}

/// A barcode request rendered as an interpreter call expression.
///
/// The expression pushes three hex string literals (payload, directives,
/// symbol name) and converts the symbol to a name object:
///
/// ```text
/// <hex(payload)> <hex(directives)> <hex(symbol)> cvn
/// ```
///
/// Both the measurement pass and the final document embed the same
/// `EncodedCall` value, which is what ties the probed bounding box to the
/// artwork the document draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCall(String);

impl EncodedCall {
    /// Derives the call expression for a request. Deterministic; performs
    /// no validation of the symbol or options.
    pub fn new(request: &BarcodeRequest) -> Self {
        let payload = hex_encode(request.payload());
        let directives = hex_encode(encode_options(request.options()));
        let symbol = hex_encode(request.symbol());
        Self(format!("<{}> <{}> <{}> cvn", payload, directives, symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
