//! Barcode request model.
//!
//! A [`BarcodeRequest`] names a symbology, carries the payload bytes to
//! encode, and an ordered set of rendering directives. The request is built
//! once by the caller and never mutated afterwards; nothing here validates
//! the symbol name or the option semantics — that judgement belongs to the
//! barcode library on the other side of the interpreter.

use serde::{Deserialize, Serialize};

/// A single barcode rendering request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarcodeRequest {
    symbol: String,
    payload: Vec<u8>,
    #[serde(default)]
    options: Options,
}

impl BarcodeRequest {
    /// Creates a request for the given symbology and payload.
    ///
    /// The payload is an arbitrary byte sequence; control characters, NUL
    /// bytes, and characters special to PostScript string syntax are all
    /// acceptable.
    pub fn new(symbol: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            symbol: symbol.into(),
            payload: payload.into(),
            options: Options::new(),
        }
    }

    /// Builder: attach a rendering option.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.set(name, value);
        self
    }

    /// Builder: replace the whole option set.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// The symbology identifier, e.g. `code128` or `qrcode`.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The raw payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The rendering directives, in insertion order.
    pub fn options(&self) -> &Options {
        &self.options
    }
}

/// An insertion-ordered mapping of directive name to value.
///
/// Order is preserved because the encoded form must be byte-identical for
/// identical input order; callers rely on that for reproducible documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(Vec<(String, OptionValue)>);

impl Options {
    /// Creates an empty option set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Sets a directive. An existing entry with the same name is updated in
    /// place, keeping its original position; new names append at the end.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, V: Into<OptionValue>> FromIterator<(N, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut options = Options::new();
        for (name, value) in iter {
            options.set(name, value);
        }
        options
    }
}

/// The value of a rendering directive.
///
/// Booleans are flags: `true` emits the bare directive name, `false` omits
/// the directive entirely. Numbers and text emit `name=value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{}", value),
            Self::Int(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::Text(value) => write!(f, "{}", value),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
