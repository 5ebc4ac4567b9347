//! Core types: barcode requests, call encoding, document assembly, diagnostics

pub mod diagnostics;
pub mod document;
pub mod encode;
pub mod request;
pub mod tracing;

pub use diagnostics::{Classification, classify};
pub use document::{
    EPS_SIGNATURE, LIBRARY_ERROR_MARKER, LIBRARY_NAMESPACE, eps_document, measurement_program,
};
pub use encode::{EncodedCall, encode_options, hex_encode};
pub use request::{BarcodeRequest, OptionValue, Options};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
