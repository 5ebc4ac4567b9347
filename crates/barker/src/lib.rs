//! Barcode rendering through a sandboxed PostScript interpreter.
//!
//! `barker` drives Ghostscript as a measurement engine for the BWIPP
//! barcode library: a first, sandboxed pass probes the artwork's bounding
//! box, and a second, in-memory pass assembles a self-contained EPS
//! document declaring those bounds. The library source is an opaque text
//! asset loaded once at startup and embedded verbatim in every document.
//!
//! ```ignore
//! use barker::{BarcodeRequest, Renderer};
//!
//! let renderer = Renderer::with_defaults()?;
//! let request = BarcodeRequest::new("code128", "1234").with_option("includetext", true);
//! let image = renderer.generate(&request).await?;
//! std::fs::write("barcode.eps", image.as_bytes())?;
//! ```
//!
//! Symbol names and option semantics are never validated here; the
//! barcode library's own error channel is authoritative and surfaces as
//! [`RenderError::Library`].

pub mod asset;
pub mod eps;
pub mod error;
pub mod interpreter;
pub mod render;

#[cfg(all(test, unix))]
mod testutil;

pub use asset::{AssetError, LibraryAsset};
pub use eps::EpsImage;
pub use error::{RenderError, RenderResult};
pub use interpreter::Interpreter;
pub use render::Renderer;

// Request/encoding types callers need to build and inspect requests.
pub use barker_core::{BarcodeRequest, EncodedCall, OptionValue, Options};
