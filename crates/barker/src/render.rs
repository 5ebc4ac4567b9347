//! The two-pass render pipeline.
//!
//! Pass one feeds a measurement document to the sandboxed interpreter and
//! captures the artwork's bounding box. Pass two is pure assembly: the
//! same library bytes and the same encoded call, now under an EPS header
//! that declares the probed bounds. No second interpreter invocation
//! happens — the final document is handed back unexecuted.

use barker_core::{BarcodeRequest, EncodedCall, eps_document, measurement_program};
use tracing::debug;

use crate::asset::LibraryAsset;
use crate::eps::EpsImage;
use crate::error::RenderResult;
use crate::interpreter::Interpreter;

/// Renders barcode requests into self-contained EPS documents.
///
/// Holds the process-wide immutable pieces: the library asset and the
/// resolved interpreter. Cheap to clone; clones share the same library
/// bytes. Concurrent [`generate`](Self::generate) calls are independent —
/// the only shared contention is on spawning OS processes.
#[derive(Debug, Clone)]
pub struct Renderer {
    asset: LibraryAsset,
    interpreter: Interpreter,
}

impl Renderer {
    /// Creates a renderer from an explicit asset and interpreter.
    pub fn new(asset: LibraryAsset, interpreter: Interpreter) -> Self {
        Self { asset, interpreter }
    }

    /// Creates a renderer with the default asset location and platform
    /// interpreter detection.
    ///
    /// # Errors
    ///
    /// Fails when the library source cannot be located or read; this is
    /// the startup-fatal path — no renderer, no calls.
    pub fn with_defaults() -> Result<Self, crate::asset::AssetError> {
        Ok(Self::new(LibraryAsset::load_default()?, Interpreter::detect()))
    }

    pub fn asset(&self) -> &LibraryAsset {
        &self.asset
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Generates a barcode document.
    ///
    /// Exactly one subprocess spawn per call (the measurement pass), then
    /// in-memory assembly. Either a complete document comes back or a
    /// [`RenderError`](crate::error::RenderError) — never partial output,
    /// never a retry.
    pub async fn generate(&self, request: &BarcodeRequest) -> RenderResult<EpsImage> {
        let call = EncodedCall::new(request);
        let program = measurement_program(self.asset.source(), &call);
        let bounding_box = self.interpreter.probe(&program).await?;

        // Reuse the probed call verbatim; re-encoding here could let the
        // final document drift from the geometry that was measured.
        let document = eps_document(&bounding_box, self.asset.source(), &call);
        debug!(
            symbol = %request.symbol(),
            bytes = document.len(),
            "Assembled EPS document"
        );
        Ok(EpsImage::new(document.into_bytes()))
    }
}
