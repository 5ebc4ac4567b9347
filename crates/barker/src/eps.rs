//! The rendered EPS document.

use std::io::Write;

use barker_core::EPS_SIGNATURE;

/// A finished, self-contained EPS document.
///
/// The buffer is immutable once assembled and is never rasterized or
/// otherwise interpreted here; decoding is the consumer's business. The
/// accessors below only read the comment header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpsImage {
    bytes: Vec<u8>,
}

impl EpsImage {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The document bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the image, returning the document bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The `%%BoundingBox` header line, if the header carries one.
    pub fn bounding_box(&self) -> Option<&str> {
        let text = std::str::from_utf8(&self.bytes).ok()?;
        text.lines().find(|line| line.starts_with("%%BoundingBox:"))
    }

    /// Writes the document to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.bytes)
    }
}

impl AsRef<[u8]> for EpsImage {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
