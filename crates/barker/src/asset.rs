//! The barcode library asset.
//!
//! The rendering library (BWIPP, a PostScript procedure set) is consumed
//! as an opaque, versioned text asset: read once at startup, shared
//! read-only, and embedded verbatim into every generated document. The
//! probing interpreter runs sandboxed with file access disabled, so the
//! source must travel inline with each program rather than be loaded by
//! the interpreter itself.
//!
//! Failure to locate or read the asset is a startup-fatal condition; it is
//! never surfaced as a per-call error and never retried.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

/// Environment variable overriding the library source path.
pub const LIBRARY_PATH_ENV: &str = "BARKER_BWIPP_PATH";

/// Installation-relative locations tried when no override is set.
const DEFAULT_CANDIDATES: [&str; 2] = [
    "postscriptbarcode/barcode.ps",
    "/usr/share/postscriptbarcode/barcode.ps",
];

/// Errors locating or reading the library source.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The file exists (or was named explicitly) but could not be read.
    #[error("cannot read barcode library at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No candidate path held the library source.
    #[error("barcode library not found (tried {tried:?}); set BARKER_BWIPP_PATH to override")]
    NotFound { tried: Vec<PathBuf> },
}

/// The library source text, loaded once and shared read-only.
///
/// Cloning is cheap (`Arc`-backed), and every clone refers to the same
/// bytes — which is exactly the invariant the two-pass protocol needs:
/// the measurement document and the final document must embed identical
/// library bytes, or the probed bounding box describes different artwork.
#[derive(Debug, Clone)]
pub struct LibraryAsset {
    source: Arc<str>,
}

impl LibraryAsset {
    /// Wraps already-loaded library source text. Intended for tests and
    /// for embedders that ship the source through other means.
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: Arc::from(source.into()),
        }
    }

    /// Reads the library source from an explicit path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = source.len(), "Loaded barcode library");
        Ok(Self::from_source(source))
    }

    /// Resolves and reads the library source from its default location.
    ///
    /// The [`LIBRARY_PATH_ENV`] override is authoritative when set — a
    /// broken override is an error, not a reason to fall back. Otherwise
    /// the fixed candidate paths are tried in order.
    pub fn load_default() -> Result<Self, AssetError> {
        if let Ok(path) = std::env::var(LIBRARY_PATH_ENV) {
            debug!(path = %path, "Using barcode library path from environment");
            return Self::from_file(path);
        }

        let mut tried = Vec::new();
        for candidate in DEFAULT_CANDIDATES {
            let path = Path::new(candidate);
            if path.is_file() {
                return Self::from_file(path);
            }
            tried.push(path.to_path_buf());
        }

        Err(AssetError::NotFound { tried })
    }

    /// The library source text.
    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_source_exposes_the_text() {
        let asset = LibraryAsset::from_source("% procedure set");
        assert_eq!(asset.source(), "% procedure set");
    }

    #[test]
    fn clones_share_identical_bytes() {
        let asset = LibraryAsset::from_source("% procedure set");
        let clone = asset.clone();
        assert!(std::ptr::eq(asset.source(), clone.source()));
    }

    #[test]
    fn from_file_reads_the_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "% barcode procedures").unwrap();

        let asset = LibraryAsset::from_file(file.path()).unwrap();
        assert_eq!(asset.source(), "% barcode procedures\n");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-library.ps");

        let error = LibraryAsset::from_file(&path).unwrap_err();
        match error {
            AssetError::Read { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Read error, got {other:?}"),
        }
    }

    #[test]
    fn broken_env_override_does_not_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ps");

        unsafe {
            std::env::set_var(LIBRARY_PATH_ENV, &missing);
        }
        let result = LibraryAsset::load_default();
        unsafe {
            std::env::remove_var(LIBRARY_PATH_ENV);
        }

        assert!(matches!(result, Err(AssetError::Read { .. })));
    }
}
