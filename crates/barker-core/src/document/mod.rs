//! PostScript document assembly.
//!
//! Rendering is a two-pass protocol and both passes share one drawing
//! body: the embedded barcode library source, a fixed font/scale/cursor
//! preamble, the encoded call, and a page-finishing trailer. The
//! measurement pass prepends an error-handler override and runs under the
//! interpreter's bounding-box device; the final document prepends the EPS
//! signature and the bounding box the measurement pass produced, and is
//! never executed by this system.
//!
//! The library source is embedded verbatim in both documents rather than
//! loaded by the interpreter at runtime: the sandboxed mode used for
//! probing disables file access, and embedding guarantees the measured
//! geometry and the final artwork come from identical library bytes.

use crate::encode::EncodedCall;

/// Marker the installed error handler writes at the start of a diagnostic
/// line whenever the barcode library raises an error.
pub const LIBRARY_ERROR_MARKER: &str = "BWIPP ERROR: ";

/// Namespace prefix of error names raised by the barcode library.
pub const LIBRARY_NAMESPACE: &str = "bwipp.";

/// First bytes of every finished document.
pub const EPS_SIGNATURE: &str = "%!PS-Adobe-3.0 EPSF-3.0";

/// The library's resolve-and-execute directive: looks up the procedure set
/// pushed by the encoded call and invokes it.
const RESOLVE_DIRECTIVE: &str = "/uk.co.terryburton.bwipp findresource exec";

/// The error-handler override installed before the library loads.
///
/// On any runtime error it inspects the raised error's name: if the
/// namespace portion matches [`LIBRARY_NAMESPACE`], it writes a single
/// marker-prefixed line (marker, qualified error name, error info) to
/// `%stderr`, flushes, and quits the interpreter cleanly. Anything else is
/// re-dispatched to the interpreter's stock `handleerror`, which exits
/// nonzero with its own diagnostic shape. The classifier in
/// [`crate::diagnostics`] is the reader side of this contract.
fn error_handler_preamble() -> String {
    format!(
        "%!PS

errordict begin
/handleerror {{
  $error begin
  errorname dup length string cvs 0 {namespace_len} getinterval ({namespace}) eq {{
    (%stderr) (w) file
    dup (\n{marker}) writestring
    dup errorname dup length string cvs writestring
    dup ( ) writestring
    dup errorinfo dup length string cvs writestring
    dup (\n) writestring
    dup flushfile end quit
  }} if
  end //handleerror exec
}} bind def
end

",
        namespace_len = LIBRARY_NAMESPACE.len(),
        namespace = LIBRARY_NAMESPACE,
        marker = LIBRARY_ERROR_MARKER,
    )
}

/// The drawing body shared by the measurement program and the final
/// document: library source, font selection, fixed scale and cursor, the
/// call, and the page trailer.
fn drawing_program(library: &str, call: &EncodedCall) -> String {
    format!(
        "{library}

/Helvetica findfont 10 scalefont setfont
gsave
2 2 scale
10 10 moveto

{call}
{RESOLVE_DIRECTIVE}
grestore

showpage
"
    )
}

/// Assembles the measurement program fed to the bounding-box device.
pub fn measurement_program(library: &str, call: &EncodedCall) -> String {
    format!("{}{}", error_handler_preamble(), drawing_program(library, call))
}

/// Assembles the final self-contained EPS document.
///
/// `bounding_box` is the descriptor block captured from the measurement
/// pass, relocated byte-exactly; `library` and `call` must be the same
/// values the measurement pass used, otherwise the declared bounds no
/// longer describe the drawn artwork.
pub fn eps_document(bounding_box: &str, library: &str, call: &EncodedCall) -> String {
    format!(
        "{EPS_SIGNATURE}\n{bounding_box}\n\n{}",
        drawing_program(library, call)
    )
}

#[cfg(test)]
mod golden_tests;
