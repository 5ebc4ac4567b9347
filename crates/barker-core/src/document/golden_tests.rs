//! Golden tests for document assembly.
//!
//! The assembled text is a wire contract with the interpreter and with the
//! barcode library's error-reporting protocol, so it is pinned
//! byte-for-byte here with a stub library source standing in for the real
//! asset. Run `cargo insta review` after intentional template changes.

use crate::encode::EncodedCall;
use crate::request::BarcodeRequest;

use super::{eps_document, measurement_program};

fn stub_call() -> EncodedCall {
    EncodedCall::new(&BarcodeRequest::new("code128", "1234"))
}

const STUB_LIBRARY: &str = "% stub barcode library";

#[test]
fn golden_measurement_program() {
    let program = measurement_program(STUB_LIBRARY, &stub_call());

    insta::assert_snapshot!(program, @r#"
%!PS

errordict begin
/handleerror {
  $error begin
  errorname dup length string cvs 0 6 getinterval (bwipp.) eq {
    (%stderr) (w) file
    dup (
BWIPP ERROR: ) writestring
    dup errorname dup length string cvs writestring
    dup ( ) writestring
    dup errorinfo dup length string cvs writestring
    dup (
) writestring
    dup flushfile end quit
  } if
  end //handleerror exec
} bind def
end

% stub barcode library

/Helvetica findfont 10 scalefont setfont
gsave
2 2 scale
10 10 moveto

<31323334> <> <636f6465313238> cvn
/uk.co.terryburton.bwipp findresource exec
grestore

showpage
"#);
}

#[test]
fn golden_eps_document() {
    let bounding_box = "%%BoundingBox: 20 20 132 62\n%%HiResBoundingBox: 20.000000 20.000000 131.600000 61.800000";
    let document = eps_document(bounding_box, STUB_LIBRARY, &stub_call());

    insta::assert_snapshot!(document, @r#"
%!PS-Adobe-3.0 EPSF-3.0
%%BoundingBox: 20 20 132 62
%%HiResBoundingBox: 20.000000 20.000000 131.600000 61.800000

% stub barcode library

/Helvetica findfont 10 scalefont setfont
gsave
2 2 scale
10 10 moveto

<31323334> <> <636f6465313238> cvn
/uk.co.terryburton.bwipp findresource exec
grestore

showpage
"#);
}
