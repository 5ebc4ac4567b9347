//! Shared test helpers.

use std::os::unix::fs::PermissionsExt;

/// Writes an executable shell script standing in for the interpreter.
///
/// The script body should consume stdin (`cat >/dev/null`) before writing
/// diagnostics, mirroring how the real interpreter drains its program.
pub fn fake_interpreter(dir: &tempfile::TempDir, body: &str) -> String {
    let path = dir.path().join("fake-gs");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();

    let mut permissions = std::fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).unwrap();

    path.to_string_lossy().into_owned()
}
