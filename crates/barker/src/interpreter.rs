//! Ghostscript resolution and the bounding-box measurement pass.
//!
//! The interpreter is used purely as a measurement engine: the probe
//! spawns it once per call with the bounding-box output device, batch
//! execution, and the sandboxed mode that disables file access, feeds the
//! measurement program on stdin, and reads the result off stderr. The
//! final document is assembled in memory and never executed here.
//!
//! Which executable to run is decided once, at construction, so tests can
//! substitute a fake interpreter via [`Interpreter::with_program`].

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use barker_core::{Classification, classify};

use crate::error::{RenderError, RenderResult};

/// Environment variable naming the Ghostscript executable on Windows.
pub const INTERPRETER_ENV: &str = "GSC";

/// Default deadline for one measurement pass.
///
/// The library can spend real time on dense 2D symbols, but half a minute
/// is far beyond any legitimate run; past that the child is killed rather
/// than left holding pipes open.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A resolved interpreter executable plus invocation policy.
#[derive(Debug, Clone)]
pub struct Interpreter {
    program: String,
    timeout: Duration,
}

impl Interpreter {
    /// Resolves the platform's Ghostscript executable.
    ///
    /// Non-Windows platforms use `gs`. On Windows the [`INTERPRETER_ENV`]
    /// override wins, then a probed `gswin64c`, then `gswin32c`.
    pub fn detect() -> Self {
        Self::with_program(resolve_program())
    }

    /// Uses an explicit executable instead of platform detection.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Builder: override the per-invocation deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The executable this interpreter will spawn.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The per-invocation deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs the measurement pass and returns the bounding-box descriptor.
    ///
    /// The program is written to the child's stdin, which is then closed
    /// so batch mode sees EOF. The child is spawned with `kill_on_drop`,
    /// which guarantees termination and pipe closure on every exit path —
    /// early errors, the deadline elapsing, or the caller dropping the
    /// future.
    ///
    /// # Errors
    ///
    /// [`RenderError::Spawn`] if the executable cannot be started,
    /// [`RenderError::Timeout`] past the deadline, and the classified
    /// [`RenderError::Library`] / [`RenderError::Interpreter`] failures
    /// from the diagnostic stream.
    pub async fn probe(&self, program_text: &str) -> RenderResult<String> {
        debug!(
            program = %self.program,
            bytes = program_text.len(),
            "Spawning interpreter for measurement pass"
        );

        let mut child = Command::new(&self.program)
            .arg("-sDEVICE=bbox")
            .arg("-dBATCH")
            .arg("-dSAFER")
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Feeding stdin and collecting output both count against the
        // deadline; on elapse the future is dropped, which kills the child
        // and closes the pipes.
        let exchange = async move {
            if let Some(mut stdin) = child.stdin.take() {
                match stdin.write_all(program_text.as_bytes()).await {
                    Ok(()) => {}
                    // The interpreter may exit (and close its end) before
                    // the whole program is written; its diagnostics still
                    // decide the outcome below.
                    Err(error) if error.kind() == std::io::ErrorKind::BrokenPipe => {
                        debug!("Interpreter closed stdin early");
                    }
                    Err(error) => return Err(RenderError::from(error)),
                }
            }
            child.wait_with_output().await.map_err(RenderError::from)
        };

        let output = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| {
                warn!(program = %self.program, timeout = ?self.timeout, "Interpreter deadline elapsed, killing");
                RenderError::Timeout {
                    timeout: self.timeout,
                }
            })??;

        let diagnostics = String::from_utf8_lossy(&output.stderr);
        match classify(&diagnostics, output.status.success()) {
            Classification::BoundingBox(bounding_box) => {
                debug!(bytes = bounding_box.len(), "Measurement pass succeeded");
                Ok(bounding_box)
            }
            Classification::LibraryError(message) => {
                debug!(message = %message, "Barcode library raised an error");
                Err(RenderError::Library(message))
            }
            Classification::InterpreterError(message) => {
                warn!(status = ?output.status, "Interpreter failed");
                Err(RenderError::Interpreter(message))
            }
        }
    }
}

#[cfg(not(windows))]
fn resolve_program() -> String {
    "gs".to_string()
}

#[cfg(windows)]
fn resolve_program() -> String {
    // Respect the executable configured by gssetgs.bat, if any.
    if let Ok(program) = std::env::var(INTERPRETER_ENV) {
        return program;
    }

    let candidate = "gswin64c";
    let probe = std::process::Command::new(candidate)
        .arg("-dBATCH")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status();
    match probe {
        Ok(status) if status.success() => candidate.to_string(),
        _ => "gswin32c".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides() {
        let interpreter =
            Interpreter::with_program("/opt/gs/bin/gs").with_timeout(Duration::from_secs(5));
        assert_eq!(interpreter.program(), "/opt/gs/bin/gs");
        assert_eq!(interpreter.timeout(), Duration::from_secs(5));
    }

    #[cfg(not(windows))]
    #[test]
    fn detect_uses_the_fixed_default() {
        assert_eq!(Interpreter::detect().program(), "gs");
        assert_eq!(Interpreter::detect().timeout(), DEFAULT_TIMEOUT);
    }

    #[cfg(unix)]
    mod probes {
        use super::*;
        use crate::testutil::fake_interpreter;

        #[tokio::test]
        async fn success_returns_trimmed_bounding_box() {
            let dir = tempfile::tempdir().unwrap();
            let program = fake_interpreter(
                &dir,
                r#"cat >/dev/null
echo '%%BoundingBox: 20 20 132 62' >&2
echo '%%HiResBoundingBox: 20.000000 20.000000 131.600000 61.800000' >&2"#,
            );

            let bounding_box = Interpreter::with_program(program)
                .probe("showpage\n")
                .await
                .unwrap();
            assert!(bounding_box.starts_with("%%BoundingBox: 20 20 132 62"));
            assert!(bounding_box.ends_with("61.800000"));
        }

        #[tokio::test]
        async fn marker_diagnostics_become_library_errors() {
            let dir = tempfile::tempdir().unwrap();
            let program = fake_interpreter(
                &dir,
                r#"cat >/dev/null
echo 'BWIPP ERROR: bwipp.unknownSymbology unsupported barcode type' >&2"#,
            );

            let error = Interpreter::with_program(program)
                .probe("showpage\n")
                .await
                .unwrap_err();
            match error {
                RenderError::Library(message) => {
                    assert_eq!(message, "bwipp.unknownSymbology unsupported barcode type");
                    assert!(!message.contains("BWIPP ERROR: "));
                }
                other => panic!("expected library error, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn nonzero_exit_without_marker_is_interpreter_error() {
            let dir = tempfile::tempdir().unwrap();
            let program = fake_interpreter(
                &dir,
                r#"cat >/dev/null
echo 'Unrecoverable error, exit code 1' >&2
exit 1"#,
            );

            let error = Interpreter::with_program(program)
                .probe("showpage\n")
                .await
                .unwrap_err();
            match error {
                RenderError::Interpreter(message) => {
                    assert_eq!(message, "Unrecoverable error, exit code 1");
                }
                other => panic!("expected interpreter error, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn missing_executable_is_a_spawn_error() {
            let error = Interpreter::with_program("/nonexistent/fake-gs")
                .probe("showpage\n")
                .await
                .unwrap_err();
            match error {
                RenderError::Spawn { program, source } => {
                    assert_eq!(program, "/nonexistent/fake-gs");
                    assert!(!source.to_string().is_empty());
                }
                other => panic!("expected spawn error, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn deadline_kills_the_interpreter() {
            let dir = tempfile::tempdir().unwrap();
            let program = fake_interpreter(
                &dir,
                r#"cat >/dev/null
sleep 30"#,
            );

            let error = Interpreter::with_program(program)
                .with_timeout(Duration::from_millis(200))
                .probe("showpage\n")
                .await
                .unwrap_err();
            assert!(matches!(error, RenderError::Timeout { .. }));
        }
    }
}
