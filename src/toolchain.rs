// External toolchain invocation
//
// Everything past emission is someone else's job: rustc compiles the
// generated source, and the produced binary may be run once on request.
// Failures here are reported as values, never as panics; a broken
// generated program is a user-visible diagnostic, not a crash.

use crate::error::TranslateError;
use log::{debug, info};
use std::path::Path;
use std::process::Command;

/// Outcome of a compile or run step.
#[derive(Debug, Clone)]
pub struct CompileStatus {
    pub success: bool,
    pub message: String,
}

/// Persist the generated source text.
pub fn write_program(path: &Path, source: &str) -> Result<(), TranslateError> {
    std::fs::write(path, source)
        .map_err(|e| TranslateError::Io(format!("cannot write {}: {}", path.display(), e)))
}

/// Compile the generated source with rustc. A non-zero exit is a failure
/// result carrying rustc's stderr, not an error.
pub fn compile(source: &Path, artifact: &str) -> CompileStatus {
    info!("compiling {} -> {}", source.display(), artifact);
    let output = Command::new("rustc").arg(source).arg("-o").arg(artifact).output();

    match output {
        Ok(out) if out.status.success() => CompileStatus {
            success: true,
            message: format!("compiled {}", artifact),
        },
        Ok(out) => CompileStatus {
            success: false,
            message: format!(
                "rustc exited with {}:\n{}",
                out.status,
                String::from_utf8_lossy(&out.stderr)
            ),
        },
        Err(e) => CompileStatus {
            success: false,
            message: format!("failed to invoke rustc: {}", e),
        },
    }
}

/// Run the compiled artifact synchronously, capturing its stdout.
pub fn run_artifact(artifact: &str) -> CompileStatus {
    let path = format!("./{}", artifact);
    debug!("running {}", path);
    match Command::new(&path).output() {
        Ok(out) if out.status.success() => CompileStatus {
            success: true,
            message: String::from_utf8_lossy(&out.stdout).into_owned(),
        },
        Ok(out) => CompileStatus {
            success: false,
            message: format!(
                "{} exited with {}:\n{}",
                path,
                out.status,
                String::from_utf8_lossy(&out.stderr)
            ),
        },
        Err(e) => CompileStatus {
            success: false,
            message: format!("failed to run {}: {}", path, e),
        },
    }
}
