//! The boundary to the external LESS-to-CSS compiler.
//!
//! The language transformation itself is an external collaborator; this
//! module only decides *whether* a compile is necessary and hands the
//! flattened source across the boundary.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tracing::debug;

use crate::error::{LessError, LessResult};
use crate::source::LessSource;

/// Failure reported by the external compiler.
#[derive(Debug, Error)]
#[error("compilation of {name} failed: {message}")]
pub struct CompileError {
    /// The source name, for diagnostics.
    pub name: String,
    /// The compiler's own message.
    pub message: String,
}

/// The contract of the external LESS-to-CSS compiler.
///
/// Implementations wrap whatever actually performs the language
/// transformation (typically a scripting-engine bridge). Invocations are
/// serialized by the caller when the underlying engine is not reentrant.
pub trait Compiler {
    /// Compiles flattened LESS text to CSS. `name` identifies the source
    /// for error messages.
    fn compile(&self, less: &str, name: &str) -> Result<String, CompileError>;
}

/// Decides whether a (re)compile is necessary.
///
/// Compiles when forced, when no previous output exists, or when the source
/// (or anything it transitively imports) is newer than the output.
pub fn should_compile(
    force: bool,
    output_exists: bool,
    output_last_modified: SystemTime,
    source_last_modified: SystemTime,
) -> bool {
    force || !output_exists || output_last_modified < source_last_modified
}

/// Compiles `source` and writes the CSS to `output`, unless the existing
/// output is already up to date.
///
/// Returns `true` when the compiler ran and the output was written, `false`
/// for the up-to-date no-op.
pub fn compile_to_file(
    compiler: &dyn Compiler,
    source: &LessSource,
    output: &Path,
    force: bool,
) -> LessResult<bool> {
    let output_exists = output.exists();
    let output_last_modified = output
        .metadata()
        .and_then(|metadata| metadata.modified())
        .unwrap_or(UNIX_EPOCH);

    if !should_compile(
        force,
        output_exists,
        output_last_modified,
        source.last_modified_including_imports(),
    ) {
        debug!(output = %output.display(), "output is up to date");
        return Ok(false);
    }

    let css = compiler.compile(source.normalized_content(), &source.name())?;
    std::fs::write(output, css).map_err(|source| LessError::Output {
        path: output.display().to_string(),
        source,
    })?;
    debug!(output = %output.display(), "wrote compiled output");
    Ok(true)
}
