//! Error types for source resolution and compilation.

use lesscss_resource::ResourceError;
use thiserror::Error;

use crate::compile::CompileError;

/// Result type for source operations
pub type LessResult<T> = Result<T, LessError>;

/// Errors that can occur while building or compiling a LESS source graph.
///
/// Every variant is fatal for the construction or compilation it occurs in;
/// there is no partial result and no retry.
#[derive(Debug, Error)]
pub enum LessError {
    /// A resource could not be resolved, read, or decoded
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// An import chain returned to a stylesheet already being resolved
    #[error("cyclic import chain: {}", chain.join(" -> "))]
    CyclicImport { chain: Vec<String> },

    /// The external compiler rejected the flattened source
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The compiled output could not be written
    #[error("failed to write {path}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
