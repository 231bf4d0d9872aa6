//! Import resolution and flattening for LESS stylesheets.
//!
//! This crate provides:
//! - The import directive scanner ([`scanner`])
//! - [`LessSource`], a stylesheet with its `@import` graph recursively
//!   resolved into one flattened document
//! - The compile gate and the boundary to the external LESS-to-CSS compiler
//!   ([`Compiler`], [`compile_to_file`])

mod compile;
mod error;
pub mod scanner;
mod source;

pub use compile::{compile_to_file, should_compile, CompileError, Compiler};
pub use error::{LessError, LessResult};
pub use source::LessSource;
