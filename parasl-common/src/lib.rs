//! Parasl layer language - Common Types and Utilities
//!
//! Error definitions and source locations shared by the front end and the
//! command line driver.

pub mod error;
pub mod source_loc;

pub use error::{CompilerError, Diagnostic, Severity};
pub use source_loc::{SourceLocation, SourceSpan};
