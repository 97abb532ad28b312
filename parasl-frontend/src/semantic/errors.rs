//! Semantic analysis error definitions
//!
//! Builder operations fail with a `SemanticError`. It carries no location;
//! the parser attaches the position of the production being reduced when it
//! converts the error into a `CompilerError`.

use crate::ast::BinaryOp;
use parasl_common::{CompilerError, SourceLocation};
use thiserror::Error;

/// Semantic analysis errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticError {
    #[error("Symbol \"{name}\" has not been declared in this scope")]
    UndeclaredSymbol { name: String },

    #[error("Symbol \"{name}\" is already declared in this scope")]
    AlreadyDeclared { name: String },

    #[error("Type mismatch for operator {op}: {left} and {right}")]
    TypeMismatch {
        op: BinaryOp,
        left: String,
        right: String,
    },

    #[error("Member access .{field} on non-struct type {found}")]
    NotAStruct { field: String, found: String },

    #[error("No field named \"{field}\" in {struct_type}")]
    NoSuchField { field: String, struct_type: String },

    #[error("Type {found} cannot be subscripted")]
    NotSubscriptable { found: String },

    #[error("Subscript index must be integral, found {found}")]
    NonIntegralIndex { found: String },

    #[error("Initializer type mismatch for \"{name}\": declared {declared}, initializer is {found}")]
    InitializerTypeMismatch {
        name: String,
        declared: String,
        found: String,
    },

    #[error("Redeclaration of \"{name}\" with different type: {found} (previously {previous})")]
    RedeclarationType {
        name: String,
        previous: String,
        found: String,
    },

    #[error("Initializer list must not be empty")]
    EmptyInitializer,

    #[error("Heterogeneous initializer list: element {position} is {found}, expected {expected}")]
    HeterogeneousInitializer {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("Type of {what} is unknown")]
    UnknownType { what: String },

    #[error("Input range {begin}..{end} is empty")]
    EmptyInputRange { begin: u32, end: u32 },

    #[error("Input range {begin}..{end} is wider than {max} inputs")]
    InputRangeTooWide { begin: u32, end: u32, max: u32 },

    #[error("Input range length mismatch: {begin}..{end} has {count} elements, type length is {length}")]
    InputRangeLength {
        begin: u32,
        end: u32,
        count: u32,
        length: u32,
    },

    #[error("Input {index} used with conflicting types: {previous} and {found}")]
    InputTypeConflict {
        index: u32,
        previous: String,
        found: String,
    },

    #[error("Duplicate field \"{name}\"")]
    DuplicateField { name: String },

    #[error("Symbol \"{name}\" is not a function")]
    NotAFunction { name: String },

    #[error("Too many arguments for \"{name}\": expected at most {expected}, found {found}")]
    TooManyArguments {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Argument {position} of \"{name}\" has type {found}, expected {expected}")]
    ArgumentTypeMismatch {
        name: String,
        position: usize,
        expected: String,
        found: String,
    },

    #[error("Return type mismatch: {found} and {previous}")]
    ReturnTypeMismatch { previous: String, found: String },

    #[error("Range step must not be zero")]
    ZeroStep,

    #[error("Type {found} is not iterable")]
    NotIterable { found: String },

    #[error("Invalid assignment target")]
    InvalidAssignmentTarget,

    #[error("Internal builder error: {message}")]
    Internal { message: String },
}

impl SemanticError {
    /// Attach the location of the failing production
    pub fn at(self, location: SourceLocation) -> CompilerError {
        match self {
            SemanticError::Internal { message } => CompilerError::InternalError { message },
            err => CompilerError::semantic_error(err.to_string(), location),
        }
    }
}
