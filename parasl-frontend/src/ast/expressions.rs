//! Expression AST nodes for the layer language

use super::ops::{BinaryOp, UnaryOp};
use super::{ExprId, StmtId};
use crate::types::TypeId;

/// AST Expression node
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    /// `None` when the type could not be inferred
    pub expr_type: Option<TypeId>,
}

impl Expression {
    pub fn new(kind: ExpressionKind, expr_type: Option<TypeId>) -> Self {
        Self { kind, expr_type }
    }
}

/// One named member of a `glue(...)` expression
#[derive(Debug, Clone, PartialEq)]
pub struct GlueMember {
    pub name: String,
    pub value: ExprId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    /// Unsigned integer literal
    Literal(u64),

    /// Declared name, owned by its declaration statement
    Identifier(String),

    /// Use of a declared name; `target` is the declaring identifier
    Reference { target: ExprId },

    Unary {
        op: UnaryOp,
        operand: ExprId,
    },

    /// Binary operation; subscripts use `BinaryOp::Index`
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    MemberAccess {
        base: ExprId,
        member: String,
    },

    /// `input(N)`
    Input { index: u32 },

    /// `input(N..M)`, half-open
    InputRange { begin: u32, end: u32 },

    InitializerList { elements: Vec<ExprId> },

    Repeat { element: ExprId, count: u32 },

    Glue { members: Vec<GlueMember> },

    /// Binding of arguments to a function-typed symbol
    Bind { function: ExprId, args: Vec<ExprId> },

    /// `{ statements }` used as a function-like entity
    FunctionBody { body: StmtId },

    /// `begin:end[:step]` loop range
    IndexedRange { begin: i64, end: i64, step: i64 },

    /// Iteration over the elements of an array or vector
    ArrayRange { source: ExprId },
}
