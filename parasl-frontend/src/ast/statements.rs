//! Statement AST nodes for the layer language

use super::{ExprId, StmtId};

/// AST Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Statement-level assignment; `expr` is an `Assign` binary operator
    Assignment { expr: ExprId },

    /// Declaration; `ident` is the owned identifier node
    Declaration {
        ident: ExprId,
        initializer: Option<ExprId>,
    },

    /// Block (scope body)
    Compound { statements: Vec<StmtId> },

    If {
        condition: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },

    For { header: StmtId, body: StmtId },

    /// Induction variable and the range it walks
    ForHeader { ident: ExprId, range: ExprId },

    While { condition: ExprId, body: StmtId },

    Return { value: ExprId },

    Output { port: u32, value: ExprId },
}

impl Statement {
    /// Kind tag used by the tree dump
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Assignment { .. } => "ASSIGNMENT",
            Statement::Declaration { .. } => "DECLARATION",
            Statement::Compound { .. } => "COMPOUND",
            Statement::If { .. } => "IF",
            Statement::For { .. } => "FOR",
            Statement::ForHeader { .. } => "FOR HEADER",
            Statement::While { .. } => "WHILE",
            Statement::Return { .. } => "RETURN",
            Statement::Output { .. } => "OUTPUT",
        }
    }
}
