//! Abstract Syntax Tree definitions for the layer language
//!
//! All nodes of one parse live in a single `Ast` arena and refer to each
//! other through `ExprId` / `StmtId` handles. The semantic builder is the
//! only code that allocates nodes; everything else reads them.

pub mod ops;
pub mod expressions;
pub mod statements;

// Re-export commonly used types at module level
pub use ops::{BinaryOp, UnaryOp};
pub use expressions::{Expression, ExpressionKind, GlueMember};
pub use statements::Statement;

use std::fmt;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
        pub struct $name(u32);

        impl $name {
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id!(ExprId);
define_id!(StmtId);

/// Either kind of node, as seen by tree traversals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Expr(ExprId),
    Stmt(StmtId),
}

/// Arena owning every node of one parse
#[derive(Debug, Default)]
pub struct Ast {
    exprs: Vec<Expression>,
    stmts: Vec<Statement>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn alloc_expr(&mut self, expr: Expression) -> ExprId {
        let id = ExprId::from_raw(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    pub(crate) fn alloc_stmt(&mut self, stmt: Statement) -> StmtId {
        let id = StmtId::from_raw(self.stmts.len() as u32);
        self.stmts.push(stmt);
        id
    }

    pub fn expr(&self, id: ExprId) -> &Expression {
        &self.exprs[id.index()]
    }

    pub fn stmt(&self, id: StmtId) -> &Statement {
        &self.stmts[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    /// Name carried by an identifier node, or by the identifier a reference
    /// points at
    pub fn symbol_name(&self, id: ExprId) -> Option<&str> {
        match &self.expr(id).kind {
            ExpressionKind::Identifier(name) => Some(name.as_str()),
            ExpressionKind::Reference { target } => self.symbol_name(*target),
            _ => None,
        }
    }

    /// Owned children in source order. A reference's target is not a child.
    pub fn children(&self, node: NodeRef) -> Vec<NodeRef> {
        match node {
            NodeRef::Expr(id) => self.expr_children(id),
            NodeRef::Stmt(id) => self.stmt_children(id),
        }
    }

    fn expr_children(&self, id: ExprId) -> Vec<NodeRef> {
        use ExpressionKind::*;

        let exprs: Vec<ExprId> = match &self.expr(id).kind {
            Literal(_) | Identifier(_) | Reference { .. } | Input { .. } | InputRange { .. }
            | IndexedRange { .. } => Vec::new(),
            Unary { operand, .. } => vec![*operand],
            Binary { left, right, .. } => vec![*left, *right],
            MemberAccess { base, .. } => vec![*base],
            InitializerList { elements } => elements.clone(),
            Repeat { element, .. } => vec![*element],
            Glue { members } => members.iter().map(|m| m.value).collect(),
            Bind { function, args } => std::iter::once(*function).chain(args.iter().copied()).collect(),
            ArrayRange { source } => vec![*source],
            FunctionBody { body } => return vec![NodeRef::Stmt(*body)],
        };

        exprs.into_iter().map(NodeRef::Expr).collect()
    }

    fn stmt_children(&self, id: StmtId) -> Vec<NodeRef> {
        match self.stmt(id) {
            Statement::Assignment { expr } => vec![NodeRef::Expr(*expr)],
            Statement::Declaration { ident, initializer } => {
                let mut children = vec![NodeRef::Expr(*ident)];
                children.extend(initializer.map(NodeRef::Expr));
                children
            }
            Statement::Compound { statements } => {
                statements.iter().copied().map(NodeRef::Stmt).collect()
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut children = vec![NodeRef::Expr(*condition), NodeRef::Stmt(*then_branch)];
                children.extend(else_branch.map(NodeRef::Stmt));
                children
            }
            Statement::For { header, body } => vec![NodeRef::Stmt(*header), NodeRef::Stmt(*body)],
            Statement::ForHeader { ident, range } => {
                vec![NodeRef::Expr(*ident), NodeRef::Expr(*range)]
            }
            Statement::While { condition, body } => {
                vec![NodeRef::Expr(*condition), NodeRef::Stmt(*body)]
            }
            Statement::Return { value } | Statement::Output { value, .. } => {
                vec![NodeRef::Expr(*value)]
            }
        }
    }
}

/// Depth-first pre-order traversal from `root`, calling `visit` with every
/// node and its depth (root is depth 0)
pub fn walk<F>(ast: &Ast, root: NodeRef, visit: &mut F)
where
    F: FnMut(NodeRef, usize),
{
    fn go<F: FnMut(NodeRef, usize)>(ast: &Ast, node: NodeRef, depth: usize, visit: &mut F) {
        visit(node, depth);
        for child in ast.children(node) {
            go(ast, child, depth + 1, visit);
        }
    }

    go(ast, root, 0, visit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_returns_sequential_ids() {
        let mut ast = Ast::new();
        let a = ast.alloc_expr(Expression::new(ExpressionKind::Literal(1), None));
        let b = ast.alloc_expr(Expression::new(ExpressionKind::Literal(2), None));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(ast.expr(b).kind, ExpressionKind::Literal(2));
        assert_eq!(format!("{:?}", b), "ExprId(1)");
    }

    #[test]
    fn test_walk_order_and_depth() {
        let mut ast = Ast::new();
        let ident = ast.alloc_expr(Expression::new(ExpressionKind::Identifier("a".into()), None));
        let one = ast.alloc_expr(Expression::new(ExpressionKind::Literal(1), None));
        let two = ast.alloc_expr(Expression::new(ExpressionKind::Literal(2), None));
        let sum = ast.alloc_expr(Expression::new(
            ExpressionKind::Binary { op: BinaryOp::Add, left: one, right: two },
            None,
        ));
        let decl = ast.alloc_stmt(Statement::Declaration { ident, initializer: Some(sum) });
        let root = ast.alloc_stmt(Statement::Compound { statements: vec![decl] });

        let mut seen = Vec::new();
        walk(&ast, NodeRef::Stmt(root), &mut |node, depth| seen.push((node, depth)));

        assert_eq!(
            seen,
            vec![
                (NodeRef::Stmt(root), 0),
                (NodeRef::Stmt(decl), 1),
                (NodeRef::Expr(ident), 2),
                (NodeRef::Expr(sum), 2),
                (NodeRef::Expr(one), 3),
                (NodeRef::Expr(two), 3),
            ]
        );
    }

    #[test]
    fn test_reference_target_is_not_a_child() {
        let mut ast = Ast::new();
        let ident = ast.alloc_expr(Expression::new(ExpressionKind::Identifier("w".into()), None));
        let reference = ast.alloc_expr(Expression::new(ExpressionKind::Reference { target: ident }, None));
        assert!(ast.children(NodeRef::Expr(reference)).is_empty());
        assert_eq!(ast.symbol_name(reference), Some("w"));
    }
}
