//! Textual tree dump
//!
//! One node per line in depth-first pre-order, indented with one tab per
//! level:
//!
//! ```text
//! STMT(COMPOUND)
//! 	STMT(DECLARATION<id = a; type = int(32)>)
//! 		EXPR(ID: "a"): <type>=int(32)
//! 		EXPR(literal: 1): <type>=int(32)
//! ```

use crate::ast::{walk, Ast, ExpressionKind, NodeRef, Statement};
use crate::semantic::Program;
use crate::types::TypeContext;

pub struct TreePrinter<'a> {
    ast: &'a Ast,
    types: &'a TypeContext,
}

impl<'a> TreePrinter<'a> {
    pub fn new(ast: &'a Ast, types: &'a TypeContext) -> Self {
        Self { ast, types }
    }

    /// Dump the subtree rooted at `root`
    pub fn print(&self, root: NodeRef) -> String {
        let mut out = String::new();
        walk(self.ast, root, &mut |node, depth| {
            for _ in 0..depth {
                out.push('\t');
            }
            out.push_str(&self.describe(node));
            out.push('\n');
        });
        out
    }

    /// The line for a single node, without indentation
    pub fn describe(&self, node: NodeRef) -> String {
        match node {
            NodeRef::Expr(id) => {
                let expr = self.ast.expr(id);
                format!(
                    "EXPR({}): <type>={}",
                    self.expression_detail(&expr.kind),
                    self.types.display_opt(expr.expr_type)
                )
            }
            NodeRef::Stmt(id) => match self.ast.stmt(id) {
                Statement::Declaration { ident, .. } => format!(
                    "STMT(DECLARATION<id = {}; type = {}>)",
                    self.ast.symbol_name(*ident).unwrap_or("<unnamed>"),
                    self.types.display_opt(self.ast.expr(*ident).expr_type)
                ),
                stmt => format!("STMT({})", stmt.kind_name()),
            },
        }
    }

    fn expression_detail(&self, kind: &ExpressionKind) -> String {
        match kind {
            ExpressionKind::Literal(value) => format!("literal: {}", value),
            ExpressionKind::Identifier(name) => format!("ID: \"{}\"", name),
            ExpressionKind::Reference { target } => format!(
                "reference of: {}",
                self.ast.symbol_name(*target).unwrap_or("<unnamed>")
            ),
            ExpressionKind::Unary { op, .. } => format!("operator {}", op),
            ExpressionKind::Binary { op, .. } => format!("operator {}", op),
            ExpressionKind::MemberAccess { member, .. } => {
                format!("Member access: .{}", member)
            }
            ExpressionKind::Input { index } => format!("input: {}", index),
            ExpressionKind::InputRange { begin, end } => {
                format!("input: {}..{}", begin, end)
            }
            ExpressionKind::InitializerList { elements } => {
                format!("initializer list of {}", elements.len())
            }
            ExpressionKind::Repeat { count, .. } => format!("repeat {} times", count),
            ExpressionKind::Glue { members } => {
                let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
                format!("glue: {}", names.join(", "))
            }
            ExpressionKind::Bind { args, .. } => format!("bind of {} args", args.len()),
            ExpressionKind::FunctionBody { .. } => "function body".to_string(),
            ExpressionKind::IndexedRange { begin, end, step } => format!(
                "indexed range: from {} to {} with step {}",
                begin, end, step
            ),
            ExpressionKind::ArrayRange { .. } => "Range over array".to_string(),
        }
    }
}

/// Dump a whole program from its root compound statement
pub fn dump(program: &Program) -> String {
    TreePrinter::new(&program.ast, &program.types).print(NodeRef::Stmt(program.root))
}
