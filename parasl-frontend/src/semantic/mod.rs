//! Semantic builder for the layer language
//!
//! The `Builder` is the only constructor of AST nodes. The parser calls one
//! builder operation per reduced production; each operation validates its
//! inputs against the symbol table and the type store before allocating the
//! node, so a finished tree is always well-typed and fully resolved.

pub mod errors;
pub mod symbols;

pub use errors::SemanticError;
pub use symbols::{Symbol, SymbolTable};

use crate::ast::{
    Ast, BinaryOp, ExprId, Expression, ExpressionKind, GlueMember, StmtId, Statement, UnaryOp,
};
use crate::types::{StructField, Type, TypeContext, TypeId};
use log::debug;
use std::collections::{BTreeMap, HashSet};

pub type SemanticResult<T> = Result<T, SemanticError>;

/// Widest `input(begin..end)` a layer may bind at once
pub const MAX_INPUT_RANGE: u32 = 1 << 16;

/// Outcome of a `name [: T] [= init]` construct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclOutcome {
    /// A fresh binding was introduced
    Declared(StmtId),
    /// The name was already visible; the construct is an assignment to it
    /// (a reference, or an `Assign` operator when an initializer was given)
    Assigned(ExprId),
}

/// Inputs and returns seen while building one function body. The layer
/// itself is the outermost frame.
#[derive(Debug, Default)]
struct FunctionFrame {
    inputs: BTreeMap<u32, TypeId>,
    return_type: Option<TypeId>,
}

/// A fully built and validated layer
#[derive(Debug)]
pub struct Program {
    pub ast: Ast,
    pub types: TypeContext,
    pub root: StmtId,
    /// Layer inputs by index, ascending
    pub inputs: Vec<(u32, TypeId)>,
}

#[derive(Debug)]
pub struct Builder {
    ast: Ast,
    types: TypeContext,
    symbols: SymbolTable,
    frames: Vec<FunctionFrame>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self {
            ast: Ast::new(),
            types: TypeContext::new(),
            symbols: SymbolTable::new(),
            frames: vec![FunctionFrame::default()],
        }
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn types(&self) -> &TypeContext {
        &self.types
    }

    /// Type store, for building declared types
    pub fn types_mut(&mut self) -> &mut TypeContext {
        &mut self.types
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Type of an expression node
    pub fn type_of(&self, expr: ExprId) -> Option<TypeId> {
        self.ast.expr(expr).expr_type
    }

    fn show(&self, ty: Option<TypeId>) -> String {
        self.types.display_opt(ty)
    }

    fn expr(&mut self, kind: ExpressionKind, expr_type: Option<TypeId>) -> ExprId {
        self.ast.alloc_expr(Expression::new(kind, expr_type))
    }

    fn int32(&mut self) -> TypeId {
        self.types.primitive_int(32)
    }

    fn current_frame(&mut self) -> SemanticResult<&mut FunctionFrame> {
        self.frames.last_mut().ok_or_else(|| SemanticError::Internal {
            message: "function frame stack is empty".to_string(),
        })
    }

    // --- Scopes --------------------------------------------------------

    pub fn enter_scope(&mut self) {
        self.symbols.push_scope();
    }

    pub fn exit_scope(&mut self) {
        self.symbols.pop_scope();
    }

    // --- Expressions ---------------------------------------------------

    /// Unsigned literal, typed int(32)
    pub fn literal(&mut self, value: u64) -> ExprId {
        let ty = self.int32();
        self.expr(ExpressionKind::Literal(value), Some(ty))
    }

    pub fn unary_op(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        let ty = self.type_of(operand);
        self.expr(ExpressionKind::Unary { op, operand }, ty)
    }

    /// Result type of `left op right`. Unknown operands give an unknown
    /// result without error.
    fn operator_type(
        &mut self,
        op: BinaryOp,
        left: Option<TypeId>,
        right: Option<TypeId>,
    ) -> SemanticResult<Option<TypeId>> {
        let (Some(l), Some(r)) = (left, right) else {
            return Ok(None);
        };

        let result = if op.is_arithmetic() || op == BinaryOp::Assign {
            (l == r).then_some(l)
        } else if op.is_comparison() {
            (l == r).then(|| self.types.primitive_int(1))
        } else if op.is_logical() {
            (self.types.is_integral(l) && self.types.is_integral(r))
                .then(|| self.types.primitive_int(1))
        } else {
            None
        };

        match result {
            Some(ty) => Ok(Some(ty)),
            None => Err(SemanticError::TypeMismatch {
                op,
                left: self.types.display(l),
                right: self.types.display(r),
            }),
        }
    }

    pub fn binary_op(&mut self, left: ExprId, right: ExprId, op: BinaryOp) -> SemanticResult<ExprId> {
        if op == BinaryOp::Index {
            return self.subscript_access(left, right);
        }

        let ty = self.operator_type(op, self.type_of(left), self.type_of(right))?;
        Ok(self.expr(ExpressionKind::Binary { op, left, right }, ty))
    }

    /// Use of a declared name
    pub fn reference(&mut self, name: &str) -> SemanticResult<ExprId> {
        let symbol = self
            .symbols
            .lookup(name)
            .ok_or_else(|| SemanticError::UndeclaredSymbol { name: name.to_string() })?;
        let ty = self.type_of(symbol.ident);
        Ok(self.expr(ExpressionKind::Reference { target: symbol.ident }, ty))
    }

    pub fn member_access(&mut self, base: ExprId, field: &str) -> SemanticResult<ExprId> {
        let ty = match self.type_of(base) {
            None => None,
            Some(base_ty) => {
                if !self.types.get(base_ty).is_struct() {
                    return Err(SemanticError::NotAStruct {
                        field: field.to_string(),
                        found: self.types.display(base_ty),
                    });
                }
                let field_ty = self.types.field_type(base_ty, field).ok_or_else(|| {
                    SemanticError::NoSuchField {
                        field: field.to_string(),
                        struct_type: self.types.display(base_ty),
                    }
                })?;
                Some(field_ty)
            }
        };

        Ok(self.expr(
            ExpressionKind::MemberAccess {
                base,
                member: field.to_string(),
            },
            ty,
        ))
    }

    /// `base[index]`, represented as an `Index` binary operator
    pub fn subscript_access(&mut self, base: ExprId, index: ExprId) -> SemanticResult<ExprId> {
        let index_ty = self.type_of(index);
        if !index_ty.is_some_and(|ty| self.types.is_integral(ty)) {
            return Err(SemanticError::NonIntegralIndex {
                found: self.show(index_ty),
            });
        }

        let ty = match self.type_of(base) {
            None => None,
            Some(base_ty) => Some(self.types.element_of(base_ty).ok_or_else(|| {
                SemanticError::NotSubscriptable {
                    found: self.types.display(base_ty),
                }
            })?),
        };

        Ok(self.expr(
            ExpressionKind::Binary {
                op: BinaryOp::Index,
                left: base,
                right: index,
            },
            ty,
        ))
    }

    /// `repeat(element, count)`
    pub fn repeat_expr(&mut self, element: ExprId, count: u32) -> ExprId {
        let ty = self.type_of(element).map(|elem| self.types.array_of(elem, count));
        self.expr(ExpressionKind::Repeat { element, count }, ty)
    }

    /// `{ e1, e2, ... }`; every element must have the type of the first
    pub fn initializer_list(&mut self, elements: Vec<ExprId>) -> SemanticResult<ExprId> {
        let first = match elements.first() {
            Some(&first) => self.type_of(first),
            None => return Err(SemanticError::EmptyInitializer),
        };

        for (position, &element) in elements.iter().enumerate().skip(1) {
            let found = self.type_of(element);
            if found != first {
                return Err(SemanticError::HeterogeneousInitializer {
                    position,
                    expected: self.show(first),
                    found: self.show(found),
                });
            }
        }

        let length = elements.len() as u32;
        let ty = first.map(|elem| self.types.array_of(elem, length));
        Ok(self.expr(ExpressionKind::InitializerList { elements }, ty))
    }

    fn record_input(&mut self, index: u32, ty: TypeId) -> SemanticResult<()> {
        let previous = self.current_frame()?.inputs.get(&index).copied();
        match previous {
            Some(previous) if previous != ty => Err(SemanticError::InputTypeConflict {
                index,
                previous: self.types.display(previous),
                found: self.types.display(ty),
            }),
            Some(_) => Ok(()),
            None => {
                self.current_frame()?.inputs.insert(index, ty);
                Ok(())
            }
        }
    }

    /// `input(N)` or `input(N): T`; untyped inputs are int(32)
    pub fn input(&mut self, index: u32, ty: Option<TypeId>) -> SemanticResult<ExprId> {
        let ty = match ty {
            Some(ty) => ty,
            None => self.int32(),
        };
        self.record_input(index, ty)?;
        Ok(self.expr(ExpressionKind::Input { index }, Some(ty)))
    }

    /// `input(begin..end): element[length]`
    pub fn input_range(
        &mut self,
        begin: u32,
        end: u32,
        element: TypeId,
        length: u32,
    ) -> SemanticResult<ExprId> {
        if end <= begin {
            return Err(SemanticError::EmptyInputRange { begin, end });
        }
        if end - begin > MAX_INPUT_RANGE {
            return Err(SemanticError::InputRangeTooWide {
                begin,
                end,
                max: MAX_INPUT_RANGE,
            });
        }
        if end - begin != length {
            return Err(SemanticError::InputRangeLength {
                begin,
                end,
                count: end - begin,
                length,
            });
        }

        for index in begin..end {
            self.record_input(index, element)?;
        }

        let ty = self.types.array_of(element, length);
        Ok(self.expr(ExpressionKind::InputRange { begin, end }, Some(ty)))
    }

    /// Name a glue member gets when none is given explicitly
    fn implicit_member_name(&self, value: ExprId, position: usize) -> String {
        let symbol = match &self.ast.expr(value).kind {
            ExpressionKind::Reference { .. } => self.ast.symbol_name(value),
            ExpressionKind::Bind { function, .. } => self.ast.symbol_name(*function),
            _ => None,
        };
        match symbol {
            Some(name) => name.to_string(),
            None => format!("_{}", position),
        }
    }

    /// `glue(e1 [: name], ...)`, typed as the struct of its members
    pub fn glue(&mut self, members: Vec<(ExprId, Option<String>)>) -> SemanticResult<ExprId> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(members.len());
        let mut glued = Vec::with_capacity(members.len());

        for (position, (value, explicit)) in members.into_iter().enumerate() {
            let name = explicit.unwrap_or_else(|| self.implicit_member_name(value, position));
            if !seen.insert(name.clone()) {
                return Err(SemanticError::DuplicateField { name });
            }

            let field_type = self.type_of(value).ok_or_else(|| SemanticError::UnknownType {
                what: format!("glue member \"{}\"", name),
            })?;
            fields.push(StructField::new(name.clone(), field_type));
            glued.push(GlueMember { name, value });
        }

        let ty = self.types.struct_of(fields);
        Ok(self.expr(ExpressionKind::Glue { members: glued }, Some(ty)))
    }

    /// `bind(name, args...)`: apply arguments to a function-typed symbol.
    /// Binding fewer arguments than parameters yields a function over the
    /// remaining ones.
    pub fn bind(&mut self, name: &str, args: Vec<ExprId>) -> SemanticResult<ExprId> {
        let function = self.reference(name)?;

        let (params, return_type) = match self.type_of(function).map(|ty| self.types.get(ty)) {
            Some(Type::Function { params, return_type }) => (params.clone(), *return_type),
            _ => return Err(SemanticError::NotAFunction { name: name.to_string() }),
        };

        if args.len() > params.len() {
            return Err(SemanticError::TooManyArguments {
                name: name.to_string(),
                expected: params.len(),
                found: args.len(),
            });
        }

        for (position, (&arg, &expected)) in args.iter().zip(&params).enumerate() {
            if let Some(found) = self.type_of(arg) {
                if found != expected {
                    return Err(SemanticError::ArgumentTypeMismatch {
                        name: name.to_string(),
                        position,
                        expected: self.types.display(expected),
                        found: self.types.display(found),
                    });
                }
            }
        }

        let ty = if args.len() == params.len() {
            return_type
        } else {
            let remaining = params[args.len()..].to_vec();
            Some(self.types.function_of(remaining, return_type))
        };

        Ok(self.expr(ExpressionKind::Bind { function, args }, ty))
    }

    /// Open a frame collecting the inputs and returns of a function body
    pub fn begin_function(&mut self) {
        self.frames.push(FunctionFrame::default());
    }

    /// Close the innermost frame and type the body as a function of its
    /// inputs (ascending index) returning its common return type
    pub fn finish_function(&mut self, body: StmtId) -> SemanticResult<ExprId> {
        // The layer frame is never closed here
        if self.frames.len() < 2 {
            return Err(SemanticError::Internal {
                message: "finish_function without begin_function".to_string(),
            });
        }
        let frame = self.frames.pop().unwrap_or_default();

        let params: Vec<TypeId> = frame.inputs.into_values().collect();
        debug!("function body with {} params", params.len());
        let ty = self.types.function_of(params, frame.return_type);
        Ok(self.expr(ExpressionKind::FunctionBody { body }, Some(ty)))
    }

    /// `begin:end[:step]`
    pub fn indexed_range(&mut self, begin: i64, end: i64, step: i64) -> SemanticResult<ExprId> {
        if step == 0 {
            return Err(SemanticError::ZeroStep);
        }
        let ty = self.int32();
        Ok(self.expr(ExpressionKind::IndexedRange { begin, end, step }, Some(ty)))
    }

    /// Iteration over an array or vector value
    pub fn array_range(&mut self, source: ExprId) -> SemanticResult<ExprId> {
        let element = self.type_of(source).and_then(|ty| self.types.element_of(ty));
        if element.is_none() {
            return Err(SemanticError::NotIterable {
                found: self.show(self.type_of(source)),
            });
        }
        Ok(self.expr(ExpressionKind::ArrayRange { source }, element))
    }

    /// `lhs = rhs`; only names, members and subscripts are assignable
    pub fn assignment(&mut self, lhs: ExprId, rhs: ExprId) -> SemanticResult<ExprId> {
        let assignable = matches!(
            self.ast.expr(lhs).kind,
            ExpressionKind::Reference { .. }
                | ExpressionKind::MemberAccess { .. }
                | ExpressionKind::Binary { op: BinaryOp::Index, .. }
        );
        if !assignable {
            return Err(SemanticError::InvalidAssignmentTarget);
        }
        self.binary_op(lhs, rhs, BinaryOp::Assign)
    }

    // --- Declarations --------------------------------------------------

    /// `name [: ty] [= init]`.
    ///
    /// The declared type is `ty`, else the initializer's type, else
    /// int(32). An unseen name gets a fresh binding of that type. A name
    /// already visible anywhere in the scope chain is an assignment to that
    /// binding, and the declared type must match the existing one.
    pub fn declaration(
        &mut self,
        name: &str,
        ty: Option<TypeId>,
        init: Option<ExprId>,
    ) -> SemanticResult<DeclOutcome> {
        let init_ty = init.and_then(|init| self.type_of(init));
        let declared = match (ty, init) {
            (Some(ty), Some(_)) => {
                if let Some(found) = init_ty {
                    if found != ty {
                        return Err(SemanticError::InitializerTypeMismatch {
                            name: name.to_string(),
                            declared: self.types.display(ty),
                            found: self.types.display(found),
                        });
                    }
                }
                Some(ty)
            }
            (Some(ty), None) => Some(ty),
            (None, Some(_)) => init_ty,
            (None, None) => Some(self.int32()),
        };

        if let Some(symbol) = self.symbols.lookup(name) {
            let previous = self.type_of(symbol.ident);
            // An initializer of unknown type is not compared
            if let (Some(declared), Some(previous)) = (declared, previous) {
                if declared != previous {
                    return Err(SemanticError::RedeclarationType {
                        name: name.to_string(),
                        previous: self.types.display(previous),
                        found: self.types.display(declared),
                    });
                }
            }

            let reference = self.reference(name)?;
            let assigned = match init {
                Some(init) => self.binary_op(reference, init, BinaryOp::Assign)?,
                None => reference,
            };
            debug!("\"{}\" already declared, treating as assignment", name);
            return Ok(DeclOutcome::Assigned(assigned));
        }

        let ident = self.expr(ExpressionKind::Identifier(name.to_string()), declared);
        let decl = self.ast.alloc_stmt(Statement::Declaration {
            ident,
            initializer: init,
        });
        self.declare(name, Symbol { decl, ident })?;

        debug!("declared \"{}\" : {}", name, self.show(declared));
        Ok(DeclOutcome::Declared(decl))
    }

    fn declare(&mut self, name: &str, symbol: Symbol) -> SemanticResult<()> {
        if self.symbols.declare(name, symbol) {
            Ok(())
        } else {
            Err(SemanticError::AlreadyDeclared { name: name.to_string() })
        }
    }

    // --- Statements ----------------------------------------------------

    pub fn compound_statement(&mut self, statements: Vec<StmtId>) -> StmtId {
        self.ast.alloc_stmt(Statement::Compound { statements })
    }

    pub fn assign_statement(&mut self, expr: ExprId) -> StmtId {
        self.ast.alloc_stmt(Statement::Assignment { expr })
    }

    pub fn if_statement(
        &mut self,
        condition: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    ) -> StmtId {
        self.ast.alloc_stmt(Statement::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    pub fn while_loop(&mut self, condition: ExprId, body: StmtId) -> StmtId {
        self.ast.alloc_stmt(Statement::While { condition, body })
    }

    pub fn for_loop(&mut self, header: StmtId, body: StmtId) -> StmtId {
        self.ast.alloc_stmt(Statement::For { header, body })
    }

    /// Declares the induction variable in the current (loop) scope with the
    /// range's element type
    pub fn for_header(&mut self, name: &str, range: ExprId) -> SemanticResult<StmtId> {
        let ty = self.type_of(range);
        let ident = self.expr(ExpressionKind::Identifier(name.to_string()), ty);
        let header = self.ast.alloc_stmt(Statement::ForHeader { ident, range });
        self.declare(name, Symbol { decl: header, ident })?;
        Ok(header)
    }

    /// `return expr;`, typed into the innermost function frame
    pub fn return_statement(&mut self, value: ExprId) -> SemanticResult<StmtId> {
        if let Some(found) = self.type_of(value) {
            let previous = self.current_frame()?.return_type;
            match previous {
                Some(previous) if previous != found => {
                    return Err(SemanticError::ReturnTypeMismatch {
                        previous: self.types.display(previous),
                        found: self.types.display(found),
                    });
                }
                Some(_) => {}
                None => self.current_frame()?.return_type = Some(found),
            }
        }
        Ok(self.ast.alloc_stmt(Statement::Return { value }))
    }

    pub fn output_statement(&mut self, port: u32, value: ExprId) -> StmtId {
        self.ast.alloc_stmt(Statement::Output { port, value })
    }

    /// Hand out the finished layer
    pub fn finish(mut self, root: StmtId) -> Program {
        let inputs: Vec<(u32, TypeId)> = self
            .frames
            .drain(..)
            .next()
            .map(|frame| frame.inputs.into_iter().collect())
            .unwrap_or_default();

        debug!(
            "layer built: {} expressions, {} statements, {} types",
            self.ast.expr_count(),
            self.ast.stmt_count(),
            self.types.len()
        );

        Program {
            ast: self.ast,
            types: self.types,
            root,
            inputs,
        }
    }
}
