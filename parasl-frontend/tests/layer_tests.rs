//! End-to-end tests: source text to validated program

use parasl_frontend::ast::{BinaryOp, ExpressionKind, Statement, StmtId};
use parasl_frontend::{Frontend, Program};

fn top_level(program: &Program) -> Vec<StmtId> {
    match program.ast.stmt(program.root) {
        Statement::Compound { statements } => statements.clone(),
        other => panic!("root is {:?}", other),
    }
}

fn declared_type(program: &Program, stmt: StmtId) -> String {
    match program.ast.stmt(stmt) {
        Statement::Declaration { ident, .. } => {
            program.types.display_opt(program.ast.expr(*ident).expr_type)
        }
        other => panic!("expected a declaration, got {:?}", other),
    }
}

#[test]
fn test_round_trip() {
    let program = Frontend::parse_source("a: int = 1 + 2; output(0, a);")
        .expect("layer should parse");
    let stmts = top_level(&program);
    assert_eq!(stmts.len(), 2);

    let Statement::Declaration { ident, initializer: Some(init) } = program.ast.stmt(stmts[0]) else {
        panic!("expected declaration of a");
    };
    assert_eq!(program.ast.symbol_name(*ident), Some("a"));
    assert_eq!(program.types.display_opt(program.ast.expr(*init).expr_type), "int(32)");

    let Statement::Output { value, .. } = program.ast.stmt(stmts[1]) else {
        panic!("expected output statement");
    };
    assert_eq!(
        program.ast.expr(*value).kind,
        ExpressionKind::Reference { target: *ident }
    );
}

#[test]
fn test_scoping() {
    assert!(Frontend::parse_source("x: int; { y: int = x; } output(0, x);").is_ok());

    let err = Frontend::parse_source("{ y: int; } output(0, y);").unwrap_err();
    assert!(err.is_semantic());
}

#[test]
fn test_shadowing_in_nested_block() {
    // `v` is visible in the block, so `v: int` retypes the outer `v`
    let err = Frontend::parse_source("v: char; { v: int; }").unwrap_err();
    assert!(err.is_semantic());
}

#[test]
fn test_redeclaration() {
    let program = Frontend::parse_source("x: int; x: int;").unwrap();
    let stmts = top_level(&program);
    assert!(matches!(program.ast.stmt(stmts[1]), Statement::Assignment { .. }));

    let err = Frontend::parse_source("x: int; x: char;").unwrap_err();
    assert!(err.is_semantic());
    assert!(err.message().contains("Redeclaration"));
}

#[test]
fn test_initializer_typing() {
    let program = Frontend::parse_source("a: int[3] = {1, 2, 3};").unwrap();
    let stmts = top_level(&program);
    assert_eq!(declared_type(&program, stmts[0]), "int(32)[3]");

    let err = Frontend::parse_source("a = {1, {2, 3}};").unwrap_err();
    assert!(err.message().contains("Heterogeneous"));
}

#[test]
fn test_operator_typing() {
    let program = Frontend::parse_source("s = 1 + 1;").unwrap();
    let stmts = top_level(&program);
    assert_eq!(declared_type(&program, stmts[0]), "int(32)");

    let err = Frontend::parse_source("c: char; s = 1 + c;").unwrap_err();
    assert!(err.is_semantic());
    assert!(err.message().contains("Type mismatch"));
}

#[test]
fn test_comparison_typing() {
    let program = Frontend::parse_source("b = 1 <= 2;").unwrap();
    let stmts = top_level(&program);
    assert_eq!(declared_type(&program, stmts[0]), "int(1)");

    assert!(Frontend::parse_source("c: char; b = c == 1;").unwrap_err().is_semantic());
}

#[test]
fn test_member_and_subscript_validity() {
    assert!(Frontend::parse_source("p: {x, y}; q = p.y;").is_ok());
    assert!(Frontend::parse_source("n: int; q = n.y;").unwrap_err().is_semantic());
    assert!(Frontend::parse_source("p: {x, y}; q = p[0];").unwrap_err().is_semantic());
    assert!(Frontend::parse_source("a: int[2]; p: {x}; q = a[p];").unwrap_err().is_semantic());
}

#[test]
fn test_undeclared_use() {
    let err = Frontend::parse_source("b = b + 1;").unwrap_err();
    assert!(err.is_semantic());
    assert_eq!(err.message(), "Symbol \"b\" has not been declared in this scope");
}

#[test]
fn test_syntax_error_location() {
    let err = Frontend::parse_named("a: int = 1;\nb: int = (2 + ;", "net.psl").unwrap_err();
    assert!(err.is_syntax());
    let location = err.location().unwrap();
    assert_eq!((location.filename.as_str(), location.line, location.column), ("net.psl", 2, 15));
    assert_eq!(err.message(), "Expected expression, found ';'");
}

#[test]
fn test_neuron_layer() {
    let source = r#"
        // One neuron over four inputs
        x = input(0..4): int[4];
        w: int[4] = {3, 1, 4, 1};
        acc: int = 0;
        for (i in 0:4) {
            acc = acc + x[i] * w[i];
        }
        if (acc > 10) {
            output(0, acc);
        } else output(0, 0);
    "#;
    let program = Frontend::parse_source(source).expect("layer should parse");
    assert_eq!(top_level(&program).len(), 5);
    assert_eq!(program.inputs.len(), 4);
}

#[test]
fn test_function_glue_and_bind() {
    let source = r#"
        scale = {
            v = input(0);
            k = input(1);
            return v * k;
        };
        twice = bind(scale, 2);
        pair = glue(bind(scale, 3, 4), twice);
        output(0, pair.scale);
    "#;
    let program = Frontend::parse_source(source).expect("layer should parse");
    let stmts = top_level(&program);

    assert_eq!(declared_type(&program, stmts[0]), "(int(32), int(32)) -> int(32)");
    assert_eq!(declared_type(&program, stmts[1]), "(int(32)) -> int(32)");
    assert_eq!(
        declared_type(&program, stmts[2]),
        "{ scale : int(32), twice : (int(32)) -> int(32) }"
    );
    // Function inputs are parameters, not layer inputs
    assert!(program.inputs.is_empty());
}

#[test]
fn test_bind_argument_type_mismatch() {
    let source = "f = { return input(0) + 1; }; c: char; r = bind(f, c);";
    let err = Frontend::parse_source(source).unwrap_err();
    assert!(err.message().contains("Argument 0"));
}

#[test]
fn test_assignment_operator_node() {
    let program = Frontend::parse_source("a: int[2]; a[0] = 7;").unwrap();
    let stmts = top_level(&program);
    let Statement::Assignment { expr } = program.ast.stmt(stmts[1]) else {
        panic!("expected assignment");
    };
    assert!(matches!(
        program.ast.expr(*expr).kind,
        ExpressionKind::Binary { op: BinaryOp::Assign, .. }
    ));
}

#[test]
fn test_lex_error_surfaces() {
    let err = Frontend::parse_source("a = 1 & 2;").unwrap_err();
    assert!(err.is_syntax());
    assert!(err.to_string().starts_with("Lexical error"));
}

#[test]
fn test_redeclaration_uses_implied_type() {
    let err = Frontend::parse_source("c: char; c;").unwrap_err();
    assert!(err.is_semantic());
    assert!(err.message().starts_with("Redeclaration"));

    let err = Frontend::parse_source("c: char; c = 1;").unwrap_err();
    assert_eq!(
        err.message(),
        "Redeclaration of \"c\" with different type: int(32) (previously char)"
    );
}

#[test]
fn test_index_of_unknown_type_is_rejected() {
    let source = "f = { output(0, 1); }; a: int[2]; q = a[bind(f)];";
    let err = Frontend::parse_source(source).unwrap_err();
    assert!(err.is_semantic());
    assert_eq!(err.message(), "Subscript index must be integral, found <null>");
}

#[test]
fn test_empty_glue() {
    let program = Frontend::parse_source("g = glue();").unwrap();
    let stmts = top_level(&program);
    assert_eq!(declared_type(&program, stmts[0]), "{ }");
}

#[test]
fn test_input_range_width_is_capped() {
    let err = Frontend::parse_source("x = input(0..4000000000): int[4000000000];").unwrap_err();
    assert!(err.is_semantic());
    assert!(err.message().contains("wider than 65536 inputs"));
}
