//! Golden dumps of the tree printer

use parasl_frontend::ast::{NodeRef, Statement};
use parasl_frontend::printer::{dump, TreePrinter};
use parasl_frontend::Frontend;
use pretty_assertions::assert_eq;

fn dump_source(source: &str) -> String {
    let program = Frontend::parse_source(source).expect("layer should parse");
    dump(&program)
}

#[test]
fn test_dump_declaration_and_output() {
    let expected = "\
STMT(COMPOUND)
\tSTMT(DECLARATION<id = a; type = int(32)>)
\t\tEXPR(ID: \"a\"): <type>=int(32)
\t\tEXPR(operator +): <type>=int(32)
\t\t\tEXPR(literal: 1): <type>=int(32)
\t\t\tEXPR(literal: 2): <type>=int(32)
\tSTMT(OUTPUT)
\t\tEXPR(reference of: a): <type>=int(32)
";
    assert_eq!(dump_source("a: int = 1 + 2;\noutput(0, a);"), expected);
}

#[test]
fn test_dump_redeclaration_as_assignment() {
    let expected = "\
STMT(COMPOUND)
\tSTMT(DECLARATION<id = x; type = int(32)>)
\t\tEXPR(ID: \"x\"): <type>=int(32)
\tSTMT(ASSIGNMENT)
\t\tEXPR(operator =): <type>=int(32)
\t\t\tEXPR(reference of: x): <type>=int(32)
\t\t\tEXPR(literal: 5): <type>=int(32)
";
    assert_eq!(dump_source("x: int; x = 5;"), expected);
}

#[test]
fn test_dump_for_loop() {
    let expected = "\
STMT(COMPOUND)
\tSTMT(FOR)
\t\tSTMT(FOR HEADER)
\t\t\tEXPR(ID: \"i\"): <type>=int(32)
\t\t\tEXPR(indexed range: from 0 to 3 with step 1): <type>=int(32)
\t\tSTMT(COMPOUND)
\t\t\tSTMT(OUTPUT)
\t\t\t\tEXPR(reference of: i): <type>=int(32)
";
    assert_eq!(dump_source("for (i in 0:3) output(0, i);"), expected);
}

#[test]
fn test_dump_function_body() {
    let expected = "\
STMT(COMPOUND)
\tSTMT(DECLARATION<id = f; type = (int(32)) -> int(32)>)
\t\tEXPR(ID: \"f\"): <type>=(int(32)) -> int(32)
\t\tEXPR(function body): <type>=(int(32)) -> int(32)
\t\t\tSTMT(COMPOUND)
\t\t\t\tSTMT(RETURN)
\t\t\t\t\tEXPR(input: 0): <type>=int(32)
";
    assert_eq!(dump_source("f = { return input(0); };"), expected);
}

#[test]
fn test_dump_if_with_subscript_and_unary() {
    let expected = "\
STMT(COMPOUND)
\tSTMT(DECLARATION<id = v; type = int(32)[2]>)
\t\tEXPR(ID: \"v\"): <type>=int(32)[2]
\t\tEXPR(repeat 2 times): <type>=int(32)[2]
\t\t\tEXPR(operator -): <type>=int(32)
\t\t\t\tEXPR(literal: 1): <type>=int(32)
\tSTMT(IF)
\t\tEXPR(operator <): <type>=int(1)
\t\t\tEXPR(operator []): <type>=int(32)
\t\t\t\tEXPR(reference of: v): <type>=int(32)[2]
\t\t\t\tEXPR(literal: 0): <type>=int(32)
\t\t\tEXPR(literal: 0): <type>=int(32)
\t\tSTMT(COMPOUND)
\t\t\tSTMT(OUTPUT)
\t\t\t\tEXPR(literal: 1): <type>=int(32)
";
    assert_eq!(dump_source("v = repeat(-1, 2);\nif (v[0] < 0) output(0, 1);"), expected);
}

#[test]
fn test_describe_glue_node() {
    let program = Frontend::parse_source("a: char; b: int; g = glue(a, b: second);").unwrap();
    let Statement::Compound { statements } = program.ast.stmt(program.root) else {
        panic!("root is not a compound statement");
    };
    let Statement::Declaration { initializer: Some(glue), .. } = program.ast.stmt(statements[2]) else {
        panic!("expected declaration of g");
    };

    let printer = TreePrinter::new(&program.ast, &program.types);
    assert_eq!(
        printer.describe(NodeRef::Expr(*glue)),
        "EXPR(glue: a, second): <type>={ a : char, second : int(32) }"
    );
}

#[test]
fn test_describe_statement_without_detail() {
    let program = Frontend::parse_source("n: int = 1; while (n > 0) n = n - 1;").unwrap();
    let printer = TreePrinter::new(&program.ast, &program.types);
    assert_eq!(printer.describe(NodeRef::Stmt(program.root)), "STMT(COMPOUND)");
}
