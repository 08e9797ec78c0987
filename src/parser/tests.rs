//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs
//! including:
//! - Function and vector definitions
//! - Statements and control flow
//! - Expressions and operator precedence
//! - Error cases

use super::parser::parse;
use super::tree::{Child, Production};
use crate::lexer::lexer::tokenize;

#[test]
fn test_parse_empty_program() {
    let tokens = tokenize("").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
    assert!(result.unwrap().children.is_empty());
}

#[test]
fn test_parse_function_definition() {
    let tokens = tokenize("main() { return; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());

    let program = result.unwrap();
    assert_eq!(program.production, Production::Program);
    assert_eq!(program.children.len(), 1);

    let definition = match &program.children[0] {
        Child::Subtree(tree) => tree,
        Child::Token(_) => panic!("Expected a definition sub-tree"),
    };
    assert_eq!(definition.production, Production::Definition);
}

#[test]
fn test_parse_function_with_parameters() {
    let tokens = tokenize("add(a, b) return (a + b);").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_vector_definition() {
    let tokens = tokenize("units[4] 1, 10, 100, 1000;").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_vector_definition_without_size() {
    let tokens = tokenize("flag 1;").unwrap();
    assert!(parse(tokens).is_ok());

    let tokens = tokenize("v[] 'a', 'b';").unwrap();
    assert!(parse(tokens).is_ok());
}

#[test]
fn test_parse_vector_definition_bare() {
    let tokens = tokenize("x;").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_if_statement() {
    let tokens = tokenize("main() { if (x > 0) x = 1; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_if_else_statement() {
    let tokens = tokenize("main() { if (x) x = 1; else x = 2; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_while_loop() {
    let tokens = tokenize("main() { while (i < 10) i++; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_switch_case() {
    let tokens = tokenize("main() { switch(c) { case 1: return; case 2: break; } }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_goto_and_label() {
    let tokens = tokenize("main() { loop: x++; goto loop; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_extrn_statement() {
    let tokens = tokenize("main() { extrn putchar, getchar; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_auto_statement() {
    let tokens = tokenize("main() { auto i, j; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_function_call() {
    let tokens = tokenize("main() { putchar('x'); }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_assignment() {
    let tokens = tokenize("main() { x = 42; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_compound_assignment() {
    let tokens = tokenize("main() { x =+ 5; y =<< 1; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_binary_expression_precedence() {
    let tokens = tokenize("main() { x = 5 + 3 * 2; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());

    // Multiplication binds tighter: the rendered tree nests `3 * 2`
    // under the addition's right operand.
    let rendered = result.unwrap().to_string();
    let add = rendered.find("add_operator").unwrap();
    let mul = rendered.find("mul_operator").unwrap();
    assert!(add < mul);
}

#[test]
fn test_parse_relational_and_logical() {
    let tokens = tokenize("main() { x = a < b && c == d; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_shift_and_bitwise() {
    let tokens = tokenize("main() { x = a << 2 | b & 3 ^ c; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_ternary_expression() {
    let tokens = tokenize("main() { x = a > b ? a : b; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_unary_expressions() {
    let tokens = tokenize("main() { x = -y; x = !y; x = ~y; x = *p; x = &y; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_inc_dec_expressions() {
    let tokens = tokenize("main() { ++x; x++; --x; x--; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_vector_indexing() {
    let tokens = tokenize("main() { x[5] = 1; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_grouping() {
    let tokens = tokenize("main() { x = (5 + 3) * 2; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
    assert!(result.unwrap().to_string().contains("evaluated_expression"));
}

#[test]
fn test_parse_multi_piece_string() {
    let tokens = tokenize("main() { write(\"hello \" \"world\"); }").unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_statement_separators_discarded() {
    let tokens = tokenize("main() { x = 1; }").unwrap();
    let rendered = parse(tokens).unwrap().to_string();

    assert!(!rendered.contains("';'"));
}

#[test]
fn test_parse_number_too_large() {
    let tokens = tokenize("main() { x = 99999999999999999999; }").unwrap();
    let result = parse(tokens);

    assert!(result.is_err());
}

#[test]
fn test_parse_syntax_error_missing_semicolon() {
    let tokens = tokenize("main() { x = 42 }").unwrap();
    let result = parse(tokens);

    assert!(result.is_err());
}

#[test]
fn test_parse_syntax_error_unbalanced_braces() {
    let tokens = tokenize("main() { x = 42;").unwrap();
    let result = parse(tokens);

    assert!(result.is_err());
}

#[test]
fn test_parse_syntax_error_has_position() {
    let tokens = tokenize("main() {\n  x = ;\n}").unwrap();
    let result = parse(tokens);

    assert!(result.is_err());

    let error = result.err().unwrap();
    assert_eq!(error.get_position().line, 2);
    assert!(error.get_position().column > 0);
}

#[test]
fn test_parse_deterministic() {
    let source = "main() { auto i; while (i < 10) i =+ 1; return (i); }";

    let first = parse(tokenize(source).unwrap()).unwrap();
    let second = parse(tokenize(source).unwrap()).unwrap();

    assert_eq!(first, second);
}
