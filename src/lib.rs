#![allow(clippy::module_inception)]

use serde::Serialize;

use crate::ast::ast::AstNode;
use crate::ast::symbols::SymbolTable;
use crate::ast::transformer::Transformer;
use crate::errors::errors::{Error, ErrorTip};
use crate::lexer::lexer::tokenize;
use crate::parser::tree::{pretty_print, Tree};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Source position record attached to tokens, parse-tree nodes and
/// (optionally) AST nodes. Lines and columns are 1-based, offsets are
/// byte positions into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub line: usize,
    pub start_pos: usize,
    pub column: usize,
    pub end_pos: usize,
    pub end_column: usize,
}

impl Meta {
    pub fn null() -> Self {
        Meta {
            line: 0,
            start_pos: 0,
            column: 0,
            end_pos: 0,
            end_column: 0,
        }
    }
}

/// Parses source text into the concrete parse tree.
pub fn parse(source: &str) -> Result<Tree, Error> {
    let tokens = tokenize(source)?;
    parser::parser::parse(tokens)
}

/// Renders the parse tree as text; `pretty` indents nested productions.
pub fn parse_as_string(source: &str, pretty: bool) -> Result<String, Error> {
    let tree = parse(source)?;
    let rendered = tree.to_string();

    if pretty {
        Ok(pretty_print(rendered))
    } else {
        Ok(rendered)
    }
}

/// Runs the full front end: parse, then a single transform pass that
/// builds the AST and the symbol table together.
pub fn analyze(source: &str, with_meta: bool) -> Result<(AstNode, SymbolTable), Error> {
    let tree = parse(source)?;
    let mut transformer = Transformer::new(with_meta);
    let ast = transformer.transform(&tree);

    Ok((ast, transformer.into_symbol_table()))
}

/// Builds the AST; `with_meta` toggles position-field population.
pub fn to_ast(source: &str, with_meta: bool) -> Result<AstNode, Error> {
    Ok(analyze(source, with_meta)?.0)
}

pub fn ast_as_string(source: &str, with_meta: bool) -> Result<String, Error> {
    Ok(format!("{:?}", to_ast(source, with_meta)?))
}

pub fn ast_as_json(source: &str, with_meta: bool) -> Result<String, Error> {
    let ast = to_ast(source, with_meta)?;
    Ok(serde_json::to_string(&ast).unwrap())
}

/// Builds the symbol table for a program. Entries always carry their
/// first-occurrence positions, independent of AST metadata mode.
pub fn symbol_table(source: &str) -> Result<SymbolTable, Error> {
    Ok(analyze(source, false)?.1)
}

pub fn symbol_table_as_json(source: &str) -> Result<String, Error> {
    let table = symbol_table(source)?;
    Ok(serde_json::to_string(&table).unwrap())
}

pub fn get_line_at_position(source: &str, line_number: usize) -> String {
    source
        .split_inclusive('\n')
        .nth(line_number.saturating_sub(1))
        .unwrap_or("")
        .trim_end_matches('\n')
        .to_string()
}

pub fn display_error(error: &Error, source: &str, file: &str) {
    /*
        Error: message
        -> example.b
           |
        20 | x =;
           | --^
    */

    let position = error.get_position();
    let line_text = get_line_at_position(source, position.line);

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", file);
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = position.column.saturating_sub(removed_whitespace).max(1);

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let source = "main() {\n    auto x;\n}\n";

        assert_eq!(super::get_line_at_position(source, 1), "main() {");
        assert_eq!(super::get_line_at_position(source, 2), "    auto x;");
        assert_eq!(super::get_line_at_position(source, 3), "}");
        assert_eq!(super::get_line_at_position(source, 4), "");
    }

    #[test]
    fn test_remove_starting_whitespace() {
        let (text, removed) = super::remove_starting_whitespace("    auto x;");
        assert_eq!(text, "auto x;");
        assert_eq!(removed, 4);
    }
}
