//! The concrete parse tree.
//!
//! The parser produces a tree of grammar productions over the raw
//! token stream. The tree is immutable once built: the transformer
//! borrows it read-only and never mutates it. `Production` is a closed
//! enum with one variant per grammar rule, so a match over it is
//! checked for exhaustiveness by the compiler.

use std::fmt::Display;

use crate::{lexer::tokens::Token, Meta};

/// One variant per grammar rule, including the operator productions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    Program,
    Definition,
    FunctionDefinition,
    ParameterList,
    VectorDefinition,
    VSize,
    Ival,

    Statement,
    BlockStatement,
    RvalueStatement,
    SwitchStatement,
    CaseStatement,
    ReturnStatement,
    WhileStatement,
    IfStatement,
    GotoStatement,
    LabelStatement,
    ExtrnStatement,
    AutoStatement,
    BreakStatement,

    Rvalue,
    ExpressionList,
    FunctionExpression,
    RelationExpression,
    TernaryExpression,
    UnaryExpression,
    EvaluatedExpression,
    AddressOfExpression,
    PostIncDecExpression,
    PreIncDecExpression,
    AssignmentExpression,
    AssignmentOperator,

    LvalueExpression,
    Identifier,
    IndirectIdentifier,
    VectorIdentifier,

    ConstantExpression,
    NumberLiteral,
    StringLiteral,
    ConstantLiteral,

    // Binary operator productions
    OrOperator,
    AndOperator,
    BitOrOperator,
    BitAndOperator,
    XorOperator,
    EqOperator,
    NeqOperator,
    LtOperator,
    LteOperator,
    GtOperator,
    GteOperator,
    LshiftOperator,
    RshiftOperator,
    AddOperator,
    SubOperator,
    MulOperator,
    DivOperator,
    ModOperator,

    // Unary operator productions
    UnaryInc,
    UnaryDec,
    UnaryMinus,
    UnaryNot,
    UnaryOnesComplement,
}

impl Production {
    /// The grammar-rule name, as shown in parse-tree output.
    pub fn name(&self) -> &'static str {
        match self {
            Production::Program => "program",
            Production::Definition => "definition",
            Production::FunctionDefinition => "function_definition",
            Production::ParameterList => "parameter_list",
            Production::VectorDefinition => "vector_definition",
            Production::VSize => "v_size",
            Production::Ival => "ival",
            Production::Statement => "statement",
            Production::BlockStatement => "block_statement",
            Production::RvalueStatement => "rvalue_statement",
            Production::SwitchStatement => "switch_statement",
            Production::CaseStatement => "case_statement",
            Production::ReturnStatement => "return_statement",
            Production::WhileStatement => "while_statement",
            Production::IfStatement => "if_statement",
            Production::GotoStatement => "goto_statement",
            Production::LabelStatement => "label_statement",
            Production::ExtrnStatement => "extrn_statement",
            Production::AutoStatement => "auto_statement",
            Production::BreakStatement => "break_statement",
            Production::Rvalue => "rvalue",
            Production::ExpressionList => "expression_list",
            Production::FunctionExpression => "function_expression",
            Production::RelationExpression => "relation_expression",
            Production::TernaryExpression => "ternary_expression",
            Production::UnaryExpression => "unary_expression",
            Production::EvaluatedExpression => "evaluated_expression",
            Production::AddressOfExpression => "address_of_expression",
            Production::PostIncDecExpression => "post_inc_dec_expression",
            Production::PreIncDecExpression => "pre_inc_dec_expression",
            Production::AssignmentExpression => "assignment_expression",
            Production::AssignmentOperator => "assignment_operator",
            Production::LvalueExpression => "lvalue_expression",
            Production::Identifier => "identifier",
            Production::IndirectIdentifier => "indirect_identifier",
            Production::VectorIdentifier => "vector_identifier",
            Production::ConstantExpression => "constant_expression",
            Production::NumberLiteral => "number_literal",
            Production::StringLiteral => "string_literal",
            Production::ConstantLiteral => "constant_literal",
            Production::OrOperator => "or_operator",
            Production::AndOperator => "and_operator",
            Production::BitOrOperator => "bit_or_operator",
            Production::BitAndOperator => "bit_and_operator",
            Production::XorOperator => "xor_operator",
            Production::EqOperator => "eq_operator",
            Production::NeqOperator => "neq_operator",
            Production::LtOperator => "lt_operator",
            Production::LteOperator => "lte_operator",
            Production::GtOperator => "gt_operator",
            Production::GteOperator => "gte_operator",
            Production::LshiftOperator => "lshift_operator",
            Production::RshiftOperator => "rshift_operator",
            Production::AddOperator => "add_operator",
            Production::SubOperator => "sub_operator",
            Production::MulOperator => "mul_operator",
            Production::DivOperator => "div_operator",
            Production::ModOperator => "mod_operator",
            Production::UnaryInc => "unary_inc",
            Production::UnaryDec => "unary_dec",
            Production::UnaryMinus => "unary_minus",
            Production::UnaryNot => "unary_not",
            Production::UnaryOnesComplement => "unary_ones_complement",
        }
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A child of a parse-tree node: either a sub-tree or a raw token.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Subtree(Tree),
    Token(Token),
}

impl Child {
    pub fn meta(&self) -> Option<Meta> {
        match self {
            Child::Subtree(tree) => tree.meta,
            Child::Token(token) => Some(token.meta),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub production: Production,
    pub children: Vec<Child>,
    pub meta: Option<Meta>,
}

impl Tree {
    /// Builds a node; its span covers the first through last positioned
    /// child. A node with no positioned children carries no span.
    pub fn new(production: Production, children: Vec<Child>) -> Self {
        let start = children.iter().find_map(|child| child.meta());
        let end = children.iter().rev().find_map(|child| child.meta());

        let meta = match (start, end) {
            (Some(start), Some(end)) => Some(Meta {
                line: start.line,
                start_pos: start.start_pos,
                column: start.column,
                end_pos: end.end_pos,
                end_column: end.end_column,
            }),
            _ => None,
        };

        Tree {
            production,
            children,
            meta,
        }
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.production)?;

        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match child {
                Child::Subtree(tree) => write!(f, "{}", tree)?,
                Child::Token(token) => write!(f, "'{}'", token.value)?,
            }
        }

        write!(f, ")")
    }
}

/// Indents a rendered tree for human display.
pub fn pretty_print(string: String) -> String {
    let mut result = String::new();
    let mut indent = 0;
    let mut ignore_next_space = false;

    for c in string.chars() {
        match c {
            '(' | '[' => {
                indent += 1;
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
            }
            ')' | ']' => {
                indent -= 1;
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                result.push(c);
            }
            ',' => {
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                ignore_next_space = true;
            }
            ' ' if ignore_next_space => {
                ignore_next_space = false;
            }
            _ => result.push(c),
        }
    }

    result
}
