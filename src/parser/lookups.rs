use std::collections::HashMap;

use crate::{errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::*, tree::Tree};

/// Operator precedence levels, weakest first. The traditional B table:
/// assignment binds weakest, then the ternary, then the binary ladder
/// from logical-or up to multiplicative, then unary and postfix forms.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Ternary,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Tree, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Tree, Error>;
pub type LEDHandler = fn(&mut Parser, Tree, BindingPower) -> Result<Tree, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Assignment (right-associative, `=` and the `=op` compound forms)
    parser.led(TokenKind::Assignment, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::AssignPlus, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::AssignMinus, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::AssignStar, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::AssignSlash, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::AssignPercent, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::AssignAnd, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::AssignOr, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::AssignXor, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::AssignLshift, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::AssignRshift, BindingPower::Assignment, parse_assignment_expr);

    // Ternary
    parser.led(TokenKind::Question, BindingPower::Ternary, parse_ternary_expr);

    // Logical
    parser.led(TokenKind::Or, BindingPower::LogicalOr, parse_relation_expr);
    parser.led(TokenKind::And, BindingPower::LogicalAnd, parse_relation_expr);

    // Bitwise
    parser.led(TokenKind::BitOr, BindingPower::BitwiseOr, parse_relation_expr);
    parser.led(TokenKind::Xor, BindingPower::BitwiseXor, parse_relation_expr);
    parser.led(TokenKind::BitAnd, BindingPower::BitwiseAnd, parse_relation_expr);

    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_relation_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_relation_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_relation_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_relation_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_relation_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_relation_expr);

    // Shift
    parser.led(TokenKind::Lshift, BindingPower::Shift, parse_relation_expr);
    parser.led(TokenKind::Rshift, BindingPower::Shift, parse_relation_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_relation_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_relation_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_relation_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_relation_expr);
    parser.led(TokenKind::Percent, BindingPower::Multiplicative, parse_relation_expr);

    // Postfix forms
    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_function_expr);
    parser.led(TokenKind::OpenBracket, BindingPower::Call, parse_vector_expr);
    parser.led(TokenKind::PlusPlus, BindingPower::Call, parse_post_inc_dec_expr);
    parser.led(TokenKind::MinusMinus, BindingPower::Call, parse_post_inc_dec_expr);

    // Literals and lvalues
    parser.nud(TokenKind::Number, parse_constant_expr);
    parser.nud(TokenKind::String, parse_constant_expr);
    parser.nud(TokenKind::CharacterConstant, parse_constant_expr);
    parser.nud(TokenKind::Identifier, parse_lvalue_expr);

    // Unary prefix forms
    parser.nud(TokenKind::Star, parse_indirect_lvalue_expr);
    parser.nud(TokenKind::BitAnd, parse_address_of_expr);
    parser.nud(TokenKind::Dash, parse_unary_expr);
    parser.nud(TokenKind::Not, parse_unary_expr);
    parser.nud(TokenKind::Tilde, parse_unary_expr);
    parser.nud(TokenKind::PlusPlus, parse_pre_inc_dec_expr);
    parser.nud(TokenKind::MinusMinus, parse_pre_inc_dec_expr);
    parser.nud(TokenKind::OpenParen, parse_evaluated_expr);

    // Statements
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
    parser.stmt(TokenKind::Auto, parse_auto_stmt);
    parser.stmt(TokenKind::Extrn, parse_extrn_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::Switch, parse_switch_stmt);
    parser.stmt(TokenKind::Case, parse_case_stmt);
    parser.stmt(TokenKind::Goto, parse_goto_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Break, parse_break_stmt);
    parser.stmt(TokenKind::Label, parse_label_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
