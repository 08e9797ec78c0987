use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Meta;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("auto", TokenKind::Auto);
        map.insert("extrn", TokenKind::Extrn);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("switch", TokenKind::Switch);
        map.insert("case", TokenKind::Case);
        map.insert("goto", TokenKind::Goto);
        map.insert("return", TokenKind::Return);
        map.insert("break", TokenKind::Break);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    CharacterConstant,
    Identifier,
    /// An identifier with a trailing colon, matched as a single token.
    Label,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Semicolon,
    Colon,
    Comma,
    Question,

    Assignment,    // =
    AssignPlus,    // =+
    AssignMinus,   // =-
    AssignStar,    // =*
    AssignSlash,   // =/
    AssignPercent, // =%
    AssignAnd,     // =&
    AssignOr,      // =|
    AssignXor,     // =^
    AssignLshift,  // =<<
    AssignRshift,  // =>>

    Equals,    // ==
    NotEquals, // !=
    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,     // ||
    And,    // &&
    BitOr,  // |
    BitAnd, // &
    Xor,    // ^
    Lshift, // <<
    Rshift, // >>

    Plus,
    Dash,
    Slash,
    Star,
    Percent,
    Not,   // !
    Tilde, // ~
    PlusPlus,
    MinusMinus,

    // Reserved
    Auto,
    Extrn,
    If,
    Else,
    While,
    Switch,
    Case,
    Goto,
    Return,
    Break,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub meta: Meta,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: Vec<TokenKind>) -> bool {
        for token in tokens {
            if token == self.kind {
                return true;
            }
        }

        false
    }

    pub fn debug(&self) {
        if self.is_one_of_many(vec![
            TokenKind::String,
            TokenKind::CharacterConstant,
            TokenKind::Identifier,
            TokenKind::Label,
            TokenKind::Number,
        ]) {
            println!("{} ({})", self.kind, self.value);
        } else {
            println!("{} ()", self.kind);
        }
    }
}
