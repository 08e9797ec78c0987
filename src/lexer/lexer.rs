use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Meta, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, Regex);

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

#[derive(Clone)]
pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(source: String) -> Lexer {
        Lexer {
            pos: 0,
            line: 1,
            column: 1,
            tokens: vec![],
            patterns: vec![
                // Labels carry their trailing colon and must be tried
                // before plain identifiers.
                RegexPattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*:").unwrap(), handler: label_handler },
                RegexPattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
                RegexPattern { regex: Regex::new("[0-9]+").unwrap(), handler: number_handler },
                RegexPattern { regex: Regex::new("\\s+").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("/\\*[\\s\\S]*?\\*/").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("\"[^\"]*\"").unwrap(), handler: string_handler },
                RegexPattern { regex: Regex::new("'[^']*'").unwrap(), handler: character_handler },
                RegexPattern { regex: Regex::new("=<<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AssignLshift, "=<<")},
                RegexPattern { regex: Regex::new("=>>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AssignRshift, "=>>")},
                RegexPattern { regex: Regex::new("<<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Lshift, "<<")},
                RegexPattern { regex: Regex::new(">>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Rshift, ">>")},
                RegexPattern { regex: Regex::new("==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")},
                RegexPattern { regex: Regex::new("!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")},
                RegexPattern { regex: Regex::new("<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")},
                RegexPattern { regex: Regex::new(">=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")},
                RegexPattern { regex: Regex::new("&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&")},
                RegexPattern { regex: Regex::new("\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||")},
                RegexPattern { regex: Regex::new("\\+\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++")},
                RegexPattern { regex: Regex::new("--").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--")},
                RegexPattern { regex: Regex::new("=\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AssignPlus, "=+")},
                RegexPattern { regex: Regex::new("=-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AssignMinus, "=-")},
                RegexPattern { regex: Regex::new("=\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AssignStar, "=*")},
                RegexPattern { regex: Regex::new("=/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AssignSlash, "=/")},
                RegexPattern { regex: Regex::new("=%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AssignPercent, "=%")},
                RegexPattern { regex: Regex::new("=&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AssignAnd, "=&")},
                RegexPattern { regex: Regex::new("=\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AssignOr, "=|")},
                RegexPattern { regex: Regex::new("=\\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AssignXor, "=^")},
                RegexPattern { regex: Regex::new("=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")},
                RegexPattern { regex: Regex::new("<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<")},
                RegexPattern { regex: Regex::new(">").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")},
                RegexPattern { regex: Regex::new("&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BitAnd, "&")},
                RegexPattern { regex: Regex::new("\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BitOr, "|")},
                RegexPattern { regex: Regex::new("\\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Xor, "^")},
                RegexPattern { regex: Regex::new("\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")},
                RegexPattern { regex: Regex::new("-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")},
                RegexPattern { regex: Regex::new("\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*")},
                RegexPattern { regex: Regex::new("/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")},
                RegexPattern { regex: Regex::new("%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")},
                RegexPattern { regex: Regex::new("!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!")},
                RegexPattern { regex: Regex::new("~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~")},
                RegexPattern { regex: Regex::new("\\?").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Question, "?")},
                RegexPattern { regex: Regex::new(":").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")},
                RegexPattern { regex: Regex::new(";").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")},
                RegexPattern { regex: Regex::new(",").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")},
                RegexPattern { regex: Regex::new("\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")},
                RegexPattern { regex: Regex::new("\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")},
                RegexPattern { regex: Regex::new("\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")},
                RegexPattern { regex: Regex::new("\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")},
                RegexPattern { regex: Regex::new("\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")},
                RegexPattern { regex: Regex::new("\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")},
            ],
            source,
        }
    }

    /// Advances the position by `n` bytes, keeping line/column in sync.
    pub fn advance_n(&mut self, n: usize) {
        for ch in self.source[self.pos..self.pos + n].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.source[self.pos..].chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Position record for a token of `len` bytes starting at the
    /// current position. Must be taken before `advance_n`.
    pub fn token_meta(&self, len: usize) -> Meta {
        Meta {
            line: self.line,
            start_pos: self.pos,
            column: self.column,
            end_pos: self.pos + len,
            end_column: self.column + len,
        }
    }
}

fn number_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let meta = lexer.token_meta(matched.len());

    lexer.push(MK_TOKEN!(TokenKind::Number, matched.clone(), meta));
    lexer.advance_n(matched.len());
}

fn skip_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().end();
    lexer.advance_n(matched);
}

fn string_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let meta = lexer.token_meta(matched.len());
    let value = unescape(&matched[1..matched.len() - 1]);

    lexer.push(MK_TOKEN!(TokenKind::String, value, meta));
    lexer.advance_n(matched.len());
}

fn character_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let meta = lexer.token_meta(matched.len());
    let value = unescape(&matched[1..matched.len() - 1]);

    lexer.push(MK_TOKEN!(TokenKind::CharacterConstant, value, meta));
    lexer.advance_n(matched.len());
}

fn label_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let meta = lexer.token_meta(matched.len());

    lexer.push(MK_TOKEN!(TokenKind::Label, matched.clone(), meta));
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let meta = lexer.token_meta(matched.len());

    if let Some(kind) = RESERVED_LOOKUP.get(matched.as_str()) {
        lexer.push(MK_TOKEN!(*kind, matched.clone(), meta));
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Identifier, matched.clone(), meta));
    }

    lexer.advance_n(matched.len());
}

/// Expands B escape sequences. The escape character is `*`, not the
/// C-style backslash: `*n` newline, `*t` tab, `*0` NUL, `*e` EOT,
/// `**` asterisk, `*'` quote, `*"` double quote, `*(` and `*)` braces.
fn unescape(raw: &str) -> String {
    let mut result = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '*' {
            if let Some(next_ch) = chars.peek() {
                match next_ch {
                    'n' => {
                        result.push('\n');
                        chars.next();
                    }
                    't' => {
                        result.push('\t');
                        chars.next();
                    }
                    '0' => {
                        result.push('\0');
                        chars.next();
                    }
                    'e' => {
                        result.push('\u{4}');
                        chars.next();
                    }
                    '*' => {
                        result.push('*');
                        chars.next();
                    }
                    '\'' => {
                        result.push('\'');
                        chars.next();
                    }
                    '"' => {
                        result.push('"');
                        chars.next();
                    }
                    '(' => {
                        result.push('{');
                        chars.next();
                    }
                    ')' => {
                        result.push('}');
                        chars.next();
                    }
                    _ => {
                        result.push(ch); // Keep the asterisk
                    }
                }
            } else {
                result.push(ch); // Keep the trailing asterisk
            }
        } else {
            result.push(ch);
        }
    }

    result
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source.to_string());
    let patterns = lex.patterns.clone();

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in patterns.iter() {
            let match_here = pattern.regex.find(lex.remainder());

            if match_here.is_some() && match_here.unwrap().start() == 0 {
                (pattern.handler)(&mut lex, pattern.regex.clone());
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken {
                    token: lex.at().to_string(),
                },
                lex.token_meta(1),
            ));
        }
    }

    let meta = lex.token_meta(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), meta));
    Ok(lex.tokens)
}
