use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    expr::{parse_constant_expr, parse_lvalue_expr, parse_rvalue},
    parser::Parser,
    tree::{Child, Production, Tree},
};

/// A definition is a function or a vector, always introduced by its
/// name; the following token decides which.
pub fn parse_definition(parser: &mut Parser) -> Result<Tree, Error> {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected a name at the start of a definition"),
        },
        parser.get_position(),
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let inner = if parser.current_token_kind() == TokenKind::OpenParen {
        parse_function_definition(parser, name)?
    } else {
        parse_vector_definition(parser, name)?
    };

    Ok(Tree::new(Production::Definition, vec![Child::Subtree(inner)]))
}

fn parse_function_definition(parser: &mut Parser, name: Token) -> Result<Tree, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        let parameter = parser.expect(TokenKind::Identifier)?;
        parameters.push(Child::Subtree(Tree::new(
            Production::Identifier,
            vec![Child::Token(parameter)],
        )));

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let body = parse_stmt(parser)?;

    Ok(Tree::new(
        Production::FunctionDefinition,
        vec![
            Child::Token(name),
            Child::Subtree(Tree::new(Production::ParameterList, parameters)),
            Child::Subtree(body),
        ],
    ))
}

/// Vector definition: `name [size]? ival (, ival)* ;` with both the
/// bracketed size and the initializer list optional.
fn parse_vector_definition(parser: &mut Parser, name: Token) -> Result<Tree, Error> {
    let mut children = vec![Child::Token(name)];

    if parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();

        let mut size = vec![];
        if parser.current_token_kind() != TokenKind::CloseBracket {
            size.push(Child::Subtree(parse_constant_expr(parser)?));
        }

        parser.expect(TokenKind::CloseBracket)?;
        children.push(Child::Subtree(Tree::new(Production::VSize, size)));
    }

    if parser.current_token_kind() != TokenKind::Semicolon {
        loop {
            children.push(Child::Subtree(parse_ival(parser)?));

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Tree::new(Production::VectorDefinition, children))
}

/// An initializer value: a constant or a name.
fn parse_ival(parser: &mut Parser) -> Result<Tree, Error> {
    let value = match parser.current_token_kind() {
        TokenKind::Number | TokenKind::String | TokenKind::CharacterConstant => {
            parse_constant_expr(parser)?
        }
        TokenKind::Identifier => parse_lvalue_expr(parser)?,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("expected a constant or name in a vector initializer"),
                },
                parser.get_position(),
            ))
        }
    };

    Ok(Tree::new(Production::Ival, vec![Child::Subtree(value)]))
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Tree, Error> {
    let inner = if parser
        .get_stmt_lookup()
        .contains_key(&parser.current_token_kind())
    {
        let handler = *parser
            .get_stmt_lookup()
            .get(&parser.current_token_kind())
            .unwrap();
        handler(parser)?
    } else {
        parse_rvalue_stmt(parser)?
    };

    Ok(Tree::new(Production::Statement, vec![Child::Subtree(inner)]))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Tree, Error> {
    parser.advance();

    let mut statements = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        statements.push(Child::Subtree(parse_stmt(parser)?));
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Tree::new(Production::BlockStatement, statements))
}

fn parse_rvalue_stmt(parser: &mut Parser) -> Result<Tree, Error> {
    let rvalue = parse_rvalue(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Tree::new(
        Production::RvalueStatement,
        vec![Child::Subtree(rvalue)],
    ))
}

pub fn parse_auto_stmt(parser: &mut Parser) -> Result<Tree, Error> {
    parser.advance();

    let mut names = vec![];
    loop {
        let name = parser.expect(TokenKind::Identifier)?;
        names.push(Child::Subtree(Tree::new(
            Production::Identifier,
            vec![Child::Token(name)],
        )));

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Tree::new(Production::AutoStatement, names))
}

/// `extrn` names stay raw tokens in the tree; the transformer turns
/// them into lvalue nodes without registering symbols.
pub fn parse_extrn_stmt(parser: &mut Parser) -> Result<Tree, Error> {
    parser.advance();

    let mut names = vec![];
    loop {
        let name = parser.expect(TokenKind::Identifier)?;
        names.push(Child::Token(name));

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Tree::new(Production::ExtrnStatement, names))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Tree, Error> {
    parser.advance();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_rvalue(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let mut children = vec![Child::Subtree(condition), Child::Subtree(parse_stmt(parser)?)];

    if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        children.push(Child::Subtree(parse_stmt(parser)?));
    }

    Ok(Tree::new(Production::IfStatement, children))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Tree, Error> {
    parser.advance();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_rvalue(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_stmt(parser)?;

    Ok(Tree::new(
        Production::WhileStatement,
        vec![Child::Subtree(condition), Child::Subtree(body)],
    ))
}

pub fn parse_switch_stmt(parser: &mut Parser) -> Result<Tree, Error> {
    parser.advance();

    let selector = parse_rvalue(parser)?;
    let body = parse_stmt(parser)?;

    Ok(Tree::new(
        Production::SwitchStatement,
        vec![Child::Subtree(selector), Child::Subtree(body)],
    ))
}

pub fn parse_case_stmt(parser: &mut Parser) -> Result<Tree, Error> {
    parser.advance();

    let constant = parse_constant_expr(parser)?;
    parser.expect(TokenKind::Colon)?;
    let body = parse_stmt(parser)?;

    Ok(Tree::new(
        Production::CaseStatement,
        vec![Child::Subtree(constant), Child::Subtree(body)],
    ))
}

pub fn parse_goto_stmt(parser: &mut Parser) -> Result<Tree, Error> {
    parser.advance();

    let target = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Semicolon)?;

    let identifier = Tree::new(Production::Identifier, vec![Child::Token(target)]);

    Ok(Tree::new(
        Production::GotoStatement,
        vec![Child::Subtree(identifier)],
    ))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Tree, Error> {
    parser.advance();

    let mut children = vec![];
    if parser.current_token_kind() != TokenKind::Semicolon {
        children.push(Child::Subtree(parse_rvalue(parser)?));
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Tree::new(Production::ReturnStatement, children))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Tree, Error> {
    parser.advance();
    parser.expect(TokenKind::Semicolon)?;

    Ok(Tree::new(Production::BreakStatement, vec![]))
}

/// A label is a single token carrying its trailing colon; the colon is
/// stripped during the transform.
pub fn parse_label_stmt(parser: &mut Parser) -> Result<Tree, Error> {
    let label = parser.expect(TokenKind::Label)?;

    Ok(Tree::new(
        Production::LabelStatement,
        vec![Child::Token(label)],
    ))
}
