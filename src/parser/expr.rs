use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    tree::{Child, Production, Tree},
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Tree, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    if !parser.get_nud_lookup().contains_key(&token_kind) {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    }

    let mut left = parser.get_nud_lookup().get(&token_kind).unwrap()(parser)?;

    // While LED and current BP is greater than BP of current token, continue parsing lhs
    while *parser
        .get_bp_lookup()
        .get(&parser.current_token_kind())
        .unwrap_or(&BindingPower::Default)
        > bp
    {
        let token_kind = parser.current_token_kind();
        if !parser.get_led_lookup().contains_key(&token_kind) {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ));
        }

        let next_bp = *parser.get_bp_lookup().get(&token_kind).unwrap();
        left = parser.get_led_lookup().get(&token_kind).unwrap()(parser, left, next_bp)?;
    }

    Ok(left)
}

/// Parses a full expression at an `rvalue` reference point of the
/// grammar (statement expressions, conditions, return values).
pub fn parse_rvalue(parser: &mut Parser) -> Result<Tree, Error> {
    let expr = parse_expr(parser, BindingPower::Default)?;
    Ok(Tree::new(Production::Rvalue, vec![Child::Subtree(expr)]))
}

/// Constants: number, string and character literals. Consecutive
/// literal tokens of the same kind form one multi-piece literal whose
/// pieces are joined during the transform.
pub fn parse_constant_expr(parser: &mut Parser) -> Result<Tree, Error> {
    let kind = parser.current_token_kind();

    let production = match kind {
        TokenKind::Number => Production::NumberLiteral,
        TokenKind::String => Production::StringLiteral,
        TokenKind::CharacterConstant => Production::ConstantLiteral,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ))
        }
    };

    let first = parser.advance().clone();
    let first_meta = first.meta;
    let mut pieces = vec![Child::Token(first)];

    while parser.current_token_kind() == kind {
        pieces.push(Child::Token(parser.advance().clone()));
    }

    if production == Production::NumberLiteral {
        let joined = pieces
            .iter()
            .map(|piece| match piece {
                Child::Token(token) => token.value.as_str(),
                Child::Subtree(_) => "",
            })
            .collect::<String>();

        if joined.parse::<i64>().is_err() {
            return Err(Error::new(
                ErrorImpl::NumberParseError { token: joined },
                first_meta,
            ));
        }
    }

    let literal = Tree::new(production, pieces);
    Ok(Tree::new(
        Production::ConstantExpression,
        vec![Child::Subtree(literal)],
    ))
}

pub fn parse_lvalue_expr(parser: &mut Parser) -> Result<Tree, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    let identifier = Tree::new(Production::Identifier, vec![Child::Token(name)]);

    Ok(Tree::new(
        Production::LvalueExpression,
        vec![Child::Subtree(identifier)],
    ))
}

/// Indirection `*expr` as an lvalue form.
pub fn parse_indirect_lvalue_expr(parser: &mut Parser) -> Result<Tree, Error> {
    let star = parser.advance().clone();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    let indirect = Tree::new(
        Production::IndirectIdentifier,
        vec![Child::Token(star), Child::Subtree(operand)],
    );

    Ok(Tree::new(
        Production::LvalueExpression,
        vec![Child::Subtree(indirect)],
    ))
}

pub fn parse_address_of_expr(parser: &mut Parser) -> Result<Tree, Error> {
    let ampersand = parser.advance().clone();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Tree::new(
        Production::AddressOfExpression,
        vec![Child::Token(ampersand), Child::Subtree(operand)],
    ))
}

pub fn parse_unary_expr(parser: &mut Parser) -> Result<Tree, Error> {
    let operator_token = parser.advance().clone();

    let operator = match operator_token.kind {
        TokenKind::Dash => Production::UnaryMinus,
        TokenKind::Not => Production::UnaryNot,
        TokenKind::Tilde => Production::UnaryOnesComplement,
        _ => unreachable!("unary handler registered for {:?}", operator_token.kind),
    };

    let operator_tree = Tree::new(operator, vec![Child::Token(operator_token)]);
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Tree::new(
        Production::UnaryExpression,
        vec![Child::Subtree(operator_tree), Child::Subtree(operand)],
    ))
}

pub fn parse_pre_inc_dec_expr(parser: &mut Parser) -> Result<Tree, Error> {
    let operator_token = parser.advance().clone();

    let operator = match operator_token.kind {
        TokenKind::PlusPlus => Production::UnaryInc,
        TokenKind::MinusMinus => Production::UnaryDec,
        _ => unreachable!("inc/dec handler registered for {:?}", operator_token.kind),
    };

    let operator_tree = Tree::new(operator, vec![Child::Token(operator_token)]);
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Tree::new(
        Production::PreIncDecExpression,
        vec![Child::Subtree(operator_tree), Child::Subtree(operand)],
    ))
}

pub fn parse_post_inc_dec_expr(
    parser: &mut Parser,
    left: Tree,
    _bp: BindingPower,
) -> Result<Tree, Error> {
    let operator_token = parser.advance().clone();

    let operator = match operator_token.kind {
        TokenKind::PlusPlus => Production::UnaryInc,
        TokenKind::MinusMinus => Production::UnaryDec,
        _ => unreachable!("inc/dec handler registered for {:?}", operator_token.kind),
    };

    let operator_tree = Tree::new(operator, vec![Child::Token(operator_token)]);

    Ok(Tree::new(
        Production::PostIncDecExpression,
        vec![Child::Subtree(left), Child::Subtree(operator_tree)],
    ))
}

/// Parenthesized grouping `(rvalue)`.
pub fn parse_evaluated_expr(parser: &mut Parser) -> Result<Tree, Error> {
    parser.advance();
    let inner = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Tree::new(
        Production::EvaluatedExpression,
        vec![Child::Subtree(inner)],
    ))
}

pub fn parse_relation_expr(
    parser: &mut Parser,
    left: Tree,
    bp: BindingPower,
) -> Result<Tree, Error> {
    let operator_token = parser.advance().clone();
    let operator = relation_operator_production(operator_token.kind);
    let operator_tree = Tree::new(operator, vec![Child::Token(operator_token)]);

    let right = parse_expr(parser, bp)?;

    Ok(Tree::new(
        Production::RelationExpression,
        vec![
            Child::Subtree(left),
            Child::Subtree(operator_tree),
            Child::Subtree(right),
        ],
    ))
}

/// Ternary `cond ? then : else`, right-associative through the else
/// branch.
pub fn parse_ternary_expr(
    parser: &mut Parser,
    left: Tree,
    _bp: BindingPower,
) -> Result<Tree, Error> {
    parser.advance();

    let then_branch = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Colon)?;
    let else_branch = parse_expr(parser, BindingPower::Assignment)?;

    Ok(Tree::new(
        Production::TernaryExpression,
        vec![
            Child::Subtree(left),
            Child::Subtree(then_branch),
            Child::Subtree(else_branch),
        ],
    ))
}

/// Assignment, `=` or a compound `=op` form. Right-associative: the
/// right-hand side greedily re-enters the expression parser.
pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Tree,
    _bp: BindingPower,
) -> Result<Tree, Error> {
    let operator_token = parser.advance().clone();
    let operator_tree = Tree::new(
        Production::AssignmentOperator,
        vec![Child::Token(operator_token)],
    );

    let rhs = parse_expr(parser, BindingPower::Default)?;

    Ok(Tree::new(
        Production::AssignmentExpression,
        vec![
            Child::Subtree(left),
            Child::Subtree(operator_tree),
            Child::Subtree(rhs),
        ],
    ))
}

pub fn parse_function_expr(
    parser: &mut Parser,
    left: Tree,
    _bp: BindingPower,
) -> Result<Tree, Error> {
    parser.advance();

    let mut args = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        } else {
            args.push(Child::Subtree(parse_expr(parser, BindingPower::Default)?));
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let arguments = Tree::new(Production::ExpressionList, args);

    Ok(Tree::new(
        Production::FunctionExpression,
        vec![Child::Subtree(left), Child::Subtree(arguments)],
    ))
}

/// Vector indexing `name[rvalue]` as an lvalue form.
pub fn parse_vector_expr(parser: &mut Parser, left: Tree, _bp: BindingPower) -> Result<Tree, Error> {
    parser.advance();

    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    let vector = Tree::new(
        Production::VectorIdentifier,
        vec![Child::Subtree(left), Child::Subtree(index)],
    );

    Ok(Tree::new(
        Production::LvalueExpression,
        vec![Child::Subtree(vector)],
    ))
}

fn relation_operator_production(kind: TokenKind) -> Production {
    match kind {
        TokenKind::Or => Production::OrOperator,
        TokenKind::And => Production::AndOperator,
        TokenKind::BitOr => Production::BitOrOperator,
        TokenKind::BitAnd => Production::BitAndOperator,
        TokenKind::Xor => Production::XorOperator,
        TokenKind::Equals => Production::EqOperator,
        TokenKind::NotEquals => Production::NeqOperator,
        TokenKind::Less => Production::LtOperator,
        TokenKind::LessEquals => Production::LteOperator,
        TokenKind::Greater => Production::GtOperator,
        TokenKind::GreaterEquals => Production::GteOperator,
        TokenKind::Lshift => Production::LshiftOperator,
        TokenKind::Rshift => Production::RshiftOperator,
        TokenKind::Plus => Production::AddOperator,
        TokenKind::Dash => Production::SubOperator,
        TokenKind::Star => Production::MulOperator,
        TokenKind::Slash => Production::DivOperator,
        TokenKind::Percent => Production::ModOperator,
        _ => unreachable!("relation handler registered for {:?}", kind),
    }
}
