use crate::{ast::{ast::{BinaryOperator, Expr, UnaryOperator}, expressions::{BinaryExpr, BooleanExpr, CallExpr, ConditionalExpr, NumberExpr, PrefixExpr, SymbolExpr}}, errors::errors::{Error, ErrorImpl}, lexer::tokens::TokenKind, Span};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() }, parser.get_position()));
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(Error::new(ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() }, parser.get_position()));
        };

        let current_bp = parser.current_binding_power();
        left = led(parser, left, current_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let parsed = parser.current_token().value.parse::<f64>();
            match parsed {
                Ok(value) => Ok(Expr::Number(NumberExpr { value, span: parser.advance().span.clone() })),
                Err(_) => Err(Error::new(ErrorImpl::NumberParseError { token: parser.current_token().value.clone() }, parser.get_position())),
            }
        },
        TokenKind::True | TokenKind::False => {
            let token = parser.advance();
            Ok(Expr::Boolean(BooleanExpr { value: token.kind == TokenKind::True, span: token.span.clone() }))
        },
        TokenKind::Identifier => {
            Ok(Expr::Symbol(parse_symbol(parser)?))
        },
        _ => {
            Err(Error::new(ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() }, parser.get_position()))
        }
    }
}

/// Consumes an identifier token as a raw name.
pub fn parse_symbol(parser: &mut Parser) -> Result<SymbolExpr, Error> {
    let error = Error::new(ErrorImpl::UnexpectedTokenDetailed { token: parser.current_token().value.clone(), message: String::from("expected identifier") }, parser.get_position());
    let token = parser.expect_error(TokenKind::Identifier, Some(error))?;

    Ok(SymbolExpr { value: token.value, span: token.span })
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let Some(operator) = BinaryOperator::from_token(operator_token.kind) else {
        return Err(Error::new(ErrorImpl::UnexpectedToken { token: operator_token.value }, operator_token.span.start));
    };

    // `**` is right associative
    let right_bp = if operator == BinaryOperator::Power { BindingPower::Multiplicative } else { bp };
    let right = parse_expr(parser, right_bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone()
        },
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let Some(operator) = UnaryOperator::from_token(operator_token.kind) else {
        return Err(Error::new(ErrorImpl::UnexpectedToken { token: operator_token.value }, operator_token.span.start));
    };
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: rhs.get_span().end.clone()
        },
        operator,
        right_expr: Box::new(rhs)
    }))
}

pub fn parse_conditional_expr(parser: &mut Parser, condition: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::Question)?;
    let consequent = parse_expr(parser, BindingPower::Conditional)?;
    parser.expect(TokenKind::Colon)?;
    let alternate = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Conditional(ConditionalExpr {
        span: Span {
            start: condition.get_span().start.clone(),
            end: alternate.get_span().end.clone()
        },
        condition: Box::new(condition),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let Expr::Symbol(callee) = left else {
        return Err(Error::new(ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("only named functions can be called")
        }, parser.get_position()));
    };

    parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            args.push(parse_expr(parser, BindingPower::Default)?);
            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        span: Span {
            start: callee.span.start.clone(),
            end: parser.get_previous_end()
        },
        callee,
        arguments: args
    }))
}
