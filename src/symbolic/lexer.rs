//! Tokenizer for function expressions.
//!
//! The input is split into typed tokens before anything is interpreted, so that an identifier
//! such as `exp` is always one token and never gets confused with the constant `e` or the
//! variable `x` it happens to contain.
use crate::numerical::integration_errors::IntegrationError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit0, digit1, multispace0, one_of},
    combinator::{map, map_res, opt, recognize, value},
    multi::many0,
    sequence::{delimited, pair},
};
use std::fmt;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operator {
    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "*")]
    Star,
    #[strum(to_string = "/")]
    Slash,
    #[strum(to_string = "^")]
    Caret,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    Op(Operator),
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(val) => write!(f, "{}", val),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Op(op) => write!(f, "{}", op),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// 12, 1.5, 2., .25, 3e-4. An `e` that is not followed by digits is left for the identifier
/// lexer, so `2e` lexes as `2` then `e`.
pub(crate) fn parse_number(input: &str) -> IResult<&str, Token> {
    let mantissa = alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ));
    let exponent = opt((one_of("eE"), opt(one_of("+-")), digit1));
    let mut parser = map_res(recognize(pair(mantissa, exponent)), |s: &str| {
        s.parse::<f64>().map(Token::Number)
    });
    parser.parse(input)
}

/// identifiers: a letter or underscore followed by letters, digits, underscores; `π` is
/// its own identifier
pub(crate) fn parse_identifier(input: &str) -> IResult<&str, Token> {
    let word = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = alt((
        map(tag("π"), |s: &str| Token::Ident(s.to_string())),
        map(word, |s: &str| Token::Ident(s.to_string())),
    ));
    parser.parse(input)
}

pub(crate) fn parse_operator(input: &str) -> IResult<&str, Token> {
    // `**` must be tried before `*`
    let mut parser = alt((
        value(Token::Op(Operator::Caret), tag("**")),
        value(Token::Op(Operator::Caret), char('^')),
        value(Token::Op(Operator::Plus), char('+')),
        value(Token::Op(Operator::Minus), char('-')),
        value(Token::Op(Operator::Star), char('*')),
        value(Token::Op(Operator::Slash), char('/')),
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
    ));
    parser.parse(input)
}

fn parse_token(input: &str) -> IResult<&str, Token> {
    let mut parser = delimited(
        multispace0,
        alt((parse_number, parse_identifier, parse_operator)),
        multispace0,
    );
    parser.parse(input)
}

/// Splits the whole expression into tokens. Fails on the first character that does not
/// start any token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, IntegrationError> {
    let mut parser = many0(parse_token);
    let (remaining, tokens) = parser
        .parse(input)
        .map_err(|e| IntegrationError::invalid_expression(input, format!("{:?}", e)))?;
    let remaining = remaining.trim_start();
    if let Some(c) = remaining.chars().next() {
        let position = input.chars().count() - remaining.chars().count();
        return Err(IntegrationError::invalid_expression(
            input,
            format!("unexpected character '{}' at position {}", c, position),
        ));
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(s: &str) -> Token {
        Token::Ident(s.to_string())
    }

    #[test]
    fn test_parse_number() {
        let (remaining, token) = parse_number("2.5*x").unwrap();
        assert_eq!(token, Token::Number(2.5));
        assert_eq!(remaining, "*x");

        let (remaining, token) = parse_number(".25").unwrap();
        assert_eq!(token, Token::Number(0.25));
        assert_eq!(remaining, "");

        let (_, token) = parse_number("3e-4").unwrap();
        assert_eq!(token, Token::Number(3e-4));

        // exponent marker without digits belongs to the next token
        let (remaining, token) = parse_number("2exp(x)").unwrap();
        assert_eq!(token, Token::Number(2.0));
        assert_eq!(remaining, "exp(x)");

        assert!(parse_number("x").is_err());
    }

    #[test]
    fn test_parse_identifier() {
        let (remaining, token) = parse_identifier("exp(x)").unwrap();
        assert_eq!(token, ident("exp"));
        assert_eq!(remaining, "(x)");

        let (remaining, token) = parse_identifier("π*x").unwrap();
        assert_eq!(token, ident("π"));
        assert_eq!(remaining, "*x");

        let (_, token) = parse_identifier("max_2").unwrap();
        assert_eq!(token, ident("max_2"));
    }

    #[test]
    fn test_double_star_is_power() {
        let tokens = tokenize("x**2").unwrap();
        assert_eq!(
            tokens,
            vec![ident("x"), Token::Op(Operator::Caret), Token::Number(2.0)]
        );
    }

    #[test]
    fn test_tokenize_keeps_identifiers_whole() {
        let tokens = tokenize(" exp(x) + e ").unwrap();
        assert_eq!(
            tokens,
            vec![
                ident("exp"),
                Token::LParen,
                ident("x"),
                Token::RParen,
                Token::Op(Operator::Plus),
                ident("e"),
            ]
        );
    }

    #[test]
    fn test_tokenize_rejects_unknown_character() {
        let err = tokenize("x $ 2").unwrap_err();
        match err {
            IntegrationError::InvalidExpression { reason, .. } => {
                assert!(reason.contains("'$'"));
                assert!(reason.contains("position 2"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(tokenize("   ").unwrap(), vec![]);
    }
}
