//! Recursive-descent parser for condition strings.
//!
//! ```text
//! expr     := term ((AND | OR) term)*
//! term     := [quantity] name | '(' expr ')'
//! quantity := digits ['+']
//! ```
//!
//! `AND` and `OR` have equal precedence and fold left to right:
//! `A AND B OR C` is `(A AND B) OR C`.

use super::token::{tokenize, Logic, Spanned, Token};
use super::tree::{CompareOp, Condition};
use crate::core::error::ParseError;

/// Parse a condition string into a tree.
pub fn parse(input: &str) -> Result<Condition, ParseError> {
    let mut parser = Parser {
        tokens: tokenize(input)?,
        pos: 0,
    };
    let condition = parser.parse_expression()?;
    match parser.peek() {
        None => Ok(condition),
        Some(extra) => Err(ParseError::TrailingInput {
            position: extra.position,
        }),
    }
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Spanned> {
        let tok = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(tok)
    }

    fn parse_expression(&mut self) -> Result<Condition, ParseError> {
        let mut node = self.walk()?;
        while let Some(Token::Operator(logic)) = self.peek().map(|s| &s.token) {
            let logic = *logic;
            self.pos += 1;
            let right = self.walk()?;
            node = match logic {
                Logic::And => Condition::and(node, right),
                Logic::Or => Condition::or(node, right),
            };
        }
        Ok(node)
    }

    /// One term: a counted name, a bare name, or a parenthesised group.
    fn walk(&mut self) -> Result<Condition, ParseError> {
        let Spanned { token, position } = self.next().ok_or(ParseError::UnexpectedEnd)?;
        match token {
            Token::Number { text, at_least } => {
                let quantity = parse_quantity(&text, position)?;
                let name = self.expect_name()?;
                let operator = if at_least {
                    CompareOp::AtLeast
                } else {
                    CompareOp::Exactly
                };
                Ok(Condition::card(name, quantity, operator))
            }
            Token::Name(name) => Ok(Condition::card(name, 1, CompareOp::AtLeast)),
            Token::Open => {
                let inner = self.parse_expression()?;
                match self.next() {
                    Some(Spanned {
                        token: Token::Close,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(ParseError::UnexpectedToken {
                        found: other.token.kind(),
                        position: other.position,
                    }),
                    None => Err(ParseError::UnclosedGroup { position }),
                }
            }
            other => Err(ParseError::UnexpectedToken {
                found: other.kind(),
                position,
            }),
        }
    }

    fn expect_name(&mut self) -> Result<String, ParseError> {
        match self.next() {
            Some(Spanned {
                token: Token::Name(name),
                ..
            }) => Ok(name),
            Some(other) => Err(ParseError::UnexpectedToken {
                found: other.token.kind(),
                position: other.position,
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

fn parse_quantity(text: &str, position: usize) -> Result<u32, ParseError> {
    match text.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ParseError::InvalidQuantity {
            text: text.to_string(),
            position,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, quantity: u32, operator: CompareOp) -> Condition {
        Condition::card(name, quantity, operator)
    }

    #[test]
    fn test_bare_name() {
        assert_eq!(parse("Pot of Greed").unwrap(), card("Pot of Greed", 1, CompareOp::AtLeast));
    }

    #[test]
    fn test_quantities() {
        assert_eq!(parse("2 A").unwrap(), card("A", 2, CompareOp::Exactly));
        assert_eq!(parse("3+ A").unwrap(), card("A", 3, CompareOp::AtLeast));
    }

    #[test]
    fn test_left_associative_without_precedence() {
        let expected = Condition::or(
            Condition::and(
                card("A", 1, CompareOp::AtLeast),
                card("B", 1, CompareOp::AtLeast),
            ),
            card("C", 1, CompareOp::AtLeast),
        );
        assert_eq!(parse("A AND B OR C").unwrap(), expected);

        let expected = Condition::and(
            Condition::or(
                card("A", 1, CompareOp::AtLeast),
                card("B", 1, CompareOp::AtLeast),
            ),
            card("C", 1, CompareOp::AtLeast),
        );
        assert_eq!(parse("A OR B AND C").unwrap(), expected);
    }

    #[test]
    fn test_groups() {
        let expected = Condition::and(
            card("A", 2, CompareOp::AtLeast),
            Condition::or(
                card("B", 1, CompareOp::AtLeast),
                card("C", 3, CompareOp::Exactly),
            ),
        );
        assert_eq!(parse("2+ A AND (B OR 3 C)").unwrap(), expected);
        assert_eq!(parse("((2+ A) AND ((B) OR 3 C))").unwrap(), expected);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), Err(ParseError::UnexpectedEnd));
        assert_eq!(parse("   "), Err(ParseError::UnexpectedEnd));
    }

    #[test]
    fn test_unexpected_operator() {
        assert_eq!(
            parse("AND A"),
            Err(ParseError::UnexpectedToken {
                found: "operator",
                position: 0
            })
        );
        assert_eq!(parse("A OR"), Err(ParseError::UnexpectedEnd));
    }

    #[test]
    fn test_number_without_name() {
        assert_eq!(parse("2"), Err(ParseError::UnexpectedEnd));
        assert_eq!(
            parse("2 (A)"),
            Err(ParseError::UnexpectedToken {
                found: "paren",
                position: 2
            })
        );
    }

    #[test]
    fn test_unclosed_group() {
        assert_eq!(parse("(A OR B"), Err(ParseError::UnclosedGroup { position: 0 }));
    }

    #[test]
    fn test_trailing_input() {
        assert_eq!(parse("A)"), Err(ParseError::TrailingInput { position: 1 }));
        assert!(matches!(parse("(A) B"), Err(ParseError::TrailingInput { .. })));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert!(matches!(parse("0 A"), Err(ParseError::InvalidQuantity { .. })));
        assert!(matches!(
            parse("99999999999 A"),
            Err(ParseError::InvalidQuantity { .. })
        ));
    }
}
