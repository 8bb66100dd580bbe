//! Tokenizer for condition strings.
//!
//! ```text
//! 2+ Pot of Desires AND (Upstart Goblin OR 3 Spellcaster)
//! ```
//!
//! becomes `number name operator paren name operator number name paren`.
//!
//! `AND` / `OR` are keywords only when followed by a non-word character or
//! the end of input, so `ANDROID` is a name. Inside a name, a keyword is
//! only recognised at the start of a word: `Sword OR Shield` splits,
//! `SWOR X` does not.

use std::fmt;

use crate::core::error::ParseError;

/// Logical connective between two terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Logic {
    And,
    Or,
}

impl Logic {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Open,
    Close,
    Operator(Logic),
    /// Digits, optionally followed by `+` (at least).
    Number { text: String, at_least: bool },
    Name(String),
}

impl Token {
    /// Kind name used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Token::Open | Token::Close => "paren",
            Token::Operator(_) => "operator",
            Token::Number { .. } => "number",
            Token::Name(_) => "name",
        }
    }
}

/// A token and the character offset it starts at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `AND` / `OR` at `pos`, followed by a word boundary.
fn keyword_at(chars: &[char], pos: usize) -> Option<(Logic, usize)> {
    [Logic::And, Logic::Or].into_iter().find_map(|logic| {
        let word: Vec<char> = logic.keyword().chars().collect();
        let end = pos + word.len();
        let matches = chars.get(pos..end) == Some(word.as_slice())
            && chars.get(end).map_or(true, |&c| !is_word_char(c));
        matches.then_some((logic, word.len()))
    })
}

/// Split a condition string into tokens.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos];
        let start = pos;

        if ch.is_whitespace() {
            pos += 1;
            continue;
        }

        let token = if ch == '(' {
            pos += 1;
            Token::Open
        } else if ch == ')' {
            pos += 1;
            Token::Close
        } else if let Some((logic, len)) = keyword_at(&chars, pos) {
            pos += len;
            Token::Operator(logic)
        } else if ch.is_ascii_digit() {
            let mut text = String::new();
            while let Some(&c) = chars.get(pos).filter(|c| c.is_ascii_digit()) {
                text.push(c);
                pos += 1;
            }
            let at_least = chars.get(pos) == Some(&'+');
            if at_least {
                pos += 1;
            }
            Token::Number { text, at_least }
        } else if is_name_char(ch) {
            let mut name = String::new();
            while let Some(&c) = chars.get(pos) {
                if is_name_char(c) {
                    name.push(c);
                    pos += 1;
                } else if c == ' '
                    && chars.get(pos + 1).is_some_and(|&n| is_name_char(n))
                    && keyword_at(&chars, pos + 1).is_none()
                {
                    name.push(' ');
                    pos += 1;
                } else {
                    break;
                }
            }
            Token::Name(name)
        } else {
            return Err(ParseError::UnknownCharacter { ch, position: pos });
        };

        tokens.push(Spanned {
            token,
            position: start,
        });
    }

    Ok(tokens)
}
