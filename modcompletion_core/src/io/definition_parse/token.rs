//! Module providing Token struct for lexing

/// Represents Tokens in a module definition reaction
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub enum Token {
    /// A gene (KO) identifier
    Gene(String),
    /// `+` or a run of whitespace
    And,
    /// `,`
    Or,
    /// `-`, marks the following gene or group as non-essential
    Minus,
    LeftParen,
    RightParen,
    Eof,
}

/// A token together with the character offset it started at in the reaction string
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub offset: usize,
}

impl Lexeme {
    pub fn new(token: Token, offset: usize) -> Self {
        Lexeme { token, offset }
    }
}
