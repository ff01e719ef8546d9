//! Lex a module definition reaction into a series of tokens for later parsing

use thiserror::Error;

use crate::io::definition_parse::token::{Lexeme, Token};

pub struct Lexer {
    source: Vec<char>,
    /// Characters trimmed from the front of the input, added back onto every offset
    leading: usize,
    tokens: Vec<Lexeme>,
    start: usize,
    current: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let trimmed = source.trim_start();
        Lexer {
            leading: source[..source.len() - trimmed.len()].chars().count(),
            source: trimmed.trim_end().chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
        }
    }

    /// Convert the source into a vector of lexemes, terminated by [`Token::Eof`]
    pub fn lex(&mut self) -> Result<Vec<Lexeme>, LexerError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }
        self.tokens.push(Lexeme::new(Token::Eof, self.leading + self.current));
        Ok(std::mem::take(&mut self.tokens))
    }

    fn scan_token(&mut self) -> Result<(), LexerError> {
        let c: char = self.advance();
        match c {
            // Single Character Tokens
            '(' => self.add_token(Token::LeftParen),
            ')' => self.add_token(Token::RightParen),
            ',' => self.add_token(Token::Or),
            '-' => self.add_token(Token::Minus),
            '+' => self.add_token(Token::And),
            // Whitespace is a complex separator, same as '+'
            c if c.is_whitespace() => self.read_whitespace(),
            c if Lexer::is_identifier_char(c) => self.read_identifier(),
            _ => {
                return Err(LexerError::InvalidCharacter {
                    character: c,
                    offset: self.leading + self.start,
                })
            }
        };
        Ok(())
    }

    fn advance(&mut self) -> char {
        let char_at_current = self.source[self.current];
        self.current += 1;
        char_at_current
    }

    fn read_identifier(&mut self) {
        while Lexer::is_identifier_char(self.peek()) {
            self.advance();
        }
        let text: String = self.source[self.start..self.current].iter().collect();
        self.add_token(Token::Gene(text));
    }

    fn read_whitespace(&mut self) {
        while self.peek().is_whitespace() {
            self.advance();
        }
        self.add_token(Token::And);
    }

    fn is_identifier_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':')
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            return '\0';
        }
        self.source[self.current]
    }

    fn add_token(&mut self, token: Token) {
        self.tokens.push(Lexeme::new(token, self.leading + self.start));
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

/// Enum representing possible lexing errors
#[derive(Debug, Error, PartialEq, Clone)]
pub enum LexerError {
    /// Character is not part of the definition grammar
    #[error("Invalid character {character:?} at offset {offset}")]
    InvalidCharacter { character: char, offset: usize },
}
