//! Locate the (nested) bracket groups of a lexed reaction and their nesting depth

use crate::io::definition_parse::token::{Lexeme, Token};
use crate::io::definition_parse::GrammarError;
use crate::kegg_module::expression::BracketId;

/// A matched pair of parentheses
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Bracket {
    /// Id of the bracket, assigned in order of the opening parenthesis
    pub id: BracketId,
    /// Nesting depth, 0 for an outermost bracket
    pub depth: usize,
    /// Index of the `(` lexeme
    pub open: usize,
    /// Index of the matching `)` lexeme
    pub close: usize,
}

impl Bracket {
    /// Whether `other` lies strictly inside this bracket
    pub fn contains(&self, other: &Bracket) -> bool {
        self.open < other.open && other.close < self.close
    }
}

/// Find every bracket pair in `lexemes`.
///
/// The result is ordered for bottom-up processing: deepest level first, and left to right
/// within a level. A bracket therefore always comes after every bracket nested inside it.
///
/// # Errors
/// - [`GrammarError::UnmatchedClosingParen`] if a `)` has no opening partner
/// - [`GrammarError::UnclosedParen`] if a `(` is never closed
pub fn resolve_brackets(lexemes: &[Lexeme]) -> Result<Vec<Bracket>, GrammarError> {
    let mut stack: Vec<(usize, BracketId)> = Vec::new();
    let mut brackets: Vec<Bracket> = Vec::new();
    let mut next_id = 0usize;

    for (index, lexeme) in lexemes.iter().enumerate() {
        match lexeme.token {
            Token::LeftParen => {
                stack.push((index, BracketId(next_id)));
                next_id += 1;
            }
            Token::RightParen => {
                let (open, id) = stack.pop().ok_or(GrammarError::UnmatchedClosingParen {
                    offset: lexeme.offset,
                })?;
                brackets.push(Bracket {
                    id,
                    depth: stack.len(),
                    open,
                    close: index,
                });
            }
            _ => {}
        }
    }

    if let Some((open, _)) = stack.pop() {
        return Err(GrammarError::UnclosedParen {
            offset: lexemes[open].offset,
        });
    }

    brackets.sort_by(|a, b| b.depth.cmp(&a.depth).then(a.open.cmp(&b.open)));
    Ok(brackets)
}

/// Brackets directly inside `parent` (or the outermost brackets when `parent` is `None`),
/// in textual order
pub fn direct_children<'b>(brackets: &'b [Bracket], parent: Option<&Bracket>) -> Vec<&'b Bracket> {
    let mut children: Vec<&Bracket> = brackets
        .iter()
        .filter(|b| match parent {
            Some(p) => b.depth == p.depth + 1 && p.contains(b),
            None => b.depth == 0,
        })
        .collect();
    children.sort_by_key(|b| b.open);
    children
}
