use crate::io::definition_parse::brackets::{direct_children, resolve_brackets, Bracket};
use crate::io::definition_parse::token::{Lexeme, Token};
use crate::io::definition_parse::GrammarError;
use crate::kegg_module::expression::{BracketId, Expr};

/*
Reaction Grammar (one level, nested brackets are already resolved to placeholders):
level       -> alternative ( "," alternative )* ;
alternative -> part ( ("+" | " " | "-") part )* ;
part        -> GENE | GROUP ;

e.g. K00844 (K01810,K06859) -K00918
 */

/// A reaction split into its bracket levels
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedReaction {
    /// Expression of each bracket, deepest first. Every [`Expr::Group`] inside an entry refers
    /// to a bracket that appears earlier in this list.
    pub groups: Vec<(BracketId, Expr)>,
    /// Expression of the reaction with its outermost brackets as placeholders
    pub root: Expr,
}

/// Reaction Parser
pub struct ReactionParser<'lx> {
    /// Lexemes of the reaction string
    lexemes: &'lx [Lexeme],
    /// Bracket pairs, deepest first
    brackets: Vec<Bracket>,
}

impl<'lx> ReactionParser<'lx> {
    /// Create a new ReactionParser, resolving the brackets of `lexemes`
    pub fn new(lexemes: &'lx [Lexeme]) -> Result<ReactionParser<'lx>, GrammarError> {
        let brackets = resolve_brackets(lexemes)?;
        Ok(ReactionParser { lexemes, brackets })
    }

    /// Parse every bracket level, deepest first, and then the top level
    pub fn parse(&self) -> Result<ParsedReaction, GrammarError> {
        if !self
            .lexemes
            .iter()
            .any(|l| matches!(l.token, Token::Gene(_)))
        {
            return Err(GrammarError::EmptyReaction);
        }

        let mut groups = Vec::with_capacity(self.brackets.len());
        for bracket in &self.brackets {
            // A bracket must hold at least one gene, directly or in a nested bracket
            if !self.lexemes[bracket.open + 1..bracket.close]
                .iter()
                .any(|l| matches!(l.token, Token::Gene(_)))
            {
                return Err(GrammarError::EmptyGroup {
                    offset: self.lexemes[bracket.open].offset,
                });
            }
            let children = direct_children(&self.brackets, Some(bracket));
            let expr = self.parse_level(bracket.open + 1, bracket.close, &children)?;
            groups.push((bracket.id, expr));
        }

        let children = direct_children(&self.brackets, None);
        let root = self.parse_level(0, self.lexemes.len(), &children)?;
        Ok(ParsedReaction { groups, root })
    }

    /// Parse the lexemes in `start..end`, substituting each child bracket by a placeholder
    fn parse_level(
        &self,
        start: usize,
        end: usize,
        children: &[&Bracket],
    ) -> Result<Expr, GrammarError> {
        let mut alternatives: Vec<Expr> = Vec::new();
        let mut parts: Vec<Expr> = Vec::new();
        let mut children = children.iter().peekable();
        let mut current = start;

        while current < end {
            let lexeme = &self.lexemes[current];
            match &lexeme.token {
                Token::Gene(id) => parts.push(Expr::Gene(id.clone())),
                // Minus only marks non-essential genes, structurally it is a separator
                Token::And | Token::Minus => {}
                Token::Or => {
                    if !parts.is_empty() {
                        alternatives.push(Expr::new_sequence(std::mem::take(&mut parts)));
                    }
                }
                Token::LeftParen => match children.next_if(|child| child.open == current) {
                    Some(child) => {
                        parts.push(Expr::Group(child.id));
                        current = child.close;
                    }
                    None => {
                        return Err(GrammarError::UnexpectedToken {
                            offset: lexeme.offset,
                        })
                    }
                },
                Token::RightParen => {
                    return Err(GrammarError::UnexpectedToken {
                        offset: lexeme.offset,
                    })
                }
                Token::Eof => break,
            }
            current += 1;
        }

        if alternatives.is_empty() {
            return Ok(Expr::new_sequence(parts));
        }
        if !parts.is_empty() {
            alternatives.push(Expr::new_sequence(parts));
        }
        Ok(Expr::new_alternatives(alternatives))
    }
}
