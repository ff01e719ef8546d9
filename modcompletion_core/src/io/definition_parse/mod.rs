//! Module for parsing KEGG module definition reactions into AST values

use thiserror::Error;

use crate::io::definition_parse::lexer::LexerError;
use crate::io::definition_parse::non_essential::{scan_lexemes, NonEssentialScan};
use crate::io::definition_parse::parser::{ParsedReaction, ReactionParser};
use crate::kegg_module::expression::BracketId;

pub mod brackets;
pub mod lexer;
pub mod non_essential;
pub mod parser;
pub mod token;

/// Parse a reaction string into its bracket levels, and scan it for non-essential genes
///
/// # Parameters
/// - `input`: &str representing one reaction of a module definition
/// - `reaction_index`: position of the reaction in its module, used when reporting ambiguities
///
/// # Returns
/// Parse result which is
/// - `Ok`: Includes a tuple of the parsed reaction and the non-essential scan of the reaction.
/// - `Err`: Returns the GrammarError describing the issue with the reaction which
///     was being parsed.
///
/// # Examples
/// ```rust
/// use modcompletion_core::io::definition_parse::parse_reaction;
/// let reaction: &str = "K00844 (K01810,K06859) -K00918";
/// let (parsed, scan) = parse_reaction(reaction, 0).unwrap();
/// assert_eq!(parsed.groups.len(), 1);
/// assert!(scan.genes.contains("K00918"));
/// ```
pub fn parse_reaction(
    input: &str,
    reaction_index: usize,
) -> Result<(ParsedReaction, NonEssentialScan), GrammarError> {
    // Convert the reaction string into tokens
    let mut lexer = lexer::Lexer::new(input);
    let lexemes = lexer.lex()?;

    // The non-essential scan works on the raw token stream, before minuses become separators
    let scan = scan_lexemes(&lexemes, reaction_index);

    let parser = ReactionParser::new(&lexemes)?;
    let parsed = parser.parse()?;
    Ok((parsed, scan))
}

/// Enum representing malformed module definitions
#[derive(Debug, Error, PartialEq, Clone)]
pub enum GrammarError {
    /// Lexing Error
    #[error("Error occurred during lexing (conversion of reaction string to tokens): {0}")]
    Lexing(#[from] LexerError),
    /// A `)` without an opening partner
    #[error("Unmatched closing parenthesis at offset {offset}")]
    UnmatchedClosingParen { offset: usize },
    /// A `(` which is never closed
    #[error("Unclosed parenthesis at offset {offset}")]
    UnclosedParen { offset: usize },
    /// Token which can not appear at its position
    #[error("Unexpected token at offset {offset}")]
    UnexpectedToken { offset: usize },
    /// A bracket pair without any gene inside it
    #[error("Empty bracket at offset {offset}")]
    EmptyGroup { offset: usize },
    /// A group placeholder whose bracket has not been expanded
    #[error("No combinations recorded for bracket {0}")]
    UnresolvedPlaceholder(BracketId),
    /// Reaction without any gene
    #[error("Reaction contains no gene identifiers")]
    EmptyReaction,
    /// Module without any reaction
    #[error("Module definition contains no reactions")]
    EmptyDefinition,
}
