//! Find the genes a reaction marks as non-essential with a leading `-`
use std::fmt::{Display, Formatter};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::io::definition_parse::lexer::Lexer;
use crate::io::definition_parse::token::{Lexeme, Token};
use crate::io::definition_parse::GrammarError;

/// Non-essential genes of a reaction, and any minus sequences whose meaning is unclear
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NonEssentialScan {
    pub genes: IndexSet<String>,
    pub ambiguities: Vec<AmbiguousConstruct>,
}

/// A minus sequence which was not interpreted
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguousConstruct {
    /// Index of the reaction within its module definition
    pub reaction_index: usize,
    /// Character offset of the first `-` of the construct
    pub offset: usize,
    pub kind: AmbiguityKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmbiguityKind {
    /// Two or more consecutive minuses, e.g. `--K00001`. The token following the run is
    /// recorded but is not marked non-essential.
    RepeatedMinus { count: usize, following: Option<String> },
    /// A minus followed by neither a gene nor a bracket
    DanglingMinus,
}

impl Display for AmbiguousConstruct {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            AmbiguityKind::RepeatedMinus { count, following } => write!(
                f,
                "reaction {} offset {}: {} consecutive minuses before {}",
                self.reaction_index,
                self.offset,
                count,
                following.as_deref().unwrap_or("nothing")
            ),
            AmbiguityKind::DanglingMinus => write!(
                f,
                "reaction {} offset {}: minus not followed by a gene or group",
                self.reaction_index, self.offset
            ),
        }
    }
}

/// Scan a raw reaction string for non-essential genes
///
/// # Parameters
/// - `reaction`: the raw reaction, as found in the module database
/// - `reaction_index`: position of the reaction within its module, used to locate ambiguities
///
/// # Examples
/// ```rust
/// use modcompletion_core::io::definition_parse::non_essential::find_non_essential;
/// let scan = find_non_essential("K00001 -K00002 -(K00003,K00004)", 0).unwrap();
/// assert_eq!(scan.genes.len(), 3);
/// assert!(scan.ambiguities.is_empty());
/// ```
pub fn find_non_essential(
    reaction: &str,
    reaction_index: usize,
) -> Result<NonEssentialScan, GrammarError> {
    let lexemes = Lexer::new(reaction).lex()?;
    Ok(scan_lexemes(&lexemes, reaction_index))
}

pub(crate) fn scan_lexemes(lexemes: &[Lexeme], reaction_index: usize) -> NonEssentialScan {
    let mut scan = NonEssentialScan::default();
    let mut current = 0;

    while current < lexemes.len() {
        if lexemes[current].token != Token::Minus {
            current += 1;
            continue;
        }
        let offset = lexemes[current].offset;
        let next = current + 1;
        match lexemes.get(next).map(|l| &l.token) {
            Some(Token::Minus) => {
                let run_end = lexemes[next..]
                    .iter()
                    .position(|l| l.token != Token::Minus)
                    .map_or(lexemes.len(), |p| next + p);
                let following = match lexemes.get(run_end).map(|l| &l.token) {
                    Some(Token::Gene(id)) => Some(id.clone()),
                    Some(Token::LeftParen) => Some("(".to_string()),
                    _ => None,
                };
                scan.ambiguities.push(AmbiguousConstruct {
                    reaction_index,
                    offset,
                    kind: AmbiguityKind::RepeatedMinus {
                        count: run_end - current,
                        following,
                    },
                });
                // Skip the token after the run as well, it must not be read as non-essential
                current = run_end + 1;
            }
            Some(Token::LeftParen) => {
                let close = matching_paren(lexemes, next);
                for lexeme in &lexemes[next..close] {
                    if let Token::Gene(id) = &lexeme.token {
                        scan.genes.insert(id.clone());
                    }
                }
                current = next;
            }
            Some(Token::Gene(id)) => {
                scan.genes.insert(id.clone());
                current = next;
            }
            _ => {
                scan.ambiguities.push(AmbiguousConstruct {
                    reaction_index,
                    offset,
                    kind: AmbiguityKind::DanglingMinus,
                });
                current = next;
            }
        }
    }
    scan
}

/// Index of the `)` matching the `(` at `open`, or the end of the lexemes if it is unclosed
fn matching_paren(lexemes: &[Lexeme], open: usize) -> usize {
    let mut depth = 0usize;
    for (index, lexeme) in lexemes.iter().enumerate().skip(open) {
        match lexeme.token {
            Token::LeftParen => depth += 1,
            Token::RightParen => {
                depth -= 1;
                if depth == 0 {
                    return index;
                }
            }
            _ => {}
        }
    }
    lexemes.len()
}
