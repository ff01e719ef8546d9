//! This module provides the Expr enum, representing one parsed level of a reaction definition
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Stable identifier of a bracket group within one reaction.
///
/// Ids are assigned in order of the opening parenthesis, so two brackets with identical text
/// still receive distinct ids.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BracketId(pub usize);

impl Display for BracketId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Representation of a reaction (or of one bracket's contents) as an AST
///
/// Nested brackets are not inlined, they are referenced through [`Expr::Group`] so that each
/// bracket can be expanded once, bottom-up, and its combinations reused by the enclosing level.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A terminal gene node
    Gene(String),
    /// Parts which must all be present (`+` or whitespace)
    Sequence(Vec<Expr>),
    /// Mutually exclusive alternatives (`,`)
    Alternatives(Vec<Expr>),
    /// Placeholder for an already resolved bracket
    Group(BracketId),
}

impl Expr {
    /// Create a sequence node, collapsing a single part into the part itself
    pub fn new_sequence(mut parts: Vec<Expr>) -> Expr {
        if parts.len() == 1 {
            return parts.remove(0);
        }
        Expr::Sequence(parts)
    }

    /// Create an alternatives node, collapsing a single alternative into the alternative itself
    pub fn new_alternatives(mut alternatives: Vec<Expr>) -> Expr {
        if alternatives.len() == 1 {
            return alternatives.remove(0);
        }
        Expr::Alternatives(alternatives)
    }

    /// Generate a definition-like string from the AST, with groups shown by id
    pub fn to_string_id(&self) -> String {
        match self {
            Expr::Gene(id) => id.clone(),
            Expr::Sequence(parts) => parts
                .iter()
                .map(|p| p.to_string_id())
                .collect::<Vec<String>>()
                .join("+"),
            Expr::Alternatives(alternatives) => alternatives
                .iter()
                .map(|a| a.to_string_id())
                .collect::<Vec<String>>()
                .join(","),
            Expr::Group(id) => format!("({})", id),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_id())
    }
}
