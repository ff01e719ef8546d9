//! Expansion of parsed reactions into every gene combination that satisfies them
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

use crate::io::definition_parse::parser::ParsedReaction;
use crate::io::definition_parse::GrammarError;
use crate::kegg_module::expression::{BracketId, Expr};

/// One concrete list of genes satisfying a reaction or a module
pub type Combination = Vec<String>;

/// Combinations of every bracket of one reaction, filled bottom-up
pub type BracketTable = IndexMap<BracketId, Vec<Combination>>;

/// Expand an expression into its combinations
///
/// Every [`Expr::Group`] must already have an entry in `table`.
///
/// # Parameters
/// - `expr`: expression of one level of a reaction
/// - `table`: combinations of the brackets referenced by `expr`
/// - `limit`: largest number of combinations any intermediate result may hold
pub fn expand(
    expr: &Expr,
    table: &BracketTable,
    limit: usize,
) -> Result<Vec<Combination>, ModuleError> {
    match expr {
        Expr::Gene(id) => Ok(vec![vec![id.clone()]]),
        Expr::Group(id) => table
            .get(id)
            .cloned()
            .ok_or(ModuleError::Grammar(GrammarError::UnresolvedPlaceholder(*id))),
        Expr::Alternatives(alternatives) => {
            let mut union: IndexSet<Combination> = IndexSet::new();
            for alternative in alternatives {
                for combination in expand(alternative, table, limit)? {
                    union.insert(combination);
                    check_limit(union.len(), limit)?;
                }
            }
            Ok(union.into_iter().collect())
        }
        Expr::Sequence(parts) => {
            let mut partials: Vec<Combination> = vec![Vec::new()];
            for part in parts {
                let options = expand(part, table, limit)?;
                check_limit(partials.len().saturating_mul(options.len()), limit)?;
                let mut extended = Vec::with_capacity(partials.len() * options.len());
                for option in &options {
                    for partial in &partials {
                        let mut new_partial = partial.clone();
                        new_partial.extend(option.iter().cloned());
                        extended.push(new_partial);
                    }
                }
                partials = extended;
            }
            Ok(partials)
        }
    }
}

/// Expand a parsed reaction, resolving its brackets from the deepest level upwards
///
/// # Examples
/// ```rust
/// use modcompletion_core::io::definition_parse::parse_reaction;
/// use modcompletion_core::kegg_module::combination::expand_reaction;
/// let (parsed, _) = parse_reaction("K1 (K2,K3)", 0).unwrap();
/// let combinations = expand_reaction(&parsed, 100).unwrap();
/// assert_eq!(combinations, vec![vec!["K1", "K2"], vec!["K1", "K3"]]);
/// ```
pub fn expand_reaction(
    parsed: &ParsedReaction,
    limit: usize,
) -> Result<Vec<Combination>, ModuleError> {
    let mut table = BracketTable::with_capacity(parsed.groups.len());
    for (id, expr) in &parsed.groups {
        let combinations = expand(expr, &table, limit)?;
        table.insert(*id, combinations);
    }
    expand(&parsed.root, &table, limit)
}

/// Combine the combinations of several reactions which must all be satisfied
///
/// Every combination built so far is extended by each alternative of the next reaction.
pub fn combine(
    reaction_combinations: &[Vec<Combination>],
    limit: usize,
) -> Result<Vec<Combination>, ModuleError> {
    let mut combined: Vec<Combination> = vec![Vec::new()];
    for options in reaction_combinations {
        check_limit(combined.len().saturating_mul(options.len()), limit)?;
        let mut extended = Vec::with_capacity(combined.len() * options.len());
        for partial in &combined {
            for option in options {
                let mut new_partial = partial.clone();
                new_partial.extend(option.iter().cloned());
                extended.push(new_partial);
            }
        }
        combined = extended;
    }
    Ok(combined)
}

fn check_limit(attempted: usize, limit: usize) -> Result<(), ModuleError> {
    if attempted > limit {
        return Err(ModuleError::CombinationLimitExceeded { limit, attempted });
    }
    Ok(())
}

/// Enum representing failures to build the combinations of a module
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ModuleError {
    /// A reaction of the module is malformed
    #[error("Reaction {index} is malformed: {source}")]
    InvalidReaction {
        index: usize,
        #[source]
        source: GrammarError,
    },
    /// Module level grammar error
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    /// Too many combinations
    #[error("Expansion would produce {attempted} combinations, the limit is {limit}")]
    CombinationLimitExceeded { limit: usize, attempted: usize },
}

impl ModuleError {
    /// Attach the index of the reaction being expanded to a grammar error
    pub(crate) fn in_reaction(self, index: usize) -> ModuleError {
        match self {
            ModuleError::Grammar(source) => ModuleError::InvalidReaction { index, source },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::definition_parse::parse_reaction;
    use rstest::rstest;

    fn expand_str(reaction: &str) -> Vec<Combination> {
        let (parsed, _) = parse_reaction(reaction, 0).unwrap();
        expand_reaction(&parsed, 10_000).unwrap()
    }

    fn combos(lists: &[&[&str]]) -> Vec<Combination> {
        lists
            .iter()
            .map(|l| l.iter().map(|g| g.to_string()).collect())
            .collect()
    }

    /// Combinations are written as `|` separated lists of space separated genes
    fn parse_expected(expected: &str) -> Vec<Combination> {
        expected
            .split('|')
            .map(|c| c.split_whitespace().map(|g| g.to_string()).collect())
            .collect()
    }

    #[rstest]
    #[case("K1", "K1")]
    #[case("K1+K2 K3", "K1 K2 K3")]
    #[case("K1-K2", "K1 K2")]
    #[case("K1,K2,K3", "K1|K2|K3")]
    #[case("(K1,(K2,K3))", "K1|K2|K3")]
    #[case("(K1+K2),(K3,K4)", "K1 K2|K3|K4")]
    #[case("K1+K2,K3", "K1 K2|K3")]
    #[case("K1 (K2,K3) K4", "K1 K2 K4|K1 K3 K4")]
    #[case("K1,K1", "K1")]
    fn test_expansion(#[case] reaction: &str, #[case] expected: &str) {
        assert_eq!(expand_str(reaction), parse_expected(expected));
    }

    #[test]
    fn test_cross_product_is_alternative_major() {
        assert_eq!(
            expand_str("(K1,K2) (K3,K4)"),
            combos(&[
                &["K1", "K3"],
                &["K2", "K3"],
                &["K1", "K4"],
                &["K2", "K4"]
            ])
        );
    }

    #[test]
    fn test_identical_brackets_expand_independently() {
        assert_eq!(
            expand_str("(K1,K2)+(K1,K2)").len(),
            4,
            "each bracket occurrence must contribute its own alternatives"
        );
    }

    #[test]
    fn test_deep_nesting() {
        assert_eq!(
            expand_str("K0 (K1,(K2 (K3,K4)))"),
            combos(&[
                &["K0", "K1"],
                &["K0", "K2", "K3"],
                &["K0", "K2", "K4"]
            ])
        );
    }

    #[test]
    fn test_unresolved_placeholder() {
        let table = BracketTable::new();
        assert_eq!(
            expand(&Expr::Group(BracketId(7)), &table, 10),
            Err(ModuleError::Grammar(GrammarError::UnresolvedPlaceholder(
                BracketId(7)
            )))
        );
    }

    #[test]
    fn test_limit_exceeded() {
        let (parsed, _) = parse_reaction("(K1,K2) (K3,K4) (K5,K6)", 0).unwrap();
        assert_eq!(
            expand_reaction(&parsed, 6),
            Err(ModuleError::CombinationLimitExceeded {
                limit: 6,
                attempted: 8
            })
        );
        assert_eq!(expand_reaction(&parsed, 8).unwrap().len(), 8);
    }

    #[test]
    fn test_alternation_limit_exceeded() {
        let (parsed, _) = parse_reaction("K1,K2,K3", 0).unwrap();
        assert_eq!(
            expand_reaction(&parsed, 2),
            Err(ModuleError::CombinationLimitExceeded {
                limit: 2,
                attempted: 3
            })
        );
        // Duplicate alternatives collapse before they count against the limit
        let (parsed, _) = parse_reaction("K1,K2,K1", 0).unwrap();
        assert_eq!(expand_reaction(&parsed, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_bracket_fails_expansion() {
        for reaction in ["K1 ()", "K1,()"] {
            assert!(matches!(
                parse_reaction(reaction, 0),
                Err(GrammarError::EmptyGroup { .. })
            ));
        }
    }

    #[test]
    fn test_combine_reactions() {
        let first = combos(&[&["A"], &["B"]]);
        let second = combos(&[&["C"]]);
        assert_eq!(
            combine(&[first, second], 100).unwrap(),
            combos(&[&["A", "C"], &["B", "C"]])
        );
    }

    #[test]
    fn test_combine_is_existing_major() {
        let first = combos(&[&["A"], &["B"]]);
        let second = combos(&[&["C"], &["D"]]);
        assert_eq!(
            combine(&[first, second], 100).unwrap(),
            combos(&[&["A", "C"], &["A", "D"], &["B", "C"], &["B", "D"]])
        );
    }

    #[test]
    fn test_combine_nothing() {
        assert_eq!(combine(&[], 10).unwrap(), vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_combine_limit() {
        let first = combos(&[&["A"], &["B"], &["C"]]);
        let second = combos(&[&["D"], &["E"]]);
        assert!(matches!(
            combine(&[first, second], 5),
            Err(ModuleError::CombinationLimitExceeded { attempted: 6, .. })
        ));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::io::definition_parse::parse_reaction;
    use proptest::prelude::*;

    fn gene() -> impl Strategy<Value = String> {
        (0u32..12).prop_map(|n| format!("K{:05}", n))
    }

    /// Random reactions built from the full grammar, alternatives are always bracketed so the
    /// generated text reads the way it was built
    fn reaction() -> impl Strategy<Value = String> {
        gene().prop_recursive(3, 24, 3, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 2..4).prop_map(|parts| parts.join(" ")),
                prop::collection::vec(inner.clone(), 2..4).prop_map(|parts| parts.join("+")),
                prop::collection::vec(inner.clone(), 2..4).prop_map(|parts| parts.join(" -")),
                prop::collection::vec(inner, 2..4)
                    .prop_map(|parts| format!("({})", parts.join(","))),
            ]
        })
    }

    proptest! {
        /// Every gene of a reaction appears in at least one of its combinations
        #[test]
        fn prop_every_gene_is_covered(reaction in reaction()) {
            let (parsed, _) = parse_reaction(&reaction, 0).unwrap();
            let combinations = expand_reaction(&parsed, 1_000_000).unwrap();
            let covered: IndexSet<&String> = combinations.iter().flatten().collect();
            for token in reaction.split(|c: char| "+-,() ".contains(c)).filter(|t| !t.is_empty()) {
                prop_assert!(covered.contains(&token.to_string()), "{} not covered in {}", token, reaction);
            }
        }

        /// A reaction made only of AND separators has one combination, in token order
        #[test]
        fn prop_and_chain_is_single_combination(
            genes in prop::collection::vec(gene(), 1..8),
            separators in prop::collection::vec(prop_oneof![Just(" "), Just("+"), Just("  ")], 8),
        ) {
            let mut reaction = genes[0].clone();
            for (gene, separator) in genes.iter().skip(1).zip(separators.iter()) {
                reaction.push_str(separator);
                reaction.push_str(gene);
            }
            let (parsed, _) = parse_reaction(&reaction, 0).unwrap();
            let combinations = expand_reaction(&parsed, 1_000).unwrap();
            prop_assert_eq!(combinations, vec![genes]);
        }

        /// Flat alternatives give one single gene combination per distinct gene
        #[test]
        fn prop_flat_alternatives(genes in prop::collection::vec(gene(), 1..8)) {
            let reaction = genes.join(",");
            let (parsed, _) = parse_reaction(&reaction, 0).unwrap();
            let combinations = expand_reaction(&parsed, 1_000).unwrap();
            let distinct: IndexSet<String> = genes.into_iter().collect();
            prop_assert_eq!(combinations.len(), distinct.len());
            prop_assert!(combinations.iter().all(|c| c.len() == 1));
        }
    }
}
