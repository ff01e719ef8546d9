//! This module provides the CompletionRecord struct, and the scoring of a module's combinations
//! against the genes observed in an organism
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::kegg_module::combination::Combination;
use crate::kegg_module::module::ModuleKey;

/// Set of gene identifiers, kept in insertion order
pub type GeneSet = IndexSet<String>;

/// Best completion found for one module
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub module_key: ModuleKey,
    /// Fraction (0-1) of the essential genes of the best combination which were observed
    pub highest_completion: f64,
    /// Essential genes of the best combination which were observed
    pub contributing_genes: Vec<String>,
    /// Every non-essential gene of the module which was observed, in any combination
    pub non_essential_present: Vec<String>,
    /// All essential genes of the best combination
    pub pathway: Vec<String>,
}

impl CompletionRecord {
    /// Completion rounded to three decimals, for display
    pub fn rounded_completion(&self) -> f64 {
        (self.highest_completion * 1000.0).round() / 1000.0
    }

    /// Whether every essential gene of the best combination was observed
    pub fn is_complete(&self) -> bool {
        self.highest_completion >= 1.0
    }

    /// Contributing genes joined by commas
    pub fn contributing_genes_string(&self) -> String {
        self.contributing_genes.join(",")
    }

    /// Observed non-essential genes joined by commas, or "None" if there are none
    pub fn non_essential_string(&self) -> String {
        if self.non_essential_present.is_empty() {
            return "None".to_string();
        }
        self.non_essential_present.join(",")
    }
}

/// Find the combination of a module best supported by the observed genes
///
/// Non-essential genes stay in the combinations, but are left out of both the numerator and the
/// denominator of the completion. A combination made only of non-essential genes is considered
/// complete. Ties keep the combination which came first.
///
/// # Examples
/// ```rust
/// use modcompletion_core::kegg_module::completion::{score, GeneSet};
/// use modcompletion_core::kegg_module::module::ModuleKey;
/// let combinations = vec![vec!["K1".to_string(), "K2".to_string(), "K3".to_string()]];
/// let non_essential: GeneSet = ["K3".to_string()].into_iter().collect();
/// let observed: GeneSet = ["K1".to_string()].into_iter().collect();
/// let record = score(ModuleKey::new("M00001", ""), &combinations, &non_essential, &observed);
/// assert_eq!(record.highest_completion, 0.5);
/// assert_eq!(record.contributing_genes, vec!["K1"]);
/// ```
pub fn score(
    module_key: ModuleKey,
    combinations: &[Combination],
    non_essential: &GeneSet,
    observed: &GeneSet,
) -> CompletionRecord {
    let mut non_essential_present: GeneSet = GeneSet::new();
    let mut best: Option<(f64, Vec<String>, Vec<String>)> = None;

    for combination in combinations {
        let mut essential: GeneSet = GeneSet::new();
        for gene in combination {
            if non_essential.contains(gene) {
                if observed.contains(gene) {
                    non_essential_present.insert(gene.clone());
                }
            } else {
                essential.insert(gene.clone());
            }
        }

        let present: Vec<String> = essential
            .iter()
            .filter(|g| observed.contains(*g))
            .cloned()
            .collect();
        let completion = if essential.is_empty() {
            1.0
        } else {
            present.len() as f64 / essential.len() as f64
        };

        let improves = match &best {
            Some((highest, _, _)) => completion > *highest,
            None => true,
        };
        if improves {
            best = Some((completion, present, essential.into_iter().collect()));
        }
    }

    let (highest_completion, contributing_genes, pathway) =
        best.unwrap_or((0.0, Vec::new(), Vec::new()));
    CompletionRecord {
        module_key,
        highest_completion,
        contributing_genes,
        non_essential_present: non_essential_present.into_iter().collect(),
        pathway,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ModuleKey {
        ModuleKey::new("M00001", "Test module")
    }

    fn set(genes: &[&str]) -> GeneSet {
        genes.iter().map(|g| g.to_string()).collect()
    }

    fn combination(genes: &[&str]) -> Combination {
        genes.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn test_non_essential_leaves_denominator() {
        let record = score(
            key(),
            &[combination(&["K1", "K2", "K3"])],
            &set(&["K3"]),
            &set(&["K1"]),
        );
        assert_eq!(record.highest_completion, 0.5);
        assert_eq!(record.contributing_genes, vec!["K1"]);
        assert_eq!(record.pathway, vec!["K1", "K2"]);
        assert!(record.non_essential_present.is_empty());
        assert_eq!(record.non_essential_string(), "None");
    }

    #[test]
    fn test_best_combination() {
        let record = score(
            key(),
            &[combination(&["K1", "K2"]), combination(&["K1", "K3"])],
            &GeneSet::new(),
            &set(&["K1", "K3"]),
        );
        assert_eq!(record.highest_completion, 1.0);
        assert_eq!(record.contributing_genes, vec!["K1", "K3"]);
        assert!(record.is_complete());
    }

    #[test]
    fn test_ties_keep_first() {
        let record = score(
            key(),
            &[combination(&["K1", "K2"]), combination(&["K3", "K4"])],
            &GeneSet::new(),
            &set(&["K1", "K4"]),
        );
        assert_eq!(record.highest_completion, 0.5);
        assert_eq!(record.contributing_genes, vec!["K1"]);
    }

    #[test]
    fn test_only_non_essential_is_complete() {
        let record = score(
            key(),
            &[combination(&["K1"])],
            &set(&["K1"]),
            &GeneSet::new(),
        );
        assert_eq!(record.highest_completion, 1.0);
        assert!(record.contributing_genes.is_empty());
    }

    #[test]
    fn test_non_essential_collected_from_every_combination() {
        let record = score(
            key(),
            &[
                combination(&["K1", "K2", "K5"]),
                combination(&["K3", "K6", "K5"]),
            ],
            &set(&["K5", "K6"]),
            &set(&["K1", "K2", "K5", "K6"]),
        );
        assert_eq!(record.highest_completion, 1.0);
        assert_eq!(record.contributing_genes, vec!["K1", "K2"]);
        assert_eq!(record.non_essential_present, vec!["K5", "K6"]);
        assert_eq!(record.non_essential_string(), "K5,K6");
    }

    #[test]
    fn test_duplicate_genes_collapse() {
        let record = score(
            key(),
            &[combination(&["K1", "K2", "K1", "K3", "K3"])],
            &set(&["K3"]),
            &set(&["K1"]),
        );
        assert_eq!(record.pathway, vec!["K1", "K2"]);
        assert_eq!(record.highest_completion, 0.5);
    }

    #[test]
    fn test_no_combinations() {
        let record = score(key(), &[], &GeneSet::new(), &set(&["K1"]));
        assert_eq!(record.highest_completion, 0.0);
        assert!(record.pathway.is_empty());
    }

    #[test]
    fn test_rounding() {
        let record = score(
            key(),
            &[combination(&["K1", "K2", "K3"])],
            &GeneSet::new(),
            &set(&["K1"]),
        );
        assert_eq!(record.rounded_completion(), 0.333);
        assert_eq!(record.contributing_genes_string(), "K1");
    }
}
