//! This module provides the ModuleDefinition struct, representing one KEGG module, and the
//! ModuleDatabase holding every module definition
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::io::definition_parse::non_essential::AmbiguousConstruct;
use crate::io::definition_parse::{parse_reaction, GrammarError};
use crate::kegg_module::combination::{combine, expand_reaction, Combination, ModuleError};
use crate::kegg_module::completion::{score, CompletionRecord, GeneSet};

/// Identifies a module by its code (e.g. `M00001`) and its human readable name
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ModuleKey {
    pub code: String,
    pub name: String,
}

impl ModuleKey {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        ModuleKey {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Split a header such as `M00001 Glycolysis (Embden-Meyerhof pathway)` on its first
    /// whitespace into code and name
    pub fn parse(header: &str) -> Self {
        let header = header.trim();
        match header.split_once(char::is_whitespace) {
            Some((code, name)) => ModuleKey::new(code, name.trim()),
            None => ModuleKey::new(header, ""),
        }
    }
}

impl Display for ModuleKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} {}", self.code, self.name)
        }
    }
}

/// Definition of a module: reactions which must all be satisfied
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    pub key: ModuleKey,
    /// Raw reaction strings, in database order
    pub reactions: Vec<String>,
}

impl ModuleDefinition {
    pub fn new(key: ModuleKey, reactions: Vec<String>) -> Self {
        ModuleDefinition { key, reactions }
    }

    /// Parse and expand every reaction, and combine them into the combinations of the module
    ///
    /// # Parameters
    /// - `limit`: largest number of combinations allowed at any step
    ///
    /// # Errors
    /// Returns [`ModuleError`] if the module has no reactions, a reaction is malformed, or the
    /// combinations grow beyond `limit`. Ambiguous minus sequences are not errors, they are
    /// collected in [`AnalyzedModule::ambiguities`].
    pub fn analyze(&self, limit: usize) -> Result<AnalyzedModule, ModuleError> {
        if self.reactions.is_empty() {
            return Err(ModuleError::Grammar(GrammarError::EmptyDefinition));
        }
        let mut non_essential = GeneSet::new();
        let mut ambiguities = Vec::new();
        let mut reaction_combinations = Vec::with_capacity(self.reactions.len());

        for (index, reaction) in self.reactions.iter().enumerate() {
            let (parsed, scan) = parse_reaction(reaction, index)
                .map_err(|source| ModuleError::InvalidReaction { index, source })?;
            non_essential.extend(scan.genes);
            for ambiguity in &scan.ambiguities {
                warn!("{}: ambiguous construct in {}", self.key.code, ambiguity);
            }
            ambiguities.extend(scan.ambiguities);
            reaction_combinations
                .push(expand_reaction(&parsed, limit).map_err(|e| e.in_reaction(index))?);
        }

        let combinations = combine(&reaction_combinations, limit)?;
        debug!(
            "{}: {} combinations, {} non-essential genes",
            self.key.code,
            combinations.len(),
            non_essential.len()
        );
        Ok(AnalyzedModule {
            key: self.key.clone(),
            combinations,
            non_essential,
            ambiguities,
        })
    }
}

/// A module expanded into its combinations
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyzedModule {
    pub key: ModuleKey,
    pub combinations: Vec<Combination>,
    /// Genes marked non-essential anywhere in the module
    pub non_essential: GeneSet,
    pub ambiguities: Vec<AmbiguousConstruct>,
}

impl AnalyzedModule {
    /// Score the combinations of the module against the observed genes
    pub fn score(&self, observed: &GeneSet) -> CompletionRecord {
        score(
            self.key.clone(),
            &self.combinations,
            &self.non_essential,
            observed,
        )
    }
}

/// Collection of module definitions, keyed by module code
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleDatabase {
    pub modules: IndexMap<String, ModuleDefinition>,
}

impl ModuleDatabase {
    pub fn new_empty() -> Self {
        ModuleDatabase {
            modules: IndexMap::new(),
        }
    }

    /// Add a module to the database
    ///
    /// If a module with the same code already exists, the reactions are appended to it
    ///
    /// # Examples
    /// ```rust
    /// use modcompletion_core::kegg_module::module::{ModuleDatabase, ModuleDefinition, ModuleKey};
    /// let mut database = ModuleDatabase::new_empty();
    /// let key = ModuleKey::parse("M00001 Glycolysis");
    /// database.add_module(ModuleDefinition::new(key, vec!["K00844 K01810".to_string()]));
    /// assert_eq!(database.len(), 1);
    /// ```
    pub fn add_module(&mut self, module: ModuleDefinition) {
        match self.modules.get_mut(&module.key.code) {
            Some(existing) => existing.reactions.extend(module.reactions),
            None => {
                self.modules.insert(module.key.code.clone(), module);
            }
        }
    }

    pub fn get(&self, code: &str) -> Option<&ModuleDefinition> {
        self.modules.get(code)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleDefinition> {
        self.modules.values()
    }
}
