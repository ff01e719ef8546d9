//! Score every module of a database against the genes observed in an organism
//!
//! Modules are independent of one another, so the database is scored as a parallel map over its
//! modules. A module which fails to parse or expand is reported in
//! [`BatchReport::failures`] and does not affect the others.
use derive_builder::Builder;
use indexmap::IndexMap;
use log::{debug, warn};
use rayon::prelude::*;
use thiserror::Error;

use crate::configuration::CONFIGURATION;
use crate::io::definition_parse::non_essential::AmbiguousConstruct;
use crate::kegg_module::combination::ModuleError;
use crate::kegg_module::completion::{CompletionRecord, GeneSet};
use crate::kegg_module::module::{ModuleDatabase, ModuleDefinition, ModuleKey};

/// Options for scoring a module database
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    /// Largest number of combinations a module may expand into
    #[builder(default = "CONFIGURATION.read().unwrap().max_combinations")]
    pub max_combinations: usize,
    /// Size of a dedicated thread pool, `None` runs on the global rayon pool
    #[builder(default = "CONFIGURATION.read().unwrap().threads")]
    pub threads: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let configuration = CONFIGURATION.read().unwrap();
        AnalysisConfig {
            max_combinations: configuration.max_combinations,
            threads: configuration.threads,
        }
    }
}

/// Module which could not be scored
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleFailure {
    pub key: ModuleKey,
    pub error: ModuleError,
}

/// Module which was scored, but contains minus sequences that were not interpreted
#[derive(Clone, Debug, PartialEq)]
pub struct FlaggedModule {
    pub key: ModuleKey,
    pub ambiguities: Vec<AmbiguousConstruct>,
}

/// Result of scoring a whole database
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchReport {
    /// Completion of every module which could be scored, keyed by module code, in database order
    pub records: IndexMap<String, CompletionRecord>,
    pub failures: Vec<ModuleFailure>,
    pub flagged: Vec<FlaggedModule>,
}

impl BatchReport {
    /// Records with a completion of at least `min_completion`
    pub fn records_at_least(
        &self,
        min_completion: f64,
    ) -> impl Iterator<Item = &CompletionRecord> {
        self.records
            .values()
            .filter(move |r| r.highest_completion >= min_completion)
    }

    /// Records of modules whose best combination is fully observed
    pub fn complete_modules(&self) -> impl Iterator<Item = &CompletionRecord> {
        self.records.values().filter(|r| r.is_complete())
    }
}

/// Parse, expand and score a single module
///
/// # Returns
/// The completion record, together with any ambiguous constructs found in the definition
pub fn analyze_module(
    definition: &ModuleDefinition,
    observed: &GeneSet,
    max_combinations: usize,
) -> Result<(CompletionRecord, Vec<AmbiguousConstruct>), ModuleError> {
    let analyzed = definition.analyze(max_combinations)?;
    let record = analyzed.score(observed);
    Ok((record, analyzed.ambiguities))
}

/// Score every module of `database` against `observed`
///
/// # Errors
/// Only fails if the dedicated thread pool requested by `config.threads` can not be built,
/// failures of individual modules are collected in the report.
///
/// # Examples
/// ```rust
/// use modcompletion_core::analysis::{analyze_database, AnalysisConfig};
/// use modcompletion_core::io::module_db::read_module_db_str;
/// use modcompletion_core::kegg_module::completion::GeneSet;
/// let database = read_module_db_str("M00001 Test\nK1 K2\nM00002 Broken\n(K3\n").unwrap();
/// let observed: GeneSet = ["K1".to_string()].into_iter().collect();
/// let report = analyze_database(&database, &observed, &AnalysisConfig::default()).unwrap();
/// assert_eq!(report.records["M00001"].highest_completion, 0.5);
/// assert_eq!(report.failures.len(), 1);
/// ```
pub fn analyze_database(
    database: &ModuleDatabase,
    observed: &GeneSet,
    config: &AnalysisConfig,
) -> Result<BatchReport, AnalysisError> {
    let outcomes = match config.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(|| score_all(database, observed, config.max_combinations)),
        None => score_all(database, observed, config.max_combinations),
    };

    let mut report = BatchReport::default();
    for (key, outcome) in outcomes {
        match outcome {
            Ok((record, ambiguities)) => {
                if !ambiguities.is_empty() {
                    report.flagged.push(FlaggedModule {
                        key: key.clone(),
                        ambiguities,
                    });
                }
                report.records.insert(key.code, record);
            }
            Err(error) => {
                warn!("Skipping module {}: {}", key, error);
                report.failures.push(ModuleFailure { key, error });
            }
        }
    }
    debug!(
        "Scored {} modules, {} failed, {} flagged",
        report.records.len(),
        report.failures.len(),
        report.flagged.len()
    );
    Ok(report)
}

type ModuleOutcome = (
    ModuleKey,
    Result<(CompletionRecord, Vec<AmbiguousConstruct>), ModuleError>,
);

fn score_all(
    database: &ModuleDatabase,
    observed: &GeneSet,
    max_combinations: usize,
) -> Vec<ModuleOutcome> {
    let definitions: Vec<&ModuleDefinition> = database.iter().collect();
    definitions
        .par_iter()
        .map(|definition| {
            (
                definition.key.clone(),
                analyze_module(definition, observed, max_combinations),
            )
        })
        .collect()
}

/// Enum representing failures of a whole database run
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to configure thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
