use modcompletion_core::analysis::{analyze_database, AnalysisConfig, AnalysisConfigBuilder};
use modcompletion_core::io::definition_parse::{non_essential, parse_reaction};
use modcompletion_core::io::module_db::read_module_db_str;
use modcompletion_core::kegg_module::combination::expand_reaction as expand_parsed;
use modcompletion_core::kegg_module::completion::{CompletionRecord, GeneSet};

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

#[pyclass]
#[derive(Clone)]
struct PyCompletionRecord {
    #[pyo3(get)]
    code: String,
    #[pyo3(get)]
    name: String,
    #[pyo3(get)]
    highest_completion: f64,
    #[pyo3(get)]
    contributing_genes: Vec<String>,
    #[pyo3(get)]
    non_essential_present: Vec<String>,
    #[pyo3(get)]
    pathway: Vec<String>,
}

impl From<&CompletionRecord> for PyCompletionRecord {
    fn from(record: &CompletionRecord) -> Self {
        PyCompletionRecord {
            code: record.module_key.code.clone(),
            name: record.module_key.name.clone(),
            highest_completion: record.highest_completion,
            contributing_genes: record.contributing_genes.clone(),
            non_essential_present: record.non_essential_present.clone(),
            pathway: record.pathway.clone(),
        }
    }
}

#[pyclass]
struct PyBatchReport {
    #[pyo3(get)]
    records: Vec<PyCompletionRecord>,
    /// "code: error" for every module which could not be scored
    #[pyo3(get)]
    failures: Vec<String>,
    /// "code: ambiguity" for every ambiguous minus sequence
    #[pyo3(get)]
    flagged: Vec<String>,
}

/// Expand one reaction into every gene combination which satisfies it
#[pyfunction]
#[pyo3(signature = (reaction, max_combinations=None))]
fn expand_reaction(reaction: &str, max_combinations: Option<usize>) -> PyResult<Vec<Vec<String>>> {
    let limit = max_combinations.unwrap_or(AnalysisConfig::default().max_combinations);
    let (parsed, _) =
        parse_reaction(reaction, 0).map_err(|e| PyValueError::new_err(e.to_string()))?;
    expand_parsed(&parsed, limit).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Non-essential genes of one reaction, and descriptions of any ambiguous minus sequences
#[pyfunction]
fn find_non_essential(reaction: &str) -> PyResult<(Vec<String>, Vec<String>)> {
    let scan = non_essential::find_non_essential(reaction, 0)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok((
        scan.genes.into_iter().collect(),
        scan.ambiguities.iter().map(|a| a.to_string()).collect(),
    ))
}

/// Score every module of a text module database against the observed genes
#[pyfunction]
#[pyo3(signature = (database, observed, max_combinations=None, threads=None))]
fn score_modules(
    database: &str,
    observed: Vec<String>,
    max_combinations: Option<usize>,
    threads: Option<usize>,
) -> PyResult<PyBatchReport> {
    let database = read_module_db_str(database).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let observed: GeneSet = observed.into_iter().collect();
    let mut builder = AnalysisConfigBuilder::default();
    if let Some(limit) = max_combinations {
        builder.max_combinations(limit);
    }
    let config = builder
        .threads(threads)
        .build()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    let report = analyze_database(&database, &observed, &config)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(PyBatchReport {
        records: report.records.values().map(PyCompletionRecord::from).collect(),
        failures: report
            .failures
            .iter()
            .map(|f| format!("{}: {}", f.key.code, f.error))
            .collect(),
        flagged: report
            .flagged
            .iter()
            .flat_map(|f| {
                f.ambiguities
                    .iter()
                    .map(move |a| format!("{}: {}", f.key.code, a))
            })
            .collect(),
    })
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(expand_reaction, m)?)?;
    m.add_function(wrap_pyfunction!(find_non_essential, m)?)?;
    m.add_function(wrap_pyfunction!(score_modules, m)?)?;
    m.add_class::<PyCompletionRecord>()?;
    m.add_class::<PyBatchReport>()?;
    Ok(())
}
