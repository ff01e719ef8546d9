use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

/// Process wide defaults, used when an [`AnalysisConfig`](crate::analysis::AnalysisConfig) is
/// built without setting a value
#[derive(Clone, Debug)]
pub struct Configuration {
    /// Largest number of combinations a module may expand into
    pub max_combinations: usize,
    /// Number of worker threads for database scoring, `None` uses the rayon default
    pub threads: Option<usize>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            max_combinations: 100_000,
            threads: None,
        }
    }
}
