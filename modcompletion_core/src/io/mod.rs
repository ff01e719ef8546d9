//! Module for reading module databases and observed genes, and writing completion results
use thiserror::Error;

pub mod definition_parse;
pub mod gene_list;
pub mod json;
pub mod module_db;
pub mod tsv;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("Unable to open {path}: {source}")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to read input: {0}")]
    Read(#[from] std::io::Error),
}
