//! Module providing JSON IO for module databases and batch reports
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::BatchReport;
use crate::io::definition_parse::non_essential::AmbiguousConstruct;
use crate::kegg_module::completion::CompletionRecord;
use crate::kegg_module::module::ModuleDatabase;

// region JSON Report
/// Represents a JSON serialized batch report
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct JsonReport {
    pub records: Vec<CompletionRecord>,
    pub failures: Vec<JsonFailure>,
    pub flagged: Vec<JsonFlagged>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct JsonFailure {
    pub code: String,
    pub name: String,
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct JsonFlagged {
    pub code: String,
    pub name: String,
    pub ambiguities: Vec<AmbiguousConstruct>,
}
// endregion JSON Report

// region Conversions
impl From<&BatchReport> for JsonReport {
    fn from(report: &BatchReport) -> Self {
        Self {
            records: report.records.values().cloned().collect(),
            failures: report
                .failures
                .iter()
                .map(|f| JsonFailure {
                    code: f.key.code.clone(),
                    name: f.key.name.clone(),
                    error: f.error.to_string(),
                })
                .collect(),
            flagged: report
                .flagged
                .iter()
                .map(|f| JsonFlagged {
                    code: f.key.code.clone(),
                    name: f.key.name.clone(),
                    ambiguities: f.ambiguities.clone(),
                })
                .collect(),
        }
    }
}

impl BatchReport {
    pub fn to_json_string(&self) -> Result<String, JsonError> {
        Ok(serde_json::to_string_pretty(&JsonReport::from(self))?)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

impl ModuleDatabase {
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<ModuleDatabase, JsonError> {
        let database_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        match serde_json::from_str::<ModuleDatabase>(&database_str) {
            Ok(database) => Ok(database),
            Err(err) => Err(JsonError::UnableToParse(format!("{:?}", err))),
        }
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let database_string = serde_json::to_string(self)?;
        fs::write(path, database_string)?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Serde json parse error")]
    SerdeJsonParseError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}
// endregion Conversions
