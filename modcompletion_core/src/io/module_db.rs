//! Reader for the plain text module database
//!
//! Two layouts are accepted, and may be mixed:
//! ```text
//! # bare layout: a header line starting with the module code, then one reaction per line
//! M00001 Glycolysis (Embden-Meyerhof pathway)
//! (K00844,K12407,K00845) (K01810,K06859)
//!
//! # tagged layout
//! Module: M00002 Glycolysis, core module involving three-carbon compounds
//! Definition: K01803 ((K00134,K00150) K00927,K11389)
//! ```
//!
//! In the bare layout any line whose first token is `M` followed by digits starts a new module.
//! Modules whose reactions reference other modules (e.g. `M00161 M00163 M00165`) must use the
//! tagged layout.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::io::IoError;
use crate::kegg_module::module::{ModuleDatabase, ModuleDefinition, ModuleKey};

const MODULE_TAG: &str = "Module:";
const DEFINITION_TAG: &str = "Definition:";

/// Read a module database file
pub fn read_module_db<P: AsRef<Path>>(path: P) -> Result<ModuleDatabase, ModuleDbError> {
    let file = File::open(path.as_ref()).map_err(|source| IoError::FileNotFound {
        path: path.as_ref().display().to_string(),
        source,
    })?;
    parse_module_db(BufReader::new(file))
}

/// Read a module database held in a string
pub fn read_module_db_str(text: &str) -> Result<ModuleDatabase, ModuleDbError> {
    parse_module_db(text.as_bytes())
}

/// Read a module database from any buffered reader
pub fn parse_module_db<R: BufRead>(reader: R) -> Result<ModuleDatabase, ModuleDbError> {
    let mut database = ModuleDatabase::new_empty();
    let mut current: Option<ModuleDefinition> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(IoError::from)?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix(MODULE_TAG) {
            start_module(&mut database, &mut current, header);
        } else if let Some(reaction) = line.strip_prefix(DEFINITION_TAG) {
            push_reaction(&mut current, reaction, index + 1)?;
        } else if is_bare_header(line) {
            start_module(&mut database, &mut current, line);
        } else {
            push_reaction(&mut current, line, index + 1)?;
        }
    }
    if let Some(module) = current.take() {
        database.add_module(module);
    }
    Ok(database)
}

fn start_module(
    database: &mut ModuleDatabase,
    current: &mut Option<ModuleDefinition>,
    header: &str,
) {
    if let Some(module) = current.take() {
        database.add_module(module);
    }
    *current = Some(ModuleDefinition::new(ModuleKey::parse(header), Vec::new()));
}

fn push_reaction(
    current: &mut Option<ModuleDefinition>,
    reaction: &str,
    line: usize,
) -> Result<(), ModuleDbError> {
    match current {
        Some(module) => {
            module.reactions.push(reaction.trim().to_string());
            Ok(())
        }
        None => Err(ModuleDbError::DefinitionWithoutModule { line }),
    }
}

/// A module code is an `M` followed by digits, e.g. `M00001`
fn is_bare_header(line: &str) -> bool {
    let code = line.split_whitespace().next().unwrap_or_default();
    let mut chars = code.chars();
    chars.next() == Some('M') && {
        let digits = chars.as_str();
        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
    }
}

#[derive(Debug, Error)]
pub enum ModuleDbError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("Definition on line {line} does not belong to any module")]
    DefinitionWithoutModule { line: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_layout() {
        let text = "# KEGG modules\n\
                    M00001 Glycolysis (Embden-Meyerhof pathway)\n\
                    (K00844,K12407,K00845) (K01810,K06859)\n\
                    \n\
                    M00002 Two reactions\n\
                    K01803\n\
                    K00134 -K00927\n";
        let database = read_module_db_str(text).unwrap();
        assert_eq!(database.len(), 2);
        let first = database.get("M00001").unwrap();
        assert_eq!(first.key.name, "Glycolysis (Embden-Meyerhof pathway)");
        assert_eq!(first.reactions, vec!["(K00844,K12407,K00845) (K01810,K06859)"]);
        assert_eq!(database.get("M00002").unwrap().reactions.len(), 2);
    }

    #[test]
    fn test_tagged_layout() {
        let text = "Module: M00003 Gluconeogenesis\n\
                    Definition: K01596 K01689\n\
                    Definition: K03841\n";
        let database = read_module_db_str(text).unwrap();
        let module = database.get("M00003").unwrap();
        assert_eq!(module.key.to_string(), "M00003 Gluconeogenesis");
        assert_eq!(module.reactions, vec!["K01596 K01689", "K03841"]);
    }

    #[test]
    fn test_module_references_need_tagged_layout() {
        let tagged = "Module: M00611 Oxygenic photosynthesis\n\
                      Definition: M00161 M00163 M00165\n";
        let database = read_module_db_str(tagged).unwrap();
        assert_eq!(database.len(), 1);
        assert_eq!(
            database.get("M00611").unwrap().reactions,
            vec!["M00161 M00163 M00165"]
        );

        let bare = "M00611 Oxygenic photosynthesis\nM00161 M00163 M00165\n";
        let database = read_module_db_str(bare).unwrap();
        assert_eq!(database.len(), 2);
        assert!(database.get("M00611").unwrap().reactions.is_empty());
    }

    #[test]
    fn test_repeated_module_appends() {
        let text = "M00004 A\nK1\nM00005 B\nK2\nM00004 A\nK3\n";
        let database = read_module_db_str(text).unwrap();
        let keys: Vec<&String> = database.modules.keys().collect();
        assert_eq!(keys, vec!["M00004", "M00005"]);
        assert_eq!(database.get("M00004").unwrap().reactions, vec!["K1", "K3"]);
    }

    #[test]
    fn test_definition_without_module() {
        match read_module_db_str("# header\nK00001 K00002\n") {
            Err(ModuleDbError::DefinitionWithoutModule { line }) => assert_eq!(line, 2),
            _ => panic!("Should have failed"),
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_module_db("/nonexistent/modules.txt"),
            Err(ModuleDbError::Io(IoError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_bare_header_detection() {
        assert!(is_bare_header("M00001 Glycolysis"));
        assert!(is_bare_header("M12"));
        assert!(!is_bare_header("MK0001"));
        assert!(!is_bare_header("K00001 M00001"));
    }
}
