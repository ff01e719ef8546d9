//! Reader for a plain list of observed gene identifiers
//!
//! Identifiers may be separated by whitespace, commas or newlines. Text after a `#` is ignored.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::io::IoError;
use crate::kegg_module::completion::GeneSet;

/// Read observed genes from a file
pub fn read_gene_list<P: AsRef<Path>>(path: P) -> Result<GeneSet, IoError> {
    let file = File::open(path.as_ref()).map_err(|source| IoError::FileNotFound {
        path: path.as_ref().display().to_string(),
        source,
    })?;
    parse_gene_list(BufReader::new(file))
}

/// Read observed genes from any buffered reader
pub fn parse_gene_list<R: BufRead>(reader: R) -> Result<GeneSet, IoError> {
    let mut genes = GeneSet::new();
    for line in reader.lines() {
        let line = line?;
        let content = line.split('#').next().unwrap_or_default();
        genes.extend(
            content
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|g| !g.is_empty())
                .map(|g| g.to_string()),
        );
    }
    Ok(genes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gene_list() {
        let text = "# observed KO terms\nK00001\nK00002,K00003 K00004\n\nK00001 # repeated\n";
        let genes = parse_gene_list(text.as_bytes()).unwrap();
        let genes: Vec<&str> = genes.iter().map(|g| g.as_str()).collect();
        assert_eq!(genes, vec!["K00001", "K00002", "K00003", "K00004"]);
    }
}
