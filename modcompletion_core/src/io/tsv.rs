//! Writer for completion tables
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analysis::BatchReport;
use crate::kegg_module::completion::CompletionRecord;

pub const HEADER: &str =
    "#Entry\tName\tHighest_completion\tMost_complete_pathway\tNon-essential_genes_found";

/// Format one record as a table row (without the line ending)
pub fn format_row(record: &CompletionRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        record.module_key.code,
        record.module_key.name,
        record.rounded_completion(),
        record.contributing_genes_string(),
        record.non_essential_string()
    )
}

/// Write every record with a completion of at least `min_completion`
///
/// A `min_completion` of 0 writes every scored module, 1 writes only complete modules.
pub fn write_completion_tsv<W: Write>(
    writer: &mut W,
    report: &BatchReport,
    min_completion: f64,
) -> Result<(), std::io::Error> {
    writeln!(writer, "{}", HEADER)?;
    for record in report.records_at_least(min_completion) {
        writeln!(writer, "{}", format_row(record))?;
    }
    Ok(())
}

pub fn write_completion_tsv_file<P: AsRef<Path>>(
    path: P,
    report: &BatchReport,
    min_completion: f64,
) -> Result<(), std::io::Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_completion_tsv(&mut writer, report, min_completion)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_database, AnalysisConfig};
    use crate::io::module_db::read_module_db_str;
    use crate::kegg_module::completion::GeneSet;

    fn report() -> BatchReport {
        let database = read_module_db_str(
            "M00001 Glycolysis\nK1 K2 K3 -K4\nM00002 Other pathway\nK5\n",
        )
        .unwrap();
        let observed: GeneSet = ["K1", "K4", "K5"].iter().map(|g| g.to_string()).collect();
        analyze_database(&database, &observed, &AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_rows() {
        let report = report();
        assert_eq!(
            format_row(&report.records["M00001"]),
            "M00001\tGlycolysis\t0.333\tK1\tK4"
        );
        assert_eq!(
            format_row(&report.records["M00002"]),
            "M00002\tOther pathway\t1\tK5\tNone"
        );
    }

    #[test]
    fn test_min_completion_filter() {
        let mut out: Vec<u8> = Vec::new();
        write_completion_tsv(&mut out, &report(), 1.0).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].starts_with("M00002\t"));
    }

    #[test]
    fn test_write_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        write_completion_tsv_file(file.path(), &report(), 0.0).unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            text,
            format!(
                "{}\nM00001\tGlycolysis\t0.333\tK1\tK4\nM00002\tOther pathway\t1\tK5\tNone\n",
                HEADER
            )
        );
    }
}
