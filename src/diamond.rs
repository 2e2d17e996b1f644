//src/diamond.rs

use std::io::BufRead;
use std::path::Path;

use ahash::AHashMap;

use crate::fasta::open_text;
use crate::types::{AnnotationError, HitAnnotation};

/// Maps a sequence identifier to its formatted replacement header.
///
/// After an annotation pass the map also holds self-referential
/// entries (identifier -> identifier) for records that had no hit.
pub type AnnotationMap = AHashMap<String, String>;

/// Diamond outfmt 6 column layout with the two appended coverage
/// columns (qcovhsp, scovhsp). The parser is tied to this exact order;
/// a schema change is a one-line update here.
pub const COL_QUERY: usize = 0;
pub const COL_SUBJECT: usize = 1;
pub const COL_PIDENT: usize = 2;
pub const COL_EVALUE: usize = 10;
pub const COL_QCOV: usize = 12;
pub const COL_SCOV: usize = 13;

/// Minimum field count for a usable results line.
pub const MIN_FIELDS: usize = 14;

/// Marker separating the sequence ID from the MAKER eAED score in the
/// query column, e.g. `snap_masked-scf1-abinit-gene-0.1_eAED:0.07`.
const AED_MARKER: &str = "_eAED:";

/// Species label for hits outside Swiss-Prot (YEAST ORF database).
const FALLBACK_SPECIES: &str = "YEAST";
const NO_SWISSPROT_ID: &str = "NA";

/// Parses one results line into a `HitAnnotation`.
///
/// Returns `None` when the line has fewer than [`MIN_FIELDS`]
/// tab-separated fields.
pub fn parse_result_line(line: &str) -> Option<HitAnnotation> {
    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let raw_query = fields[COL_QUERY];
    let identifier = raw_query
        .split(AED_MARKER)
        .next()
        .unwrap_or(raw_query)
        .to_string();

    let subject = fields[COL_SUBJECT];
    let (gene, species, swissprot_id) = if subject.contains("sp|") {
        // Swiss-Prot subject, e.g. "sp|P12345|ABC_HUMAN": the segment
        // after the marker is the accession, the next is GENE_SPECIES.
        let mut segments = subject.split('|');
        segments.next();
        let accession = segments.next().unwrap_or("");
        let mut name = segments.next().unwrap_or("").splitn(2, '_');
        let gene = name.next().unwrap_or("").to_string();
        let species = name.next().unwrap_or("").to_string();
        (gene, species, accession.to_string())
    } else {
        (
            subject.to_string(),
            FALLBACK_SPECIES.to_string(),
            NO_SWISSPROT_ID.to_string(),
        )
    };

    Some(HitAnnotation {
        identifier,
        gene,
        species,
        swissprot_id,
        percent_identity: fields[COL_PIDENT].to_string(),
        query_coverage: fields[COL_QCOV].to_string(),
        subject_coverage: fields[COL_SCOV].to_string(),
        evalue: fields[COL_EVALUE].to_string(),
        raw_query: raw_query.to_string(),
    })
}

/// Reads a Diamond results file (plain or `.gz`) and builds the
/// annotation map.
///
/// There is no header row; every line is a hit. Lines with too few
/// fields are logged with their line number and skipped. Later lines
/// sharing an identifier silently overwrite earlier ones, so the last
/// hit per identifier wins.
pub fn parse_annotations<P: AsRef<Path>>(path: P) -> Result<AnnotationMap, AnnotationError> {
    let path = path.as_ref();
    let reader = open_text(path)?;

    let mut annotations: AnnotationMap = AHashMap::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        match parse_result_line(&line) {
            Some(hit) => {
                annotations.insert(hit.identifier.clone(), hit.header());
            }
            None => {
                log::warn!(
                    "{}: line {} has fewer than {} tab-separated fields, skipping",
                    path.display(),
                    idx + 1,
                    MIN_FIELDS
                );
            }
        }
    }
    Ok(annotations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// A 14-column results line; only the columns the parser reads
    /// carry meaningful values.
    fn results_line(query: &str, subject: &str) -> String {
        format!("{query}\t{subject}\t95.0\t100\t5\t0\t1\t100\t1\t100\t1e-50\t200.0\t88\t90")
    }

    #[test]
    fn swissprot_hit_yields_gene_species_and_accession() {
        let hit = parse_result_line(&results_line("Q1_eAED:0.1", "sp|P12345|ABC_HUMAN")).unwrap();
        assert_eq!(hit.identifier, "Q1");
        assert_eq!(hit.gene, "ABC");
        assert_eq!(hit.species, "HUMAN");
        assert_eq!(hit.swissprot_id, "P12345");
    }

    #[test]
    fn non_swissprot_hit_falls_back_to_yeast_label() {
        let hit = parse_result_line(&results_line("Q2", "YGR192C")).unwrap();
        assert_eq!(hit.identifier, "Q2");
        assert_eq!(hit.gene, "YGR192C");
        assert_eq!(hit.species, "YEAST");
        assert_eq!(hit.swissprot_id, "NA");
    }

    #[test]
    fn identifier_without_aed_marker_is_kept_whole() {
        let hit = parse_result_line(&results_line("gene-0.12-mRNA-1", "YGR192C")).unwrap();
        assert_eq!(hit.identifier, "gene-0.12-mRNA-1");
    }

    #[test]
    fn header_matches_expected_layout() {
        let hit = parse_result_line(&results_line("Q1_eAED:0.1", "sp|P12345|ABC_HUMAN")).unwrap();
        assert_eq!(
            hit.header(),
            ">gene=ABC|sp=HUMAN|prot_%ID=95.0|prot_Qcov=88|prot_Scov=90|prot_eval=1e-50|SPID=P12345|Q1_eAED:0.1"
        );
    }

    #[test]
    fn short_line_is_rejected() {
        assert!(parse_result_line("Q1\tsp|P12345|ABC_HUMAN\t95.0").is_none());
    }

    #[test]
    fn one_entry_per_identifier_and_last_line_wins() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", results_line("Q1_eAED:0.1", "sp|P11111|AAA_HUMAN")).unwrap();
        writeln!(file, "{}", results_line("Q2_eAED:0.2", "sp|P22222|BBB_MOUSE")).unwrap();
        writeln!(file, "{}", results_line("Q1_eAED:0.1", "sp|P33333|CCC_BOVIN")).unwrap();

        let map = parse_annotations(file.path()).unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.get("Q1").unwrap().contains("SPID=P33333"));
        assert!(map.get("Q2").unwrap().contains("SPID=P22222"));
    }

    #[test]
    fn malformed_line_is_skipped_not_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "too\tshort").unwrap();
        writeln!(file, "{}", results_line("Q1", "sp|P12345|ABC_HUMAN")).unwrap();

        let map = parse_annotations(file.path()).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("Q1"));
    }

    #[test]
    fn missing_results_file_is_fatal() {
        let err = parse_annotations("no_such_results.tsv").unwrap_err();
        assert!(matches!(err, AnnotationError::OpenFile { .. }));
    }
}
