//src/types.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the annotation pipeline.
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// An input or output file could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Any other I/O failure while reading or writing.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A named-field view of one Diamond result row (outfmt 6 plus the
/// qcovhsp/scovhsp columns). All values are carried as text exactly as
/// they appeared in the file; nothing is parsed to a numeric type.
#[derive(Debug, Clone)]
pub struct HitAnnotation {
    /// Query ID truncated before the `_eAED:` score suffix.
    pub identifier: String,
    pub gene: String,
    pub species: String,
    pub swissprot_id: String,
    pub percent_identity: String,
    pub query_coverage: String,
    pub subject_coverage: String,
    pub evalue: String,
    /// The query column exactly as it appeared in the results file.
    pub raw_query: String,
}

impl HitAnnotation {
    /// Formats the replacement FASTA header for this hit.
    pub fn header(&self) -> String {
        format!(
            ">gene={}|sp={}|prot_%ID={}|prot_Qcov={}|prot_Scov={}|prot_eval={}|SPID={}|{}",
            self.gene,
            self.species,
            self.percent_identity,
            self.query_coverage,
            self.subject_coverage,
            self.evalue,
            self.swissprot_id,
            self.raw_query,
        )
    }
}

/// Per-file record counters returned by an annotation pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStats {
    /// Records whose identifier was found in the annotation map.
    pub annotated: u32,
    /// Records with no match, written with their bare identifier.
    pub unannotated: u32,
}

/// Input and output paths for one annotation run.
///
/// The defaults reproduce the fixed filenames of the original MAKER
/// post-processing pipeline, so `AnnotationConfig::default()` is a
/// drop-in replacement for it.
#[derive(Debug, Clone)]
pub struct AnnotationConfig {
    /// Diamond BLAST tabular results (plain or `.gz`).
    pub results_path: PathBuf,
    pub protein_input_path: PathBuf,
    pub protein_output_path: PathBuf,
    pub transcript_input_path: PathBuf,
    pub transcript_output_path: PathBuf,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from("diamond_results.tsv"),
            protein_input_path: PathBuf::from("maker_output.all.maker.proteins.fasta"),
            protein_output_path: PathBuf::from("final_annotated_proteins.fasta"),
            transcript_input_path: PathBuf::from("maker_output.all.maker.transcripts.fasta"),
            transcript_output_path: PathBuf::from("final_annotated_transcripts.fasta"),
        }
    }
}
