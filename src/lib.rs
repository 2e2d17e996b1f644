// src/lib.rs
pub mod diamond;
pub mod fasta;
pub mod types;

pub use crate::diamond::{parse_annotations, AnnotationMap};
pub use crate::fasta::annotate_fasta_file;
pub use crate::types::{AnnotationConfig, AnnotationError, FileStats, HitAnnotation};

/// Summary of one full annotation run.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationOutcome {
    /// Entries loaded from the Diamond results file.
    pub annotations_loaded: usize,
    pub protein: FileStats,
    pub transcript: FileStats,
}

/// Runs the whole pipeline: parse the Diamond results once, then
/// annotate the protein and transcript FASTA files.
///
/// Each pass works on its own copy of the annotation map, so the
/// self-referential entries inserted for unannotated protein records
/// never leak into the transcript pass, and vice versa.
pub fn annotate_files(config: &AnnotationConfig) -> Result<AnnotationOutcome, AnnotationError> {
    // 1. Build the base annotation map.
    let annotations = parse_annotations(&config.results_path)?;
    log::info!(
        "Loaded {} annotations from {}",
        annotations.len(),
        config.results_path.display()
    );

    // 2. Independent copies, one per file type.
    let mut protein_annotations = annotations.clone();
    let mut transcript_annotations = annotations.clone();

    // 3. Protein pass.
    let protein = annotate_fasta_file(
        &config.protein_input_path,
        &config.protein_output_path,
        &mut protein_annotations,
        "Protein",
    )?;

    // 4. Transcript pass.
    let transcript = annotate_fasta_file(
        &config.transcript_input_path,
        &config.transcript_output_path,
        &mut transcript_annotations,
        "Transcript",
    )?;

    Ok(AnnotationOutcome {
        annotations_loaded: annotations.len(),
        protein,
        transcript,
    })
}
