use indicatif::{ProgressBar, ProgressStyle};

use diamond_annotate_rs::{annotate_fasta_file, parse_annotations, AnnotationConfig};

fn stage_spinner(color: &str, msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template(&format!("{{spinner:.{color}}} {{msg}}"))
            .expect("Invalid spinner template"),
    );
    spinner.set_message(msg.to_string());
    spinner
}

fn main() {
    env_logger::init();

    let config = AnnotationConfig::default();

    // 1. Parse the Diamond BLAST results.
    let spinner = stage_spinner("blue", "Reading Diamond BLAST results...");
    let annotations = parse_annotations(&config.results_path)
        .expect("Could not read Diamond results");
    spinner.finish_with_message(format!(
        "Loaded {} annotations from Diamond results.",
        annotations.len()
    ));
    println!();

    // 2. Independent map copies so unannotated IDs found in one file
    //    never affect the other.
    let mut protein_annotations = annotations.clone();
    let mut transcript_annotations = annotations;

    // 3. Annotate the protein sequences.
    let spinner = stage_spinner("green", "Processing protein FASTA file...");
    let protein = annotate_fasta_file(
        &config.protein_input_path,
        &config.protein_output_path,
        &mut protein_annotations,
        "Protein",
    )
    .expect("Could not annotate protein FASTA");
    spinner.finish_with_message("Processing protein FASTA file... done.");

    println!("Protein sequences with Diamond annotations: {}", protein.annotated);
    println!("Protein sequences with no Diamond annotation: {}", protein.unannotated);
    println!();

    // 4. Annotate the transcript sequences.
    let spinner = stage_spinner("yellow", "Processing transcript FASTA file...");
    let transcript = annotate_fasta_file(
        &config.transcript_input_path,
        &config.transcript_output_path,
        &mut transcript_annotations,
        "Transcript",
    )
    .expect("Could not annotate transcript FASTA");
    spinner.finish_with_message("Processing transcript FASTA file... done.");

    println!("Transcript sequences with Diamond annotations: {}", transcript.annotated);
    println!("Transcript sequences with no Diamond annotation: {}", transcript.unannotated);

    println!("\nAnnotation complete!");
}
