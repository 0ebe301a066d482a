use conflux_core::config::ParserConfig;
use conflux_core::error::ScheduleError;
use conflux_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), ScheduleError> {
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let parsed = conflux_core::parse_pdf(&pdf_bytes, &extractor, &ParserConfig::default())?;
    let payload = parsed.to_output();

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            std::fs::write(&path, output::json::format(&payload)?)?;
            eprintln!(
                "Parsed {} class(es), written to {}",
                payload.classes.len(),
                path.display()
            );
            if !parsed.diagnostics.skipped_tokens.is_empty() {
                eprintln!(
                    "  {} period token(s) matched no day column",
                    parsed.diagnostics.skipped_tokens.len()
                );
            }
        }
        None => match output_format {
            "table" => output::table::print(&parsed),
            _ => output::json::print(&payload)?,
        },
    }

    Ok(())
}
