//! Playlist repair command.

use std::path::Path;
use tracing::info;

use crate::prompt::{ConsolePrompt, InterruptFlag};
use crate::reconcile::{self, ReconcileRequest};

/// Verify a playlist against the library, asking about broken entries
pub fn cmd_find_missing(
    root: &Path,
    input: &Path,
    output: &Path,
    delimiter: char,
    sort_candidates: bool,
) -> anyhow::Result<()> {
    let request = ReconcileRequest {
        root: root.to_path_buf(),
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        delimiter,
        sort_candidates,
    };

    let interrupt = InterruptFlag::install()?;
    let mut prompt = ConsolePrompt::new();

    match reconcile::reconcile_playlist(&request, &mut prompt, interrupt) {
        Ok(summary) => {
            println!(
                "\nCompleted: {} entries, {} unchanged, {} corrected",
                summary.total, summary.unchanged, summary.corrected
            );
            println!("Written to {}", output.display());
            Ok(())
        }
        Err(e) if e.is_interrupt() => {
            info!("Keyboard interrupt received");
            eprintln!(
                "\nInterrupted. {} holds the entries finished so far.",
                output.display()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
