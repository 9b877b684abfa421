//! File organization command.

use std::path::Path;

use crate::metadata::LoftyTags;
use crate::organizer::{self, OrganizeRequest};

/// Copy a flat folder into artist/album folders based on tags
pub fn cmd_organize(
    root: &Path,
    new_root: &Path,
    input: &Path,
    output: &Path,
    delimiter: char,
    dry_run: bool,
) -> anyhow::Result<()> {
    let request = OrganizeRequest {
        root: root.to_path_buf(),
        new_root: new_root.to_path_buf(),
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        delimiter,
        dry_run,
    };

    println!("Organizing {} into {}", root.display(), new_root.display());
    if dry_run {
        println!("\n[DRY RUN MODE - No files will be copied]\n");
    }

    let copies = organizer::organize_playlist(&request, &LoftyTags)?;

    for copy in &copies {
        let verb = if dry_run { "WOULD COPY" } else { "COPIED" };
        println!(
            "{}: {} -> {}",
            verb,
            copy.source.display(),
            copy.destination.display()
        );
    }

    println!("\nCompleted: {} files", copies.len());
    if !dry_run {
        println!("Playlist written to {}", output.display());
    }
    Ok(())
}
