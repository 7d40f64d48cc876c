//! Fingerprint command implementation.

use std::path::PathBuf;

use aegis_core::{Fingerprint, FingerprintRegistry};
use anyhow::Result;
use colored::Colorize;
use tracing::debug;

use crate::utils::read_input;

/// Execute the fingerprint command.
///
/// Files are processed in argument order; a file whose content matches an
/// earlier argument is flagged as a duplicate.
pub fn execute(files: Vec<PathBuf>) -> Result<()> {
    let registry = FingerprintRegistry::new();

    for file in &files {
        let content = read_input(file)?;
        let fingerprint = Fingerprint::of(&content);
        let is_duplicate = registry.check_and_register(fingerprint);

        debug!(fingerprint = %fingerprint, is_duplicate, "Fingerprinted file");

        if is_duplicate {
            println!("{}  {} {}", fingerprint, file.display(), "(duplicate)".yellow());
        } else {
            println!("{}  {}", fingerprint, file.display());
        }
    }

    debug!(distinct = registry.len(), total = files.len(), "Done");
    Ok(())
}
