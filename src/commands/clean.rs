//! Clean the static export directory

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Delete the freeze output directory
pub fn run(folio: &Folio) -> Result<()> {
    if folio.freeze_dir.exists() {
        fs::remove_dir_all(&folio.freeze_dir)?;
        tracing::info!("Deleted: {:?}", folio.freeze_dir);
    }
    Ok(())
}
