//! The "generated by pim" marker written at the top of concatenated outputs.
//!
//! A concat output that starts with this marker was produced by an earlier
//! run and may be replaced without asking the user.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::frontmatter;

/// Identifier recorded under `generatedBy`
pub const GENERATED_BY: &str = "github.com/hubblew/pim-cli";

#[derive(Debug, Serialize, Deserialize)]
struct MarkerHeader {
    #[serde(rename = "generatedBy", default)]
    generated_by: String,
}

/// Check whether the file at `path` carries the pim generation marker
pub fn is_generated(path: &Path) -> std::io::Result<bool> {
    let file = File::open(path)?;
    let header: Option<MarkerHeader> = frontmatter::read_frontmatter(BufReader::new(file))?;
    Ok(header.is_some_and(|h| h.generated_by == GENERATED_BY))
}

/// Write the generation marker block
pub fn write_marker<W: Write>(writer: W) -> std::io::Result<()> {
    frontmatter::write_frontmatter(
        writer,
        &MarkerHeader {
            generated_by: GENERATED_BY.to_string(),
        },
    )
}
