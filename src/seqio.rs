//! Template import for **FASTA / FASTQ / (.gz)**.
//!
//! ### Design
//! - Parsed with `needletail`, which sniffs the format and compression from the content.
//! - Only the **first** record is used; a primer design runs on one template.
//! - Sequences are upper-cased and stripped of whitespace; validation of the alphabet is left
//!   to [`crate::input::PrimerDesignInput::validate`], so bad bases surface as input errors.
//!
//! ### Errors
//! Parsing/IO errors are bubbled via `anyhow::Result` to the caller.
//!
//! ### Example
//! ```no_run
//! use primerpair::seqio;
//! let t = seqio::load_template("target.fasta").unwrap();
//! println!("{}: {} bp", t.id, t.sequence.len());
//! ```
use std::path::Path;

use anyhow::{bail, Context, Result};
use needletail::parse_fastx_file;

/// A template sequence read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: String,
    pub sequence: String,
}

/// Read the first record of a FASTA/FASTQ file (optionally gzip-compressed).
pub fn load_template<P: AsRef<Path>>(path: P) -> Result<Template> {
    let p = path.as_ref();
    let mut reader =
        parse_fastx_file(p).with_context(|| format!("cannot open sequence file {}", p.display()))?;
    let Some(record) = reader.next() else {
        bail!("{} contains no sequence records", p.display());
    };
    let rec = record.with_context(|| format!("cannot parse {}", p.display()))?;
    let id = String::from_utf8_lossy(rec.id()).to_string();
    let sequence = normalize(&rec.seq());
    if sequence.is_empty() {
        bail!("record {id} in {} is empty", p.display());
    }
    log::debug!("loaded template {id} ({} bp) from {}", sequence.len(), p.display());
    Ok(Template { id, sequence })
}

/// Upper-case and drop whitespace (as found in hand-pasted sequences).
pub fn normalize(raw: &[u8]) -> String {
    raw.iter()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|b| b.to_ascii_uppercase() as char)
        .collect()
}
