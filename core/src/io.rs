//! Chain-code file loading
//!
//! Annotation files carry an 8-line header; the chain code is the ninth line,
//! written as whitespace-separated tokens.

use crate::error::{MammoprepError, Result};
use crate::types::ChainCode;
use log::debug;
use std::path::Path;

/// Number of header lines ahead of the chain code
pub const CHAIN_CODE_HEADER_LINES: usize = 8;

/// Reads a chain code from an annotation file
///
/// # Errors
///
/// - `IoError` if the file cannot be read
/// - `MalformedChainCodeSource` if the file has no chain-code line
/// - `InvalidDirectionDigit` if the line holds a bad direction token
pub fn load_chain_code<P: AsRef<Path>>(path: P) -> Result<ChainCode> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let code = parse_chain_code_source(&text)?;
    debug!(
        "Loaded chain code from {}: anchor {}, {} steps",
        path.display(),
        code.anchor(),
        code.len()
    );
    Ok(code)
}

/// Extracts the chain code from the text of an annotation file
pub fn parse_chain_code_source(text: &str) -> Result<ChainCode> {
    let line = text.lines().nth(CHAIN_CODE_HEADER_LINES).ok_or_else(|| {
        MammoprepError::MalformedChainCodeSource(format!(
            "chain code not found: expected at least {} lines",
            CHAIN_CODE_HEADER_LINES + 1
        ))
    })?;
    line.parse()
}
