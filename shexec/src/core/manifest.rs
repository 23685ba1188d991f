//! Extraction of the command list from a unit document.
//!
//! A unit is a TOML document. Parsing the whole document stands in for
//! evaluating its top-level definitions; the only value read back out is the
//! `CMDS` array. Other keys are allowed and ignored.

use thiserror::Error;
use toml::{Table, Value};

/// Top-level key holding the ordered command list.
pub const COMMAND_LIST_KEY: &str = "CMDS";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid unit document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("CMDS with list-of-strings type not found: {0}")]
    MissingCommandList(String),
}

/// Parse `contents` and return its `CMDS` entries in declared order.
pub fn parse_command_list(contents: &str) -> Result<Vec<String>, ManifestError> {
    let table: Table = toml::from_str(contents)?;
    let value = table
        .get(COMMAND_LIST_KEY)
        .ok_or_else(|| ManifestError::MissingCommandList("key is absent".to_string()))?;

    let Value::Array(items) = value else {
        return Err(ManifestError::MissingCommandList(format!(
            "expected array, found {}",
            value.type_str()
        )));
    };
    if items.is_empty() {
        return Err(ManifestError::MissingCommandList(
            "array is empty".to_string(),
        ));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(cmd) => Ok(cmd.clone()),
            other => Err(ManifestError::MissingCommandList(format!(
                "element {index} is {}, expected string",
                other.type_str()
            ))),
        })
        .collect()
}
