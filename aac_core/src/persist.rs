//! Reading and writing boards in their line-oriented text format.
//!
//! Each non-empty line is a record. A line starting with [`ITEM_MARKER`] is an
//! item of the most recent category; any other line starts a new category. In
//! both cases the image reference runs up to the first [`FIELD_DELIMITER`] and
//! everything after it is text, which may itself contain spaces:
//!
//! ```text
//! img/food/plate.png food
//! >img/food/fries.png french fries
//! >img/food/watermelon.png watermelon
//! img/clothing/hanger.png clothing
//! >img/clothing/shirt.png collared shirt
//! ```

use std::{io, path::PathBuf};

use thiserror::Error;

pub mod reader;
pub mod writer;

/// Prefix marking an item line.
pub const ITEM_MARKER: char = '>';

/// Separates the image reference from the text on every line.
pub const FIELD_DELIMITER: char = ' ';

/// Error type for loading and saving boards.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("could not access board file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed board file at line {line}: {reason}")]
    MalformedFile { line: usize, reason: MalformedReason },
}

/// Why a line of a board file could not be understood.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum MalformedReason {
    #[error("an item appears before any category")]
    ItemBeforeCategory,
    #[error("no space separates the image reference from its text")]
    MissingDelimiter,
}

// Splits a record into its image reference and text.
fn split_record(record: &str, line: usize) -> Result<(&str, &str), PersistError> {
    record
        .split_once(FIELD_DELIMITER)
        .ok_or(PersistError::MalformedFile { line, reason: MalformedReason::MissingDelimiter })
}
