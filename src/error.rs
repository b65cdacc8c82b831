use crate::location::Offset;
use std::path::PathBuf;

/// Errors surfaced by the navigator and its simulation harness.
///
/// Failing to find a path is not an error; searches report that as `None`.
#[derive(thiserror::Error, Debug)]
pub enum NavigatorError {
    /// A step turn was requested for an offset that does not snap to a cardinal step.
    #[error("cannot build a step from offset {0}")]
    InvalidStep(Offset),

    /// An attack turn was requested for a zero offset.
    #[error("cannot build an attack from offset {0}")]
    InvalidAttack(Offset),

    #[error("failed to read map {path}: {source}")]
    MapIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected character '{found}' at line {line}, column {column}")]
    MapParse {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("map has no player ('@') or player start ('S')")]
    MissingPlayer,

    #[error("map rows have different widths (row {row} is {width}, expected {expected})")]
    RaggedMap {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("the exit cannot be reached from the player start")]
    UnreachableExit,
}

pub type Result<T> = std::result::Result<T, NavigatorError>;
