//! Errors raised while building weight matrices, enumerating correspondences
//! and computing distances.

use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A matrix is not square or is empty, a node order is not a
    /// permutation, or a correspondence does not fit the two weight matrices.
    InvalidDimension,

    /// Division by a non-positive value, or a rescaling factor outside the
    /// range of `f64`.
    Numeric,

    /// The requested enumeration exceeds the configured budget.
    ResourceExhaustion,

    /// Textual input could not be decoded.
    MalformedInput,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("weight matrix is not square: {rows} rows, {cols} columns")]
    NotSquare { rows: usize, cols: usize },

    #[error("weight matrix has no nodes")]
    Empty,

    #[error("row {row} has {len} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("correspondence shape mismatch: expected {expected:?}, got {got:?}")]
    CorrespondenceShape {
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("node order {order:?} is not a permutation of {nodes} nodes")]
    NotAPermutation { order: Vec<usize>, nodes: usize },

    #[error("correspondence leaves node {0} of the first graph unrelated")]
    UncoveredRow(usize),

    #[error("correspondence leaves node {0} of the second graph unrelated")]
    UncoveredColumn(usize),

    #[error("weight at ({row}, {col}) is not finite: {value}")]
    NonFiniteWeight { row: usize, col: usize, value: f64 },

    #[error("cannot divide by weight {value} at ({row}, {col}) of the second graph")]
    NonPositiveWeight { row: usize, col: usize, value: f64 },

    #[error("optimal rescaling factor is not positive: {0}")]
    NonPositiveScale(f64),

    #[error("optimal rescaling factor e^{log_scale} does not fit a float")]
    ScaleOutOfRange { log_scale: f64 },

    #[error("{cells} correspondence cells exceed the limit of {limit}")]
    TooManyCells { cells: usize, limit: usize },

    #[error("deadline exceeded after evaluating {evaluated} correspondences")]
    DeadlineExceeded { evaluated: u64 },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid GML graph: {0}")]
    Gml(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotSquare { .. }
            | Error::Empty
            | Error::RaggedRows { .. }
            | Error::CorrespondenceShape { .. }
            | Error::NotAPermutation { .. }
            | Error::UncoveredRow(_)
            | Error::UncoveredColumn(_) => ErrorKind::InvalidDimension,
            Error::NonFiniteWeight { .. }
            | Error::NonPositiveWeight { .. }
            | Error::NonPositiveScale(_)
            | Error::ScaleOutOfRange { .. } => ErrorKind::Numeric,
            Error::TooManyCells { .. } | Error::DeadlineExceeded { .. } => {
                ErrorKind::ResourceExhaustion
            }
            Error::Parse { .. } | Error::Gml(_) | Error::Io(_) => ErrorKind::MalformedInput,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Error {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
