use thiserror::Error;

/// Errors from parsing boards and piece letters out of text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown piece letter '{0}'")]
    UnknownPiece(char),
    #[error("expected a single piece letter, got {0:?}")]
    NotAPiece(String),
    #[error("board has {0} rows, at most 32 fit")]
    TooManyRows(usize),
    #[error("row {row} has {len} cells, expected 10")]
    RowWidth { row: usize, len: usize },
    #[error("unexpected cell '{0}' (use '#', 'X' or '.')")]
    BadCell(char),
}
