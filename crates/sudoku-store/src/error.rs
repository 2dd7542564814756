use sudoku_core::CoreError;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No persisted entity exists yet. A legitimate state, not a failure:
    /// callers recover by falling back to settings plus generation.
    NotFound,
    /// Attempt to overwrite a clue cell; fixed cells are immutable for the
    /// puzzle's lifetime
    FixedCell { x: u8, y: u8 },
    /// Coordinate outside the stored board
    UnknownCell { x: u8, y: u8 },
    /// Unsupported board size
    InvalidBoundary(u8),
    /// Read/write failure on the underlying store
    Io(String),
    /// Persisted data could not be parsed
    Corrupted(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "no stored entry found"),
            Self::FixedCell { x, y } => write!(f, "cell ({}, {}) is fixed", x, y),
            Self::UnknownCell { x, y } => write!(f, "no cell at ({}, {})", x, y),
            Self::InvalidBoundary(b) => write!(f, "invalid board boundary: {}", b),
            Self::Io(e) => write!(f, "storage I/O error: {}", e),
            Self::Corrupted(e) => write!(f, "corrupted store: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidBoundary(b) => Self::InvalidBoundary(b),
        }
    }
}
