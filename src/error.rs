//! Error types for tacozip

use std::fmt;
use std::io;

/// Result type for tacozip operations
pub type Result<T> = std::result::Result<T, TacoZipError>;

/// Error types that can occur during archive operations
#[derive(Debug)]
pub enum TacoZipError {
    /// I/O error: open, read, write, flush, seek, or allocation failure
    Io(io::Error),
    /// The archive's first entry is not a well-formed ghost (§4.3 validation failed)
    InvalidGhost(String),
    /// Caller contract violation detectable before any side effect
    InvalidParam(String),
}

impl TacoZipError {
    /// Flat integer error code matching the external interface contract:
    /// 0 = OK, -1 = I/O error, -3 = invalid ghost, -4 = invalid parameter.
    pub fn code(&self) -> i32 {
        match self {
            TacoZipError::Io(_) => -1,
            TacoZipError::InvalidGhost(_) => -3,
            TacoZipError::InvalidParam(_) => -4,
        }
    }
}

impl fmt::Display for TacoZipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TacoZipError::Io(e) => write!(f, "I/O error: {}", e),
            TacoZipError::InvalidGhost(msg) => write!(f, "invalid ghost: {}", msg),
            TacoZipError::InvalidParam(msg) => write!(f, "invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for TacoZipError {}

impl From<io::Error> for TacoZipError {
    fn from(err: io::Error) -> Self {
        TacoZipError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_match_external_contract() {
        assert_eq!(TacoZipError::Io(io::Error::other("x")).code(), -1);
        assert_eq!(TacoZipError::InvalidGhost("x".into()).code(), -3);
        assert_eq!(TacoZipError::InvalidParam("x".into()).code(), -4);
    }
}
