//! Error types for JSON parsing operations

/// Result type alias for parsing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Parse error produced by the checked entry points
///
/// The convenience accessors in [`crate::access`] never surface this type;
/// they fold every failure into the requested type's default value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input ended in the middle of a value, string or literal
    #[error("unexpected end of input at position {position}")]
    UnexpectedEof {
        /// Position in the input where more data was expected
        position: usize,
    },

    /// A byte that cannot start or continue the expected construct
    #[error("unexpected character {found:?} at position {position}")]
    UnexpectedChar {
        /// Position of the offending byte
        position: usize,
        /// The offending character
        found: char,
    },

    /// Malformed backslash escape inside a string
    #[error("invalid escape sequence at position {position}")]
    InvalidEscape {
        /// Position of the backslash
        position: usize,
    },

    /// Number token violating the JSON grammar
    #[error("invalid number at position {position}")]
    InvalidNumber {
        /// Position where the number token starts
        position: usize,
    },

    /// Well-formed value followed by non-whitespace garbage
    #[error("trailing data after value at position {position}")]
    TrailingData {
        /// Position of the first trailing byte
        position: usize,
    },

    /// Containers nested deeper than the configured limit
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded {
        /// The configured maximum depth
        limit: usize,
    },

    /// Input larger than the configured limit
    #[error("input of {len} bytes exceeds limit of {limit}")]
    InputTooLarge {
        /// Actual input length
        len: usize,
        /// The configured maximum length
        limit: usize,
    },

    /// Input bytes are not valid UTF-8
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(String),
}

impl Error {
    /// Create an unexpected-end-of-input error
    pub(crate) fn unexpected_eof(position: usize) -> Self {
        Self::UnexpectedEof { position }
    }

    /// Create an unexpected-character error
    pub(crate) fn unexpected_char(position: usize, found: char) -> Self {
        Self::UnexpectedChar { position, found }
    }

    /// Create an invalid-escape error
    pub(crate) fn invalid_escape(position: usize) -> Self {
        Self::InvalidEscape { position }
    }

    /// Create an invalid-number error
    pub(crate) fn invalid_number(position: usize) -> Self {
        Self::InvalidNumber { position }
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::InvalidUtf8(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_position() {
        let err = Error::unexpected_char(17, '}');
        assert!(err.to_string().contains("17"));
        assert!(err.to_string().contains("'}'"));
    }

    #[test]
    fn test_utf8_conversion() {
        let bad = [0x66, 0x6f, 0xff];
        let err: Error = std::str::from_utf8(&bad).unwrap_err().into();
        assert!(matches!(err, Error::InvalidUtf8(_)));
    }
}
