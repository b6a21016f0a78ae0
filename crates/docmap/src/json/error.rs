//! Byte-level errors of the JSON dialect.

use thiserror::Error;

use crate::input::DocLocation;

/// What went wrong in the textual stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of input")]
    EofUnexpected,
    #[error("expected '\"' to denote a key")]
    ExpectedKey,
    #[error("expected ':' to denote the value of the key")]
    ExpectedColon,
    #[error("expected ',' or a closing bracket to denote the next entry")]
    ExpectedSeparator,
    #[error("invalid new-line in string literal")]
    StringInvalidNewline,
    #[error("invalid character in string literal")]
    StringInvalidChar,
    /// Reserved for a stricter dialect; unknown escapes currently pass
    /// through verbatim.
    #[error("invalid escape sequence in string literal")]
    StringInvalidEscape,
}

/// A parse error together with where in the document it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at line {}, byte {}", .location.line, .location.byte)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: DocLocation,
}
