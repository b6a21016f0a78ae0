//! The document cursor interface.
//!
//! Parsers for a concrete dialect implement [`DocInput`] and present the
//! document as a flat, depth-first token stream. Consumers and the record
//! mapper are written against this interface only and never see the
//! underlying text.

use crate::ref_string::RefString;

/// Location within a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocLocation {
    /// Byte offset from the start of the document, starting at zero.
    pub byte: u64,
    /// Line within the document, starting at one.
    pub line: u32,
}

/// Which location of the current token to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeLoc {
    /// Location of the current value token.
    Value,
    /// Location of the current token's key, if any.
    Key,
}

/// The token alphabet of a document.
///
/// Begin/end tokens always complement each other on the same level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// End of document.
    Eof,
    /// Begin of a key-to-value mapping.
    BeginMapping,
    EndMapping,
    /// Begin of consecutive values.
    BeginArray,
    EndArray,
    /// Generic null literal.
    Null,
    /// Generic boolean literal.
    Boolean,
    /// Generic number literal.
    Number,
    /// Generic string literal.
    String,
}

/// Signal raised by a parser after reporting an error to its sink.
///
/// Carries no payload: the error itself already went to the sink, this
/// value only aborts the current top-level read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputFailed;

/// Reads tokens one at a time from some document.
///
/// Tokens are enumerated depth-first. The payload accessors move their
/// value out and must only be called when the current token is of the
/// matching kind.
pub trait DocInput<'de> {
    /// Advances to the next token and makes it current.
    ///
    /// # Errors
    ///
    /// Returns [`InputFailed`] after a syntax error was reported to the
    /// parse-error sink.
    fn next_token(&mut self) -> Result<TokenKind, InputFailed>;

    /// Asks for the current token to be reinterpreted as the given kind.
    ///
    /// Dialects that defer type decisions may obey when the current token
    /// is ambiguous. Returns whether reinterpretation succeeded.
    fn hint(&mut self, _kind: TokenKind) -> bool {
        false
    }

    /// Returns a location within the parsed document.
    fn location(&self, rel: RelativeLoc) -> DocLocation;

    /// The key of the current token. The current token must be associated
    /// with a key.
    fn mapping_key(&mut self) -> RefString<'de>;

    /// The current boolean value. The current token must be a boolean.
    fn boolean(&self) -> bool;

    /// The current number as its raw text, of the form
    /// `<minus><integral>.<fractional>[eE]<minus><exponent>` with the
    /// integral part always present and every other part optional.
    ///
    /// Numeric interpretation is left to the consumer.
    fn raw_number(&mut self) -> RefString<'de>;

    /// The current string literal. The current token must be a string.
    fn string(&mut self) -> RefString<'de>;
}
