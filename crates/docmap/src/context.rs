//! Consume-side error reporting.
//!
//! Consumers receive a context value carrying the error sink. Errors are
//! reported through the sink at the point of detection and then signalled
//! upward as [`ConsumeFailed`], which aborts the current top-level value.

use thiserror::Error;

use crate::input::{DocLocation, InputFailed};

/// What went wrong while mapping a well-formed token stream onto a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DocErrorKind {
    #[error("value is of wrong type")]
    TypeMismatch,
    /// A tagged-union member was encountered before its discriminator.
    #[error("the type of this value was not specified")]
    TypeUnspecified,
    #[error("value does not meet required criteria")]
    ValueInvalid,
    #[error("value is not within the representable range")]
    ValueOutOfBounds,
    #[error("value is too small")]
    ValueTooSmall,
    #[error("value is too large")]
    ValueTooBig,
    #[error("value is not recognized here")]
    ValueUnknown,
    #[error("value is too short")]
    LengthTooSmall,
    #[error("value is too long")]
    LengthTooBig,
    #[error("too few elements")]
    TooFewElements,
    #[error("too many elements")]
    TooManyElements,
    #[error("key is not recognized here")]
    KeyUnknown,
    #[error("key is duplicated")]
    KeyDuplicate,
    #[error("not all required keys are specified")]
    KeyMissing,
    #[error("value is not a valid index")]
    IndexOutOfBounds,
}

/// A consume error together with where in the document it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at line {}, byte {}", .location.line, .location.byte)]
pub struct DocError {
    pub location: DocLocation,
    pub kind: DocErrorKind,
}

/// Signal raised by a consumer after reporting an error to the sink.
///
/// Like [`InputFailed`] this carries no payload; it aborts the current
/// top-level value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumeFailed;

impl From<InputFailed> for ConsumeFailed {
    fn from(_: InputFailed) -> Self {
        ConsumeFailed
    }
}

/// Carries the consume-error sink through every consumer call.
///
/// Hosts may implement this on their own context type to thread extra
/// state into hand-written consumers; [`DocContext`] is the plain variant
/// wrapping just an error handler.
pub trait Context {
    /// Delivers an error to the sink.
    fn report(&mut self, error: DocError);

    /// Reports an error and returns the failure signal to propagate.
    fn fail(&mut self, location: DocLocation, kind: DocErrorKind) -> ConsumeFailed {
        self.report(DocError { location, kind });
        ConsumeFailed
    }
}

/// The plain context: an error handler and nothing else.
pub struct DocContext<F> {
    error_handler: F,
}

impl<F: FnMut(&DocError)> DocContext<F> {
    pub fn new(error_handler: F) -> Self {
        Self { error_handler }
    }
}

impl<F: FnMut(&DocError)> Context for DocContext<F> {
    fn report(&mut self, error: DocError) {
        (self.error_handler)(&error);
    }
}
