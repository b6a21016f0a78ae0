//! The consumer interface and the consumers for built-in scalar types.

use alloc::string::String;

use crate::arith::MulPow10;
use crate::context::{ConsumeFailed, Context, DocErrorKind};
use crate::input::{DocInput, RelativeLoc, TokenKind};
use crate::ref_string::RefString;

/// A per-type decoder driven by the token cursor.
///
/// A consumer is invoked with the already-read first token of its value and
/// reads any further tokens it needs from the cursor. On failure it reports
/// a [`DocError`](crate::DocError) through the context and signals
/// [`ConsumeFailed`], which aborts the current top-level value.
///
/// The context type is a parameter so hosts can write consumers against
/// their own [`Context`] implementation; the consumers shipped here work
/// with any context.
pub trait Consume<'de, C: Context>: Sized {
    /// Reads one value of this type from the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ConsumeFailed`] after the error was delivered to the sink.
    fn consume(
        first: TokenKind,
        input: &mut dyn DocInput<'de>,
        context: &mut C,
    ) -> Result<Self, ConsumeFailed>;
}

impl<'de, C: Context> Consume<'de, C> for bool {
    fn consume(
        first: TokenKind,
        input: &mut dyn DocInput<'de>,
        context: &mut C,
    ) -> Result<Self, ConsumeFailed> {
        if first != TokenKind::Boolean && !input.hint(TokenKind::Boolean) {
            return Err(context.fail(input.location(RelativeLoc::Value), DocErrorKind::TypeMismatch));
        }

        Ok(input.boolean())
    }
}

/// Splits a number lexeme into its integer prefix and the remainder.
fn split_integer_prefix(text: &[u8]) -> (&[u8], &[u8]) {
    let mut end = usize::from(text.first() == Some(&b'-'));
    while text.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    text.split_at(end)
}

macro_rules! impl_consume_integer {
    ($($int:ty),+ $(,)?) => {$(
        /// Integers may be written with an exponent but not with fractional
        /// digits; the value is assembled with overflow-safe arithmetic.
        impl<'de, C: Context> Consume<'de, C> for $int {
            fn consume(
                first: TokenKind,
                input: &mut dyn DocInput<'de>,
                context: &mut C,
            ) -> Result<Self, ConsumeFailed> {
                if first != TokenKind::Number && !input.hint(TokenKind::Number) {
                    return Err(context.fail(input.location(RelativeLoc::Value), DocErrorKind::TypeMismatch));
                }

                let location = input.location(RelativeLoc::Value);
                let raw = input.raw_number();
                let text = raw.as_bytes();

                if <$int>::MIN == 0 && text.first() == Some(&b'-') {
                    return Err(context.fail(location, DocErrorKind::ValueTooSmall));
                }

                let (prefix, rest) = split_integer_prefix(text);
                let value = core::str::from_utf8(prefix)
                    .ok()
                    .and_then(|digits| digits.parse::<$int>().ok());
                let Some(value) = value else {
                    return Err(context.fail(location, DocErrorKind::ValueOutOfBounds));
                };

                if rest.is_empty() {
                    return Ok(value);
                }

                // A fractional part or a negative exponent cannot be
                // represented in an integer target.
                if rest[0] == b'.' || rest.get(1) == Some(&b'-') {
                    return Err(context.fail(location, DocErrorKind::ValueOutOfBounds));
                }

                let exponent = core::str::from_utf8(&rest[1..])
                    .ok()
                    .and_then(|digits| digits.parse::<u32>().ok());
                match exponent.and_then(|exponent| value.mul_pow10(exponent)) {
                    Some(powered) => Ok(powered),
                    None => Err(context.fail(location, DocErrorKind::ValueOutOfBounds)),
                }
            }
        }
    )+};
}

impl_consume_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_consume_float {
    ($($float:ty),+ $(,)?) => {$(
        impl<'de, C: Context> Consume<'de, C> for $float {
            fn consume(
                first: TokenKind,
                input: &mut dyn DocInput<'de>,
                context: &mut C,
            ) -> Result<Self, ConsumeFailed> {
                if first != TokenKind::Number && !input.hint(TokenKind::Number) {
                    return Err(context.fail(input.location(RelativeLoc::Value), DocErrorKind::TypeMismatch));
                }

                let location = input.location(RelativeLoc::Value);
                let raw = input.raw_number();
                let parsed = core::str::from_utf8(raw.as_bytes())
                    .ok()
                    .and_then(|text| text.parse::<$float>().ok());
                match parsed {
                    // The lexeme cannot spell an infinity, so one can only
                    // arise from overflow.
                    Some(value) if value.is_finite() => Ok(value),
                    Some(_) => Err(context.fail(location, DocErrorKind::ValueOutOfBounds)),
                    None => Err(context.fail(location, DocErrorKind::ValueInvalid)),
                }
            }
        }
    )+};
}

impl_consume_float!(f32, f64);

/// A single character read from a string of exactly one byte.
impl<'de, C: Context> Consume<'de, C> for char {
    fn consume(
        first: TokenKind,
        input: &mut dyn DocInput<'de>,
        context: &mut C,
    ) -> Result<Self, ConsumeFailed> {
        if first != TokenKind::String && !input.hint(TokenKind::String) {
            return Err(context.fail(input.location(RelativeLoc::Value), DocErrorKind::TypeMismatch));
        }

        let string = input.string();
        match string.as_bytes() {
            &[byte] => Ok(char::from(byte)),
            _ => Err(context.fail(input.location(RelativeLoc::Value), DocErrorKind::LengthTooBig)),
        }
    }
}

impl<'de, C: Context> Consume<'de, C> for String {
    fn consume(
        first: TokenKind,
        input: &mut dyn DocInput<'de>,
        context: &mut C,
    ) -> Result<Self, ConsumeFailed> {
        if first != TokenKind::String && !input.hint(TokenKind::String) {
            return Err(context.fail(input.location(RelativeLoc::Value), DocErrorKind::TypeMismatch));
        }

        Ok(input.string().into_string())
    }
}

impl<'de, C: Context> Consume<'de, C> for RefString<'de> {
    fn consume(
        first: TokenKind,
        input: &mut dyn DocInput<'de>,
        context: &mut C,
    ) -> Result<Self, ConsumeFailed> {
        if first != TokenKind::String && !input.hint(TokenKind::String) {
            return Err(context.fail(input.location(RelativeLoc::Value), DocErrorKind::TypeMismatch));
        }

        Ok(input.string())
    }
}
