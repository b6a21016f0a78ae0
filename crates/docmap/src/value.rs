//! The dynamic value tree.
//!
//! [`Value`] represents any document value whose shape is only known at
//! run time, e.g. the entries captured by an additional-keys member.
//! String payloads and mapping keys stay borrowed when the parser could
//! hand them out without copying.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::consume::Consume;
use crate::context::{ConsumeFailed, Context, DocErrorKind};
use crate::input::{DocInput, RelativeLoc, TokenKind};
use crate::ref_string::RefString;

pub type Map<'de> = BTreeMap<RefString<'de>, Value<'de>>;
pub type Array<'de> = Vec<Value<'de>>;

/// Any document value.
#[derive(Debug, Default, PartialEq)]
pub enum Value<'de> {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(RefString<'de>),
    Array(Array<'de>),
    Object(Map<'de>),
}

impl<'de> Value<'de> {
    /// Returns `true` if the value is [`Null`](Value::Null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_string(&self) -> Option<&RefString<'de>> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array<'de>> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Map<'de>> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Dispatches on the first token of the value.
impl<'de, C: Context> Consume<'de, C> for Value<'de> {
    fn consume(
        first: TokenKind,
        input: &mut dyn DocInput<'de>,
        context: &mut C,
    ) -> Result<Self, ConsumeFailed> {
        match first {
            TokenKind::Null => Ok(Value::Null),
            TokenKind::Boolean => bool::consume(first, input, context).map(Value::Boolean),
            TokenKind::Number => f64::consume(first, input, context).map(Value::Number),
            TokenKind::String => RefString::consume(first, input, context).map(Value::String),
            TokenKind::BeginMapping => Map::consume(first, input, context).map(Value::Object),
            TokenKind::BeginArray => Array::consume(first, input, context).map(Value::Array),
            TokenKind::Eof | TokenKind::EndMapping | TokenKind::EndArray => {
                Err(context.fail(input.location(RelativeLoc::Value), DocErrorKind::TypeMismatch))
            }
        }
    }
}
