//! Consumers for the standard container types.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::consume::Consume;
use crate::context::{ConsumeFailed, Context, DocErrorKind};
use crate::input::{DocInput, RelativeLoc, TokenKind};
use crate::ref_string::RefString;

/// An absent value: end of document or an explicit null.
impl<'de, C: Context, T: Consume<'de, C>> Consume<'de, C> for Option<T> {
    fn consume(
        first: TokenKind,
        input: &mut dyn DocInput<'de>,
        context: &mut C,
    ) -> Result<Self, ConsumeFailed> {
        if first == TokenKind::Eof || first == TokenKind::Null {
            return Ok(None);
        }

        T::consume(first, input, context).map(Some)
    }
}

impl<'de, C: Context, T: Consume<'de, C>> Consume<'de, C> for Box<T> {
    fn consume(
        first: TokenKind,
        input: &mut dyn DocInput<'de>,
        context: &mut C,
    ) -> Result<Self, ConsumeFailed> {
        T::consume(first, input, context).map(Box::new)
    }
}

impl<'de, C: Context, T: Consume<'de, C>> Consume<'de, C> for Vec<T> {
    fn consume(
        first: TokenKind,
        input: &mut dyn DocInput<'de>,
        context: &mut C,
    ) -> Result<Self, ConsumeFailed> {
        if first != TokenKind::BeginArray && !input.hint(TokenKind::BeginArray) {
            return Err(context.fail(input.location(RelativeLoc::Value), DocErrorKind::TypeMismatch));
        }

        let mut elements = Vec::new();
        loop {
            let token = input.next_token()?;
            if token == TokenKind::EndArray {
                return Ok(elements);
            }
            elements.push(T::consume(token, input, context)?);
        }
    }
}

/// A fixed-length sequence; the element count must match exactly.
impl<'de, C: Context, T: Consume<'de, C>, const N: usize> Consume<'de, C> for [T; N] {
    fn consume(
        first: TokenKind,
        input: &mut dyn DocInput<'de>,
        context: &mut C,
    ) -> Result<Self, ConsumeFailed> {
        let elements = Vec::<T>::consume(first, input, context)?;
        if elements.len() != N {
            let kind = if elements.len() < N {
                DocErrorKind::TooFewElements
            } else {
                DocErrorKind::TooManyElements
            };
            return Err(context.fail(input.location(RelativeLoc::Value), kind));
        }

        let Ok(array) = <[T; N]>::try_from(elements) else {
            // Count verified above.
            return Err(ConsumeFailed);
        };
        Ok(array)
    }
}

/// A string-keyed mapping. Duplicate keys follow the container's overwrite
/// semantics: the last occurrence wins.
impl<'de, C: Context, K, V> Consume<'de, C> for BTreeMap<K, V>
where
    K: From<RefString<'de>> + Ord,
    V: Consume<'de, C>,
{
    fn consume(
        first: TokenKind,
        input: &mut dyn DocInput<'de>,
        context: &mut C,
    ) -> Result<Self, ConsumeFailed> {
        if first != TokenKind::BeginMapping && !input.hint(TokenKind::BeginMapping) {
            return Err(context.fail(input.location(RelativeLoc::Value), DocErrorKind::TypeMismatch));
        }

        let mut map = BTreeMap::new();
        loop {
            let token = input.next_token()?;
            if token == TokenKind::EndMapping {
                return Ok(map);
            }
            let key = input.mapping_key();
            let value = V::consume(token, input, context)?;
            map.insert(K::from(key), value);
        }
    }
}
