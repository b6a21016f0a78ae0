//! The record mapper and the top-level entry points.

use alloc::vec;

use crate::consume::Consume;
use crate::context::{ConsumeFailed, Context, DocContext, DocError, DocErrorKind};
use crate::input::{DocInput, RelativeLoc, TokenKind};
use crate::schema::{AltMode, Duplicates, Mapped};

/// Reads a whole value off the stream without interpreting it, so a
/// discarded duplicate cannot raise spurious consume errors.
fn skip_value<'de>(first: TokenKind, input: &mut dyn DocInput<'de>) -> Result<(), ConsumeFailed> {
    if first != TokenKind::BeginMapping && first != TokenKind::BeginArray {
        return Ok(());
    }

    let mut depth = 1usize;
    while depth > 0 {
        match input.next_token()? {
            TokenKind::BeginMapping | TokenKind::BeginArray => depth += 1,
            TokenKind::EndMapping | TokenKind::EndArray => depth -= 1,
            TokenKind::Eof => break,
            _ => {}
        }
    }
    Ok(())
}

/// Populates a record of a [`Mapped`] type from a key-to-value mapping.
///
/// Consumes a `begin_mapping`, then dispatches every key to the matching
/// schema member; see the member combinators on
/// [`Member`](crate::schema::Member) for the matching rules. When the
/// mapping closes, every member that is neither defaulted nor capturing
/// must have been assigned at least once.
///
/// # Errors
///
/// Returns [`ConsumeFailed`] after reporting the offending key or value to
/// the sink.
pub fn consume_record<'de, T, C>(
    first: TokenKind,
    input: &mut dyn DocInput<'de>,
    context: &mut C,
) -> Result<T, ConsumeFailed>
where
    T: Mapped<'de>,
    C: Context + 'de,
{
    if first != TokenKind::BeginMapping && !input.hint(TokenKind::BeginMapping) {
        return Err(context.fail(input.location(RelativeLoc::Value), DocErrorKind::TypeMismatch));
    }

    let schema = T::schema::<C>();
    let members = schema.members();
    let mut object = T::default();
    let mut found = vec![false; members.len()];
    let mut chosen_alt = vec![None::<usize>; members.len()];

    loop {
        let token = input.next_token()?;
        if token == TokenKind::EndMapping {
            break;
        }
        let key = input.mapping_key();

        // Discriminator keys take precedence over member names.
        let discriminated = members.iter().enumerate().find_map(|(index, member)| {
            let alts = member.alts.as_ref()?;
            (alts.key.as_bytes() == key.as_bytes()).then_some((index, alts))
        });
        if let Some((index, alts)) = discriminated {
            let Some(alternative) = (alts.select)(token, input, context)? else {
                return Err(context.fail(input.location(RelativeLoc::Key), DocErrorKind::ValueUnknown));
            };
            match alts.mode {
                AltMode::Nest => {
                    chosen_alt[index] = Some(alternative);
                    continue;
                }
                AltMode::NoNesting => {
                    // The chosen alternative consumes the remaining keys of
                    // this very mapping, including its end token.
                    found[index] = true;
                    (alts.fills[alternative])(
                        &mut object,
                        TokenKind::BeginMapping,
                        input,
                        context,
                    )?;
                    break;
                }
            }
        }

        if let Some(index) = members.iter().position(|member| member.matches(key.as_bytes())) {
            let member = &members[index];
            if found[index] {
                match member.duplicates {
                    Duplicates::KeepFirst => {
                        skip_value(token, input)?;
                        continue;
                    }
                    Duplicates::Reject => {
                        return Err(context
                            .fail(input.location(RelativeLoc::Key), DocErrorKind::KeyDuplicate));
                    }
                    Duplicates::KeepLast | Duplicates::Append => {}
                }
            }

            // Null stands for "not present" on defaulted members.
            if member.defaulted && token == TokenKind::Null {
                found[index] = true;
                continue;
            }

            found[index] = true;
            if let Some(alts) = member.alts.as_ref() {
                let Some(alternative) = chosen_alt[index] else {
                    return Err(context
                        .fail(input.location(RelativeLoc::Key), DocErrorKind::TypeUnspecified));
                };
                (alts.fills[alternative])(&mut object, token, input, context)?;
            } else {
                (member.fill)(&mut object, token, input, context)?;
            }
            continue;
        }

        if let Some(capture) = members.iter().find_map(|member| member.capture.as_ref()) {
            capture(&mut object, key, token, input, context)?;
            continue;
        }

        return Err(context.fail(input.location(RelativeLoc::Key), DocErrorKind::KeyUnknown));
    }

    let all_present = members
        .iter()
        .enumerate()
        .all(|(index, member)| found[index] || member.defaulted || member.capture.is_some());
    if !all_present {
        return Err(context.fail(input.location(RelativeLoc::Value), DocErrorKind::KeyMissing));
    }

    Ok(object)
}

/// Reads a value of type `T` from the given input.
///
/// Returns `None` when the input is empty or any error was reported; the
/// handlers were already invoked at the point of detection.
pub fn from_input<'de, T, F>(input: &mut dyn DocInput<'de>, error_handler: F) -> Option<T>
where
    F: FnMut(&DocError),
    T: Consume<'de, DocContext<F>>,
{
    let mut context = DocContext::new(error_handler);
    from_input_with_context(input, &mut context)
}

/// Like [`from_input`], with a caller-supplied context.
///
/// Hosts with hand-written consumers thread their own [`Context`]
/// implementation through every consume call this way.
pub fn from_input_with_context<'de, T, C>(input: &mut dyn DocInput<'de>, context: &mut C) -> Option<T>
where
    C: Context,
    T: Consume<'de, C>,
{
    let first = input.next_token().ok()?;
    if first == TokenKind::Eof {
        return None;
    }

    T::consume(first, input, context).ok()
}

/// Implements [`Consume`] for record types by delegating to the mapper.
///
/// ```
/// use docmap::{map_record, Context, Mapped, Member, Schema};
///
/// #[derive(Default)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// impl<'de> Mapped<'de> for Point {
///     fn schema<C: Context + 'de>() -> Schema<'de, Self, C> {
///         Schema::new()
///             .member(Member::field("x", |p: &mut Self| &mut p.x))
///             .member(Member::field("y", |p: &mut Self| &mut p.y))
///     }
/// }
/// map_record!(Point);
/// ```
#[macro_export]
macro_rules! map_record {
    ($($record:ty),+ $(,)?) => {$(
        impl<'de, C: $crate::Context + 'de> $crate::Consume<'de, C> for $record {
            fn consume(
                first: $crate::TokenKind,
                input: &mut dyn $crate::DocInput<'de>,
                context: &mut C,
            ) -> Result<Self, $crate::ConsumeFailed> {
                $crate::consume_record(first, input, context)
            }
        }
    )+};
}
