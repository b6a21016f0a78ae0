//! Declarative description of how a record maps onto document keys.
//!
//! A record registers an ordered member list once via [`Mapped::schema`];
//! the mapper walks it for every instance it populates. Members are built
//! with [`Member`]'s constructors and refined with its combinators:
//!
//! ```
//! use docmap::{Context, Mapped, Member, Schema};
//!
//! #[derive(Default)]
//! struct Profile {
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! impl<'de> Mapped<'de> for Profile {
//!     fn schema<C: Context + 'de>() -> Schema<'de, Self, C> {
//!         Schema::new()
//!             .member(Member::field("name", |p: &mut Self| &mut p.name).alias("username"))
//!             .member(Member::appended("tags", |p: &mut Self| &mut p.tags))
//!     }
//! }
//! ```

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::consume::Consume;
use crate::context::{ConsumeFailed, Context};
use crate::input::{DocInput, TokenKind};
use crate::ref_string::RefString;

/// Fills one member of a record from the cursor.
pub(crate) type FillFn<'de, T, C> =
    dyn Fn(&mut T, TokenKind, &mut dyn DocInput<'de>, &mut C) -> Result<(), ConsumeFailed> + 'de;

/// Inserts one unknown key and its value into a capturing member.
pub(crate) type CaptureFn<'de, T, C> = dyn Fn(&mut T, RefString<'de>, TokenKind, &mut dyn DocInput<'de>, &mut C) -> Result<(), ConsumeFailed>
    + 'de;

/// Consumes a discriminator value and resolves it to an alternative index.
pub(crate) type SelectFn<'de, C> =
    dyn Fn(TokenKind, &mut dyn DocInput<'de>, &mut C) -> Result<Option<usize>, ConsumeFailed> + 'de;

/// A record with a registered schema.
pub trait Mapped<'de>: Default
where
    Self: 'de,
{
    /// The ordered member list of this record.
    fn schema<C: Context + 'de>() -> Schema<'de, Self, C>;
}

/// What happens when a key matches a member that was already assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Duplicates {
    /// Report `key_duplicate` and abort.
    #[default]
    Reject,
    /// Keep the first occurrence; later ones are read and discarded.
    KeepFirst,
    /// Keep the last occurrence; each one overwrites its predecessor.
    KeepLast,
    /// Append every occurrence to a sequence field, in source order.
    Append,
}

/// How a discriminated member consumes its chosen alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltMode {
    /// The member's own key later carries the alternative as a nested
    /// value.
    Nest,
    /// The remaining keys of the current mapping form the alternative
    /// record directly.
    NoNesting,
}

/// A value a discriminator key can be compared against.
///
/// All alternatives of one member share a single discriminant type.
pub trait Discriminant<'de, C: Context>: Sized {
    /// What gets consumed off the stream before comparison.
    type Value;

    fn consume_value(
        first: TokenKind,
        input: &mut dyn DocInput<'de>,
        context: &mut C,
    ) -> Result<Self::Value, ConsumeFailed>;

    fn matches(&self, value: &Self::Value) -> bool;
}

/// String discriminants are consumed as [`RefString`] and compared as byte
/// strings.
impl<'de, C: Context> Discriminant<'de, C> for &'static str {
    type Value = RefString<'de>;

    fn consume_value(
        first: TokenKind,
        input: &mut dyn DocInput<'de>,
        context: &mut C,
    ) -> Result<Self::Value, ConsumeFailed> {
        RefString::consume(first, input, context)
    }

    fn matches(&self, value: &Self::Value) -> bool {
        self.as_bytes() == value.as_bytes()
    }
}

macro_rules! impl_discriminant {
    ($($ty:ty),+ $(,)?) => {$(
        impl<'de, C: Context> Discriminant<'de, C> for $ty {
            type Value = $ty;

            fn consume_value(
                first: TokenKind,
                input: &mut dyn DocInput<'de>,
                context: &mut C,
            ) -> Result<Self::Value, ConsumeFailed> {
                <$ty>::consume(first, input, context)
            }

            fn matches(&self, value: &Self::Value) -> bool {
                self == value
            }
        }
    )+};
}

impl_discriminant!(bool, i8, i16, i32, i64, u8, u16, u32, u64);

/// Builder for a tagged-union descriptor: a discriminator key, a nesting
/// mode, and the alternatives in declaration order.
pub struct Alts<'de, T, C, D> {
    key: &'static str,
    mode: AltMode,
    discriminants: Vec<D>,
    fills: Vec<Box<FillFn<'de, T, C>>>,
}

impl<'de, T: 'de, C: Context + 'de, D: Discriminant<'de, C> + 'de> Alts<'de, T, C, D> {
    #[must_use]
    pub fn new(key: &'static str, mode: AltMode) -> Self {
        Self {
            key,
            mode,
            discriminants: Vec::new(),
            fills: Vec::new(),
        }
    }

    /// Adds an alternative: when the discriminator equals `discriminant`,
    /// the member is consumed as `A` and stored through `assign`.
    #[must_use]
    pub fn alt<A: Consume<'de, C> + 'de>(mut self, discriminant: D, assign: fn(&mut T, A)) -> Self {
        self.discriminants.push(discriminant);
        self.fills.push(Box::new(
            move |object: &mut T,
                  first: TokenKind,
                  input: &mut dyn DocInput<'de>,
                  context: &mut C| {
                assign(object, A::consume(first, input, context)?);
                Ok(())
            },
        ));
        self
    }
}

pub(crate) struct AltGroup<'de, T, C> {
    pub(crate) key: &'static str,
    pub(crate) mode: AltMode,
    pub(crate) select: Box<SelectFn<'de, C>>,
    pub(crate) fills: Vec<Box<FillFn<'de, T, C>>>,
}

/// One member of a record schema.
pub struct Member<'de, T, C> {
    pub(crate) name: &'static str,
    pub(crate) short: Option<&'static str>,
    pub(crate) alias: Option<&'static str>,
    pub(crate) defaulted: bool,
    pub(crate) duplicates: Duplicates,
    pub(crate) fill: Box<FillFn<'de, T, C>>,
    pub(crate) capture: Option<Box<CaptureFn<'de, T, C>>>,
    pub(crate) alts: Option<AltGroup<'de, T, C>>,
}

impl<'de, T: 'de, C: Context + 'de> Member<'de, T, C> {
    /// A member that consumes the field's own type and assigns it.
    #[must_use]
    pub fn field<F: Consume<'de, C> + 'de>(name: &'static str, access: fn(&mut T) -> &mut F) -> Self {
        let fill: Box<FillFn<'de, T, C>> = Box::new(
            move |object: &mut T,
                  first: TokenKind,
                  input: &mut dyn DocInput<'de>,
                  context: &mut C| {
                *access(object) = F::consume(first, input, context)?;
                Ok(())
            },
        );
        Self::with_fill(name, fill)
    }

    /// A member that collects every occurrence of its key: each one is
    /// consumed as a single element and appended in source order.
    #[must_use]
    pub fn appended<E: Consume<'de, C> + 'de>(
        name: &'static str,
        access: fn(&mut T) -> &mut Vec<E>,
    ) -> Self {
        let fill: Box<FillFn<'de, T, C>> = Box::new(
            move |object: &mut T,
                  first: TokenKind,
                  input: &mut dyn DocInput<'de>,
                  context: &mut C| {
                access(object).push(E::consume(first, input, context)?);
                Ok(())
            },
        );
        let mut member = Self::with_fill(name, fill);
        member.duplicates = Duplicates::Append;
        member
    }

    /// A member whose type is chosen by a discriminator key at run time.
    ///
    /// The field is a sum of the alternative types; `alts` names the
    /// discriminator key, the nesting mode, and the alternatives in
    /// declaration order.
    #[must_use]
    pub fn discriminated<D: Discriminant<'de, C> + 'de>(
        name: &'static str,
        alts: Alts<'de, T, C, D>,
    ) -> Self {
        let Alts {
            key,
            mode,
            discriminants,
            fills,
        } = alts;
        let select: Box<SelectFn<'de, C>> = Box::new(
            move |first: TokenKind, input: &mut dyn DocInput<'de>, context: &mut C| {
                let value = D::consume_value(first, input, context)?;
                Ok(discriminants.iter().position(|d| d.matches(&value)))
            },
        );
        // The plain fill is unreachable: the mapper always consumes a
        // discriminated member through its chosen alternative.
        let fill: Box<FillFn<'de, T, C>> = Box::new(|_, _, _, _| Err(ConsumeFailed));
        let mut member = Self::with_fill(name, fill);
        member.alts = Some(AltGroup {
            key,
            mode,
            select,
            fills,
        });
        member
    }

    /// A member that receives every key not claimed by another member.
    ///
    /// The field is a string-keyed mapping; its own name still matches and
    /// consumes a whole mapping like any other member.
    #[must_use]
    pub fn captures<K, V>(name: &'static str, access: fn(&mut T) -> &mut BTreeMap<K, V>) -> Self
    where
        K: From<RefString<'de>> + Ord + 'de,
        V: Consume<'de, C> + 'de,
    {
        let fill: Box<FillFn<'de, T, C>> = Box::new(
            move |object: &mut T,
                  first: TokenKind,
                  input: &mut dyn DocInput<'de>,
                  context: &mut C| {
                *access(object) = <BTreeMap<K, V>>::consume(first, input, context)?;
                Ok(())
            },
        );
        let capture: Box<CaptureFn<'de, T, C>> = Box::new(
            move |object: &mut T,
                  key: RefString<'de>,
                  first: TokenKind,
                  input: &mut dyn DocInput<'de>,
                  context: &mut C| {
                let value = V::consume(first, input, context)?;
                access(object).insert(K::from(key), value);
                Ok(())
            },
        );
        let mut member = Self::with_fill(name, fill);
        member.capture = Some(capture);
        member
    }

    fn with_fill(name: &'static str, fill: Box<FillFn<'de, T, C>>) -> Self {
        Self {
            name,
            short: None,
            alias: None,
            defaulted: false,
            duplicates: Duplicates::Reject,
            fill,
            capture: None,
            alts: None,
        }
    }

    /// The member may be absent from the document, or null, and keeps its
    /// default value.
    #[must_use]
    pub fn defaulted(mut self) -> Self {
        self.defaulted = true;
        self
    }

    /// On duplicate keys, keep the first occurrence.
    #[must_use]
    pub fn keep_first(mut self) -> Self {
        self.duplicates = Duplicates::KeepFirst;
        self
    }

    /// On duplicate keys, keep the last occurrence.
    #[must_use]
    pub fn keep_last(mut self) -> Self {
        self.duplicates = Duplicates::KeepLast;
        self
    }

    /// Accepts `name` in addition to the canonical name.
    #[must_use]
    pub fn alias(mut self, name: &'static str) -> Self {
        debug_assert!(name != self.name);
        self.alias = Some(name);
        self
    }

    /// Replaces the canonical name for matching; the canonical name no
    /// longer matches.
    #[must_use]
    pub fn short(mut self, name: &'static str) -> Self {
        debug_assert!(Some(name) != self.alias);
        self.short = Some(name);
        self
    }

    /// Whether the given key addresses this member.
    pub(crate) fn matches(&self, key: &[u8]) -> bool {
        let canonical = self.short.unwrap_or(self.name);
        canonical.as_bytes() == key || self.alias.is_some_and(|alias| alias.as_bytes() == key)
    }

    /// Every name this member answers to, for schema sanity checks.
    fn known_names(&self) -> [Option<&'static str>; 2] {
        [Some(self.short.unwrap_or(self.name)), self.alias]
    }
}

/// The registered schema of a record: its members, in declaration order.
pub struct Schema<'de, T, C> {
    members: Vec<Member<'de, T, C>>,
}

impl<'de, T: 'de, C: Context + 'de> Schema<'de, T, C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Appends a member. Declaration order is match order.
    #[must_use]
    pub fn member(mut self, member: Member<'de, T, C>) -> Self {
        debug_assert!(
            member.known_names().iter().flatten().all(|name| {
                self.members
                    .iter()
                    .all(|other| !other.matches(name.as_bytes()))
            }),
            "member names must be distinct across the record"
        );
        debug_assert!(
            member.capture.is_none() || self.members.iter().all(|other| other.capture.is_none()),
            "at most one member may capture additional keys"
        );
        self.members.push(member);
        self
    }

    pub(crate) fn members(&self) -> &[Member<'de, T, C>] {
        &self.members
    }
}

impl<'de, T: 'de, C: Context + 'de> Default for Schema<'de, T, C> {
    fn default() -> Self {
        Self::new()
    }
}
