//! A read-only string that is either a view into the parsed input or an
//! owned allocation.
//!
//! Most strings in a document need no transformation and can be handed to
//! consumers as plain views into the input buffer. Some cannot, for
//! instance JSON string literals containing escape sequences, which only
//! exist in decoded form in a fresh allocation. [`RefString`] carries both
//! cases behind one move-only type so the cheap case stays copy-free.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

/// A read-only byte string, borrowed from the input buffer or owned.
///
/// Comparison, ordering, and hashing are byte-wise. The type is moved,
/// never cloned; a borrowed value can be promoted to an owned one with
/// [`RefString::into_owned`] when it has to outlive the input buffer.
#[derive(Default)]
pub struct RefString<'de>(Repr<'de>);

enum Repr<'de> {
    Borrowed(&'de [u8]),
    Owned(Box<[u8]>),
}

impl Default for Repr<'_> {
    fn default() -> Self {
        Repr::Borrowed(&[])
    }
}

impl<'de> RefString<'de> {
    /// Wraps a view into the input buffer.
    #[must_use]
    pub fn borrowed(bytes: &'de [u8]) -> Self {
        Self(Repr::Borrowed(bytes))
    }

    /// Takes ownership of an already-allocated string.
    #[must_use]
    pub fn owned(bytes: Vec<u8>) -> Self {
        Self(Repr::Owned(bytes.into_boxed_slice()))
    }

    /// Returns whether the string owns its allocation.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        matches!(self.0, Repr::Owned(_))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.0 {
            Repr::Borrowed(bytes) => bytes,
            Repr::Owned(bytes) => bytes,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// The string as UTF-8 text, if it is valid UTF-8.
    ///
    /// Strings taken verbatim from a UTF-8 input always are; decoded escape
    /// sequences may contain unpaired surrogates and fail here.
    #[must_use]
    pub fn to_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }

    /// Converts into an owned `String`, replacing invalid UTF-8 with the
    /// replacement character.
    #[must_use]
    pub fn into_string(self) -> String {
        match self.0 {
            Repr::Borrowed(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Repr::Owned(bytes) => match String::from_utf8(bytes.into_vec()) {
                Ok(string) => string,
                Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
            },
        }
    }

    /// Promotes the string so it no longer borrows the input buffer.
    ///
    /// Borrowed contents are copied; owned contents move without copying.
    #[must_use]
    pub fn into_owned(self) -> RefString<'static> {
        match self.0 {
            Repr::Borrowed(bytes) => RefString(Repr::Owned(bytes.into())),
            Repr::Owned(bytes) => RefString(Repr::Owned(bytes)),
        }
    }
}

impl<'de> From<&'de str> for RefString<'de> {
    fn from(text: &'de str) -> Self {
        Self::borrowed(text.as_bytes())
    }
}

impl From<RefString<'_>> for String {
    fn from(string: RefString<'_>) -> Self {
        string.into_string()
    }
}

impl PartialEq for RefString<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for RefString<'_> {}

impl PartialEq<str> for RefString<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for RefString<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialOrd for RefString<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RefString<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for RefString<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Debug for RefString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Display for RefString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&String::from_utf8_lossy(self.as_bytes()), f)
    }
}
