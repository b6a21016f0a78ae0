//! Schema-driven mapper that deserializes structured documents into typed
//! records.
//!
//! The crate is built from three layers:
//!
//! 1. A token source: the [`DocInput`] cursor over a flat token alphabet,
//!    with one concrete implementation reading JSON ([`json::parse`]).
//! 2. Per-type consumers: the [`Consume`] trait, implemented for scalars,
//!    containers, the dynamic [`Value`] tree, and validating wrappers such
//!    as [`RangeBounded`] and [`SizeBounded`].
//! 3. The record mapper: records describe their members once via
//!    [`Mapped::schema`] and are then populated key by key, honoring
//!    aliases, duplicate-key policy, default-allowed absence, unknown-key
//!    capture, and tagged-union discrimination.
//!
//! Failures never panic and never abort the process: every detected error
//! is delivered to a caller-supplied sink together with its byte and line
//! position, and parsing recovers far enough to surface multiple errors in
//! a single pass.
//!
//! ```
//! use docmap::{from_input, json, map_record, Context, Mapped, Member, Schema};
//!
//! #[derive(Default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl<'de> Mapped<'de> for Server {
//!     fn schema<C: Context + 'de>() -> Schema<'de, Self, C> {
//!         Schema::new()
//!             .member(Member::field("host", |s: &mut Self| &mut s.host))
//!             .member(Member::field("port", |s: &mut Self| &mut s.port))
//!     }
//! }
//! map_record!(Server);
//!
//! let mut input = json::parse(r#"{"host":"::1","port":8080}"#, |err| panic!("{err}"));
//! let server: Server = from_input(&mut input, |err| panic!("{err}")).unwrap();
//! assert_eq!(server.host, "::1");
//! assert_eq!(server.port, 8080);
//! ```

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod arith;
mod bounded;
mod consume;
mod containers;
mod context;
mod input;
mod mapper;
mod ref_string;
mod schema;
mod value;

pub mod json;

pub use bounded::{Len, RangeBounded, RangeChecker, SizeBounded, Validated, Validator};
pub use consume::Consume;
pub use context::{ConsumeFailed, Context, DocContext, DocError, DocErrorKind};
pub use input::{DocInput, DocLocation, InputFailed, RelativeLoc, TokenKind};
pub use mapper::{consume_record, from_input, from_input_with_context};
pub use ref_string::RefString;
pub use schema::{AltMode, Alts, Discriminant, Duplicates, Mapped, Member, Schema};
pub use value::{Array, Map, Value};

#[cfg(test)]
mod tests;
