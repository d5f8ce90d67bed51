#![warn(
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_rust_codeblocks
)]

//! A recursive structural-equality engine with precise, path-aware mismatch
//! diagnostics.
//!
//! ## Overview
//!
//! This crate decides whether two values are "equal" under a configurable
//! notion of equality, and when they are not, reports **every** point of
//! divergence with its exact location instead of a bare "not equal". It is
//! built for test assertions: one failed call yields one combined, readable
//! report.
//!
//! ```text
//! expected values to be equal:
//!   trail: user.emails[0]
//!    want: "ada@example.com"
//!    have: "bob@example.com"
//! ```
//!
//! ## Quick example
//!
//! ```
//! use likeness::{Field, Inspect, Value, equal};
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Inspect for Point {
//!     fn reflect(&self) -> Value<'_> {
//!         Value::record::<Self>(vec![
//!             Field::new("x", self.x.reflect()),
//!             Field::new("y", self.y.reflect()),
//!         ])
//!     }
//! }
//!
//! let want = Point { x: 1, y: 2 };
//! let have = Point { x: 1, y: 5 };
//! let report = equal(&want, &have).unwrap_err();
//! assert_eq!(
//!     report.to_string(),
//!     "expected values to be equal:\n  trail: y\n   want: 2\n   have: 5",
//! );
//! ```
//!
//! ## Core concepts
//!
//! - [`Inspect`] is the capability every comparable type implements: it
//!   produces a borrowed, type-erased [`Value`] whose [`Kind`] tag (record,
//!   sequence, map, reference, union, scalar, ...) drives the comparison and
//!   rendering rules. The crate ships impls for primitives, strings,
//!   `Vec`/slices/arrays, `Option`, `Box`/`Rc`/`Arc`, the standard and
//!   hashbrown maps, tuples, and `fn` pointers.
//! - [`equal`] / [`not_equal`] walk two values in lockstep and accumulate a
//!   [`Notice`] per divergence; [`Mismatch`] is the aggregate error. The only
//!   early exits are length mismatches on sequences and maps (one notice
//!   carrying both lengths, no element-level descent) and the
//!   identical-backing-storage short-circuit.
//! - [`Options`] configures a comparison: exact-trail skips, skipping
//!   inaccessible fields, trail-scoped and type-scoped override comparators,
//!   and rendering knobs. It is copied, never shared, at each recursion
//!   boundary, so sibling branches cannot interfere and top-level calls are
//!   safe to run concurrently.
//! - The [`dump`] module renders values for diagnostics and is usable on its
//!   own via [`Dump::any`](dump::Dump::any).
//! - Unordered containers are traversed in the order of their keys' canonical
//!   string projection, so reports are deterministic across runs.
//!
//! ## Limitations
//!
//! There is no cycle detection: comparing self-referential structures
//! recurses until the stack is exhausted. Two distinct map keys that render
//! to the same canonical string collide in ordering, path naming, and
//! have-side lookup.

mod compare;
pub mod dump;
mod inspect;
mod notice;
mod options;
mod trail;
mod value;

pub use self::{
    compare::{equal, equal_with, not_equal, not_equal_with},
    dump::Dump,
    inspect::Inspect,
    notice::{Mismatch, Notice},
    options::{Checker, Options},
    trail::Trail,
    value::{Field, Float, Kind, MapValue, Opaque, RefValue, SeqValue, TypeInfo, Value},
};
