//! Rendering of erased values into diagnostic display strings.
//!
//! The dumper never participates in comparison logic; it only produces the
//! text shown in notices, and it is usable on its own for pretty-printing
//! arbitrary values:
//!
//! ```
//! use likeness::dump::Dump;
//!
//! let dmp = Dump::new();
//! assert_eq!(dmp.value(&5), "5");
//! assert_eq!(dmp.value(&"hi"), "\"hi\"");
//! assert_eq!(dmp.value(&vec![1, 2]), "[1, 2]");
//! ```
//!
//! Rendering is configured per [`Dump`] instance: string flattening, forced
//! single-line output, extra indentation, address display for reference-like
//! values, and per-type override renderers consulted before the default
//! kind-based dispatch. Every renderer prefixes its output with
//! `2 spaces × (configured indent + level)`.

mod compound;
mod refs;
mod simple;

use std::sync::Arc;

use core::any::TypeId;

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;

pub use self::{
    refs::{chan_dumper, func_dumper},
    simple::{byte_dumper, simple_dumper},
};
use crate::{
    inspect::Inspect,
    value::{Kind, Value},
};

/// The string returned by a kind-specific renderer invoked on a value of the
/// wrong kind. This signals a caller bug, not a data mismatch.
pub const USAGE_ERROR: &str = "<invalid usage>";

/// A pluggable renderer for a specific static type, consulted before the
/// default kind-based rendering.
pub type DumpFn = Arc<dyn Fn(&Dump, usize, &Value<'_>) -> String + Send + Sync>;

/// Rendering configuration.
///
/// `Dump` is a value type: the engine clones it freely, and per-type
/// renderers registered on one instance never leak into another.
#[derive(Clone)]
pub struct Dump {
    pub(crate) flat: bool,
    pub(crate) flat_strings: usize,
    pub(crate) indent: usize,
    pub(crate) ptr_addr: bool,
    pub(crate) dumpers: HashMap<TypeId, DumpFn, FxBuildHasher>,
}

impl Dump {
    /// Creates the default configuration: multi-line strings allowed, no
    /// extra indentation, addresses hidden, no per-type renderers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flat: false,
            flat_strings: 0,
            indent: 0,
            ptr_addr: false,
            dumpers: HashMap::default(),
        }
    }

    /// Forces single-line rendering everywhere.
    #[must_use]
    pub fn with_flat(mut self) -> Self {
        self.flat = true;
        self
    }

    /// Flattens strings of at most `threshold` bytes into quoted,
    /// escaped single-line form.
    #[must_use]
    pub fn with_flat_strings(mut self, threshold: usize) -> Self {
        self.flat_strings = threshold;
        self
    }

    /// Adds `levels` extra indentation levels to every rendering.
    #[must_use]
    pub fn with_indent(mut self, levels: usize) -> Self {
        self.indent = levels;
        self
    }

    /// Renders the machine address of reference-like values instead of their
    /// pointee content; nil references render as `0x0`.
    #[must_use]
    pub fn with_ptr_addr(mut self) -> Self {
        self.ptr_addr = true;
        self
    }

    /// Registers a renderer for the static type `T`, consulted before any
    /// default kind-based rendering. A later registration for the same type
    /// wins.
    ///
    /// ```
    /// use likeness::dump::Dump;
    ///
    /// let dmp = Dump::new()
    ///     .with_dumper::<i32>(|dmp, lvl, _| format!("{}<redacted>", dmp.tab(lvl)));
    /// assert_eq!(dmp.value(&42), "<redacted>");
    /// ```
    #[must_use]
    pub fn with_dumper<T: ?Sized + 'static>(
        mut self,
        dumper: impl Fn(&Dump, usize, &Value<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.dumpers.insert(TypeId::of::<T>(), Arc::new(dumper));
        self
    }

    /// Whether a renderer is registered for the static type `T`.
    #[must_use]
    pub fn has_dumper<T: ?Sized + 'static>(&self) -> bool {
        self.dumpers.contains_key(&TypeId::of::<T>())
    }

    /// Renders an erased value at level zero.
    #[must_use]
    pub fn any(&self, val: &Value<'_>) -> String {
        self.render(val, 0)
    }

    /// Reflects and renders a concrete value at level zero.
    #[must_use]
    pub fn value<T: Inspect + ?Sized>(&self, val: &T) -> String {
        self.any(&val.reflect())
    }

    /// Renders an erased value at the given nesting level. Per-type
    /// renderers are consulted first, then kind-based dispatch.
    #[must_use]
    pub fn render(&self, val: &Value<'_>, lvl: usize) -> String {
        if let Some(dumper) = self.dumpers.get(&val.ty().id()) {
            let dumper = dumper.clone();
            return dumper(self, lvl, val);
        }
        match val.kind() {
            Kind::Bool(_) | Kind::Int(_) | Kind::Uint(_) | Kind::Float(_) | Kind::Str(_) => {
                simple::simple_dumper(self, lvl, val)
            }
            Kind::Ref(_) => refs::ref_dumper(self, lvl, val),
            Kind::Func(_) => refs::func_dumper(self, lvl, val),
            Kind::Chan(_) => refs::chan_dumper(self, lvl, val),
            Kind::Record(_) => compound::record_dumper(self, lvl, val),
            Kind::Seq(_) => compound::seq_dumper(self, lvl, val),
            Kind::Map(_) => compound::map_dumper(self, lvl, val),
            Kind::Union(inner) => match inner {
                Some(inner) => self.render(inner, lvl),
                None => format!("{}nil", self.tab(lvl)),
            },
            Kind::Other(opaque) => format!("{}{:?}", self.tab(lvl), opaque),
            Kind::Inaccessible => format!("{}<inaccessible>", self.tab(lvl)),
        }
    }

    /// The indentation prefix for the given level: two spaces per level,
    /// including the configured extra levels.
    #[must_use]
    pub fn tab(&self, lvl: usize) -> String {
        "  ".repeat(self.indent + lvl)
    }

    /// A copy configured for embedding values inside a single-line compound
    /// rendering: flat, with no indentation prefix.
    pub(crate) fn inline(&self) -> Self {
        let mut inner = self.clone();
        inner.flat = true;
        inner.indent = 0;
        inner
    }
}

impl Default for Dump {
    fn default() -> Self {
        Self::new()
    }
}

/// Strips module paths from a type name, keeping generic arguments readable:
/// `std::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub(crate) fn short_type_name(full: &str) -> String {
    let mut out = String::new();
    let mut segment = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            out.push_str(segment.rsplit("::").next().unwrap_or(&segment));
            segment.clear();
            out.push(ch);
        }
    }
    out.push_str(segment.rsplit("::").next().unwrap_or(&segment));
    out
}
