//! Comparison configuration: the immutable-per-recursion-level context
//! threaded down the call tree.
//!
//! [`Options`] is resolved once per top-level comparison from a builder
//! chain; later calls win on conflicting keys. The engine clones the whole
//! context at every recursion boundary and alters only the trail on the
//! copy, so sibling branches can never observe each other's extensions and
//! top-level comparisons are safe to run concurrently from independent call
//! sites.
//!
//! ```
//! use likeness::{Options, equal_with};
//!
//! let opts = Options::new()
//!     .skip_trail("meta.generation")
//!     .flatten_strings(64);
//! assert!(equal_with(&1, &1, opts).is_ok());
//! ```

use std::sync::Arc;

use core::any::TypeId;

use hashbrown::HashMap;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::{dump::Dump, notice::Notice, trail::Trail, value::Value};

/// An override comparator, keyed by exact trail or by static type. It
/// receives both erased values and the current context, and returns the
/// notices it found; an empty list means equal. Its result is used verbatim,
/// replacing the default rules for the whole subtree.
pub type Checker = Arc<dyn Fn(&Value<'_>, &Value<'_>, &Options) -> Vec<Notice> + Send + Sync>;

/// Resolved comparison configuration plus the current trail.
#[derive(Clone, Default)]
pub struct Options {
    pub(crate) trail: Trail,
    pub(crate) skip_trails: Vec<String>,
    pub(crate) skip_unexported: bool,
    pub(crate) trail_checkers: IndexMap<String, Checker, FxBuildHasher>,
    pub(crate) type_checkers: HashMap<TypeId, Checker, FxBuildHasher>,
    pub(crate) dump: Dump,
}

impl Options {
    /// Creates the default configuration: nothing skipped, no overrides,
    /// default rendering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses comparison at one exact, fully-specified trail. A matching
    /// node reports equal and is not descended into.
    #[must_use]
    pub fn skip_trail(mut self, trail: impl Into<String>) -> Self {
        self.skip_trails.push(trail.into());
        self
    }

    /// Treats inaccessible values as equal instead of failing with a hint.
    #[must_use]
    pub fn skip_unexported(mut self) -> Self {
        self.skip_unexported = true;
        self
    }

    /// Registers an override comparator for one exact trail. A later
    /// registration for the same trail wins.
    #[must_use]
    pub fn trail_checker(
        mut self,
        trail: impl Into<String>,
        checker: impl Fn(&Value<'_>, &Value<'_>, &Options) -> Vec<Notice> + Send + Sync + 'static,
    ) -> Self {
        self.trail_checkers.insert(trail.into(), Arc::new(checker));
        self
    }

    /// Registers an override comparator for every value of static type `T`.
    /// A later registration for the same type wins.
    #[must_use]
    pub fn type_checker<T: ?Sized + 'static>(
        mut self,
        checker: impl Fn(&Value<'_>, &Value<'_>, &Options) -> Vec<Notice> + Send + Sync + 'static,
    ) -> Self {
        self.type_checkers.insert(TypeId::of::<T>(), Arc::new(checker));
        self
    }

    /// Renders machine addresses for reference-like values in diagnostics.
    #[must_use]
    pub fn show_addresses(mut self) -> Self {
        self.dump = self.dump.with_ptr_addr();
        self
    }

    /// Adds extra indentation levels to rendered values.
    #[must_use]
    pub fn indent(mut self, levels: usize) -> Self {
        self.dump = self.dump.with_indent(levels);
        self
    }

    /// Flattens strings of at most `threshold` bytes in rendered values.
    #[must_use]
    pub fn flatten_strings(mut self, threshold: usize) -> Self {
        self.dump = self.dump.with_flat_strings(threshold);
        self
    }

    /// Forces single-line rendering everywhere.
    #[must_use]
    pub fn flat(mut self) -> Self {
        self.dump = self.dump.with_flat();
        self
    }

    /// Registers a custom renderer for the static type `T`, consulted before
    /// default kind-based rendering in diagnostics.
    #[must_use]
    pub fn dumper<T: ?Sized + 'static>(
        mut self,
        dumper: impl Fn(&Dump, usize, &Value<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.dump = self.dump.with_dumper::<T>(dumper);
        self
    }

    /// The trail of the value currently under comparison.
    #[must_use]
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// The active rendering configuration.
    #[must_use]
    pub fn dump(&self) -> &Dump {
        &self.dump
    }

    pub(crate) fn set_trail(&mut self, trail: Trail) {
        self.trail = trail;
    }

    pub(crate) fn is_skipped(&self) -> bool {
        self.skip_trails.iter().any(|t| t == self.trail.as_str())
    }

    pub(crate) fn trail_checker_for(&self, trail: &str) -> Option<Checker> {
        self.trail_checkers.get(trail).cloned()
    }

    pub(crate) fn type_checker_for(&self, id: TypeId) -> Option<Checker> {
        self.type_checkers.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_matches_are_exact() {
        let mut ops = Options::new().skip_trail("a.b");
        ops.set_trail(Trail::new("a.b"));
        assert!(ops.is_skipped());
        ops.set_trail(Trail::new("a"));
        assert!(!ops.is_skipped());
        ops.set_trail(Trail::new("a.b.c"));
        assert!(!ops.is_skipped());
    }

    #[test]
    fn clones_extend_trails_independently() {
        let parent = Options::new();
        let mut left = parent.clone();
        let mut right = parent.clone();
        left.set_trail(parent.trail().field("left"));
        right.set_trail(parent.trail().field("right"));
        assert_eq!(parent.trail().as_str(), "");
        assert_eq!(left.trail().as_str(), "left");
        assert_eq!(right.trail().as_str(), "right");
    }

    #[test]
    fn later_checker_registration_wins() {
        let ops = Options::new()
            .trail_checker("x", |_, _, _| vec![Notice::new("first")])
            .trail_checker("x", |_, _, _| vec![Notice::new("second")]);
        let checker = ops.trail_checker_for("x").expect("checker registered");
        let val = crate::Value::new(crate::TypeInfo::of::<i32>(), crate::Kind::Int(1));
        let notices = checker(&val, &val, &ops);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].header(), "second");
    }
}
