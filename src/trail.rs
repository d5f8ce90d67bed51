//! Location trails: the textual path to the value currently under
//! comparison.
//!
//! A trail is immutable; descending into a field, index, or key produces a
//! new trail, so sibling branches of the recursion never observe each other's
//! extensions. Associative-container keys are canonicalized by rendering them
//! through a default flat dumper; the canonical string is used both to sort
//! keys for deterministic traversal and as the path segment itself.
//! Canonicalization ignores per-call renderer overrides: a custom renderer
//! registered for a key type changes how keys appear in want/have rows, never
//! the traversal order, the path segments, or skip/checker trail matching.
//!
//! Known limitation: two distinct keys whose canonical renderings are
//! identical collide in sort order, in path naming, and in have-side lookup.

use core::fmt;

use crate::{dump::Dump, value::Value};

/// The textual path identifying a location inside a nested value, e.g.
/// `root.field[2]["key"]`.
///
/// # Examples
///
/// ```
/// use likeness::Trail;
///
/// let trail = Trail::default().field("user").field("emails").index(0);
/// assert_eq!(trail.as_str(), "user.emails[0]");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Trail(String);

impl Trail {
    /// Creates a trail rooted at the given path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns a new trail extended with a record field name.
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    /// Returns a new trail extended with a sequence index.
    #[must_use]
    pub fn index(&self, idx: usize) -> Self {
        Self(format!("{}[{}]", self.0, idx))
    }

    /// Returns a new trail extended with a canonical map-key segment.
    #[must_use]
    pub fn key(&self, canonical: &str) -> Self {
        Self(format!("{}[{}]", self.0, canonical))
    }

    /// The trail as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the trail is still at the comparison root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical string projection of a map key: the key rendered through a
/// default flat dumper. Sort key and path segment are the same projection, so
/// traversal order and path naming always agree.
///
/// A fresh default dumper is used on purpose. Per-call renderer overrides
/// never reach this projection, so trails stay stable under any rendering
/// configuration and skip/checker entries written against default paths keep
/// matching.
pub(crate) fn canonical_key(key: &Value<'_>) -> String {
    Dump::new().with_flat().any(key)
}
