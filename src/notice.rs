//! Structured mismatch diagnostics and their aggregation.
//!
//! Every point of divergence the comparator finds becomes one [`Notice`]: a
//! header, the trail where it was found, the rendered want/have pair, and any
//! annotation rows attached before or above (`prepend`) or after or below
//! (`append`) that pair. [`Mismatch::join`] merges all notices discovered by
//! one comparison into a single reportable error, preserving depth-first
//! discovery order.

use core::fmt;

use crate::trail::Trail;

/// One structured diagnostic describing a single point of divergence.
///
/// Notices render as a header line followed by right-aligned labelled rows:
///
/// ```text
/// expected values to be equal:
///   trail: user.name
///    want: "ada"
///    have: "bob"
/// ```
///
/// Override checkers build notices with the same API the engine uses:
///
/// ```
/// use likeness::{Notice, Trail};
///
/// let notice = Notice::new("expected values to be equal")
///     .at(Trail::new("len"))
///     .want("3")
///     .have("4");
/// assert_eq!(
///     notice.to_string(),
///     "expected values to be equal:\n  trail: len\n   want: 3\n   have: 4",
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Notice {
    header: String,
    trail: Trail,
    want: Option<String>,
    have: Option<String>,
    before: Vec<(String, String)>,
    after: Vec<(String, String)>,
}

impl Notice {
    /// Creates a notice with the given header and no rows.
    #[must_use]
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            trail: Trail::default(),
            want: None,
            have: None,
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Sets the trail where the divergence was found.
    #[must_use]
    pub fn at(mut self, trail: Trail) -> Self {
        self.trail = trail;
        self
    }

    /// Sets the rendered expected value.
    #[must_use]
    pub fn want(mut self, want: impl Into<String>) -> Self {
        self.want = Some(want.into());
        self
    }

    /// Sets the rendered actual value.
    #[must_use]
    pub fn have(mut self, have: impl Into<String>) -> Self {
        self.have = Some(have.into());
        self
    }

    /// Adds an annotation row rendered above the want/have pair. The most
    /// recently prepended row renders first.
    #[must_use]
    pub fn prepend(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.before.insert(0, (label.into(), value.into()));
        self
    }

    /// Adds an annotation row rendered below the want/have pair.
    #[must_use]
    pub fn append(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.after.push((label.into(), value.into()));
        self
    }

    /// Replaces the header text in place.
    pub fn set_header(&mut self, header: impl Into<String>) {
        self.header = header.into();
    }

    /// The header text.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// The trail where the divergence was found.
    #[must_use]
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// All labelled rows in display order: the trail (when set), prepended
    /// annotations, want, have, appended annotations.
    #[must_use]
    pub fn rows(&self) -> Vec<(String, String)> {
        let mut rows = Vec::new();
        if !self.trail.is_empty() {
            rows.push(("trail".to_string(), self.trail.to_string()));
        }
        rows.extend(self.before.iter().cloned());
        if let Some(want) = &self.want {
            rows.push(("want".to_string(), want.clone()));
        }
        if let Some(have) = &self.have {
            rows.push(("have".to_string(), have.clone()));
        }
        rows.extend(self.after.iter().cloned());
        rows
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header)?;
        let rows = self.rows();
        if rows.is_empty() {
            return Ok(());
        }
        writeln!(f, ":")?;
        let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
        for (i, (label, value)) in rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {label:>width$}: {value}")?;
        }
        Ok(())
    }
}

/// The aggregate error returned by a failed comparison: every [`Notice`]
/// discovered, in depth-first discovery order.
#[derive(Clone, Debug)]
pub struct Mismatch {
    notices: Vec<Notice>,
}

impl Mismatch {
    /// Joins many notices into one reportable error; `None` when the list is
    /// empty (the values compared equal).
    #[must_use]
    pub fn join(notices: Vec<Notice>) -> Option<Self> {
        if notices.is_empty() {
            None
        } else {
            Some(Self { notices })
        }
    }

    /// The notices in discovery order.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

impl From<Notice> for Mismatch {
    fn from(notice: Notice) -> Self {
        Self {
            notices: vec![notice],
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, notice) in self.notices.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            fmt::Display::fmt(notice, f)?;
        }
        Ok(())
    }
}

impl std::error::Error for Mismatch {}
