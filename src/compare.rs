//! The recursive equality engine.
//!
//! [`deep_equal`] walks both values in lockstep, dispatching on kind and
//! accumulating a [`Notice`] for every divergence instead of stopping at the
//! first. The only early exits are documented short-circuits: skipped trails,
//! length mismatches on sequences and maps (per-element diffs are not
//! actionable once lengths differ), and identical backing storage.

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;

use crate::{
    dump::byte_dumper,
    inspect::Inspect,
    notice::{Mismatch, Notice},
    options::Options,
    trail::canonical_key,
    value::{Kind, Value},
};

/// Recursively checks that both values are structurally equal under the
/// default options. Returns the aggregate of every divergence found.
///
/// Comparison cost is bounded only by the size of the inputs; there is no
/// cycle detection, so a self-referential structure recurses until the stack
/// is exhausted.
///
/// # Examples
///
/// ```
/// assert!(likeness::equal(&[1, 2, 3][..], &[1, 2, 3][..]).is_ok());
///
/// let report = likeness::equal(&1, &2).unwrap_err();
/// assert_eq!(
///     report.to_string(),
///     "expected values to be equal:\n  want: 1\n  have: 2",
/// );
/// ```
pub fn equal<W, H>(want: &W, have: &H) -> Result<(), Mismatch>
where
    W: Inspect + ?Sized,
    H: Inspect + ?Sized,
{
    equal_with(want, have, Options::new())
}

/// Like [`equal`], with explicit options.
pub fn equal_with<W, H>(want: &W, have: &H, options: Options) -> Result<(), Mismatch>
where
    W: Inspect + ?Sized,
    H: Inspect + ?Sized,
{
    let w = want.reflect();
    let h = have.reflect();
    match Mismatch::join(deep_equal(Some(&w), Some(&h), options)) {
        Some(mismatch) => Err(mismatch),
        None => Ok(()),
    }
}

/// Checks that both values are **not** structurally equal under the default
/// options. Returns an error iff [`equal`] would have succeeded.
///
/// # Examples
///
/// ```
/// assert!(likeness::not_equal(&1, &2).is_ok());
/// assert!(likeness::not_equal(&1, &1).is_err());
/// ```
pub fn not_equal<W, H>(want: &W, have: &H) -> Result<(), Mismatch>
where
    W: Inspect + ?Sized,
    H: Inspect + ?Sized,
{
    not_equal_with(want, have, Options::new())
}

/// Like [`not_equal`], with explicit options.
pub fn not_equal_with<W, H>(want: &W, have: &H, options: Options) -> Result<(), Mismatch>
where
    W: Inspect + ?Sized,
    H: Inspect + ?Sized,
{
    if equal_with(want, have, options.clone()).is_err() {
        return Ok(());
    }
    let w = want.reflect();
    let h = have.reflect();
    let mut notice = mismatch_notice(Some(&w), Some(&h), &options);
    notice.set_header("expected values not to be equal");
    Err(Mismatch::from(notice))
}

/// The internal comparison function, called recursively. `None` stands for an
/// absent value (a missing map entry, an empty union side).
pub(crate) fn deep_equal(
    want: Option<&Value<'_>>,
    have: Option<&Value<'_>>,
    ops: Options,
) -> Vec<Notice> {
    if ops.is_skipped() {
        return Vec::new();
    }

    let (want, have) = match (want, have) {
        (None, None) => return Vec::new(),
        (Some(w), Some(h)) => (w, h),
        (w, h) => return vec![mismatch_notice(w, h, &ops)],
    };

    if matches!(want.kind(), Kind::Inaccessible) || matches!(have.kind(), Kind::Inaccessible) {
        if ops.skip_unexported {
            return Vec::new();
        }
        return vec![
            Notice::new("cannot compare values")
                .at(ops.trail().clone())
                .append("cause", "value cannot be inspected")
                .append("hint", "use skip_trail or skip_unexported to skip this field"),
        ];
    }

    if want.ty() != have.ty() {
        return vec![mismatch_notice(Some(want), Some(have), &ops)];
    }

    if let Some(checker) = ops.trail_checker_for(ops.trail().as_str()) {
        return checker(want, have, &ops);
    }
    if let Some(checker) = ops.type_checker_for(want.ty().id()) {
        return checker(want, have, &ops);
    }

    match (want.kind(), have.kind()) {
        (Kind::Ref(w), Kind::Ref(h)) => match (w.pointee.as_deref(), h.pointee.as_deref()) {
            (None, None) => Vec::new(),
            (Some(wp), Some(hp)) => deep_equal(Some(wp), Some(hp), ops),
            _ => vec![mismatch_notice(Some(want), Some(have), &ops)],
        },

        (Kind::Record(wf), Kind::Record(hf)) => {
            let mut notices = Vec::new();
            for (wfield, hfield) in wf.iter().zip(hf.iter()) {
                let mut field_ops = ops.clone();
                field_ops.set_trail(ops.trail().field(wfield.name));
                notices.extend(deep_equal(Some(&wfield.value), Some(&hfield.value), field_ops));
            }
            notices
        }

        (Kind::Seq(w), Kind::Seq(h)) => {
            if w.elems.len() != h.elems.len() {
                return vec![
                    mismatch_notice(Some(want), Some(have), &ops)
                        .prepend("have len", h.elems.len().to_string())
                        .prepend("want len", w.elems.len().to_string()),
                ];
            }
            if w.storage.is_some() && w.storage == h.storage {
                return Vec::new();
            }
            let mut notices = Vec::new();
            for (i, (we, he)) in w.elems.iter().zip(h.elems.iter()).enumerate() {
                let mut elem_ops = ops.clone();
                elem_ops.set_trail(ops.trail().index(i));
                notices.extend(deep_equal(Some(we), Some(he), elem_ops));
            }
            notices
        }

        (Kind::Map(w), Kind::Map(h)) => {
            if w.entries.len() != h.entries.len() {
                return vec![
                    mismatch_notice(Some(want), Some(have), &ops)
                        .prepend("have len", h.entries.len().to_string())
                        .prepend("want len", w.entries.len().to_string()),
                ];
            }
            if w.storage.is_some() && w.storage == h.storage {
                return Vec::new();
            }

            let mut have_by_key: HashMap<String, &Value<'_>, FxBuildHasher> = HashMap::default();
            for (key, value) in &h.entries {
                have_by_key.insert(canonical_key(key), value);
            }

            // Keys come from the want side only, sorted by their canonical
            // projection for deterministic traversal.
            let mut keys: Vec<(String, &Value<'_>)> = w
                .entries
                .iter()
                .map(|(key, value)| (canonical_key(key), value))
                .collect();
            keys.sort_by(|(a, _), (b, _)| a.cmp(b));

            let mut notices = Vec::new();
            for (canonical, wv) in keys {
                let mut key_ops = ops.clone();
                key_ops.set_trail(ops.trail().key(&canonical));
                match have_by_key.get(canonical.as_str()) {
                    None => notices.push(mismatch_notice(Some(have), None, &key_ops)),
                    Some(hv) => notices.extend(deep_equal(Some(wv), Some(hv), key_ops)),
                }
            }
            notices
        }

        (Kind::Union(w), Kind::Union(h)) => deep_equal(w.as_deref(), h.as_deref(), ops),

        (Kind::Bool(w), Kind::Bool(h)) if w == h => Vec::new(),
        (Kind::Int(w), Kind::Int(h)) if w == h => Vec::new(),
        (Kind::Uint(w), Kind::Uint(h)) if w == h => Vec::new(),
        (Kind::Float(w), Kind::Float(h)) if w == h => Vec::new(),
        (Kind::Str(w), Kind::Str(h)) if w == h => Vec::new(),

        (Kind::Func(w), Kind::Func(h)) if w == h => Vec::new(),
        (Kind::Chan(w), Kind::Chan(h)) if w == h => Vec::new(),

        (Kind::Other(w), Kind::Other(h)) if w.opaque_eq(*h) => Vec::new(),

        _ => vec![mismatch_notice(Some(want), Some(have), &ops)],
    }
}

/// Builds the standard mismatch notice: trail, rendered want/have, and type
/// annotations when the static types differ. Registers the byte renderer for
/// `u8` unless the caller brought their own.
pub(crate) fn mismatch_notice(
    want: Option<&Value<'_>>,
    have: Option<&Value<'_>>,
    ops: &Options,
) -> Notice {
    let mut dump = ops.dump().clone();
    if !dump.has_dumper::<u8>() {
        dump = dump.with_dumper::<u8>(byte_dumper);
    }

    let want_ty = want.map_or("<nil>", |v| v.ty().name());
    let have_ty = have.map_or("<nil>", |v| v.ty().name());

    let mut notice = Notice::new("expected values to be equal")
        .at(ops.trail().clone())
        .want(want.map_or_else(|| "nil".to_string(), |v| dump.any(v)))
        .have(have.map_or_else(|| "nil".to_string(), |v| dump.any(v)));
    if want_ty != have_ty {
        notice = notice.append("want type", want_ty).append("have type", have_ty);
    }
    notice
}
