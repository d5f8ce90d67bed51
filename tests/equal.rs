use std::{collections::HashMap, time::Duration};

use likeness::{
    Field, Float, Inspect, Kind, Mismatch, Notice, Options, RefValue, TypeInfo, Value, equal,
    equal_with, not_equal, not_equal_with,
};
use static_assertions::assert_impl_all;

assert_impl_all!(Mismatch: std::error::Error, Send, Sync);
assert_impl_all!(Options: Clone, Send, Sync, Default);

struct Point {
    x: i32,
    y: i32,
}

impl Inspect for Point {
    fn reflect(&self) -> Value<'_> {
        Value::record::<Self>(vec![
            Field::new("x", self.x.reflect()),
            Field::new("y", self.y.reflect()),
        ])
    }
}

struct Inner {
    b: i32,
    c: i32,
}

impl Inspect for Inner {
    fn reflect(&self) -> Value<'_> {
        Value::record::<Self>(vec![
            Field::new("b", self.b.reflect()),
            Field::new("c", self.c.reflect()),
        ])
    }
}

struct Outer {
    a: Inner,
}

impl Inspect for Outer {
    fn reflect(&self) -> Value<'_> {
        Value::record::<Self>(vec![Field::new("a", self.a.reflect())])
    }
}

#[test]
fn equal_values_compare_equal() {
    assert!(equal(&true, &true).is_ok());
    assert!(equal(&-7i32, &-7i32).is_ok());
    assert!(equal(&7u64, &7u64).is_ok());
    assert!(equal(&0.25f64, &0.25f64).is_ok());
    assert!(equal(&"hi", &"hi").is_ok());
    assert!(equal(&String::from("hi"), &String::from("hi")).is_ok());
    assert!(equal(&vec![1, 2, 3], &vec![1, 2, 3]).is_ok());
    assert!(equal(&[1, 2], &[1, 2]).is_ok());
    assert!(equal(&Some(5), &Some(5)).is_ok());
    assert!(equal(&None::<i32>, &None::<i32>).is_ok());
    assert!(equal(&(1, "a"), &(1, "a")).is_ok());
    assert!(equal(&Box::new(9), &Box::new(9)).is_ok());
    assert!(equal(&'x', &'x').is_ok());
    assert!(equal(&Duration::from_secs(1), &Duration::from_secs(1)).is_ok());
    assert!(equal(&Point { x: 1, y: 2 }, &Point { x: 1, y: 2 }).is_ok());

    let mut a = HashMap::new();
    a.insert("k", 1);
    let mut b = HashMap::new();
    b.insert("k", 1);
    assert!(equal(&a, &b).is_ok());
}

#[test]
fn mismatch_reports_the_field_trail() {
    let want = Outer {
        a: Inner { b: 1, c: 3 },
    };
    let have = Outer {
        a: Inner { b: 2, c: 3 },
    };
    let report = equal(&want, &have).unwrap_err();
    assert_eq!(
        report.to_string(),
        "expected values to be equal:\n  trail: a.b\n   want: 1\n   have: 2",
    );
}

#[test]
fn all_diverging_fields_are_reported_in_declaration_order() {
    let want = Inner { b: 1, c: 2 };
    let have = Inner { b: 9, c: 8 };
    let report = equal(&want, &have).unwrap_err();
    let trails: Vec<_> = report
        .notices()
        .iter()
        .map(|n| n.trail().as_str().to_string())
        .collect();
    assert_eq!(trails, ["b", "c"]);
}

#[test]
fn static_type_mismatch_annotates_both_types() {
    let report = equal(&1i32, &1i64).unwrap_err();
    assert_eq!(report.notices().len(), 1);
    let rows = report.notices()[0].rows();
    assert_eq!(rows[0], ("want".to_string(), "1".to_string()));
    assert_eq!(rows[1], ("have".to_string(), "1".to_string()));
    assert_eq!(rows[2], ("want type".to_string(), "i32".to_string()));
    assert_eq!(rows[3], ("have type".to_string(), "i64".to_string()));
}

#[test]
fn sequence_length_mismatch_short_circuits() {
    let report = equal(&vec![1, 2], &vec![1, 2, 3]).unwrap_err();
    assert_eq!(report.notices().len(), 1);
    let rows = report.notices()[0].rows();
    assert_eq!(rows[0], ("want len".to_string(), "2".to_string()));
    assert_eq!(rows[1], ("have len".to_string(), "3".to_string()));
    assert_eq!(rows[2], ("want".to_string(), "[1, 2]".to_string()));
    assert_eq!(rows[3], ("have".to_string(), "[1, 2, 3]".to_string()));
}

#[test]
fn sequence_elements_are_addressed_by_index() {
    let report = equal(&vec![1, 2, 3], &vec![1, 9, 3]).unwrap_err();
    assert_eq!(report.notices().len(), 1);
    assert_eq!(report.notices()[0].trail().as_str(), "[1]");
}

#[test]
fn identical_backing_storage_skips_element_descent() {
    let poison = Options::new().trail_checker("[0]", |_, _, ops| {
        vec![Notice::new("descended").at(ops.trail().clone())]
    });

    let v = vec![1, 2, 3];
    assert!(equal_with(&v, &v, poison.clone()).is_ok());

    let w = vec![1, 2, 3];
    let report = equal_with(&v, &w, poison).unwrap_err();
    assert_eq!(report.notices()[0].header(), "descended");
}

#[test]
fn map_values_are_addressed_by_canonical_key() {
    let mut want = HashMap::new();
    want.insert("a", 1);
    want.insert("b", 2);
    let mut have = HashMap::new();
    have.insert("a", 1);
    have.insert("b", 3);
    let report = equal(&want, &have).unwrap_err();
    assert_eq!(report.notices().len(), 1);
    assert_eq!(report.notices()[0].trail().as_str(), "[\"b\"]");
}

#[test]
fn map_traversal_is_deterministic() {
    let mut want = HashMap::new();
    let mut have = HashMap::new();
    for key in ["c", "a", "b"] {
        want.insert(key, 1);
        have.insert(key, 2);
    }
    let report = equal(&want, &have).unwrap_err();
    let trails: Vec<_> = report
        .notices()
        .iter()
        .map(|n| n.trail().as_str().to_string())
        .collect();
    assert_eq!(trails, ["[\"a\"]", "[\"b\"]", "[\"c\"]"]);
}

#[test]
fn map_length_mismatch_short_circuits() {
    let mut want = HashMap::new();
    want.insert("a", 1);
    let mut have = HashMap::new();
    have.insert("a", 1);
    have.insert("b", 2);
    let report = equal(&want, &have).unwrap_err();
    assert_eq!(report.notices().len(), 1);
    let rows = report.notices()[0].rows();
    assert_eq!(rows[0], ("want len".to_string(), "1".to_string()));
    assert_eq!(rows[1], ("have len".to_string(), "2".to_string()));
}

#[test]
fn missing_map_key_reports_nil_have() {
    let mut want = HashMap::new();
    want.insert("a", 1);
    want.insert("b", 2);
    let mut have = HashMap::new();
    have.insert("a", 1);
    have.insert("c", 2);
    let report = equal(&want, &have).unwrap_err();
    assert_eq!(report.notices().len(), 1);
    let notice = &report.notices()[0];
    assert_eq!(notice.trail().as_str(), "[\"b\"]");
    assert!(notice.rows().contains(&("have".to_string(), "nil".to_string())));
}

#[test]
fn skipped_trails_match_exactly() {
    let want = Inner { b: 1, c: 2 };
    let have = Inner { b: 9, c: 8 };

    let report = equal_with(&want, &have, Options::new().skip_trail("b")).unwrap_err();
    let trails: Vec<_> = report
        .notices()
        .iter()
        .map(|n| n.trail().as_str().to_string())
        .collect();
    assert_eq!(trails, ["c"]);

    // No partial matching; an unrelated trail suppresses nothing.
    let report = equal_with(&want, &have, Options::new().skip_trail("b.x")).unwrap_err();
    assert_eq!(report.notices().len(), 2);

    // The empty trail is the root itself.
    assert!(equal_with(&want, &have, Options::new().skip_trail("")).is_ok());
}

#[test]
fn skipping_a_subtree_suppresses_its_descendants() {
    let want = Outer {
        a: Inner { b: 1, c: 2 },
    };
    let have = Outer {
        a: Inner { b: 9, c: 8 },
    };
    assert!(equal_with(&want, &have, Options::new().skip_trail("a")).is_ok());
}

struct Secret {
    shown: i32,
}

impl Inspect for Secret {
    fn reflect(&self) -> Value<'_> {
        Value::record::<Self>(vec![
            Field::new("shown", self.shown.reflect()),
            Field::new("hidden", Value::inaccessible::<i32>()),
        ])
    }
}

#[test]
fn inaccessible_fields_fail_with_a_hint() {
    let report = equal(&Secret { shown: 1 }, &Secret { shown: 1 }).unwrap_err();
    assert_eq!(report.notices().len(), 1);
    let notice = &report.notices()[0];
    assert_eq!(notice.header(), "cannot compare values");
    assert_eq!(notice.trail().as_str(), "hidden");
}

#[test]
fn skip_unexported_treats_inaccessible_fields_as_equal() {
    let opts = Options::new().skip_unexported();
    assert!(equal_with(&Secret { shown: 1 }, &Secret { shown: 1 }, opts.clone()).is_ok());
    let report = equal_with(&Secret { shown: 1 }, &Secret { shown: 2 }, opts).unwrap_err();
    assert_eq!(report.notices()[0].trail().as_str(), "shown");
}

#[test]
fn trail_checker_replaces_the_default_rules() {
    let want = Point { x: 1, y: 2 };
    let have = Point { x: 1, y: 5 };

    let lenient = Options::new().trail_checker("y", |_, _, _| Vec::new());
    assert!(equal_with(&want, &have, lenient).is_ok());

    let strict = Options::new().trail_checker("x", |_, _, ops| {
        vec![Notice::new("never equal").at(ops.trail().clone())]
    });
    let report = equal_with(&want, &have, strict).unwrap_err();
    assert_eq!(report.notices()[0].header(), "never equal");
    assert_eq!(report.notices()[0].trail().as_str(), "x");
}

#[test]
fn type_checker_applies_to_every_value_of_the_type() {
    let tolerant = Options::new().type_checker::<f64>(|want, have, ops| {
        let (Kind::Float(Float::F64(w)), Kind::Float(Float::F64(h))) = (want.kind(), have.kind())
        else {
            return vec![Notice::new("expected floats").at(ops.trail().clone())];
        };
        if (w - h).abs() < 1e-6 {
            Vec::new()
        } else {
            vec![Notice::new("out of tolerance").at(ops.trail().clone())]
        }
    });
    assert!(equal_with(&0.1f64, &(0.1f64 + 1e-9), tolerant.clone()).is_ok());
    assert!(equal_with(&vec![0.1f64], &vec![0.1f64 + 1e-9], tolerant.clone()).is_ok());
    let report = equal_with(&0.1f64, &0.2f64, tolerant).unwrap_err();
    assert_eq!(report.notices()[0].header(), "out of tolerance");
}

#[test]
fn not_equal_inverts_the_check() {
    assert!(not_equal(&1, &2).is_ok());
    let report = not_equal(&1, &1).unwrap_err();
    assert_eq!(
        report.to_string(),
        "expected values not to be equal:\n  want: 1\n  have: 1",
    );
    assert!(not_equal_with(&vec![1], &vec![2], Options::new()).is_ok());
}

#[test]
fn unions_unwrap_to_their_payload() {
    let report = equal(&Some(1), &Some(2)).unwrap_err();
    assert_eq!(report.notices().len(), 1);
    let rows = report.notices()[0].rows();
    assert_eq!(rows[0], ("want".to_string(), "1".to_string()));
    assert_eq!(rows[1], ("have".to_string(), "2".to_string()));
}

#[test]
fn one_empty_union_side_is_a_mismatch() {
    let report = equal(&Some(1), &None::<i32>).unwrap_err();
    assert_eq!(report.notices().len(), 1);
    let rows = report.notices()[0].rows();
    assert!(rows.contains(&("have".to_string(), "nil".to_string())));
}

struct Handle(Option<Box<i32>>);

impl Inspect for Handle {
    fn reflect(&self) -> Value<'_> {
        let (addr, pointee) = match &self.0 {
            Some(boxed) => (
                (&**boxed as *const i32) as usize,
                Some(Box::new((**boxed).reflect())),
            ),
            None => (0, None),
        };
        Value::new(TypeInfo::of::<Self>(), Kind::Ref(RefValue { addr, pointee }))
    }
}

#[test]
fn nil_references_are_equal_to_each_other_only() {
    assert!(equal(&Handle(None), &Handle(None)).is_ok());
    assert!(equal(&Handle(Some(Box::new(5))), &Handle(Some(Box::new(5)))).is_ok());

    let report = equal(&Handle(None), &Handle(Some(Box::new(5)))).unwrap_err();
    assert_eq!(report.notices().len(), 1);
}

#[test]
fn dereferencing_leaves_the_trail_unchanged() {
    let report = equal(&Handle(Some(Box::new(1))), &Handle(Some(Box::new(2)))).unwrap_err();
    let notice = &report.notices()[0];
    assert!(notice.trail().is_empty());
    let rows = notice.rows();
    assert_eq!(rows[0], ("want".to_string(), "1".to_string()));
    assert_eq!(rows[1], ("have".to_string(), "2".to_string()));
}

#[test]
fn function_references_compare_by_address() {
    fn one() -> i32 {
        1
    }
    fn two() -> i32 {
        2
    }
    let a: fn() -> i32 = one;
    let b: fn() -> i32 = two;
    assert!(equal(&a, &a).is_ok());
    assert!(equal(&a, &b).is_err());
}

#[test]
fn bytes_render_as_hex_in_notices() {
    let report = equal(&vec![0x62u8], &vec![0x63u8]).unwrap_err();
    let rows = report.notices()[0].rows();
    assert_eq!(rows[1], ("want".to_string(), "0x62 ('b')".to_string()));
    assert_eq!(rows[2], ("have".to_string(), "0x63 ('c')".to_string()));
}

#[test]
fn opaque_fallback_uses_generic_equality() {
    let report = equal(&'a', &'b').unwrap_err();
    let rows = report.notices()[0].rows();
    assert_eq!(rows[0], ("want".to_string(), "'a'".to_string()));
    assert_eq!(rows[1], ("have".to_string(), "'b'".to_string()));
    assert!(equal(&Duration::from_secs(1), &Duration::from_secs(2)).is_err());
}

#[test]
fn canonical_paths_ignore_renderer_overrides() {
    let mut want = HashMap::new();
    want.insert("a", "x");
    let mut have = HashMap::new();
    have.insert("a", "y");
    let opts = Options::new()
        .dumper::<str>(|dmp, lvl, _| format!("{}<redacted>", dmp.tab(lvl)));
    let report = equal_with(&want, &have, opts).unwrap_err();
    let notice = &report.notices()[0];
    // The override reaches the want/have rows but not the path segment.
    assert_eq!(notice.trail().as_str(), "[\"a\"]");
    let rows = notice.rows();
    assert_eq!(rows[1], ("want".to_string(), "<redacted>".to_string()));
    assert_eq!(rows[2], ("have".to_string(), "<redacted>".to_string()));
}

#[test]
fn dump_options_shape_notice_rendering() {
    let report = equal_with(
        &Handle(None),
        &Handle(Some(Box::new(5))),
        Options::new().show_addresses(),
    )
    .unwrap_err();
    let rows = report.notices()[0].rows();
    assert_eq!(rows[0], ("want".to_string(), "<0x0>".to_string()));
    assert!(rows[1].1.starts_with("<0x"), "{}", rows[1].1);

    let report =
        equal_with(&"a\nb", &"a\nc", Options::new().flatten_strings(8)).unwrap_err();
    let rows = report.notices()[0].rows();
    assert_eq!(rows[0], ("want".to_string(), "\"a\\nb\"".to_string()));
    assert_eq!(rows[1], ("have".to_string(), "\"a\\nc\"".to_string()));

    let report = equal_with(&1, &2, Options::new().indent(1)).unwrap_err();
    let rows = report.notices()[0].rows();
    assert_eq!(rows[0], ("want".to_string(), "  1".to_string()));
}

#[test]
fn nan_is_never_equal_to_itself() {
    assert!(equal(&f64::NAN, &f64::NAN).is_err());
    assert!(equal(&f32::NAN, &f32::NAN).is_err());
}
