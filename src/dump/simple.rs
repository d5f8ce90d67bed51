//! Renderers for scalar kinds.

use core::any::TypeId;

use crate::{
    dump::{Dump, USAGE_ERROR},
    value::{Kind, Value},
};

/// Renders a scalar value (bool, int, uint, float, string) prefixed with the
/// indentation for `lvl`. Invoked on any other kind it returns
/// [`USAGE_ERROR`].
///
/// Strings render in one of three forms: quoted and escaped when flattening
/// applies (forced flat mode, or at most the configured flatten threshold),
/// literal multi-line when the content contains line breaks, and plainly
/// quoted otherwise. Floats use the shortest decimal form that round-trips.
#[must_use]
pub fn simple_dumper(dmp: &Dump, lvl: usize, val: &Value<'_>) -> String {
    let body = match val.kind() {
        Kind::Bool(v) => v.to_string(),
        Kind::Int(v) => v.to_string(),
        Kind::Uint(v) => v.to_string(),
        Kind::Float(v) => v.to_string(),
        Kind::Str(s) => return format!("{}{}", dmp.tab(lvl), string_body(dmp, s)),
        _ => USAGE_ERROR.to_string(),
    };
    format!("{}{}", dmp.tab(lvl), body)
}

fn string_body(dmp: &Dump, s: &str) -> String {
    if dmp.flat || (dmp.flat_strings > 0 && s.len() <= dmp.flat_strings) {
        format!("{s:?}")
    } else if s.contains('\n') {
        s.to_string()
    } else {
        format!("\"{s}\"")
    }
}

/// Renders a single byte as hex, with the printable-character form alongside
/// when applicable: `0x62 ('b')`. Invoked on anything that is not a `u8` it
/// returns [`USAGE_ERROR`].
///
/// The comparator registers this renderer for `u8` when building a notice,
/// unless the caller already registered one.
#[must_use]
pub fn byte_dumper(dmp: &Dump, lvl: usize, val: &Value<'_>) -> String {
    if val.ty().id() != TypeId::of::<u8>() {
        return format!("{}{}", dmp.tab(lvl), USAGE_ERROR);
    }
    let Kind::Uint(v) = val.kind() else {
        return format!("{}{}", dmp.tab(lvl), USAGE_ERROR);
    };
    let byte = *v as u8;
    let body = if (0x20..=0x7e).contains(&byte) {
        format!("0x{byte:02x} ('{}')", byte as char)
    } else {
        format!("0x{byte:02x}")
    };
    format!("{}{}", dmp.tab(lvl), body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Inspect;

    #[test]
    fn scalars_render_plainly() {
        let dmp = Dump::new();
        assert_eq!(simple_dumper(&dmp, 0, &true.reflect()), "true");
        assert_eq!(simple_dumper(&dmp, 0, &(-42i32).reflect()), "-42");
        assert_eq!(simple_dumper(&dmp, 0, &42u8.reflect()), "42");
        assert_eq!(simple_dumper(&dmp, 0, &0.1f32.reflect()), "0.1");
        assert_eq!(simple_dumper(&dmp, 0, &0.1f64.reflect()), "0.1");
    }

    #[test]
    fn strings_quote_by_default_and_stay_literal_when_multiline() {
        let dmp = Dump::new();
        assert_eq!(simple_dumper(&dmp, 0, &"hi".reflect()), "\"hi\"");
        assert_eq!(simple_dumper(&dmp, 0, &"a\nb".reflect()), "a\nb");
    }

    #[test]
    fn flat_mode_escapes_strings() {
        let dmp = Dump::new().with_flat();
        assert_eq!(simple_dumper(&dmp, 0, &"a\nb".reflect()), "\"a\\nb\"");
    }

    #[test]
    fn flatten_threshold_applies_to_short_strings_only() {
        let dmp = Dump::new().with_flat_strings(3);
        assert_eq!(simple_dumper(&dmp, 0, &"a\"b".reflect()), "\"a\\\"b\"");
        assert_eq!(simple_dumper(&dmp, 0, &"long one".reflect()), "\"long one\"");
    }

    #[test]
    fn level_and_indent_prefix_the_output() {
        assert_eq!(simple_dumper(&Dump::new(), 1, &5.reflect()), "  5");
        assert_eq!(
            simple_dumper(&Dump::new().with_indent(2), 1, &5.reflect()),
            "      5",
        );
    }

    #[test]
    fn wrong_kind_is_a_usage_error() {
        let dmp = Dump::new();
        let value = vec![1];
        let seq = value.reflect();
        assert_eq!(simple_dumper(&dmp, 0, &seq), USAGE_ERROR);
        assert_eq!(simple_dumper(&dmp, 2, &seq), format!("    {USAGE_ERROR}"));
    }

    #[test]
    fn bytes_render_hex_with_printable_form() {
        let dmp = Dump::new();
        assert_eq!(byte_dumper(&dmp, 0, &0x62u8.reflect()), "0x62 ('b')");
        assert_eq!(byte_dumper(&dmp, 0, &0x07u8.reflect()), "0x07");
        assert_eq!(byte_dumper(&dmp, 0, &7u16.reflect()), USAGE_ERROR);
    }
}
