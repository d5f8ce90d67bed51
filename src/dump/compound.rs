//! Renderers for compound kinds: records, sequences, and associative
//! containers.
//!
//! Compound values render on a single line with their elements embedded in
//! flat form; indentation applies to the compound as a whole. Map entries are
//! sorted by the flat rendering of their keys so output is deterministic
//! regardless of the container's native iteration order.

use crate::{
    dump::{Dump, USAGE_ERROR, short_type_name},
    value::{Kind, Value},
};

pub(crate) fn record_dumper(dmp: &Dump, lvl: usize, val: &Value<'_>) -> String {
    let Kind::Record(fields) = val.kind() else {
        return format!("{}{}", dmp.tab(lvl), USAGE_ERROR);
    };
    let inner = dmp.inline();
    let body = fields
        .iter()
        .map(|field| format!("{}: {}", field.name, inner.render(&field.value, 0)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{}{}{{{}}}",
        dmp.tab(lvl),
        short_type_name(val.ty().name()),
        body,
    )
}

pub(crate) fn seq_dumper(dmp: &Dump, lvl: usize, val: &Value<'_>) -> String {
    let Kind::Seq(seq) = val.kind() else {
        return format!("{}{}", dmp.tab(lvl), USAGE_ERROR);
    };
    let inner = dmp.inline();
    let body = seq
        .elems
        .iter()
        .map(|elem| inner.render(elem, 0))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}[{}]", dmp.tab(lvl), body)
}

pub(crate) fn map_dumper(dmp: &Dump, lvl: usize, val: &Value<'_>) -> String {
    let Kind::Map(map) = val.kind() else {
        return format!("{}{}", dmp.tab(lvl), USAGE_ERROR);
    };
    let inner = dmp.inline();
    let mut entries: Vec<(String, String)> = map
        .entries
        .iter()
        .map(|(key, value)| (inner.render(key, 0), inner.render(value, 0)))
        .collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    let body = entries
        .into_iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}{{{}}}", dmp.tab(lvl), body)
}
