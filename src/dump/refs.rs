//! Renderers for reference-like kinds: nilable references, function
//! references, and channel-like references.

use crate::{
    dump::{Dump, USAGE_ERROR, short_type_name},
    value::{Kind, Value},
};

/// Renders a nilable reference. With address display enabled the machine
/// address is shown instead of the pointee (`<0x0>` for nil); otherwise the
/// pointee is rendered transparently, or `nil`.
pub(crate) fn ref_dumper(dmp: &Dump, lvl: usize, val: &Value<'_>) -> String {
    let Kind::Ref(r) = val.kind() else {
        return format!("{}{}", dmp.tab(lvl), USAGE_ERROR);
    };
    if dmp.ptr_addr {
        return format!("{}<0x{:x}>", dmp.tab(lvl), r.addr);
    }
    match r.pointee.as_deref() {
        Some(pointee) => dmp.render(pointee, lvl),
        None => format!("{}nil", dmp.tab(lvl)),
    }
}

/// Renders a function reference as `<func>(<ADDR>)`, where `ADDR` is the hex
/// address when address display is enabled (`0x0` for nil) and the literal
/// placeholder `addr` otherwise. Invoked on any other kind it returns
/// [`USAGE_ERROR`].
#[must_use]
pub fn func_dumper(dmp: &Dump, lvl: usize, val: &Value<'_>) -> String {
    let Kind::Func(addr) = val.kind() else {
        return format!("{}{}", dmp.tab(lvl), USAGE_ERROR);
    };
    format!("{}<func>(<{}>)", dmp.tab(lvl), addr_body(dmp, *addr))
}

/// Renders a channel-like reference as `(TypeName)(<ADDR>)`, with the same
/// address rules as [`func_dumper`]. Invoked on any other kind it returns
/// [`USAGE_ERROR`].
#[must_use]
pub fn chan_dumper(dmp: &Dump, lvl: usize, val: &Value<'_>) -> String {
    let Kind::Chan(addr) = val.kind() else {
        return format!("{}{}", dmp.tab(lvl), USAGE_ERROR);
    };
    format!(
        "{}({})(<{}>)",
        dmp.tab(lvl),
        short_type_name(val.ty().name()),
        addr_body(dmp, *addr),
    )
}

fn addr_body(dmp: &Dump, addr: usize) -> String {
    if dmp.ptr_addr {
        format!("0x{addr:x}")
    } else {
        "addr".to_string()
    }
}
