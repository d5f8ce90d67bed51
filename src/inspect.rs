//! The [`Inspect`] capability trait: how concrete types enter the engine.
//!
//! Without runtime reflection, every comparable type provides its own erased
//! view by implementing [`Inspect`]. The crate ships implementations for the
//! primitive scalars, strings, the common ownership and collection types, and
//! `fn` pointers. Struct authors implement it by hand, listing fields in
//! declaration order:
//!
//! ```
//! use likeness::{Field, Inspect, Value, equal};
//!
//! struct Account {
//!     id: u64,
//!     owner: String,
//! }
//!
//! impl Inspect for Account {
//!     fn reflect(&self) -> Value<'_> {
//!         Value::record::<Self>(vec![
//!             Field::new("id", self.id.reflect()),
//!             Field::new("owner", self.owner.reflect()),
//!         ])
//!     }
//! }
//!
//! let a = Account { id: 1, owner: "ada".into() };
//! let b = Account { id: 1, owner: "ada".into() };
//! assert!(equal(&a, &b).is_ok());
//! ```
//!
//! A field the adapter cannot or will not expose is reported with
//! [`Value::inaccessible`], which makes the comparison fail with a hint
//! unless the skip-unexported option is enabled.

use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
    rc::Rc,
    sync::Arc,
    time::Duration,
};

use crate::value::{Field, Float, Kind, MapValue, RefValue, SeqValue, TypeInfo, Value};

/// Capability of producing an erased, borrowed view of `self`.
///
/// The returned [`Value`] borrows from `self` and is consumed within a single
/// comparison or rendering call; nothing is cached across calls.
pub trait Inspect {
    /// Reflects `self` into an erased value handle.
    fn reflect(&self) -> Value<'_>;
}

// References are transparent: the engine always sees the referent.
impl<T: Inspect + ?Sized> Inspect for &T {
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Inspect + ?Sized> Inspect for &mut T {
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl Inspect for bool {
    fn reflect(&self) -> Value<'_> {
        Value::new(TypeInfo::of::<bool>(), Kind::Bool(*self))
    }
}

macro_rules! impl_inspect_int {
    ($($t:ty),+) => {$(
        impl Inspect for $t {
            fn reflect(&self) -> Value<'_> {
                Value::new(TypeInfo::of::<$t>(), Kind::Int(*self as i128))
            }
        }
    )+};
}

macro_rules! impl_inspect_uint {
    ($($t:ty),+) => {$(
        impl Inspect for $t {
            fn reflect(&self) -> Value<'_> {
                Value::new(TypeInfo::of::<$t>(), Kind::Uint(*self as u128))
            }
        }
    )+};
}

impl_inspect_int!(i8, i16, i32, i64, i128, isize);
impl_inspect_uint!(u8, u16, u32, u64, u128, usize);

impl Inspect for f32 {
    fn reflect(&self) -> Value<'_> {
        Value::new(TypeInfo::of::<f32>(), Kind::Float(Float::F32(*self)))
    }
}

impl Inspect for f64 {
    fn reflect(&self) -> Value<'_> {
        Value::new(TypeInfo::of::<f64>(), Kind::Float(Float::F64(*self)))
    }
}

impl Inspect for str {
    fn reflect(&self) -> Value<'_> {
        Value::new(TypeInfo::of::<str>(), Kind::Str(self))
    }
}

impl Inspect for String {
    fn reflect(&self) -> Value<'_> {
        Value::new(TypeInfo::of::<String>(), Kind::Str(self.as_str()))
    }
}

// Types with no structural rule fall back to generic whole-value equality.
impl Inspect for char {
    fn reflect(&self) -> Value<'_> {
        Value::new(TypeInfo::of::<char>(), Kind::Other(self))
    }
}

impl Inspect for () {
    fn reflect(&self) -> Value<'_> {
        Value::new(TypeInfo::of::<()>(), Kind::Other(self))
    }
}

impl Inspect for Duration {
    fn reflect(&self) -> Value<'_> {
        Value::new(TypeInfo::of::<Duration>(), Kind::Other(self))
    }
}

impl<T: Inspect + 'static> Inspect for Option<T> {
    fn reflect(&self) -> Value<'_> {
        let inner = self.as_ref().map(|v| Box::new(v.reflect()));
        Value::new(TypeInfo::of::<Self>(), Kind::Union(inner))
    }
}

impl<T: Inspect + ?Sized + 'static> Inspect for Box<T> {
    fn reflect(&self) -> Value<'_> {
        let addr = (&**self as *const T).cast::<()>() as usize;
        Value::new(
            TypeInfo::of::<Self>(),
            Kind::Ref(RefValue {
                addr,
                pointee: Some(Box::new((**self).reflect())),
            }),
        )
    }
}

impl<T: Inspect + ?Sized + 'static> Inspect for Rc<T> {
    fn reflect(&self) -> Value<'_> {
        let addr = Rc::as_ptr(self).cast::<()>() as usize;
        Value::new(
            TypeInfo::of::<Self>(),
            Kind::Ref(RefValue {
                addr,
                pointee: Some(Box::new((**self).reflect())),
            }),
        )
    }
}

impl<T: Inspect + ?Sized + 'static> Inspect for Arc<T> {
    fn reflect(&self) -> Value<'_> {
        let addr = Arc::as_ptr(self).cast::<()>() as usize;
        Value::new(
            TypeInfo::of::<Self>(),
            Kind::Ref(RefValue {
                addr,
                pointee: Some(Box::new((**self).reflect())),
            }),
        )
    }
}

impl<T: Inspect + 'static> Inspect for Vec<T> {
    fn reflect(&self) -> Value<'_> {
        Value::new(
            TypeInfo::of::<Self>(),
            Kind::Seq(SeqValue {
                storage: Some(self.as_ptr().cast::<()>() as usize),
                elems: self.iter().map(Inspect::reflect).collect(),
            }),
        )
    }
}

impl<T: Inspect + 'static> Inspect for [T] {
    fn reflect(&self) -> Value<'_> {
        Value::new(
            TypeInfo::of::<Self>(),
            Kind::Seq(SeqValue {
                storage: Some(self.as_ptr().cast::<()>() as usize),
                elems: self.iter().map(Inspect::reflect).collect(),
            }),
        )
    }
}

// Arrays are value types; they never share storage, so no identity
// short-circuit applies.
impl<T: Inspect + 'static, const N: usize> Inspect for [T; N] {
    fn reflect(&self) -> Value<'_> {
        Value::new(
            TypeInfo::of::<Self>(),
            Kind::Seq(SeqValue {
                storage: None,
                elems: self.iter().map(Inspect::reflect).collect(),
            }),
        )
    }
}

impl<K, V, S> Inspect for HashMap<K, V, S>
where
    K: Inspect + 'static,
    V: Inspect + 'static,
    S: BuildHasher + 'static,
{
    fn reflect(&self) -> Value<'_> {
        Value::new(
            TypeInfo::of::<Self>(),
            Kind::Map(MapValue {
                storage: Some((self as *const Self).cast::<()>() as usize),
                entries: self.iter().map(|(k, v)| (k.reflect(), v.reflect())).collect(),
            }),
        )
    }
}

impl<K, V, S> Inspect for hashbrown::HashMap<K, V, S>
where
    K: Inspect + 'static,
    V: Inspect + 'static,
    S: BuildHasher + 'static,
{
    fn reflect(&self) -> Value<'_> {
        Value::new(
            TypeInfo::of::<Self>(),
            Kind::Map(MapValue {
                storage: Some((self as *const Self).cast::<()>() as usize),
                entries: self.iter().map(|(k, v)| (k.reflect(), v.reflect())).collect(),
            }),
        )
    }
}

impl<K, V> Inspect for BTreeMap<K, V>
where
    K: Inspect + 'static,
    V: Inspect + 'static,
{
    fn reflect(&self) -> Value<'_> {
        Value::new(
            TypeInfo::of::<Self>(),
            Kind::Map(MapValue {
                storage: Some((self as *const Self).cast::<()>() as usize),
                entries: self.iter().map(|(k, v)| (k.reflect(), v.reflect())).collect(),
            }),
        )
    }
}

// Tuples reflect as records with positional field names.
macro_rules! impl_inspect_tuple {
    ($(($T:ident, $idx:tt, $name:literal)),+) => {
        impl<$($T: Inspect + 'static),+> Inspect for ($($T,)+) {
            fn reflect(&self) -> Value<'_> {
                Value::record::<Self>(vec![
                    $(Field::new($name, self.$idx.reflect()),)+
                ])
            }
        }
    };
}

impl_inspect_tuple!((A, 0, "0"));
impl_inspect_tuple!((A, 0, "0"), (B, 1, "1"));
impl_inspect_tuple!((A, 0, "0"), (B, 1, "1"), (C, 2, "2"));
impl_inspect_tuple!((A, 0, "0"), (B, 1, "1"), (C, 2, "2"), (D, 3, "3"));

// Function pointers reflect to their address; content is never introspected.
macro_rules! impl_inspect_fnptr {
    ($($arg:ident),*) => {
        impl<Ret: 'static $(, $arg: 'static)*> Inspect for fn($($arg),*) -> Ret {
            fn reflect(&self) -> Value<'_> {
                Value::new(TypeInfo::of::<Self>(), Kind::Func(*self as usize))
            }
        }
    };
}

impl_inspect_fnptr!();
impl_inspect_fnptr!(A1);
impl_inspect_fnptr!(A1, A2);
impl_inspect_fnptr!(A1, A2, A3);
