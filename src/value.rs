//! Erased value handles and the kind taxonomy that drives comparison and
//! rendering.
//!
//! Rust has no runtime reflection, so the engine operates on [`Value`]: a
//! borrowed, type-erased view of a concrete datum, produced by the
//! [`Inspect`](crate::Inspect) capability trait. A `Value` carries the static
//! type identity of the datum it was reflected from ([`TypeInfo`]) and a
//! [`Kind`] describing its structural category. The comparator dispatches on
//! the kind; the dumper renders from it.
//!
//! All of the payload types here are fully public so that adapter
//! implementations and override checkers can construct and pattern-match
//! values directly.

use core::{
    any::{Any, TypeId, type_name},
    fmt,
};

/// Static type identity of a reflected value: a [`TypeId`] paired with the
/// type's name for diagnostics.
///
/// Two values compare as the same static type iff their `TypeInfo`s are
/// equal. The name is only used when rendering `want type` / `have type`
/// annotations and record headers.
///
/// # Examples
///
/// ```
/// use likeness::TypeInfo;
///
/// assert_eq!(TypeInfo::of::<i32>(), TypeInfo::of::<i32>());
/// assert_ne!(TypeInfo::of::<i32>(), TypeInfo::of::<i64>());
/// assert_eq!(TypeInfo::of::<i32>().name(), "i32");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// Returns the identity of the static type `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`].
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The full type name, as produced by [`core::any::type_name`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A borrowed, type-erased view of a runtime value.
///
/// Values are created fresh by [`Inspect::reflect`](crate::Inspect::reflect)
/// for the duration of one comparison or rendering call and never outlive the
/// datum they borrow from.
#[derive(Clone, Debug)]
pub struct Value<'a> {
    ty: TypeInfo,
    kind: Kind<'a>,
}

impl<'a> Value<'a> {
    /// Creates a value from explicit parts.
    ///
    /// This is the entry point for hand-built adapters; the blanket
    /// [`Inspect`](crate::Inspect) impls use it internally.
    #[must_use]
    pub fn new(ty: TypeInfo, kind: Kind<'a>) -> Self {
        Self { ty, kind }
    }

    /// Creates a record value of static type `T` with the given fields in
    /// declaration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use likeness::{Field, Inspect, Value};
    ///
    /// struct Point {
    ///     x: i32,
    ///     y: i32,
    /// }
    ///
    /// impl Inspect for Point {
    ///     fn reflect(&self) -> Value<'_> {
    ///         Value::record::<Self>(vec![
    ///             Field::new("x", self.x.reflect()),
    ///             Field::new("y", self.y.reflect()),
    ///         ])
    ///     }
    /// }
    /// ```
    #[must_use]
    pub fn record<T: ?Sized + 'static>(fields: Vec<Field<'a>>) -> Self {
        Self::new(TypeInfo::of::<T>(), Kind::Record(fields))
    }

    /// Creates a value of static type `T` that cannot be introspected.
    ///
    /// Record adapters use this for private fields they do not wish to (or
    /// cannot) expose; the comparator refuses to compare such values unless
    /// the skip-unexported option is enabled.
    #[must_use]
    pub fn inaccessible<T: ?Sized + 'static>() -> Self {
        Self::new(TypeInfo::of::<T>(), Kind::Inaccessible)
    }

    /// The static type identity this value was reflected from.
    #[must_use]
    pub fn ty(&self) -> TypeInfo {
        self.ty
    }

    /// The structural kind of this value.
    #[must_use]
    pub fn kind(&self) -> &Kind<'a> {
        &self.kind
    }
}

/// The structural category of a value, driving comparison and rendering
/// rules.
#[derive(Clone, Debug)]
pub enum Kind<'a> {
    /// Boolean scalar.
    Bool(bool),
    /// Signed integer scalar, widened to `i128`.
    Int(i128),
    /// Unsigned integer scalar, widened to `u128`.
    Uint(u128),
    /// Floating point scalar at its native width.
    Float(Float),
    /// String scalar.
    Str(&'a str),
    /// Nilable reference; dereferenced transparently when both sides are
    /// non-nil.
    Ref(RefValue<'a>),
    /// Record with named fields in declaration order.
    Record(Vec<Field<'a>>),
    /// Sequence (array or slice-like).
    Seq(SeqValue<'a>),
    /// Associative container.
    Map(MapValue<'a>),
    /// Tagged union or dynamic interface, unwrapped to its payload. `None`
    /// means the union holds nothing.
    Union(Option<Box<Value<'a>>>),
    /// Function reference, compared by address only. Zero means nil.
    Func(usize),
    /// Channel-like reference, compared by address only. Zero means nil.
    Chan(usize),
    /// Anything without a dedicated rule; compared with the generic
    /// whole-value equality of [`Opaque`].
    Other(&'a dyn Opaque),
    /// A value the adapter refuses to expose (e.g. a private field).
    Inaccessible,
}

/// A floating point scalar kept at its native width so rendering stays
/// shortest-round-trippable for `f32` as well as `f64`.
#[derive(Copy, Clone, Debug)]
pub enum Float {
    /// 32-bit float.
    F32(f32),
    /// 64-bit float.
    F64(f64),
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::F32(a), Self::F32(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F32(v) => fmt::Display::fmt(v, f),
            Self::F64(v) => fmt::Display::fmt(v, f),
        }
    }
}

/// A nilable reference: the referent's address plus, when non-nil and safely
/// readable, the reflected pointee.
#[derive(Clone, Debug)]
pub struct RefValue<'a> {
    /// Machine address of the referent; `0` for nil references.
    pub addr: usize,
    /// The reflected pointee, absent for nil references.
    pub pointee: Option<Box<Value<'a>>>,
}

/// One named field of a record, in declaration order.
#[derive(Clone, Debug)]
pub struct Field<'a> {
    /// Field name, used to extend the trail.
    pub name: &'static str,
    /// Reflected field value.
    pub value: Value<'a>,
}

impl<'a> Field<'a> {
    /// Creates a field.
    #[must_use]
    pub fn new(name: &'static str, value: Value<'a>) -> Self {
        Self { name, value }
    }
}

/// A sequence value: the reflected elements plus, for slice-like sequences,
/// the address of the backing storage.
///
/// The storage address enables the identity short-circuit: two sequences
/// backed by the very same buffer are equal without element-wise descent.
/// Arrays report no storage address, matching the original engine which
/// short-circuits slices only.
#[derive(Clone, Debug)]
pub struct SeqValue<'a> {
    /// Backing buffer address, when the sequence has shareable storage.
    pub storage: Option<usize>,
    /// Reflected elements in order.
    pub elems: Vec<Value<'a>>,
}

/// An associative-container value: reflected key/value entries plus the
/// address of the container object for the identity short-circuit.
///
/// Entry order is whatever the container's native iteration produced; the
/// comparator and the dumper both re-sort by the canonical key projection.
#[derive(Clone, Debug)]
pub struct MapValue<'a> {
    /// Container address, when one is available.
    pub storage: Option<usize>,
    /// Reflected `(key, value)` entries in native iteration order.
    pub entries: Vec<(Value<'a>, Value<'a>)>,
}

/// Generic whole-value equality for kinds without a dedicated rule.
///
/// Blanket-implemented for every `Any + PartialEq + Debug` type, this is the
/// host-runtime fallback primitive: two opaque values are equal iff they are
/// the same static type and `PartialEq` says so.
pub trait Opaque: Any {
    /// Compares against another opaque value, downcasting first.
    fn opaque_eq(&self, other: &dyn Opaque) -> bool;

    /// Upcast used for downcasting in [`opaque_eq`](Opaque::opaque_eq).
    fn as_any(&self) -> &dyn Any;

    /// Debug-formats the underlying value for diagnostics.
    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T: Any + PartialEq + fmt::Debug> Opaque for T {
    fn opaque_eq(&self, other: &dyn Opaque) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Debug for dyn Opaque + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_debug(f)
    }
}
