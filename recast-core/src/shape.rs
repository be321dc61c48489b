use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

/// Describes the type of a single value: a record member, a constructor
/// parameter, or a [`Value`](crate::Value) in flight.
///
/// The type id and name are stored as function pointers so that a
/// `ValueShape` can be built in `const` items, where neither
/// [`TypeId::of`] nor [`core::any::type_name`] can be called yet.
#[derive(Clone, Copy)]
pub struct ValueShape {
    type_id_fn: fn() -> TypeId,
    type_name_fn: fn() -> &'static str,
}

impl ValueShape {
    /// Shape of `V`.
    #[must_use]
    pub const fn of<V>() -> Self
    where
        V: ?Sized + 'static,
    {
        ValueShape {
            type_id_fn: TypeId::of::<V>,
            type_name_fn: core::any::type_name::<V>,
        }
    }

    /// The [`TypeId`] of the described type.
    #[inline]
    pub fn id(self) -> TypeId {
        (self.type_id_fn)()
    }

    /// The full type name, e.g. `alloc::string::String`.
    #[inline]
    pub fn type_name(self) -> &'static str {
        (self.type_name_fn)()
    }

    /// Returns `true` if this is the shape of `V`.
    #[inline]
    pub fn is<V: ?Sized + 'static>(self) -> bool {
        self.id() == TypeId::of::<V>()
    }
}

impl PartialEq for ValueShape {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for ValueShape {}

impl Hash for ValueShape {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl fmt::Debug for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueShape({})", self.type_name())
    }
}
