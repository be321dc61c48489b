use core::fmt;

use crate::{ArgError, ArgList, Value, ValueShape};

/// A type that can be rebuilt through one of its constructors.
///
/// Implement it with the [`record!`](crate::record) macro rather than by hand.
pub trait Record: Sized + 'static {
    /// The shape of this type.
    const SHAPE: &'static RecordShape<Self>;
}

/// Everything recast knows about a record type: its readable members and the
/// constructors that can materialize it.
pub struct RecordShape<T: 'static> {
    /// Shape of the record type itself.
    pub ty: ValueShape,

    /// Module-qualified name of the type, e.g. `shop::catalog::Product`.
    pub type_identifier: &'static str,

    /// Members in declaration order.
    pub members: &'static [MemberDef<T>],

    /// Constructors in declaration order, public and private.
    pub constructors: &'static [ConstructorDef<T>],
}

impl<T: 'static> RecordShape<T> {
    /// Looks a member up by its exact name.
    pub fn member(&self, name: &str) -> Option<&'static MemberDef<T>> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Finds the member a constructor parameter named `name` reads its
    /// argument from: a public, readable property or field whose name matches
    /// ignoring case.
    ///
    /// An exact-case match wins; otherwise the first member declared with a
    /// case-insensitively equal name is returned.
    pub fn find_source(&self, name: &str) -> Option<&'static MemberDef<T>> {
        let sources = || self.members.iter().filter(|m| m.is_readable_source());
        sources()
            .find(|m| m.name == name)
            .or_else(|| sources().find(|m| names_match(m.name, name)))
    }

    /// Public constructors, in declaration order.
    pub fn public_constructors(&self) -> impl Iterator<Item = &'static ConstructorDef<T>> {
        self.constructors
            .iter()
            .filter(|c| c.visibility == Visibility::Public)
    }
}

impl<T: 'static> fmt::Debug for RecordShape<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordShape")
            .field("type_identifier", &self.type_identifier)
            .field("members", &self.members)
            .field("constructors", &self.constructors)
            .finish()
    }
}

/// Case-insensitive name comparison used to pair constructor parameters with
/// members.
pub fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// What sort of member a [`MemberDef`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Read through a getter method, e.g. `fn price(&self) -> Decimal`.
    Property,
    /// A struct field read directly.
    Field,
    /// Any other method. Never selectable and never a value source.
    Method,
}

bitflags::bitflags! {
    /// Access flags of a member.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MemberFlags: u8 {
        /// Visible outside the declaring module.
        const PUBLIC = 1 << 0;
        /// Has a getter.
        const READABLE = 1 << 1;
    }
}

/// Describes a single member of a record.
pub struct MemberDef<T: 'static> {
    /// Member name as written in the type.
    pub name: &'static str,

    /// Property, field or method.
    pub kind: MemberKind,

    /// Access flags.
    pub flags: MemberFlags,

    /// Declared type of the member.
    pub shape: ValueShape,

    /// Reads the member off an instance. `None` for write-only members.
    pub get: Option<fn(&T) -> Value>,
}

impl<T: 'static> MemberDef<T> {
    /// Returns `true` if the member is a property or a field.
    #[inline]
    pub fn is_property_or_field(&self) -> bool {
        matches!(self.kind, MemberKind::Property | MemberKind::Field)
    }

    /// Returns `true` if a constructor argument can be read from this member:
    /// a public, readable property or field.
    pub fn is_readable_source(&self) -> bool {
        self.is_property_or_field()
            && self
                .flags
                .contains(MemberFlags::PUBLIC | MemberFlags::READABLE)
            && self.get.is_some()
    }

    /// Reads the member off `instance`, if it has a getter.
    #[inline]
    pub fn read(&self, instance: &T) -> Option<Value> {
        self.get.map(|get| get(instance))
    }
}

impl<T: 'static> fmt::Debug for MemberDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("flags", &self.flags)
            .field("shape", &self.shape)
            .finish()
    }
}

/// Constructor visibility. Only public constructors are considered when
/// rebuilding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Callable from anywhere.
    Public,
    /// Not callable from outside the declaring module.
    Private,
}

/// A constructor parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamDef {
    /// Parameter name.
    pub name: &'static str,
    /// Declared parameter type.
    pub shape: ValueShape,
}

/// Describes one way of constructing a record.
pub struct ConstructorDef<T: 'static> {
    /// Name of the associated function, e.g. `new`.
    pub name: &'static str,

    /// Visibility.
    pub visibility: Visibility,

    /// Parameters in declaration order.
    pub params: &'static [ParamDef],

    /// Calls the constructor with arguments in parameter order.
    pub build: fn(ArgList) -> Result<T, ArgError>,
}

impl<T: 'static> ConstructorDef<T> {
    /// Number of parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl<T: 'static> fmt::Debug for ConstructorDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", param.name, param.shape)?;
        }
        write!(f, ")")?;
        if self.visibility == Visibility::Private {
            write!(f, " [private]")?;
        }
        Ok(())
    }
}
