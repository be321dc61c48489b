//! Accessor expressions: the caller's description of which member to change.

use core::fmt;
use core::marker::PhantomData;

/// The body of an accessor expression `parameter => body`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessorBody {
    /// `p => p.member`
    Member {
        /// Name the member is read from.
        receiver: &'static str,
        /// Name of the member.
        member: &'static str,
    },
    /// `p => p.a.b`
    Path {
        /// Name the path starts from.
        receiver: &'static str,
        /// Members along the path.
        path: &'static [&'static str],
    },
    /// `p => p.method(..)`
    MethodCall {
        /// Name the method is called on.
        receiver: &'static str,
        /// Name of the method.
        method: &'static str,
    },
    /// Anything else, kept as source text.
    Opaque {
        /// Source text of the body.
        source: &'static str,
    },
}

/// Names the member of `T`, of type `V`, that a change replaces.
///
/// Build one with the [`accessor!`](crate::accessor) macro, which records the
/// shape of the closure-like expression without evaluating it:
///
/// ```
/// use recast::{Accessor, AccessorBody};
///
/// struct Product;
///
/// let by_macro: Accessor<Product, u32> = recast::accessor!(p => p.stock);
/// assert_eq!(by_macro.body(), AccessorBody::Member { receiver: "p", member: "stock" });
/// assert_eq!(by_macro.to_string(), "p => p.stock");
///
/// let by_name: Accessor<Product, u32> = Accessor::of("stock");
/// assert_eq!(by_name.to_string(), "x => x.stock");
/// ```
pub struct Accessor<T, V> {
    parameter: &'static str,
    body: AccessorBody,
    _marker: PhantomData<fn(&T) -> V>,
}

impl<T, V> Accessor<T, V> {
    /// An accessor `parameter => body`.
    pub const fn new(parameter: &'static str, body: AccessorBody) -> Self {
        Self {
            parameter,
            body,
            _marker: PhantomData,
        }
    }

    /// A direct read of `member`, i.e. `x => x.member`.
    pub const fn of(member: &'static str) -> Self {
        Self::new(
            "x",
            AccessorBody::Member {
                receiver: "x",
                member,
            },
        )
    }

    /// The accessor's parameter name.
    #[inline]
    pub fn parameter(&self) -> &'static str {
        self.parameter
    }

    /// The accessor's body.
    #[inline]
    pub fn body(&self) -> AccessorBody {
        self.body
    }
}

impl<T, V> Clone for Accessor<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for Accessor<T, V> {}

impl<T, V> fmt::Display for Accessor<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => ", self.parameter)?;
        match self.body {
            AccessorBody::Member { receiver, member } => write!(f, "{receiver}.{member}"),
            AccessorBody::Path { receiver, path } => {
                write!(f, "{receiver}.{}", path.join("."))
            }
            AccessorBody::MethodCall { receiver, method } => {
                write!(f, "{receiver}.{method}(..)")
            }
            AccessorBody::Opaque { source } => f.write_str(source),
        }
    }
}

impl<T, V> fmt::Debug for Accessor<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Accessor({self})")
    }
}

/// Builds an [`Accessor`] from a closure-like expression `param => body`.
///
/// Only `p => p.member` selects a member. The other forms are accepted by the
/// macro so that they can be rejected, with an explanation, when the change
/// runs:
///
/// - `p => p.a.b` is a nested path,
/// - `p => p.m(..)` is a method call,
/// - anything else is kept as opaque source text.
#[macro_export]
macro_rules! accessor {
    ($param:ident => $receiver:ident . $member:ident) => {
        $crate::Accessor::new(
            ::core::stringify!($param),
            $crate::AccessorBody::Member {
                receiver: ::core::stringify!($receiver),
                member: ::core::stringify!($member),
            },
        )
    };
    ($param:ident => $receiver:ident . $method:ident ( $($args:tt)* )) => {
        $crate::Accessor::new(
            ::core::stringify!($param),
            $crate::AccessorBody::MethodCall {
                receiver: ::core::stringify!($receiver),
                method: ::core::stringify!($method),
            },
        )
    };
    ($param:ident => $receiver:ident $(. $segment:ident)+) => {
        $crate::Accessor::new(
            ::core::stringify!($param),
            $crate::AccessorBody::Path {
                receiver: ::core::stringify!($receiver),
                path: &[$(::core::stringify!($segment)),+],
            },
        )
    };
    ($param:ident => $($body:tt)+) => {
        $crate::Accessor::new(
            ::core::stringify!($param),
            $crate::AccessorBody::Opaque {
                source: ::core::stringify!($($body)+),
            },
        )
    };
}
