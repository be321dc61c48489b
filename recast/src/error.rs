use core::fmt;

use recast_core::{ArgError, MemberKind, ValueShape};

/// Errors that can occur when rebuilding a record with one member replaced.
pub enum ChangeError {
    /// The accessor does not denote a direct property or field read.
    InvalidUsage {
        /// The record type the accessor was applied to.
        type_identifier: &'static str,
        /// What is wrong with the accessor.
        reason: InvalidUsage,
    },

    /// The record type declares no public constructor.
    NoConstructorFound {
        /// The record type.
        type_identifier: &'static str,
    },

    /// A constructor parameter has no public, readable member to read its
    /// argument from.
    MissingSourceMember {
        /// The record type.
        type_identifier: &'static str,
        /// The parameter without a source.
        parameter: &'static str,
    },

    /// A member's type cannot be converted into the type of the constructor
    /// parameter it feeds.
    IncompatibleConversion {
        /// The record type.
        type_identifier: &'static str,
        /// The parameter being fed.
        parameter: &'static str,
        /// Type of the member (or of the new value).
        from: ValueShape,
        /// Type of the parameter.
        to: ValueShape,
    },

    /// A constructor refused the arguments the plan assembled. This means the
    /// record's declared shapes disagree with the values its getters return.
    Argument {
        /// The record type.
        type_identifier: &'static str,
        /// The constructor that was called.
        constructor: &'static str,
        /// What went wrong.
        source: ArgError,
    },

    /// The plan cache returned a plan built for another type.
    InvariantViolation {
        /// Display form of the cache key.
        key: String,
    },
}

impl fmt::Display for ChangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeError::InvalidUsage {
                type_identifier,
                reason,
            } => write!(
                f,
                "Must supply a property or field accessor expression to change {type_identifier}: {reason}"
            ),
            ChangeError::NoConstructorFound { type_identifier } => {
                write!(
                    f,
                    "Type {type_identifier} does not provide any public constructors"
                )
            }
            ChangeError::MissingSourceMember {
                type_identifier,
                parameter,
            } => write!(
                f,
                "No matching property found for constructor argument {parameter} on type {type_identifier}"
            ),
            ChangeError::IncompatibleConversion {
                type_identifier,
                parameter,
                from,
                to,
            } => write!(
                f,
                "Constructor argument {parameter} on type {type_identifier} expects {to}, which cannot be converted from {from}"
            ),
            ChangeError::Argument {
                type_identifier,
                constructor,
                source,
            } => write!(
                f,
                "Constructor {constructor} of type {type_identifier} rejected its arguments: {source}"
            ),
            ChangeError::InvariantViolation { key } => {
                write!(
                    f,
                    "Invariant violation: cached plan for {key} belongs to another type"
                )
            }
        }
    }
}

impl fmt::Debug for ChangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl core::error::Error for ChangeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ChangeError::Argument { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Why an accessor was rejected.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum InvalidUsage {
    /// The body is not a member access at all, e.g. `p => p.price * 2`.
    NotMemberAccess {
        /// Source text of the body.
        source: &'static str,
    },

    /// The body reads through more than one member, e.g. `p => p.name.first`.
    NestedPath {
        /// The receiver the path starts from.
        receiver: &'static str,
        /// The members along the path.
        path: &'static [&'static str],
    },

    /// The body calls a method, e.g. `p => p.describe()`.
    MethodCall {
        /// The method called.
        method: &'static str,
    },

    /// The body reads a member off something other than the accessor's
    /// parameter.
    ForeignReceiver {
        /// The accessor's parameter.
        parameter: &'static str,
        /// What the body reads from instead.
        receiver: &'static str,
    },

    /// The record has no member by that name.
    UnknownMember {
        /// The name read.
        member: &'static str,
    },

    /// The member exists but is neither a property nor a field.
    NotPropertyOrField {
        /// The member.
        member: &'static str,
        /// What it is instead.
        kind: MemberKind,
    },

    /// The member's declared type is not the type of the new value.
    TypeMismatch {
        /// The member.
        member: &'static str,
        /// Its declared type.
        declared: ValueShape,
        /// The type of the value supplied.
        supplied: ValueShape,
    },
}

impl fmt::Display for InvalidUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidUsage::NotMemberAccess { source } => {
                write!(f, "`{source}` is not a member access")
            }
            InvalidUsage::NestedPath { receiver, path } => {
                write!(f, "`{receiver}.{}` reads a nested member", path.join("."))
            }
            InvalidUsage::MethodCall { method } => {
                write!(f, "`{method}(..)` is a method call")
            }
            InvalidUsage::ForeignReceiver {
                parameter,
                receiver,
            } => write!(
                f,
                "the accessor reads from `{receiver}` instead of its parameter `{parameter}`"
            ),
            InvalidUsage::UnknownMember { member } => {
                write!(f, "there is no member named `{member}`")
            }
            InvalidUsage::NotPropertyOrField { member, kind } => {
                write!(f, "`{member}` is a {kind:?}, not a property or field")
            }
            InvalidUsage::TypeMismatch {
                member,
                declared,
                supplied,
            } => write!(
                f,
                "`{member}` is declared as {declared}, but the new value is {supplied}"
            ),
        }
    }
}

impl fmt::Debug for InvalidUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
