use recast_core::{MemberDef, Record, ValueShape};

use crate::{Accessor, AccessorBody, ChangeError, InvalidUsage};

/// Resolves the member an accessor reads.
///
/// The accessor must read a property or field of `T` directly off its own
/// parameter, and the member must be declared with type `V`. Nothing is
/// evaluated.
pub fn select_member<T: Record, V: 'static>(
    accessor: &Accessor<T, V>,
) -> Result<&'static MemberDef<T>, ChangeError> {
    let shape = T::SHAPE;
    let invalid = |reason: InvalidUsage| ChangeError::InvalidUsage {
        type_identifier: shape.type_identifier,
        reason,
    };

    let (receiver, name) = match accessor.body() {
        AccessorBody::Member { receiver, member } => (receiver, member),
        AccessorBody::Path { receiver, path } => {
            return Err(invalid(InvalidUsage::NestedPath { receiver, path }));
        }
        AccessorBody::MethodCall { method, .. } => {
            return Err(invalid(InvalidUsage::MethodCall { method }));
        }
        AccessorBody::Opaque { source } => {
            return Err(invalid(InvalidUsage::NotMemberAccess { source }));
        }
    };

    if receiver != accessor.parameter() {
        return Err(invalid(InvalidUsage::ForeignReceiver {
            parameter: accessor.parameter(),
            receiver,
        }));
    }

    let member = shape
        .member(name)
        .ok_or_else(|| invalid(InvalidUsage::UnknownMember { member: name }))?;

    if !member.is_property_or_field() {
        return Err(invalid(InvalidUsage::NotPropertyOrField {
            member: member.name,
            kind: member.kind,
        }));
    }

    let supplied = ValueShape::of::<V>();
    if member.shape != supplied {
        return Err(invalid(InvalidUsage::TypeMismatch {
            member: member.name,
            declared: member.shape,
            supplied,
        }));
    }

    Ok(member)
}
