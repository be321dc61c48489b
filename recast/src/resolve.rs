use recast_core::{ConstructorDef, Record};

use crate::ChangeError;

/// Picks the constructor used to rebuild `T`: the public constructor with
/// the most parameters.
///
/// When several public constructors share the largest arity, the one
/// declared first wins. Private constructors are never considered.
pub fn find_constructor<T: Record>() -> Result<&'static ConstructorDef<T>, ChangeError> {
    let mut selected: Option<&'static ConstructorDef<T>> = None;
    for constructor in T::SHAPE.public_constructors() {
        if selected.is_none_or(|best| constructor.arity() > best.arity()) {
            selected = Some(constructor);
        }
    }

    selected.ok_or(ChangeError::NoConstructorFound {
        type_identifier: T::SHAPE.type_identifier,
    })
}
