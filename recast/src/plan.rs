//! Rebuild plans: which constructor to call, and where each of its arguments
//! comes from.

use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;

use recast_core::{
    ArgError, ArgList, ConstructorDef, Conversion, MemberDef, ParamDef, Record, Value, ValueShape,
    names_match,
};

use crate::ChangeError;

/// Where one constructor argument comes from.
pub enum ArgSource<T: 'static> {
    /// The parameter receives the new value.
    NewValue {
        /// The parameter being fed.
        param: &'static ParamDef,
        /// Turns the new value into the parameter's type.
        conversion: Conversion,
    },
    /// The parameter receives the current value of a member of the original.
    Member {
        /// The parameter being fed.
        param: &'static ParamDef,
        /// The member read.
        member: &'static MemberDef<T>,
        /// Reads `member` off the original.
        getter: fn(&T) -> Value,
        /// Turns the member's value into the parameter's type.
        conversion: Conversion,
    },
}

impl<T: 'static> ArgSource<T> {
    /// The parameter this source feeds.
    pub fn param(&self) -> &'static ParamDef {
        match *self {
            ArgSource::NewValue { param, .. } | ArgSource::Member { param, .. } => param,
        }
    }

    /// The conversion applied before the argument is passed.
    pub fn conversion(&self) -> &Conversion {
        match self {
            ArgSource::NewValue { conversion, .. } | ArgSource::Member { conversion, .. } => {
                conversion
            }
        }
    }
}

impl<T: 'static> fmt::Debug for ArgSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let param = self.param().name;
        match self {
            ArgSource::NewValue { conversion, .. } => {
                write!(f, "{param} <- new value")?;
                if !conversion.is_identity() {
                    write!(f, " ({conversion:?})")?;
                }
            }
            ArgSource::Member {
                member, conversion, ..
            } => {
                write!(f, "{param} <- {}", member.name)?;
                if !conversion.is_identity() {
                    write!(f, " ({conversion:?})")?;
                }
            }
        }
        Ok(())
    }
}

/// A compiled recipe for rebuilding a `T` with one member replaced.
///
/// Compiling resolves every constructor argument to either the new value or a
/// member of the original, and checks all conversions up front. Invoking the
/// plan does no lookups.
pub struct RebuildPlan<T: 'static> {
    type_identifier: &'static str,
    member: &'static MemberDef<T>,
    constructor: &'static ConstructorDef<T>,
    sources: Vec<ArgSource<T>>,
}

impl<T: Record> RebuildPlan<T> {
    /// Compiles the plan that replaces `member` by calling `constructor`.
    ///
    /// Every parameter whose name matches `member` (ignoring case) receives
    /// the new value. Every other parameter reads the public, readable property
    /// or field of the same name. If no parameter matches `member`, the new
    /// value is ignored and the plan produces an equal copy.
    pub fn compile(
        member: &'static MemberDef<T>,
        constructor: &'static ConstructorDef<T>,
    ) -> Result<Self, ChangeError> {
        let shape = T::SHAPE;
        let type_identifier = shape.type_identifier;
        let incompatible = |param: &ParamDef, from: ValueShape| ChangeError::IncompatibleConversion {
            type_identifier,
            parameter: param.name,
            from,
            to: param.shape,
        };

        let mut sources = Vec::with_capacity(constructor.arity());

        for param in constructor.params {
            if names_match(param.name, member.name) {
                let conversion = Conversion::between(member.shape, param.shape)
                    .ok_or_else(|| incompatible(param, member.shape))?;
                sources.push(ArgSource::NewValue { param, conversion });
                continue;
            }

            let missing = || ChangeError::MissingSourceMember {
                type_identifier,
                parameter: param.name,
            };
            let source = shape.find_source(param.name).ok_or_else(missing)?;
            let getter = source.get.ok_or_else(missing)?;
            let conversion = Conversion::between(source.shape, param.shape)
                .ok_or_else(|| incompatible(param, source.shape))?;

            sources.push(ArgSource::Member {
                param,
                member: source,
                getter,
                conversion,
            });
        }

        Ok(Self {
            type_identifier,
            member,
            constructor,
            sources,
        })
    }

    /// Builds a new `T` from `original`, with `new_value` in place of the
    /// member this plan replaces.
    ///
    /// When several parameters receive the new value, all but the last get a
    /// copy, so `new_value` must then be built with [`Value::cloneable`].
    pub fn invoke(&self, original: &T, new_value: Value) -> Result<T, ChangeError> {
        let rejected = |source: ArgError| ChangeError::Argument {
            type_identifier: self.type_identifier,
            constructor: self.constructor.name,
            source,
        };

        let mut new_value = Some(new_value);
        let mut pending = self
            .sources
            .iter()
            .filter(|source| matches!(source, ArgSource::NewValue { .. }))
            .count();
        let mut args = Vec::with_capacity(self.sources.len());

        for (index, source) in self.sources.iter().enumerate() {
            let param = source.param();
            let value = match source {
                ArgSource::NewValue { .. } => {
                    pending -= 1;
                    let value = if pending == 0 {
                        new_value.take()
                    } else {
                        new_value.as_ref().and_then(Value::try_clone)
                    };
                    value.ok_or(ArgError::Missing {
                        index,
                        expected: param.shape,
                    })
                }
                ArgSource::Member { getter, .. } => Ok(getter(original)),
            }
            .map_err(rejected)?;

            let value = source
                .conversion()
                .apply(value)
                .map_err(|value| ArgError::Mismatch {
                    index,
                    expected: param.shape,
                    actual: value.shape(),
                })
                .map_err(rejected)?;
            args.push(value);
        }

        (self.constructor.build)(ArgList::new(args)).map_err(rejected)
    }

    /// The member this plan replaces.
    #[inline]
    pub fn member(&self) -> &'static MemberDef<T> {
        self.member
    }

    /// The constructor this plan calls.
    #[inline]
    pub fn constructor(&self) -> &'static ConstructorDef<T> {
        self.constructor
    }

    /// Argument sources, in parameter order.
    #[inline]
    pub fn sources(&self) -> &[ArgSource<T>] {
        &self.sources
    }

    /// Returns `true` if some constructor parameter receives the new value.
    pub fn uses_new_value(&self) -> bool {
        self.sources
            .iter()
            .any(|source| matches!(source, ArgSource::NewValue { .. }))
    }
}

impl<T: 'static> fmt::Debug for RebuildPlan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}(", self.type_identifier, self.constructor.name)?;
        for (i, source) in self.sources.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{source:?}")?;
        }
        write!(f, ")")
    }
}

/// A [`RebuildPlan`] for a `T` whose member of type `V` is replaced.
///
/// Obtained from [`plan_for`](crate::plan_for) or
/// [`PlanCache::plan_for`](crate::PlanCache::plan_for); the accessor has
/// already been checked, so applying the plan only fails if a record's
/// metadata disagrees with its getters.
pub struct Plan<T: 'static, V> {
    inner: Arc<RebuildPlan<T>>,
    _marker: PhantomData<fn(V)>,
}

impl<T: Record, V: Clone + 'static> Plan<T, V> {
    pub(crate) fn new(inner: Arc<RebuildPlan<T>>) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    /// Rebuilds `original` with `new_value` in place of the member.
    #[inline]
    pub fn apply(&self, original: &T, new_value: V) -> Result<T, ChangeError> {
        self.inner.invoke(original, Value::cloneable(new_value))
    }

    /// The untyped plan.
    #[inline]
    pub fn rebuild_plan(&self) -> &Arc<RebuildPlan<T>> {
        &self.inner
    }
}

impl<T: 'static, V> Clone for Plan<T, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

impl<T: 'static, V> fmt::Debug for Plan<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}
