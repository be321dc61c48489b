/// Implements [`Record`](crate::Record) for a type by listing its members and
/// constructors.
///
/// Every group is optional, but the groups that are present must appear in
/// this order, each followed by a comma:
///
/// - `properties`: public getter methods. The getter may return the declared
///   type or a reference to it; the value is cloned either way.
/// - `fields`: public struct fields, cloned when read.
/// - `private_fields`: fields that exist but are not visible outside the
///   declaring module.
/// - `write_only`: public members that cannot be read.
/// - `methods`: other public methods. They are described but never selected
///   nor used as constructor sources.
/// - `constructors` / `private_constructors`: associated functions returning
///   `Self`, listed with their parameters in declaration order.
///
/// ```
/// use recast_core::Record;
///
/// pub struct Point {
///     pub x: i32,
///     pub y: i32,
/// }
///
/// impl Point {
///     pub fn new(x: i32, y: i32) -> Self {
///         Point { x, y }
///     }
/// }
///
/// recast_core::record! {
///     Point {
///         fields: [x: i32, y: i32],
///         constructors: [new(x: i32, y: i32)],
///     }
/// }
///
/// assert_eq!(Point::SHAPE.members.len(), 2);
/// assert_eq!(Point::SHAPE.constructors[0].arity(), 2);
/// ```
#[macro_export]
macro_rules! record {
    (
        $name:ident {
            $(properties: [$($prop:ident : $prop_ty:ty),* $(,)?],)?
            $(fields: [$($field:ident : $field_ty:ty),* $(,)?],)?
            $(private_fields: [$($pfield:ident : $pfield_ty:ty),* $(,)?],)?
            $(write_only: [$($wo:ident : $wo_ty:ty),* $(,)?],)?
            $(methods: [$($method:ident : $method_ty:ty),* $(,)?],)?
            $(constructors: [
                $($ctor:ident ( $($param:ident : $param_ty:ty),* $(,)? )),* $(,)?
            ],)?
            $(private_constructors: [
                $($pctor:ident ( $($pparam:ident : $pparam_ty:ty),* $(,)? )),* $(,)?
            ],)?
        }
    ) => {
        impl $crate::Record for $name {
            const SHAPE: &'static $crate::RecordShape<Self> = &$crate::RecordShape {
                ty: $crate::ValueShape::of::<$name>(),
                type_identifier: ::core::concat!(
                    ::core::module_path!(),
                    "::",
                    ::core::stringify!($name)
                ),
                members: &[
                    $($(
                        $crate::MemberDef {
                            name: ::core::stringify!($prop),
                            kind: $crate::MemberKind::Property,
                            flags: $crate::MemberFlags::PUBLIC.union($crate::MemberFlags::READABLE),
                            shape: $crate::ValueShape::of::<$prop_ty>(),
                            get: ::core::option::Option::Some(|this: &$name| {
                                let value = this.$prop();
                                let value: &$prop_ty = ::core::borrow::Borrow::borrow(&value);
                                $crate::Value::new::<$prop_ty>(::core::clone::Clone::clone(value))
                            }),
                        },
                    )*)?
                    $($(
                        $crate::MemberDef {
                            name: ::core::stringify!($field),
                            kind: $crate::MemberKind::Field,
                            flags: $crate::MemberFlags::PUBLIC.union($crate::MemberFlags::READABLE),
                            shape: $crate::ValueShape::of::<$field_ty>(),
                            get: ::core::option::Option::Some(|this: &$name| {
                                $crate::Value::new::<$field_ty>(::core::clone::Clone::clone(&this.$field))
                            }),
                        },
                    )*)?
                    $($(
                        $crate::MemberDef {
                            name: ::core::stringify!($pfield),
                            kind: $crate::MemberKind::Field,
                            flags: $crate::MemberFlags::READABLE,
                            shape: $crate::ValueShape::of::<$pfield_ty>(),
                            get: ::core::option::Option::Some(|this: &$name| {
                                $crate::Value::new::<$pfield_ty>(::core::clone::Clone::clone(&this.$pfield))
                            }),
                        },
                    )*)?
                    $($(
                        $crate::MemberDef {
                            name: ::core::stringify!($wo),
                            kind: $crate::MemberKind::Property,
                            flags: $crate::MemberFlags::PUBLIC,
                            shape: $crate::ValueShape::of::<$wo_ty>(),
                            get: ::core::option::Option::None,
                        },
                    )*)?
                    $($(
                        $crate::MemberDef {
                            name: ::core::stringify!($method),
                            kind: $crate::MemberKind::Method,
                            flags: $crate::MemberFlags::PUBLIC.union($crate::MemberFlags::READABLE),
                            shape: $crate::ValueShape::of::<$method_ty>(),
                            get: ::core::option::Option::Some(|this: &$name| {
                                let value = this.$method();
                                let value: &$method_ty = ::core::borrow::Borrow::borrow(&value);
                                $crate::Value::new::<$method_ty>(::core::clone::Clone::clone(value))
                            }),
                        },
                    )*)?
                ],
                constructors: &[
                    $($(
                        $crate::ConstructorDef {
                            name: ::core::stringify!($ctor),
                            visibility: $crate::Visibility::Public,
                            params: &[
                                $($crate::ParamDef {
                                    name: ::core::stringify!($param),
                                    shape: $crate::ValueShape::of::<$param_ty>(),
                                },)*
                            ],
                            build: |mut args: $crate::ArgList| {
                                ::core::result::Result::Ok(<$name>::$ctor(
                                    $(args.take::<$param_ty>()?,)*
                                ))
                            },
                        },
                    )*)?
                    $($(
                        $crate::ConstructorDef {
                            name: ::core::stringify!($pctor),
                            visibility: $crate::Visibility::Private,
                            params: &[
                                $($crate::ParamDef {
                                    name: ::core::stringify!($pparam),
                                    shape: $crate::ValueShape::of::<$pparam_ty>(),
                                },)*
                            ],
                            build: |mut args: $crate::ArgList| {
                                ::core::result::Result::Ok(<$name>::$pctor(
                                    $(args.take::<$pparam_ty>()?,)*
                                ))
                            },
                        },
                    )*)?
                ],
            };
        }
    };
}
