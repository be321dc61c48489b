#![warn(missing_docs)]
#![forbid(unsafe_code)]
//! # recast-core
//!
//! The metadata model behind [recast](https://docs.rs/recast): what a record
//! type looks like to the rebuild machinery.
//!
//! - [`ValueShape`] identifies the type of a member, parameter or value.
//! - [`RecordShape`] lists a record's [`MemberDef`]s and [`ConstructorDef`]s.
//! - [`Value`] and [`ArgList`] carry type-erased values into constructors.
//! - [`Conversion`] knows which shapes widen losslessly into which.
//!
//! Records are described with the [`record!`] macro.

mod shape;
pub use shape::*;

mod value;
pub use value::*;

mod record;
pub use record::*;

mod convert;
pub use convert::*;

mod macros;
