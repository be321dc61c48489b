#![warn(missing_docs)]
#![forbid(unsafe_code)]
//! # recast
//!
//! Functional updates for immutable records: build a copy of a value with
//! exactly one member replaced, by calling one of the type's own public
//! constructors.
//!
//! ```
//! use recast::{Change, accessor};
//!
//! #[derive(Debug, PartialEq)]
//! pub struct Product {
//!     pub id: i32,
//!     pub name: String,
//!     pub stock: u32,
//! }
//!
//! impl Product {
//!     pub fn new(id: i32, name: String, stock: u32) -> Self {
//!         Product { id, name, stock }
//!     }
//! }
//!
//! recast::record! {
//!     Product {
//!         fields: [id: i32, name: String, stock: u32],
//!         constructors: [new(id: i32, name: String, stock: u32)],
//!     }
//! }
//!
//! let pen = Product::new(1, "pen".to_string(), 10);
//! let restocked = pen.change(accessor!(p => p.stock), 25u32).unwrap();
//! assert_eq!(restocked, Product::new(1, "pen".to_string(), 25));
//! ```
//!
//! A change goes through four steps:
//!
//! 1. [`select_member`] checks that the [`Accessor`] reads a property or field
//!    directly off its parameter.
//! 2. [`find_constructor`] picks the public constructor with the most
//!    parameters.
//! 3. [`RebuildPlan::compile`] decides where each constructor argument comes
//!    from.
//! 4. [`PlanCache`] keeps the compiled plan for the next change of the same
//!    member.
//!
//! Records describe themselves with the [`record!`] macro from
//! [`recast_core`].

/// Trace-level logging macro that forwards to `tracing::trace!` when the `tracing` feature is enabled.
#[cfg(feature = "tracing")]
#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {
        ::tracing::trace!($($arg)*)
    };
}

/// Trace-level logging macro (no-op when `tracing` feature is disabled).
#[cfg(not(feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

/// Debug-level logging macro that forwards to `tracing::debug!` when the `tracing` feature is enabled.
#[cfg(feature = "tracing")]
#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Debug-level logging macro (no-op when `tracing` feature is disabled).
#[cfg(not(feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

mod accessor;
pub use accessor::*;

mod error;
pub use error::*;

mod select;
pub use select::*;

mod resolve;
pub use resolve::*;

mod plan;
pub use plan::*;

mod cache;
pub use cache::*;

mod change;
pub use change::*;

pub use recast_core::{self, Record, RecordShape, ValueShape, record};
