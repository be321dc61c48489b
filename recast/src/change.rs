use recast_core::Record;

use crate::{Accessor, ChangeError, Plan, PlanCache};

/// Returns a copy of `original` with the member named by `accessor` set to
/// `new_value`. `original` is left untouched.
///
/// The copy is built by calling the widest public constructor of `T`. The
/// parameter matching the member receives `new_value`; every other parameter
/// receives the current value of the same-named public property or field.
/// Plans are compiled once per `(T, member)` and kept in
/// [`PlanCache::global`].
///
/// ```
/// use recast::accessor;
///
/// #[derive(Debug, PartialEq)]
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
/// recast::record! {
///     Point {
///         fields: [x: i32, y: i32],
///         constructors: [new(x: i32, y: i32)],
///     }
/// }
///
/// let p = Point::new(1, 2);
/// let q = recast::change(&p, accessor!(p => p.y), 5).unwrap();
/// assert_eq!(q, Point::new(1, 5));
/// assert_eq!(p, Point::new(1, 2));
/// ```
pub fn change<T: Record, V: Clone + 'static>(
    original: &T,
    accessor: Accessor<T, V>,
    new_value: V,
) -> Result<T, ChangeError> {
    PlanCache::global().change(original, accessor, new_value)
}

/// Checks `accessor` and returns the cached plan for the member it names,
/// for callers that apply the same change to many records.
pub fn plan_for<T: Record, V: Clone + 'static>(accessor: Accessor<T, V>) -> Result<Plan<T, V>, ChangeError> {
    PlanCache::global().plan_for(accessor)
}

/// Method form of [`change`], available on every [`Record`].
pub trait Change: Record {
    /// Returns a copy of `self` with the member named by `accessor` set to
    /// `new_value`.
    fn change<V: Clone + 'static>(&self, accessor: Accessor<Self, V>, new_value: V) -> Result<Self, ChangeError> {
        change(self, accessor, new_value)
    }
}

impl<T: Record> Change for T {}
