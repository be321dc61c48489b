//! Cache of compiled rebuild plans.
//!
//! Plans are cached per `(record type, member name)` and live as long as the
//! cache does. Compilation happens outside the lock; when two threads compile
//! the same plan concurrently, the first one inserted wins and every caller
//! gets that instance.

use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use hashbrown::HashMap;
use parking_lot::RwLock;
use recast_core::{MemberDef, Record};

use crate::{Accessor, ChangeError, Plan, RebuildPlan, find_constructor, select_member};

/// Identifies a cached plan: a record type and the member being replaced.
#[derive(Clone, Copy)]
pub struct PlanKey {
    record: TypeId,
    type_identifier: &'static str,
    member: &'static str,
}

impl PlanKey {
    /// The key for replacing `member` on `T`.
    pub fn of<T: Record>(member: &'static str) -> Self {
        Self {
            record: TypeId::of::<T>(),
            type_identifier: T::SHAPE.type_identifier,
            member,
        }
    }

    /// The record type's identifier.
    #[inline]
    pub fn type_identifier(&self) -> &'static str {
        self.type_identifier
    }

    /// The member's name.
    #[inline]
    pub fn member(&self) -> &'static str {
        self.member
    }
}

impl PartialEq for PlanKey {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record && self.member == other.member
    }
}

impl Eq for PlanKey {}

impl Hash for PlanKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.record.hash(state);
        self.member.hash(state);
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_identifier, self.member)
    }
}

impl fmt::Debug for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlanKey({self})")
    }
}

/// Counters describing a [`PlanCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached plans.
    pub entries: usize,
    /// Lookups answered without compiling.
    pub hits: u64,
    /// Plans compiled successfully, including ones that lost an insertion
    /// race and were discarded.
    pub compilations: u64,
}

/// Type-erased plan. Always a `RebuildPlan<T>` for the `T` in its key.
type ErasedPlan = Arc<dyn Any + Send + Sync>;

/// A thread-safe map from [`PlanKey`] to compiled [`RebuildPlan`]s.
///
/// Entries are never evicted. Failed compilations are not cached, so a
/// record whose plan cannot be built reports the same error on every call.
pub struct PlanCache {
    plans: RwLock<HashMap<PlanKey, ErasedPlan>>,
    hits: AtomicU64,
    compilations: AtomicU64,
}

static GLOBAL: OnceLock<PlanCache> = OnceLock::new();

impl PlanCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self {
            plans: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            compilations: AtomicU64::new(0),
        }
    }

    /// The process-wide cache used by [`change`](crate::change).
    pub fn global() -> &'static PlanCache {
        GLOBAL.get_or_init(PlanCache::new)
    }

    /// Returns the plan replacing `member` on `T`, compiling and caching it
    /// on first use.
    pub fn get_or_create<T: Record>(
        &self,
        member: &'static MemberDef<T>,
    ) -> Result<Arc<RebuildPlan<T>>, ChangeError> {
        let key = PlanKey::of::<T>(member.name);

        // Fast path: read lock only
        if let Some(erased) = self.plans.read().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(%key, "plan cache hit");
            return downcast(&key, Arc::clone(erased));
        }

        trace!(%key, "plan cache miss");
        let constructor = find_constructor::<T>()?;
        let compiled = Arc::new(RebuildPlan::compile(member, constructor)?);
        self.compilations.fetch_add(1, Ordering::Relaxed);
        debug!(%key, plan = ?compiled, "compiled rebuild plan");

        let winner = {
            let mut plans = self.plans.write();
            // Another thread may have inserted while we were compiling
            let entry = plans
                .entry(key)
                .or_insert_with(|| Arc::clone(&compiled) as ErasedPlan);
            Arc::clone(entry)
        };
        let winner = downcast::<T>(&key, winner)?;
        if !Arc::ptr_eq(&winner, &compiled) {
            trace!(%key, "discarding plan compiled by a losing thread");
        }
        Ok(winner)
    }

    /// Returns the cached plan replacing `member` on `T`, without compiling.
    pub fn get<T: Record>(&self, member: &'static str) -> Option<Arc<RebuildPlan<T>>> {
        let key = PlanKey::of::<T>(member);
        let erased = self.plans.read().get(&key).map(Arc::clone)?;
        downcast(&key, erased).ok()
    }

    /// Returns `true` if a plan replacing `member` on `T` is cached.
    pub fn contains<T: Record>(&self, member: &'static str) -> bool {
        self.plans.read().contains_key(&PlanKey::of::<T>(member))
    }

    /// Number of cached plans.
    pub fn len(&self) -> usize {
        self.plans.read().len()
    }

    /// Returns `true` if no plan is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A snapshot of the cache's counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            compilations: self.compilations.load(Ordering::Relaxed),
        }
    }

    /// Checks `accessor` and returns the plan for the member it names.
    pub fn plan_for<T: Record, V: Clone + 'static>(
        &self,
        accessor: Accessor<T, V>,
    ) -> Result<Plan<T, V>, ChangeError> {
        let member = select_member(&accessor)?;
        Ok(Plan::new(self.get_or_create(member)?))
    }

    /// Returns a copy of `original` with the member named by `accessor` set
    /// to `new_value`, using plans from this cache.
    pub fn change<T: Record, V: Clone + 'static>(
        &self,
        original: &T,
        accessor: Accessor<T, V>,
        new_value: V,
    ) -> Result<T, ChangeError> {
        self.plan_for(accessor)?.apply(original, new_value)
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlanCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plans = self.plans.read();
        f.debug_struct("PlanCache")
            .field("keys", &plans.keys().collect::<Vec<_>>())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("compilations", &self.compilations.load(Ordering::Relaxed))
            .finish()
    }
}

fn downcast<T: Record>(key: &PlanKey, erased: ErasedPlan) -> Result<Arc<RebuildPlan<T>>, ChangeError> {
    erased
        .downcast::<RebuildPlan<T>>()
        .map_err(|_| ChangeError::InvariantViolation {
            key: key.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::accessor;

    #[derive(Debug, PartialEq)]
    struct Gauge {
        pub name: String,
        pub level: u32,
    }

    impl Gauge {
        fn new(name: String, level: u32) -> Self {
            Self { name, level }
        }
    }

    recast_core::record! {
        Gauge {
            fields: [name: String, level: u32],
            constructors: [new(name: String, level: u32)],
        }
    }

    struct Sealed {
        pub size: u8,
    }

    impl Sealed {
        fn new(size: u8) -> Self {
            Self { size }
        }
    }

    recast_core::record! {
        Sealed {
            fields: [size: u8],
            private_constructors: [new(size: u8)],
        }
    }

    fn level() -> &'static MemberDef<Gauge> {
        Gauge::SHAPE.member("level").unwrap()
    }

    #[test]
    fn second_lookup_hits_the_cache() {
        let cache = PlanCache::new();
        assert!(cache.is_empty());

        let first = cache.get_or_create(level()).unwrap();
        let second = cache.get_or_create(level()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.contains::<Gauge>("level"));
        assert!(!cache.contains::<Gauge>("name"));

        assert_eq!(
            cache.stats(),
            CacheStats {
                entries: 1,
                hits: 1,
                compilations: 1
            }
        );
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = PlanCache::new();
        let size = Sealed::SHAPE.member("size").unwrap();

        for _ in 0..2 {
            let err = cache.get_or_create(size).unwrap_err();
            assert!(matches!(err, ChangeError::NoConstructorFound { .. }));
        }
        assert!(cache.is_empty());
        assert_eq!(cache.stats().compilations, 0);
    }

    #[test]
    fn concurrent_callers_share_one_plan() {
        let cache = PlanCache::new();

        let plans: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.get_or_create(level()).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), 1);
        for plan in &plans[1..] {
            assert!(Arc::ptr_eq(&plans[0], plan));
        }
        let stats = cache.stats();
        assert!(stats.compilations >= 1);
        assert_eq!(stats.hits + stats.compilations, 8);
    }

    #[test]
    fn keys_display_type_and_member() {
        let key = PlanKey::of::<Gauge>("level");
        assert_eq!(key.to_string(), "recast::cache::tests::Gauge:level");
        assert_eq!(key, PlanKey::of::<Gauge>("level"));
        assert_ne!(key, PlanKey::of::<Sealed>("level"));
    }

    #[test]
    fn change_goes_through_the_cache() {
        let cache = PlanCache::new();
        let gauge = Gauge::new("boiler".to_string(), 4);

        let changed = cache.change(&gauge, accessor!(g => g.level), 9u32).unwrap();
        assert_eq!(changed, Gauge::new("boiler".to_string(), 9));
        assert_eq!(cache.get::<Gauge>("level").unwrap().member().name, "level");
    }
}
