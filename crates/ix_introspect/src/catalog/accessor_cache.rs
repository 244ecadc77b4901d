use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ix_utils::TypeIdMap;
use ix_utils::hash::HashMap;
use ix_utils::hash::hashbrown::Equivalent;

use crate::catalog::{Accessor, AccessorCatalog, AmbiguousError};
use crate::introspection::Introspect;

// -----------------------------------------------------------------------------
// Resolution memo keys

#[derive(PartialEq, Eq, Hash)]
struct ResolveKey {
    name: Box<str>,
    args: Box<[TypeId]>,
}

// Must hash exactly like `ResolveKey`.
#[derive(Hash)]
struct ResolveQuery<'a> {
    name: &'a str,
    args: &'a [TypeId],
}

impl Equivalent<ResolveKey> for ResolveQuery<'_> {
    #[inline]
    fn equivalent(&self, key: &ResolveKey) -> bool {
        *self.name == *key.name && *self.args == *key.args
    }
}

type Resolution = Result<Option<Accessor>, AmbiguousError>;

// -----------------------------------------------------------------------------
// TypeAccessors

/// The cached accessor data of one type: its catalog and memoized lookups.
///
/// The catalog never changes after the entry is created.
pub struct TypeAccessors {
    catalog: AccessorCatalog,
    resolved: RwLock<HashMap<ResolveKey, Resolution>>,
}

impl TypeAccessors {
    fn new(catalog: AccessorCatalog) -> Self {
        Self {
            catalog,
            resolved: RwLock::new(HashMap::default()),
        }
    }

    /// Returns the catalog of the type.
    #[inline]
    pub fn catalog(&self) -> &AccessorCatalog {
        &self.catalog
    }

    /// Resolves `name` for arguments of the given types, memoizing the result.
    ///
    /// See [`AccessorCatalog::resolve`].
    pub fn resolve(&self, name: &str, args: &[TypeId]) -> Result<Option<Accessor>, AmbiguousError> {
        let query = ResolveQuery { name, args };
        if let Some(hit) = self
            .resolved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&query)
        {
            return hit.clone();
        }

        let resolution = self.catalog.resolve(name, args).map(|found| found.cloned());

        let mut resolved = self.resolved.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = resolved.get(&query) {
            return hit.clone();
        }
        let key = ResolveKey {
            name: name.into(),
            args: args.into(),
        };
        resolved.insert(key, resolution.clone());
        resolution
    }

    /// Returns the number of memoized lookups.
    pub fn resolved_len(&self) -> usize {
        self.resolved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl fmt::Debug for TypeAccessors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeAccessors")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// AccessorCache

static GLOBAL: LazyLock<Arc<AccessorCache>> = LazyLock::new(|| Arc::new(AccessorCache::new()));

/// Per-type memoization of [`AccessorCatalog`]s.
///
/// The first lookup against a type builds its catalog through
/// [`Introspect::catalog`]; later lookups reuse it. Threads racing on the
/// first lookup may each build a catalog, but only the first one inserted is
/// kept and returned to everyone.
///
/// Entries are keyed by [`TypeId`]. Rust types are never unloaded, so a
/// strong key does not keep anything alive that would otherwise be freed.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use ix_introspect::catalog::AccessorCache;
///
/// let cache = AccessorCache::new();
/// let names = vec![String::from("a")];
///
/// let get = cache.resolve(&names, "get", &[TypeId::of::<usize>()]).unwrap();
/// assert!(get.is_some());
/// assert!(cache.contains(TypeId::of::<Vec<String>>()));
/// ```
pub struct AccessorCache {
    entries: RwLock<TypeIdMap<Arc<TypeAccessors>>>,
}

impl Default for AccessorCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl AccessorCache {
    /// Creates an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Returns the process-wide cache shared by [`PathWalker::new`].
    ///
    /// [`PathWalker::new`]: crate::access::PathWalker::new
    #[inline]
    pub fn global() -> &'static Arc<AccessorCache> {
        &GLOBAL
    }

    fn read(&self) -> RwLockReadGuard<'_, TypeIdMap<Arc<TypeAccessors>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TypeIdMap<Arc<TypeAccessors>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached accessors of the runtime type of `value`,
    /// building its catalog on first use.
    pub fn accessors_of(&self, value: &dyn Introspect) -> Arc<TypeAccessors> {
        let type_id = value.ty_id();
        if let Some(entry) = self.read().get(&type_id) {
            return entry.clone();
        }

        // Build outside the lock, catalogs may be arbitrarily expensive.
        let catalog = value.catalog();
        if catalog.type_id() != type_id {
            log::warn!(
                "`{}` returned a catalog describing `{}`, its accessors will reject the receiver",
                value.type_name(),
                catalog.type_name(),
            );
        }

        self.write()
            .get_or_insert(type_id, || {
                log::debug!(
                    "cached {} accessor(s) for `{}`",
                    catalog.len(),
                    catalog.type_name()
                );
                Arc::new(TypeAccessors::new(catalog))
            })
            .clone()
    }

    /// Resolves accessor `name` on the runtime type of `value` for arguments
    /// of the given types.
    ///
    /// See [`AccessorCatalog::resolve`] for the resolution rules.
    #[inline]
    pub fn resolve(
        &self,
        value: &dyn Introspect,
        name: &str,
        args: &[TypeId],
    ) -> Result<Option<Accessor>, AmbiguousError> {
        self.accessors_of(value).resolve(name, args)
    }

    /// Returns `true` if the type has a cached entry.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.read().contains(&type_id)
    }

    /// Returns the number of cached types.
    #[inline]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if no type has been cached yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl fmt::Debug for AccessorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.read().values().map(|entry| entry.catalog().type_name()))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::any::TypeId;
    use core::sync::atomic::{AtomicUsize, Ordering};

    use super::AccessorCache;
    use crate::Introspect;
    use crate::catalog::AccessorCatalog;

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug)]
    struct Counted;

    impl Introspect for Counted {
        fn catalog(&self) -> AccessorCatalog {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            AccessorCatalog::builder::<Self>()
                .computed("getName", |_| String::from("counted"))
                .build()
        }
    }

    #[test]
    fn catalog_built_once_per_type() {
        let cache = AccessorCache::new();
        let before = BUILDS.load(Ordering::SeqCst);

        for _ in 0..4 {
            assert!(cache.resolve(&Counted, "getName", &[]).unwrap().is_some());
        }

        assert_eq!(BUILDS.load(Ordering::SeqCst) - before, 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.accessors_of(&Counted).resolved_len(), 1);
    }

    #[test]
    fn concurrent_first_lookup_keeps_one_entry() {
        let cache = Arc::new(AccessorCache::new());
        let entries: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let cache = &cache;
                    s.spawn(move || cache.accessors_of(&vec![1_u32, 2, 3]))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), 1);
        assert!(cache.contains(TypeId::of::<Vec<u32>>()));
        for entry in &entries[1..] {
            assert!(Arc::ptr_eq(&entries[0], entry));
        }
    }

    #[test]
    fn misses_are_memoized_too() {
        let cache = AccessorCache::new();
        let name = String::from("ix");

        assert!(cache.resolve(&name, "getMissing", &[]).unwrap().is_none());
        assert!(cache.resolve(&name, "getMissing", &[]).unwrap().is_none());
        assert_eq!(cache.accessors_of(&name).resolved_len(), 1);
    }
}
