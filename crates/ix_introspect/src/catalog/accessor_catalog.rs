use alloc::borrow::Cow;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::any::{TypeId, type_name};
use core::fmt;
use core::marker::PhantomData;

use ix_utils::hash::HashMap;

use crate::catalog::{Accessor, AmbiguousError, InvokeResult};
use crate::introspection::{Introspect, Value};

// -----------------------------------------------------------------------------
// AccessorCatalog

/// The accessor surface of one type.
///
/// Accessors are grouped by name; a name may carry several overloads that
/// differ in arity or parameter types. See [`resolve`](Self::resolve).
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use ix_introspect::{Introspect, catalog::AccessorCatalog};
///
/// #[derive(Debug)]
/// struct Flags { offline: bool }
///
/// impl Introspect for Flags {
///     fn catalog(&self) -> AccessorCatalog {
///         AccessorCatalog::builder::<Self>()
///             .field("isOffline", |f| &f.offline)
///             .build()
///     }
/// }
///
/// let catalog = Flags { offline: true }.catalog();
/// let accessor = catalog.resolve("isOffline", &[]).unwrap().unwrap();
/// assert_eq!(accessor.arity(), 0);
/// assert!(catalog.resolve("getOffline", &[]).unwrap().is_none());
/// ```
pub struct AccessorCatalog {
    type_id: TypeId,
    type_name: &'static str,
    accessors: HashMap<Cow<'static, str>, Vec<Accessor>>,
}

impl AccessorCatalog {
    /// Starts a catalog for `T`.
    #[inline]
    pub fn builder<T: Introspect>() -> CatalogBuilder<T> {
        CatalogBuilder {
            catalog: Self {
                type_id: TypeId::of::<T>(),
                type_name: type_name::<T>(),
                accessors: HashMap::default(),
            },
            _marker: PhantomData,
        }
    }

    /// Creates a catalog for `T` without accessors.
    #[inline]
    pub fn empty<T: Introspect>() -> Self {
        Self::builder::<T>().build()
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the name of the described type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the number of accessors, counting every overload.
    pub fn len(&self) -> usize {
        self.accessors.values().map(Vec::len).sum()
    }

    /// Returns `true` if the catalog has no accessors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }

    /// Returns `true` if at least one accessor is called `name`.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.accessors.contains_key(name)
    }

    /// Returns every accessor called `name`.
    #[inline]
    pub fn candidates(&self, name: &str) -> &[Accessor] {
        match self.accessors.get(name) {
            Some(list) => list,
            None => &[],
        }
    }

    /// Iterates over all accessors in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Accessor> {
        self.accessors.values().flatten()
    }

    /// Finds the accessor called `name` for arguments of the given types.
    ///
    /// - No applicable candidate: `Ok(None)`.
    /// - One most specific candidate: `Ok(Some(_))`.
    /// - Several equally specific candidates: [`AmbiguousError`].
    pub fn resolve(
        &self,
        name: &str,
        args: &[TypeId],
    ) -> Result<Option<&Accessor>, AmbiguousError> {
        let applicable: Vec<&Accessor> = self
            .candidates(name)
            .iter()
            .filter(|accessor| accessor.accepts(args))
            .collect();

        match applicable.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(*only)),
            many => {
                let mut best = many
                    .iter()
                    .filter(|a| many.iter().all(|b| a.at_least_as_specific(b)));
                if let (Some(accessor), None) = (best.next(), best.next()) {
                    return Ok(Some(*accessor));
                }
                // Candidates no other candidate is strictly more specific than.
                let tied = many
                    .iter()
                    .filter(|a| {
                        !many
                            .iter()
                            .any(|b| b.at_least_as_specific(a) && !a.at_least_as_specific(b))
                    })
                    .count();
                Err(AmbiguousError {
                    type_name: self.type_name,
                    accessor: name.to_string(),
                    candidates: tied,
                })
            }
        }
    }
}

impl fmt::Debug for AccessorCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorCatalog")
            .field("type_name", &self.type_name)
            .field("accessors", &self.accessors.values().flatten().collect::<Vec<_>>())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// CatalogBuilder

/// Builds an [`AccessorCatalog`] for `T` from typed closures.
///
/// Registering the same name with the same parameter types twice is allowed,
/// but every lookup of that signature will then fail as ambiguous.
pub struct CatalogBuilder<T> {
    catalog: AccessorCatalog,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Introspect> CatalogBuilder<T> {
    /// Adds a prebuilt accessor.
    pub fn accessor(mut self, accessor: Accessor) -> Self {
        let overloads = self
            .catalog
            .accessors
            .entry(accessor.name_key())
            .or_default();

        if overloads.iter().any(|a| a.params() == accessor.params()) {
            log::warn!(
                "accessor `{accessor}` is registered more than once on `{}`, lookups will be ambiguous",
                self.catalog.type_name,
            );
        }

        overloads.push(accessor);
        self
    }

    /// Adds a zero-argument accessor with full control over the result.
    #[inline]
    pub fn getter<F>(self, name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> InvokeResult<'a> + Send + Sync + 'static,
    {
        self.accessor(Accessor::nullary::<T, F>(name, f))
    }

    /// Adds a zero-argument accessor borrowing a value that is always present.
    #[inline]
    pub fn field<V, F>(self, name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        V: Introspect,
        F: for<'a> Fn(&'a T) -> &'a V + Send + Sync + 'static,
    {
        self.getter(name, move |receiver| Ok(Some(Value::Ref(f(receiver)))))
    }

    /// Adds a zero-argument accessor borrowing a value that may be absent.
    #[inline]
    pub fn optional<V, F>(self, name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        V: Introspect,
        F: for<'a> Fn(&'a T) -> Option<&'a V> + Send + Sync + 'static,
    {
        self.getter(name, move |receiver| {
            Ok(f(receiver).map(|value| Value::Ref(value as &dyn Introspect)))
        })
    }

    /// Adds a zero-argument accessor computing an owned value.
    #[inline]
    pub fn computed<V, F>(self, name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        V: Introspect,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.getter(name, move |receiver| Ok(Some(Value::owned(f(receiver)))))
    }

    /// Adds a one-argument accessor taking an argument of type `A`.
    #[inline]
    pub fn unary<A, F>(self, name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        A: Introspect,
        F: for<'a, 'b> Fn(&'a T, &'b A) -> InvokeResult<'a> + Send + Sync + 'static,
    {
        self.accessor(Accessor::unary::<T, A, F>(name, f))
    }

    /// Adds a one-argument accessor accepting any argument type.
    #[inline]
    pub fn unary_any<F>(self, name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: for<'a, 'b> Fn(&'a T, &'b dyn Introspect) -> InvokeResult<'a> + Send + Sync + 'static,
    {
        self.accessor(Accessor::unary_any::<T, F>(name, f))
    }

    /// Finishes the catalog.
    #[inline]
    pub fn build(self) -> AccessorCatalog {
        self.catalog
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use core::any::TypeId;

    use super::AccessorCatalog;
    use crate::Introspect;
    use crate::introspection::Value;

    #[derive(Debug)]
    struct Overloaded;

    impl Introspect for Overloaded {
        fn catalog(&self) -> AccessorCatalog {
            AccessorCatalog::builder::<Self>()
                .unary::<usize, _>("get", |_, i| Ok(Some(Value::owned(*i))))
                .unary_any("get", |_, _| Ok(None))
                .unary_any("find", |_, _| Ok(None))
                .unary_any("find", |_, _| Ok(None))
                .unary::<String, _>("pick", |_, _| Ok(None))
                .unary::<String, _>("pick", |_, _| Ok(None))
                .unary_any("pick", |_, _| Ok(None))
                .computed("getName", |_| String::from("overloaded"))
                .build()
        }
    }

    #[test]
    fn exact_parameter_beats_any() {
        let catalog = Overloaded.catalog();
        let accessor = catalog
            .resolve("get", &[TypeId::of::<usize>()])
            .unwrap()
            .unwrap();
        assert_eq!(accessor.to_string(), "get(usize)");

        let accessor = catalog
            .resolve("get", &[TypeId::of::<String>()])
            .unwrap()
            .unwrap();
        assert_eq!(accessor.to_string(), "get(any)");
    }

    #[test]
    fn equal_candidates_are_ambiguous() {
        let catalog = Overloaded.catalog();
        let err = catalog
            .resolve("find", &[TypeId::of::<String>()])
            .unwrap_err();
        assert_eq!(err.accessor, "find");
        assert_eq!(err.candidates, 2);
    }

    #[test]
    fn only_top_candidates_are_counted() {
        let catalog = Overloaded.catalog();
        let err = catalog
            .resolve("pick", &[TypeId::of::<String>()])
            .unwrap_err();
        assert_eq!(err.candidates, 2);

        // Only the `any` overload applies to other argument types.
        let accessor = catalog
            .resolve("pick", &[TypeId::of::<usize>()])
            .unwrap()
            .unwrap();
        assert_eq!(accessor.to_string(), "pick(any)");
    }

    #[test]
    fn arity_must_match() {
        let catalog = Overloaded.catalog();
        assert!(catalog.resolve("get", &[]).unwrap().is_none());
        assert!(catalog.resolve("getName", &[TypeId::of::<usize>()]).unwrap().is_none());
        assert!(catalog.resolve("getName", &[]).unwrap().is_some());
        assert!(catalog.resolve("missing", &[]).unwrap().is_none());
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.type_id(), TypeId::of::<Overloaded>());
    }
}
