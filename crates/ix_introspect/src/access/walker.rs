//! Token-by-token evaluation of path expressions.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::any::{Any, TypeId, type_name};

use ix_utils::accessor_name;

use crate::access::{EvaluationError, EvaluationErrorKind, Token, tokenize, trim_root_token};
use crate::catalog::{Accessor, AccessorCache};
use crate::introspection::{Introspect, Shape, Value};

type StepResult<'a> = Result<Option<Value<'a>>, EvaluationErrorKind>;

// -----------------------------------------------------------------------------
// WalkOptions

/// Options of a [`PathWalker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Drop the leading segment naming the root object, e.g. `project` in
    /// `project.build.directory`. Defaults to `true`.
    pub trim_root_token: bool,
}

impl Default for WalkOptions {
    #[inline]
    fn default() -> Self {
        Self {
            trim_root_token: true,
        }
    }
}

impl WalkOptions {
    /// Sets [`trim_root_token`](Self::trim_root_token).
    #[inline]
    pub const fn with_trim_root_token(mut self, trim_root_token: bool) -> Self {
        self.trim_root_token = trim_root_token;
        self
    }
}

// -----------------------------------------------------------------------------
// PathWalker

/// Evaluates path expressions against `dyn Introspect` roots.
///
/// A walker holds no per-evaluation state; it can be shared between threads
/// and reused for any number of evaluations.
///
/// # Rules
///
/// Each token is applied to the current value:
///
/// - `name` calls `getName`, falling back to `isName`.
/// - `name[i]` calls `getName` and then `get(i)` on the returned sequence or array.
/// - `name(key)` calls `getName` and then `get(key)` on the returned mapping.
///
/// A missing accessor, an absent value or an index past the end ends the walk
/// with `Ok(None)`. Ambiguous accessors, containers of the wrong shape and
/// failing accessors end it with an [`EvaluationError`].
///
/// # Examples
///
/// ```
/// use ix_introspect::{Introspect, access::PathWalker, catalog::AccessorCatalog};
///
/// #[derive(Debug)]
/// struct Project { modules: Vec<String> }
///
/// impl Introspect for Project {
///     fn catalog(&self) -> AccessorCatalog {
///         AccessorCatalog::builder::<Self>()
///             .field("getModules", |p| &p.modules)
///             .build()
///     }
/// }
///
/// let project = Project { modules: vec!["core".into(), "cli".into()] };
/// let walker = PathWalker::new();
///
/// let module = walker.evaluate("project.modules[1]", &project).unwrap().unwrap();
/// assert_eq!(module.downcast_ref::<String>().unwrap(), "cli");
///
/// assert!(walker.evaluate("project.modules[7]", &project).unwrap().is_none());
/// assert!(walker.evaluate("project.missing", &project).unwrap().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PathWalker {
    cache: Arc<AccessorCache>,
    options: WalkOptions,
}

impl Default for PathWalker {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl PathWalker {
    /// Creates a walker over the process-wide [`AccessorCache`].
    #[inline]
    pub fn new() -> Self {
        Self::with_cache(AccessorCache::global().clone())
    }

    /// Creates a walker over a private cache.
    #[inline]
    pub fn with_cache(cache: Arc<AccessorCache>) -> Self {
        Self {
            cache,
            options: WalkOptions::default(),
        }
    }

    /// Replaces the options of this walker.
    #[inline]
    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the options of this walker.
    #[inline]
    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Returns the cache this walker resolves accessors through.
    #[inline]
    pub fn cache(&self) -> &Arc<AccessorCache> {
        &self.cache
    }

    /// Evaluates `expression` against `root` using the walker's options.
    #[inline]
    pub fn evaluate<'a>(
        &self,
        expression: &str,
        root: &'a dyn Introspect,
    ) -> Result<Option<Value<'a>>, EvaluationError> {
        self.evaluate_with(expression, root, self.options.trim_root_token)
    }

    /// Evaluates `expression` against `root`, overriding the trim-root-token option.
    ///
    /// ```
    /// use ix_introspect::access::PathWalker;
    ///
    /// let names = vec![String::from("a"), String::from("bc")];
    /// let walker = PathWalker::new();
    ///
    /// let size = walker.evaluate_with("size", &names, false).unwrap().unwrap();
    /// assert_eq!(size.downcast_ref::<usize>(), Some(&2));
    ///
    /// // Trimming a single-segment expression leaves it unchanged.
    /// let size = walker.evaluate_with("size", &names, true).unwrap().unwrap();
    /// assert_eq!(size.downcast_ref::<usize>(), Some(&2));
    /// ```
    pub fn evaluate_with<'a>(
        &self,
        expression: &str,
        root: &'a dyn Introspect,
        trim: bool,
    ) -> Result<Option<Value<'a>>, EvaluationError> {
        let path = if trim {
            trim_root_token(expression)
        } else {
            expression
        };

        let mut current = Some(Value::Ref(root));
        for segment in tokenize(path) {
            let Some(value) = current else {
                log::trace!("`{expression}`: null before `{segment}`, stopping");
                return Ok(None);
            };
            current = self.advance(expression, segment, value, &Token::classify(segment))?;
        }
        Ok(current)
    }

    /// Like [`evaluate`](Self::evaluate), but a `None` root yields `Ok(None)`.
    #[inline]
    pub fn evaluate_optional<'a>(
        &self,
        expression: &str,
        root: Option<&'a dyn Introspect>,
    ) -> Result<Option<Value<'a>>, EvaluationError> {
        match root {
            Some(root) => self.evaluate(expression, root),
            None => Ok(None),
        }
    }

    /// Evaluates `expression` and returns a copy of the result as `T`.
    ///
    /// Fails with [`InvalidDowncast`] if a value is reached but is not a `T`.
    ///
    /// ```
    /// use ix_introspect::access::PathWalker;
    ///
    /// let walker = PathWalker::new().with_options(Default::default());
    /// let words = vec![String::from("path")];
    ///
    /// assert_eq!(walker.evaluate_as::<usize>("words.size", &words).unwrap(), Some(1));
    /// assert!(walker.evaluate_as::<bool>("words.size", &words).is_err());
    /// ```
    ///
    /// [`InvalidDowncast`]: EvaluationErrorKind::InvalidDowncast
    pub fn evaluate_as<T: Any + Clone>(
        &self,
        expression: &str,
        root: &dyn Introspect,
    ) -> Result<Option<T>, EvaluationError> {
        let Some(value) = self.evaluate(expression, root)? else {
            return Ok(None);
        };
        match value.downcast_ref::<T>() {
            Some(value) => Ok(Some(value.clone())),
            None => Err(EvaluationError::new(
                expression,
                tokenize(expression).last().unwrap_or_default(),
                EvaluationErrorKind::InvalidDowncast {
                    expected: type_name::<T>(),
                    actual: value.as_introspect().type_name(),
                },
            )),
        }
    }

    /// Applies one token to `current`. Errors report the raw `segment`.
    pub(crate) fn advance<'a>(
        &self,
        expression: &str,
        segment: &str,
        current: Value<'a>,
        token: &Token<'_>,
    ) -> Result<Option<Value<'a>>, EvaluationError> {
        log::trace!(
            "`{expression}`: applying `{token}` to `{}`",
            current.as_introspect().type_name()
        );

        let result = match token {
            Token::Plain(name) => self.plain(current, name),
            Token::Indexed { name, index } => self.indexed(current, name, *index),
            Token::Mapped { name, key } => self.mapped(current, name, key),
        };

        match result {
            Ok(None) => {
                log::debug!("`{expression}`: no value at `{token}`");
                Ok(None)
            }
            Ok(value) => Ok(value),
            Err(kind) => Err(EvaluationError::new(expression, segment, kind)),
        }
    }

    fn plain<'a>(&self, current: Value<'a>, name: &str) -> StepResult<'a> {
        let mut accessor = self.resolve(&current, &accessor_name("get", name), &[])?;
        if accessor.is_none() {
            accessor = self.resolve(&current, &accessor_name("is", name), &[])?;
        }
        match accessor {
            Some(accessor) => invoke(current, &accessor, &[]),
            None => Ok(None),
        }
    }

    fn indexed<'a>(&self, current: Value<'a>, name: &str, index: usize) -> StepResult<'a> {
        let Some(container) = self.container(current, name)? else {
            return Ok(None);
        };

        let shape = container.as_introspect().shape();
        if shape.normalize() != Shape::Sequence {
            return Err(EvaluationErrorKind::TypeMismatch {
                expected: Shape::Sequence,
                actual: container.as_introspect().type_name(),
            });
        }

        let Some(get) = self.resolve(&container, "get", &[TypeId::of::<usize>()])? else {
            return Ok(None);
        };
        match invoke(container, &get, &[&index as &dyn Introspect]) {
            Err(EvaluationErrorKind::InvocationFailed { source, .. }) if source.is_out_of_bounds() => {
                Ok(None)
            }
            other => other,
        }
    }

    fn mapped<'a>(&self, current: Value<'a>, name: &str, key: &str) -> StepResult<'a> {
        let Some(container) = self.container(current, name)? else {
            return Ok(None);
        };

        if container.as_introspect().shape() != Shape::Mapping {
            return Err(EvaluationErrorKind::TypeMismatch {
                expected: Shape::Mapping,
                actual: container.as_introspect().type_name(),
            });
        }

        let Some(get) = self.resolve(&container, "get", &[TypeId::of::<String>()])?
        else {
            return Ok(None);
        };
        let key = key.to_string();
        invoke(container, &get, &[&key as &dyn Introspect])
    }

    /// Reads the container behind an indexed or mapped token, `getName` only.
    fn container<'a>(&self, current: Value<'a>, name: &str) -> StepResult<'a> {
        match self.resolve(&current, &accessor_name("get", name), &[])? {
            Some(accessor) => invoke(current, &accessor, &[]),
            None => Ok(None),
        }
    }

    #[inline]
    fn resolve(
        &self,
        receiver: &Value<'_>,
        name: &str,
        args: &[TypeId],
    ) -> Result<Option<Accessor>, EvaluationErrorKind> {
        Ok(self.cache.resolve(receiver.as_introspect(), name, args)?)
    }
}

/// Invokes `accessor` on `receiver`, detaching results that borrow from an
/// owned receiver.
fn invoke<'a>(receiver: Value<'a>, accessor: &Accessor, args: &[&dyn Introspect]) -> StepResult<'a> {
    let result = match receiver {
        Value::Ref(receiver) => accessor.invoke(receiver, args),
        Value::Owned(receiver) => accessor
            .invoke(&*receiver, args)
            .and_then(|value| value.map(Value::into_owned).transpose()),
    };
    result.map_err(|source| EvaluationErrorKind::InvocationFailed {
        accessor: accessor.to_string(),
        source,
    })
}

// -----------------------------------------------------------------------------
// Free functions

/// Evaluates `expression` against `root` with a default [`PathWalker`].
///
/// The first segment is treated as the name of the root and skipped.
///
/// ```
/// let names = vec![String::from("ix")];
/// let size = ix_introspect::evaluate("names.size", &names).unwrap().unwrap();
/// assert_eq!(size.downcast_ref::<usize>(), Some(&1));
///
/// // `get` takes an argument, so `names.get` finds no zero-argument `getGet`.
/// assert!(ix_introspect::evaluate("names.get", &names).unwrap().is_none());
/// ```
#[inline]
pub fn evaluate<'a>(
    expression: &str,
    root: &'a dyn Introspect,
) -> Result<Option<Value<'a>>, EvaluationError> {
    PathWalker::new().evaluate(expression, root)
}

/// Evaluates `expression` against `root` with a default [`PathWalker`],
/// choosing whether to skip the root segment.
#[inline]
pub fn evaluate_with<'a>(
    expression: &str,
    root: &'a dyn Introspect,
    trim_root_token: bool,
) -> Result<Option<Value<'a>>, EvaluationError> {
    PathWalker::new().evaluate_with(expression, root, trim_root_token)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::error::Error;

    use super::{PathWalker, WalkOptions};
    use crate::access::{EvaluationErrorKind, PropertyPath};
    use crate::catalog::{AccessorCache, AccessorCatalog, InvokeError};
    use crate::introspection::{Introspect, Shape};

    #[derive(Debug, Clone, PartialEq)]
    struct Address {
        street: String,
    }

    impl Address {
        fn new(street: &str) -> Self {
            Self {
                street: street.to_string(),
            }
        }
    }

    impl Introspect for Address {
        fn catalog(&self) -> AccessorCatalog {
            AccessorCatalog::builder::<Self>()
                .field("getStreet", |a| &a.street)
                .build()
        }

        fn clone_value(&self) -> Result<Box<dyn Introspect>, InvokeError> {
            Ok(Box::new(self.clone()))
        }
    }

    #[derive(Debug)]
    struct Opaque;

    impl Introspect for Opaque {
        fn catalog(&self) -> AccessorCatalog {
            AccessorCatalog::empty::<Self>()
        }
    }

    #[derive(Debug)]
    struct Handle {
        inner: Opaque,
    }

    impl Introspect for Handle {
        fn catalog(&self) -> AccessorCatalog {
            AccessorCatalog::builder::<Self>()
                .field("getInner", |h| &h.inner)
                .build()
        }
    }

    #[derive(Debug)]
    struct User {
        addresses: Vec<Address>,
        fixed: [Address; 2],
        by_kind: BTreeMap<String, Address>,
        middle: Option<String>,
        nickname: Option<String>,
        active: bool,
    }

    impl Introspect for User {
        fn catalog(&self) -> AccessorCatalog {
            AccessorCatalog::builder::<Self>()
                .field("getAddresses", |u| &u.addresses)
                .field("getFixed", |u| &u.fixed)
                .field("getByKind", |u| &u.by_kind)
                .optional("getMiddle", |u| u.middle.as_ref())
                .optional("isNickname", |u| u.nickname.as_ref())
                .field("isActive", |u| &u.active)
                .computed("getSnapshot", |u| u.addresses[0].clone())
                .computed("getTags", |_| vec!["a".to_string(), "b".to_string()])
                .computed("getHandle", |_| Handle { inner: Opaque })
                .getter("getBroken", |_| Err(InvokeError::failed("disk unavailable")))
                .build()
        }
    }

    #[derive(Debug)]
    struct Twice;

    impl Introspect for Twice {
        fn catalog(&self) -> AccessorCatalog {
            AccessorCatalog::builder::<Self>()
                .computed("getName", |_| 1_u8)
                .computed("getName", |_| 2_u8)
                .build()
        }
    }

    #[derive(Debug)]
    struct Project {
        build: Build,
    }

    #[derive(Debug)]
    struct Build {
        source_directory: String,
    }

    impl Introspect for Project {
        fn catalog(&self) -> AccessorCatalog {
            AccessorCatalog::builder::<Self>()
                .field("getBuild", |p| &p.build)
                .build()
        }
    }

    impl Introspect for Build {
        fn catalog(&self) -> AccessorCatalog {
            AccessorCatalog::builder::<Self>()
                .field("getSourceDirectory", |b| &b.source_directory)
                .build()
        }
    }

    fn user() -> User {
        let home = Address::new("Main St");
        let work = Address::new("Mill Rd");
        User {
            addresses: vec![home.clone(), work.clone(), Address::new("Elm Ave")],
            fixed: [home.clone(), work],
            by_kind: BTreeMap::from([("home".to_string(), home)]),
            middle: None,
            nickname: None,
            active: true,
        }
    }

    fn walker() -> PathWalker {
        PathWalker::with_cache(Arc::new(AccessorCache::new()))
    }

    fn string_at(walker: &PathWalker, expression: &str, root: &dyn Introspect) -> Option<String> {
        walker.evaluate_as::<String>(expression, root).unwrap()
    }

    // Scenarios ------------------------------------------------------------

    #[test]
    fn nested_plain_properties() {
        let project = Project {
            build: Build {
                source_directory: "/src".to_string(),
            },
        };
        let value = walker()
            .evaluate("project.build.sourceDirectory", &project)
            .unwrap()
            .unwrap();
        assert!(value.is_borrowed());
        assert_eq!(value.downcast_ref::<String>().unwrap(), "/src");
    }

    #[test]
    fn indexed_sequence_element() {
        let (walker, user) = (walker(), user());
        assert_eq!(
            string_at(&walker, "user.addresses[1].street", &user).as_deref(),
            Some("Mill Rd"),
        );
    }

    #[test]
    fn mapped_entry() {
        let (walker, user) = (walker(), user());
        assert_eq!(
            string_at(&walker, "user.byKind(home).street", &user).as_deref(),
            Some("Main St"),
        );
        assert_eq!(string_at(&walker, "user.byKind(work).street", &user), None);
    }

    #[test]
    fn index_past_the_end_is_null() {
        let (walker, user) = (walker(), user());
        assert_eq!(string_at(&walker, "user.addresses[5].street", &user), None);
        assert_eq!(string_at(&walker, "user.fixed[2].street", &user), None);
        assert_eq!(string_at(&walker, "user.addresses[99999999999999999999999]", &user), None);
    }

    #[test]
    fn unknown_property_is_null() {
        let (walker, user) = (walker(), user());
        assert!(walker.evaluate("user.unknownProp", &user).unwrap().is_none());
        assert!(walker.evaluate("user.unknown[0]", &user).unwrap().is_none());
        assert!(walker.evaluate("user.unknown(key)", &user).unwrap().is_none());
    }

    #[test]
    fn null_short_circuits() {
        let (walker, user) = (walker(), user());
        assert!(walker.evaluate("user.middle.name", &user).unwrap().is_none());
        // `length[0]` would be a type mismatch on a string, but it is never reached.
        assert!(walker.evaluate("user.middle.length[0]", &user).unwrap().is_none());
        // Same for a value read through an `is` accessor.
        assert!(walker.evaluate("user.nickname.length", &user).unwrap().is_none());

        let user = User {
            nickname: Some("ix".to_string()),
            ..user
        };
        assert_eq!(walker.evaluate_as::<usize>("user.nickname.length", &user).unwrap(), Some(2));
    }

    // Laws -----------------------------------------------------------------

    #[test]
    fn walking_matches_direct_access() {
        let (walker, user) = (walker(), user());
        for (i, address) in user.addresses.iter().enumerate() {
            let expression = alloc::format!("user.addresses[{i}].street");
            assert_eq!(string_at(&walker, &expression, &user).as_ref(), Some(&address.street));
        }
    }

    #[test]
    fn arrays_index_like_sequences() {
        let (walker, user) = (walker(), user());
        assert_eq!(user.fixed.shape().normalize(), user.addresses.shape());
        for i in 0..3 {
            let from_array = string_at(&walker, &alloc::format!("user.fixed[{i}].street"), &user);
            if i < 2 {
                let from_seq = string_at(&walker, &alloc::format!("user.addresses[{i}].street"), &user);
                assert_eq!(from_array, from_seq);
            } else {
                assert_eq!(from_array, None);
            }
        }
    }

    #[test]
    fn ambiguity_always_fails() {
        let walker = walker();
        for expression in ["t.name", "t.name[0]", "t.name(key)"] {
            let err = walker.evaluate(expression, &Twice).unwrap_err();
            assert!(err.is_ambiguous(), "{expression}: {err}");
            assert_eq!(err.token(), expression.trim_start_matches("t."));
        }
    }

    // Rules ----------------------------------------------------------------

    #[test]
    fn is_prefix_only_for_plain_tokens() {
        let (walker, user) = (walker(), user());
        assert_eq!(walker.evaluate_as::<bool>("user.active", &user).unwrap(), Some(true));
        assert!(walker.evaluate("user.active[0]", &user).unwrap().is_none());
    }

    #[test]
    fn wrong_container_shape_is_a_type_mismatch() {
        let (walker, user) = (walker(), user());

        let err = walker.evaluate("user.byKind[0]", &user).unwrap_err();
        assert!(matches!(
            err.kind(),
            EvaluationErrorKind::TypeMismatch { expected: Shape::Sequence, .. }
        ));

        let err = walker.evaluate("user.addresses(home)", &user).unwrap_err();
        assert!(err.is_type_mismatch());
        assert_eq!(err.expression(), "user.addresses(home)");
        assert_eq!(err.token(), "addresses(home)");

        // The raw segment is reported, trailing text included.
        let err = walker.evaluate("user.byKind[0]tail", &user).unwrap_err();
        assert!(err.is_type_mismatch());
        assert_eq!(err.token(), "byKind[0]tail");
        let err = PropertyPath::parse("user.byKind[0]tail", true)
            .evaluate(&walker, &user)
            .unwrap_err();
        assert_eq!(err.token(), "byKind[0]tail");
    }

    #[test]
    fn failing_accessor_keeps_its_cause() {
        let (walker, user) = (walker(), user());
        let err = walker.evaluate("user.broken", &user).unwrap_err();

        match err.kind() {
            EvaluationErrorKind::InvocationFailed { accessor, source } => {
                assert_eq!(accessor, "getBroken()");
                assert!(matches!(source, InvokeError::Failed(_)));
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "Error evaluating `user.broken` at token `broken`: \
             accessor `getBroken()` failed: accessor raised an error: disk unavailable",
        );
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("accessor raised an error: disk unavailable"),
        );
    }

    #[test]
    fn owned_intermediates_are_detached() {
        let (walker, user) = (walker(), user());

        let street = walker.evaluate("user.snapshot.street", &user).unwrap().unwrap();
        assert!(!street.is_borrowed());
        assert_eq!(street.downcast_ref::<String>().unwrap(), "Main St");

        assert_eq!(string_at(&walker, "user.tags[1]", &user).as_deref(), Some("b"));
        assert_eq!(string_at(&walker, "user.tags[2]", &user), None);

        let err = walker.evaluate("user.handle.inner", &user).unwrap_err();
        assert!(matches!(
            err.kind(),
            EvaluationErrorKind::InvocationFailed { source: InvokeError::NotCloneable { .. }, .. }
        ));
    }

    #[test]
    fn trim_root_token_modes() {
        let user = user();
        let untrimmed = walker().with_options(WalkOptions::default().with_trim_root_token(false));
        assert!(!untrimmed.options().trim_root_token);

        assert_eq!(
            string_at(&untrimmed, "addresses[2].street", &user).as_deref(),
            Some("Elm Ave"),
        );
        assert!(
            walker()
                .evaluate_with("addresses[2].street", &user, false)
                .unwrap()
                .is_some()
        );

        // An expression consisting of the root segment alone walks to the root.
        let root = walker().evaluate("user.", &user).unwrap().unwrap();
        assert!(root.downcast_ref::<User>().is_some());
    }

    #[test]
    fn null_root_is_null() {
        let walker = walker();
        assert!(walker.evaluate_optional("user.addresses", None).unwrap().is_none());

        let user = user();
        let some = walker.evaluate_optional("user.addresses", Some(&user)).unwrap();
        assert_eq!(some.unwrap().downcast_ref::<Vec<Address>>(), Some(&user.addresses));
    }

    #[test]
    fn downcast_mismatch_is_reported() {
        let (walker, user) = (walker(), user());
        let err = walker.evaluate_as::<u32>("user.addresses", &user).unwrap_err();
        assert!(matches!(
            err.kind(),
            EvaluationErrorKind::InvalidDowncast { expected: "u32", .. }
        ));
        assert_eq!(err.token(), "addresses");
    }

    #[test]
    fn parsed_paths_match_one_off_evaluation() {
        let (walker, user) = (walker(), user());
        for expression in [
            "user.addresses[0].street",
            "user.byKind(home).street",
            "user.middle.name",
            "user.snapshot.street",
        ] {
            let path = PropertyPath::parse(expression, true);
            let parsed = path
                .evaluate(&walker, &user)
                .unwrap()
                .map(|value| value.downcast_ref::<String>().cloned());
            let direct = walker
                .evaluate(expression, &user)
                .unwrap()
                .map(|value| value.downcast_ref::<String>().cloned());
            assert_eq!(parsed, direct, "{path}");
        }
    }

    #[test]
    fn walkers_share_one_cache_across_threads() {
        let walker = walker();
        let user = user();

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..16 {
                        assert_eq!(
                            string_at(&walker, "user.addresses[0].street", &user).as_deref(),
                            Some("Main St"),
                        );
                    }
                });
            }
        });

        // `User`, `Vec<Address>` and `Address`.
        assert_eq!(walker.cache().len(), 3);
    }
}
