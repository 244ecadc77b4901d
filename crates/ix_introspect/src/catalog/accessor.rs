//! Type-erased accessors.

use alloc::borrow::Cow;
use alloc::sync::Arc;
use core::any::{TypeId, type_name};
use core::fmt;

use crate::catalog::InvokeError;
use crate::introspection::{Introspect, Value};

/// The result of invoking an [`Accessor`].
///
/// `Ok(None)` means the accessor produced no value (a `null` property).
pub type InvokeResult<'a> = Result<Option<Value<'a>>, InvokeError>;

type NullaryFn = dyn for<'a> Fn(&'a dyn Introspect) -> InvokeResult<'a> + Send + Sync;
type UnaryFn = dyn for<'a, 'b> Fn(&'a dyn Introspect, &'b dyn Introspect) -> InvokeResult<'a> + Send + Sync;

// Closures only get a higher-ranked signature when checked against a bound.
#[inline(always)]
fn nullary_fn<F>(f: F) -> F
where
    F: for<'a> Fn(&'a dyn Introspect) -> InvokeResult<'a> + Send + Sync + 'static,
{
    f
}

#[inline(always)]
fn unary_fn<F>(f: F) -> F
where
    F: for<'a, 'b> Fn(&'a dyn Introspect, &'b dyn Introspect) -> InvokeResult<'a>
        + Send
        + Sync
        + 'static,
{
    f
}

fn downcast_receiver<T: Introspect>(receiver: &dyn Introspect) -> Result<&T, InvokeError> {
    receiver
        .downcast_ref::<T>()
        .ok_or_else(|| InvokeError::ReceiverMismatch {
            expected: type_name::<T>(),
            actual: receiver.type_name(),
        })
}

// -----------------------------------------------------------------------------
// ParamType

/// The declared type of an accessor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Accepts exactly one argument type.
    Exact {
        id: TypeId,
        name: &'static str,
    },
    /// Accepts any argument type; the accessor inspects the argument itself.
    Any,
}

impl ParamType {
    /// Creates an [`Exact`](ParamType::Exact) parameter for `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        ParamType::Exact {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns `true` if an argument of type `arg` can be passed.
    #[inline]
    pub fn accepts(&self, arg: TypeId) -> bool {
        match self {
            ParamType::Exact { id, .. } => *id == arg,
            ParamType::Any => true,
        }
    }

    /// Exact parameters are more specific than `Any`.
    #[inline]
    pub(crate) fn specificity(&self) -> u8 {
        match self {
            ParamType::Exact { .. } => 1,
            ParamType::Any => 0,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Exact { name, .. } => f.write_str(name),
            ParamType::Any => f.write_str("any"),
        }
    }
}

// -----------------------------------------------------------------------------
// Accessor

#[derive(Clone)]
enum Invoker {
    Nullary(Arc<NullaryFn>),
    Unary(ParamType, Arc<UnaryFn>),
}

/// A named zero- or one-argument accessor of some type.
///
/// Accessors are created by a [`CatalogBuilder`](super::CatalogBuilder) and
/// invoked against `&dyn Introspect` receivers. Cloning is cheap.
///
/// # Examples
///
/// ```
/// use ix_introspect::{Introspect, Value};
/// use ix_introspect::catalog::Accessor;
///
/// let len = Accessor::nullary::<String, _>("getLength", |s| {
///     Ok(Some(Value::owned(s.len())))
/// });
///
/// let receiver = String::from("four");
/// let value = len.invoke(&receiver, &[]).unwrap().unwrap();
/// assert_eq!(value.downcast_ref::<usize>(), Some(&4));
/// ```
#[derive(Clone)]
pub struct Accessor {
    name: Cow<'static, str>,
    invoker: Invoker,
}

impl Accessor {
    /// Creates a zero-argument accessor on `T`.
    pub fn nullary<T, F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        T: Introspect,
        F: for<'a> Fn(&'a T) -> InvokeResult<'a> + Send + Sync + 'static,
    {
        let invoke = nullary_fn(move |receiver| f(downcast_receiver::<T>(receiver)?));
        Self {
            name: name.into(),
            invoker: Invoker::Nullary(Arc::new(invoke)),
        }
    }

    /// Creates a one-argument accessor on `T` taking an argument of type `A`.
    pub fn unary<T, A, F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        T: Introspect,
        A: Introspect,
        F: for<'a, 'b> Fn(&'a T, &'b A) -> InvokeResult<'a> + Send + Sync + 'static,
    {
        let invoke = unary_fn(move |receiver, arg| {
            let receiver = downcast_receiver::<T>(receiver)?;
            let arg = arg
                .downcast_ref::<A>()
                .ok_or_else(|| InvokeError::ArgumentMismatch {
                    expected: type_name::<A>(),
                    actual: arg.type_name(),
                })?;
            f(receiver, arg)
        });
        Self {
            name: name.into(),
            invoker: Invoker::Unary(ParamType::of::<A>(), Arc::new(invoke)),
        }
    }

    /// Creates a one-argument accessor on `T` accepting any argument type.
    pub fn unary_any<T, F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        T: Introspect,
        F: for<'a, 'b> Fn(&'a T, &'b dyn Introspect) -> InvokeResult<'a> + Send + Sync + 'static,
    {
        let invoke = unary_fn(move |receiver, arg| f(downcast_receiver::<T>(receiver)?, arg));
        Self {
            name: name.into(),
            invoker: Invoker::Unary(ParamType::Any, Arc::new(invoke)),
        }
    }

    /// Returns the accessor name, e.g. `getBuild`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub(crate) fn name_key(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    /// Returns the declared parameters.
    #[inline]
    pub fn params(&self) -> &[ParamType] {
        match &self.invoker {
            Invoker::Nullary(_) => &[],
            Invoker::Unary(param, _) => core::slice::from_ref(param),
        }
    }

    /// Returns the number of parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params().len()
    }

    /// Returns `true` if this accessor can be called with arguments of the given types.
    pub fn accepts(&self, args: &[TypeId]) -> bool {
        let params = self.params();
        params.len() == args.len() && params.iter().zip(args).all(|(p, a)| p.accepts(*a))
    }

    /// Returns `true` if every parameter is at least as specific as the
    /// corresponding parameter of `other`.
    pub(crate) fn at_least_as_specific(&self, other: &Accessor) -> bool {
        self.params()
            .iter()
            .zip(other.params())
            .all(|(a, b)| a.specificity() >= b.specificity())
    }

    /// Invokes the accessor against `receiver`.
    pub fn invoke<'a>(
        &self,
        receiver: &'a dyn Introspect,
        args: &[&dyn Introspect],
    ) -> InvokeResult<'a> {
        match (&self.invoker, args) {
            (Invoker::Nullary(f), []) => f(receiver),
            (Invoker::Unary(_, f), [arg]) => f(receiver, *arg),
            _ => Err(InvokeError::ArgumentCount {
                expected: self.arity(),
                actual: args.len(),
            }),
        }
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(param, f)?;
        }
        f.write_str(")")
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("name", &self.name)
            .field("params", &self.params())
            .finish()
    }
}
