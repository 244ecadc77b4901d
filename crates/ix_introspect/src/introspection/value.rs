use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::catalog::InvokeError;
use crate::introspection::Introspect;

/// A value produced by an accessor.
///
/// Accessors that return a field hand out [`Ref`](Value::Ref), accessors that
/// compute their result hand out [`Owned`](Value::Owned). Absence is expressed
/// with `Option<Value>`, never with a variant of this type.
pub enum Value<'a> {
    /// A value borrowed from the receiver.
    Ref(&'a dyn Introspect),
    /// A value created by the accessor.
    Owned(Box<dyn Introspect>),
}

impl<'a> Value<'a> {
    /// Wraps an owned value.
    ///
    /// ```
    /// # use ix_introspect::Value;
    /// let v = Value::owned(3_usize);
    /// assert_eq!(v.downcast_ref::<usize>(), Some(&3));
    /// ```
    #[inline]
    pub fn owned<T: Introspect>(value: T) -> Self {
        Value::Owned(Box::new(value))
    }

    /// Returns the value as a trait object.
    #[inline]
    pub fn as_introspect(&self) -> &dyn Introspect {
        match self {
            Value::Ref(value) => *value,
            Value::Owned(value) => &**value,
        }
    }

    /// Returns `true` if the value is borrowed from its receiver.
    #[inline]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Value::Ref(_))
    }

    /// Returns the borrowed reference, or `None` for owned values.
    ///
    /// ```
    /// # use ix_introspect::Value;
    /// let flag = true;
    /// let borrowed = Value::Ref(&flag).as_borrowed().unwrap();
    /// assert_eq!(borrowed.downcast_ref::<bool>(), Some(&true));
    /// assert!(Value::owned(false).as_borrowed().is_none());
    /// ```
    #[inline]
    pub fn as_borrowed(&self) -> Option<&'a dyn Introspect> {
        match self {
            Value::Ref(value) => Some(*value),
            Value::Owned(_) => None,
        }
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_introspect().downcast_ref::<T>()
    }

    /// Takes the owned value, or clones a borrowed one.
    ///
    /// ```
    /// # use ix_introspect::Value;
    /// let name = String::from("ix");
    /// let owned = Value::Ref(&name).into_owned().unwrap();
    /// assert!(!owned.is_borrowed());
    /// ```
    pub fn into_owned(self) -> Result<Value<'static>, InvokeError> {
        match self {
            Value::Ref(value) => value.clone_value().map(Value::Owned),
            Value::Owned(value) => Ok(Value::Owned(value)),
        }
    }

    /// Takes the owned box, or clones a borrowed value into one.
    ///
    /// ```
    /// # use ix_introspect::Value;
    /// let sizes = vec![1_u32, 2];
    /// let boxed = Value::Ref(&sizes).into_boxed().unwrap();
    /// assert_eq!(boxed.downcast_ref::<Vec<u32>>(), Some(&sizes));
    ///
    /// let boxed = Value::owned(7_i64).into_boxed().unwrap();
    /// assert_eq!(boxed.downcast_ref::<i64>(), Some(&7));
    /// ```
    #[inline]
    pub fn into_boxed(self) -> Result<Box<dyn Introspect>, InvokeError> {
        match self {
            Value::Ref(value) => value.clone_value(),
            Value::Owned(value) => Ok(value),
        }
    }
}

impl<'a, T: Introspect> From<&'a T> for Value<'a> {
    #[inline]
    fn from(value: &'a T) -> Self {
        Value::Ref(value)
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Ref(value) => f.debug_tuple("Ref").field(value).finish(),
            Value::Owned(value) => f.debug_tuple("Owned").field(value).finish(),
        }
    }
}
