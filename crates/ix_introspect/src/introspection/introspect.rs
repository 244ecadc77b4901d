use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt::Debug;

use crate::catalog::{AccessorCatalog, InvokeError};
use crate::introspection::Shape;

// -----------------------------------------------------------------------------
// Introspect

/// A value whose accessors can be discovered and invoked at runtime.
///
/// Path expressions are evaluated against `&dyn Introspect` without knowing
/// the concrete type. Each type describes its accessor surface once through
/// [`catalog`](Introspect::catalog); the result is cached per [`TypeId`] by
/// [`AccessorCache`](crate::catalog::AccessorCache).
///
/// # Implementing
///
/// ```
/// use ix_introspect::Introspect;
/// use ix_introspect::catalog::AccessorCatalog;
///
/// #[derive(Debug, Clone)]
/// struct Build {
///     source_directory: String,
/// }
///
/// impl Introspect for Build {
///     fn catalog(&self) -> AccessorCatalog {
///         AccessorCatalog::builder::<Self>()
///             .field("getSourceDirectory", |b| &b.source_directory)
///             .build()
///     }
///
///     fn clone_value(&self) -> Result<Box<dyn Introspect>, ix_introspect::catalog::InvokeError> {
///         Ok(Box::new(self.clone()))
///     }
/// }
///
/// let build = Build { source_directory: "/src".into() };
/// let value = ix_introspect::evaluate_with("sourceDirectory", &build, false)
///     .unwrap()
///     .unwrap();
/// assert_eq!(value.downcast_ref::<String>().unwrap(), "/src");
/// ```
///
/// Types that only ever hand out borrowed values may keep the default
/// [`clone_value`](Introspect::clone_value).
pub trait Introspect: Any + Debug {
    /// Builds the accessor catalog of this type.
    ///
    /// Called at most a few times per type (once, unless threads race on the
    /// first lookup). The catalog must describe `Self`, not the value.
    fn catalog(&self) -> AccessorCatalog;

    /// Returns the container kind of this value.
    #[inline]
    fn shape(&self) -> Shape {
        Shape::Object
    }

    /// Returns the type name used in diagnostics.
    #[inline]
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Returns the [`TypeId`] of the underlying type.
    ///
    /// Unlike [`Any::type_id`], this is not affected by smart pointers
    /// around a `dyn Introspect`.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Clones this value into a new box.
    ///
    /// Needed when an accessor borrows from a value that was itself produced
    /// as an owned intermediate during a walk.
    fn clone_value(&self) -> Result<Box<dyn Introspect>, InvokeError> {
        Err(InvokeError::NotCloneable {
            type_name: self.type_name(),
        })
    }
}

impl dyn Introspect {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// ```
    /// # use ix_introspect::Introspect;
    /// let x: &dyn Introspect = &10_i32;
    /// assert!(x.is::<i32>());
    /// ```
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    ///
    /// ```
    /// # use ix_introspect::Introspect;
    /// let x: &dyn Introspect = &String::from("ix");
    /// assert_eq!(x.downcast_ref::<String>().unwrap(), "ix");
    /// assert!(x.downcast_ref::<i32>().is_none());
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }
}
