//! Accessor catalogs and the per-type accessor cache.
//!
//! ## Menu
//!
//! - [`Accessor`]: a named, type-erased zero- or one-argument accessor.
//! - [`ParamType`]: the declared type of an accessor parameter.
//! - [`AccessorCatalog`]: the accessor surface of one type, with overload resolution.
//! - [`CatalogBuilder`]: builds an [`AccessorCatalog`] from typed closures.
//! - [`AccessorCache`]: memoizes catalogs and resolutions per [`TypeId`].
//!
//! ## Resolution
//!
//! A lookup names an accessor and the [`TypeId`]s of the arguments. Candidates
//! with a matching name and arity whose parameters accept the arguments are
//! applicable. The most specific applicable candidate wins; when no single
//! candidate is most specific the lookup fails with [`AmbiguousError`].
//! No applicable candidate is not an error, the lookup returns `None`.
//!
//! [`TypeId`]: core::any::TypeId

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod accessor_cache;
mod accessor_catalog;
mod error;

// -----------------------------------------------------------------------------
// Exports

pub use accessor::{Accessor, InvokeResult, ParamType};
pub use accessor_cache::{AccessorCache, TypeAccessors};
pub use accessor_catalog::{AccessorCatalog, CatalogBuilder};
pub use error::{AmbiguousError, InvokeError};
