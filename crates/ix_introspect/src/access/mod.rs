//! Evaluate dotted path expressions against introspected values.
//!
//! A path such as `project.build.plugins[0].configuration(goal)` is split on
//! `.` and every segment is applied to the value reached so far:
//!
//! - `name`: property access through the zero-argument `getName`, or `isName`.
//! - `name[3]`: element `3` of the sequence or array returned by `getName`.
//! - `name(key)`: entry `key` of the mapping returned by `getName`.
//!
//! By default the first segment names the root object itself and is skipped.
//!
//! ## Menu
//!
//! - [`PathWalker`]: evaluates expressions; holds the accessor cache and [`WalkOptions`].
//! - [`PropertyPath`]: an expression parsed once for repeated evaluation.
//! - [`Token`], [`tokenize`], [`trim_root_token`]: the parsing building blocks.
//! - [`EvaluationError`]: hard failures. Absence is `Ok(None)`, not an error.
//!
//! # Examples
//!
//! ```
//! use ix_introspect::{Introspect, catalog::AccessorCatalog};
//! use std::collections::HashMap;
//!
//! #[derive(Debug)]
//! struct Address { street: String }
//!
//! #[derive(Debug)]
//! struct User { addresses: HashMap<String, Address> }
//!
//! impl Introspect for Address {
//!     fn catalog(&self) -> AccessorCatalog {
//!         AccessorCatalog::builder::<Self>()
//!             .field("getStreet", |a| &a.street)
//!             .build()
//!     }
//! }
//!
//! impl Introspect for User {
//!     fn catalog(&self) -> AccessorCatalog {
//!         AccessorCatalog::builder::<Self>()
//!             .field("getAddresses", |u| &u.addresses)
//!             .build()
//!     }
//! }
//!
//! let mut addresses = HashMap::new();
//! addresses.insert("home".to_string(), Address { street: "Main St".into() });
//! let user = User { addresses };
//!
//! let street = ix_introspect::evaluate("user.addresses(home).street", &user)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(street.downcast_ref::<String>().unwrap(), "Main St");
//!
//! // A missing key is absence, not an error.
//! assert!(ix_introspect::evaluate("user.addresses(work).street", &user).unwrap().is_none());
//!
//! // Indexing a mapping is.
//! assert!(ix_introspect::evaluate("user.addresses[0]", &user).is_err());
//! ```

// -----------------------------------------------------------------------------
// Modules

mod error;
mod path;
mod token;
mod walker;

// -----------------------------------------------------------------------------
// Exports

pub use error::{EvaluationError, EvaluationErrorKind};
pub use path::PropertyPath;
pub use token::{Token, tokenize, trim_root_token};
pub use walker::{PathWalker, WalkOptions, evaluate, evaluate_with};
