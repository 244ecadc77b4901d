#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

// The accessor cache needs `std::sync`.
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod impls;

pub mod access;
pub mod catalog;
pub mod introspection;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use access::{EvaluationError, PathWalker, evaluate, evaluate_with};
pub use introspection::{Introspect, Value};
