#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod name;
mod typeid_map;

pub mod hash;
pub mod vec;

// -----------------------------------------------------------------------------
// Top-level exports

pub use name::{accessor_name, capitalize_first_letter};
pub use typeid_map::TypeIdMap;
