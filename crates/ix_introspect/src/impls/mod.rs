//! [`Introspect`] implementations for standard types.
//!
//! ## Implemented Menu
//!
//! - scalars: `bool`, `char`, `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`
//! - strings: `String`, `&'static str`; accessors `getLength`, `isEmpty`
//! - sequences: `Vec<T>`, `VecDeque<T>`; accessors `get(usize)`, `getSize`, `isEmpty`
//! - arrays: `[T; N]`, `Box<[T]>`; same accessors as sequences
//! - mappings: `std::collections::HashMap<String, V, S>`, `hashbrown::HashMap<String, V, S>`,
//!   `BTreeMap<String, V>`; accessors `get(key)`, `getSize`, `isEmpty`
//!
//! Mapping keys may be passed as `String` or `&'static str`.

// -----------------------------------------------------------------------------
// Modules

mod mapping;
mod native;
mod sequence;

// -----------------------------------------------------------------------------
// Utilities

use alloc::boxed::Box;
use core::any::{Any, type_name};

use crate::Introspect;
use crate::catalog::InvokeError;

/// Clones `value` through [`Introspect::clone_value`] and takes it back out
/// of the box.
pub(crate) fn clone_as<T: Introspect>(value: &T) -> Result<T, InvokeError> {
    let boxed: Box<dyn Any> = value.clone_value()?;
    boxed
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| InvokeError::NotCloneable {
            type_name: type_name::<T>(),
        })
}
