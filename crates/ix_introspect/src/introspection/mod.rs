//! The value model walked by path expressions.
//!
//! - [`Introspect`]: the object-safe trait every walkable value implements.
//! - [`Shape`]: the container kind of a value, used by indexed and mapped tokens.
//! - [`Value`]: a borrowed or owned `dyn Introspect` produced by an accessor.

// -----------------------------------------------------------------------------
// Modules

mod introspect;
mod shape;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use introspect::Introspect;
pub use shape::Shape;
pub use value::Value;
