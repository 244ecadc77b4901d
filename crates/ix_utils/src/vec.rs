//! Re-exports [`fastvec`]'s containers.
//!
//! It's a high-performance vector crate tuned for small data sizes.

pub use fastvec::FastVec;
