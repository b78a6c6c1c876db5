//! Shared primitives: geometry re-exports, colors, numeric helpers, and the error taxonomy.

pub(crate) mod color;
pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
