//! Grid geometry derived from a measured container, and pointer-to-cell resolution.

pub(crate) mod geometry;
pub(crate) mod resolver;
