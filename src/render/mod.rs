//! The drawing-surface seam, the grid painter, and the two surfaces shipped with the crate.

pub(crate) mod painter;
pub(crate) mod raster;
pub(crate) mod recording;
pub(crate) mod surface;
