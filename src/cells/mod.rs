//! Per-cell animation records and the store that owns them for one grid instance.

pub(crate) mod state;
pub(crate) mod store;
