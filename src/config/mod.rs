pub(crate) mod choreography;
pub(crate) mod grid;
