pub(crate) mod choreography;
pub(crate) mod director;
pub(crate) mod model;
pub(crate) mod timeline;
pub(crate) mod trigger;
