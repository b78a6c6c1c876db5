pub(crate) mod controller;
pub(crate) mod debounce;
pub(crate) mod host;
pub(crate) mod instance;
pub(crate) mod retry;
pub(crate) mod sim;
