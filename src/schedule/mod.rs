pub(crate) mod animator;
pub(crate) mod headless;
pub(crate) mod host;
