pub(crate) mod cpu;
pub(crate) mod grid;
pub(crate) mod pipeline;
pub(crate) mod sink;
pub(crate) mod surface;
