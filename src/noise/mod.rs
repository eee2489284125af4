pub(crate) mod fbm;
pub(crate) mod simplex;
