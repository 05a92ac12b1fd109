//! Zip container boundary.

pub(crate) mod container;
