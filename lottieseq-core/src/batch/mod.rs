//! Independent per-image jobs over whole image sets, and the archive paths built on them.

pub(crate) mod filter;
pub(crate) mod runner;
pub(crate) mod webp;
