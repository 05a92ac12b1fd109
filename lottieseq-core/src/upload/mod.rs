//! In-process request/response boundary for archive uploads.

pub(crate) mod handler;
pub(crate) mod staging;
