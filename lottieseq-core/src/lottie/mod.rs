//! Lottie document model, assembly from image sequences, and preview helpers.

pub(crate) mod assemble;
pub(crate) mod data_uri;
pub(crate) mod model;
pub(crate) mod preview;
pub(crate) mod view;
