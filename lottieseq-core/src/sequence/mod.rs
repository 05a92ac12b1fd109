//! Frame selection and playback order.

pub(crate) mod natural;
pub(crate) mod orderer;
