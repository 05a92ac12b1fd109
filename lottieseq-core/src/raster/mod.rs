//! Codec boundary: encoded bytes to [`DecodedImage`] and back.

pub(crate) mod buffer;
pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod kind;
