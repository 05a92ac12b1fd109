use base64::Engine as _;

use crate::{
    foundation::error::{LottieSeqError, LottieSeqResult},
    raster::kind::ImageKind,
};

/// `data:<mime>;base64,<payload>` for encoded image bytes.
pub fn encode_data_uri(kind: ImageKind, bytes: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{b64}", kind.mime())
}

/// Split a base64 data URI into its MIME type and decoded payload.
pub fn decode_data_uri(uri: &str) -> LottieSeqResult<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| LottieSeqError::decode("asset path is not a data URI"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| LottieSeqError::decode("data URI has no payload separator"))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| LottieSeqError::decode("only base64 data URIs are supported"))?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| LottieSeqError::decode(format!("data URI payload: {e}")))?;
    Ok((mime.to_string(), bytes))
}

#[cfg(test)]
#[path = "../../tests/unit/lottie/data_uri.rs"]
mod tests;
