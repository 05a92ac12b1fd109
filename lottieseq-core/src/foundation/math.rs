/// `round(x * y / 255)` for 8-bit operands.
pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Straight-alpha `src` over an opaque `dst` channel.
pub(crate) fn over_opaque_u8(src: u8, dst: u8, alpha: u8) -> u8 {
    let a = u16::from(alpha);
    let v = mul_div255_u16(u16::from(src), a) + mul_div255_u16(u16::from(dst), 255 - a);
    v.min(255) as u8
}

/// Clamp a channel value to `[0, 255]` and round half away from zero.
///
/// Every pixel path quantizes through this one function.
pub(crate) fn quantize_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
