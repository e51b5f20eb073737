//! Fixed-point quantization shared by the encoder and decoder.
//!
//! Every constant here is part of the wire format. Changing any of them
//! produces tokens that other ThumbHash implementations decode differently.

/// Levels for the luminance DC term (6 bits).
pub(crate) const L_DC_LEVELS: u8 = 63;
/// Levels for the signed P and Q DC terms (6 bits, centred on 31.5).
pub(crate) const CHROMA_DC_LEVELS: u8 = 63;
/// Levels for the luminance AC scale (5 bits).
pub(crate) const L_SCALE_LEVELS: u8 = 31;
/// Levels for the P and Q AC scales (6 bits).
pub(crate) const CHROMA_SCALE_LEVELS: u8 = 63;
/// Levels for the alpha DC term and alpha AC scale (4 bits each).
pub(crate) const ALPHA_LEVELS: u8 = 15;
/// Levels for every AC coefficient (4 bits).
pub(crate) const AC_LEVELS: u8 = 15;

/// Luminance terms along the long axis of an opaque image.
pub(crate) const OPAQUE_L_TERMS: u8 = 7;
/// Luminance terms along the long axis when an alpha channel is stored.
pub(crate) const ALPHA_L_TERMS: u8 = 5;
/// Minimum luminance grid size per axis.
pub(crate) const MIN_L_TERMS: usize = 3;
/// Grid size per axis for the P and Q channels.
pub(crate) const CHROMA_TERMS: usize = 3;
/// Grid size per axis for the alpha channel.
pub(crate) const ALPHA_TERMS: usize = 5;

/// Saturation boost applied to decoded P and Q AC terms, compensating for the
/// contrast lost to 4-bit quantization.
pub(crate) const CHROMA_AC_BOOST: f64 = 1.25;

/// Long edge of the decoded preview raster.
pub(crate) const PREVIEW_EDGE: f64 = 32.0;

/// Quantize `value` in `[0, 1]` to `0..=levels`.
#[inline]
pub(crate) fn quantize_unit(value: f64, levels: u8) -> u8 {
    let levels = f64::from(levels);
    (levels * value).round().clamp(0.0, levels) as u8
}

/// Quantize `value` in `[-1, 1]` to `0..=levels`, with zero mapping to the
/// midpoint `levels / 2`.
#[inline]
pub(crate) fn quantize_signed(value: f64, levels: u8) -> u8 {
    let levels = f64::from(levels);
    let half = levels / 2.0;
    (half + half * value).round().clamp(0.0, levels) as u8
}

/// Inverse of [`quantize_unit`].
#[inline]
pub(crate) fn dequantize_unit(quantized: u8, levels: u8) -> f64 {
    f64::from(quantized) / f64::from(levels)
}

/// Inverse of [`quantize_signed`].
#[inline]
pub(crate) fn dequantize_signed(quantized: u8, levels: u8) -> f64 {
    f64::from(quantized) / (f64::from(levels) / 2.0) - 1.0
}

/// Map an AC coefficient into `[0, 1]` relative to its channel's scale.
///
/// A zero scale means every AC term of the channel is zero; the value is then
/// passed through unchanged.
#[inline]
pub(crate) fn normalize_ac(ac: f64, scale: f64) -> f64 {
    if scale == 0.0 {
        ac
    } else {
        0.5 + 0.5 / scale * ac
    }
}
