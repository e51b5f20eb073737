//! ThumbHash encoding: convert an RGBA image into a compact binary token.
//!
//! The encoder composites the image over its own average color, converts it
//! to LPQ(A), runs a truncated DCT per channel and quantizes the result into a
//! fixed header followed by 4-bit AC coefficients.

use crate::color::{composite_over, rgb_to_lpq};
use crate::dct::{encode_channel, ChannelCoefficients};
use crate::error::{InputError, ThumbHashError};
use crate::header::{luminance_limit, Header};
use crate::packing::NibbleWriter;
use crate::quant::{
    normalize_ac, quantize_signed, quantize_unit, AC_LEVELS, ALPHA_LEVELS, ALPHA_TERMS,
    CHROMA_DC_LEVELS, CHROMA_SCALE_LEVELS, CHROMA_TERMS, L_DC_LEVELS, L_SCALE_LEVELS,
    MIN_L_TERMS,
};
use crate::token::ThumbHash;

/// Encode an RGBA image into a ThumbHash token.
///
/// # Arguments
///
/// * `width` - Image width in pixels.
/// * `height` - Image height in pixels.
/// * `rgba` - Flat RGBA byte array in row-major order (4 bytes per pixel,
///   straight alpha).
///
/// Images are expected to be downscaled to about 100x100 beforehand; larger
/// inputs are accepted but only cost time.
///
/// # Errors
///
/// Returns [`ThumbHashError::InvalidInput`] if a dimension is zero or the
/// buffer length does not match `width * height * 4`.
///
/// # Examples
///
/// ```
/// use thumbhash_core::encode;
/// // A 2x2 opaque red image
/// let rgba = [255, 0, 0, 255].repeat(4);
/// let hash = encode(2, 2, &rgba).unwrap();
/// assert!(!hash.has_alpha());
/// ```
pub fn encode(width: u32, height: u32, rgba: &[u8]) -> Result<ThumbHash, ThumbHashError> {
    if width == 0 || height == 0 {
        return Err(InputError::ZeroDimension { width, height }.into());
    }

    let expected_len = (width as u64)
        .checked_mul(height as u64)
        .and_then(|v| v.checked_mul(4))
        .and_then(|v| usize::try_from(v).ok())
        .ok_or(InputError::Overflow { width, height })?;
    if rgba.len() != expected_len {
        return Err(InputError::BufferLength {
            expected: expected_len,
            actual: rgba.len(),
        }
        .into());
    }

    let w = width as usize;
    let h = height as usize;
    let texels = w * h;

    // Average color, weighted by alpha.
    let mut avg = [0.0f64; 3];
    let mut alpha_sum = 0.0f64;
    for texel in rgba.chunks_exact(4) {
        let alpha = f64::from(texel[3]) / 255.0;
        avg[0] += alpha / 255.0 * f64::from(texel[0]);
        avg[1] += alpha / 255.0 * f64::from(texel[1]);
        avg[2] += alpha / 255.0 * f64::from(texel[2]);
        alpha_sum += alpha;
    }
    if alpha_sum > 0.0 {
        for channel in &mut avg {
            *channel /= alpha_sum;
        }
    }

    let has_alpha = alpha_sum < texels as f64;
    let limit = f64::from(luminance_limit(has_alpha));
    let long_side = width.max(height) as f64;
    let lx = ((limit * width as f64 / long_side).round() as u8).max(1);
    let ly = ((limit * height as f64 / long_side).round() as u8).max(1);

    let mut l = Vec::with_capacity(texels);
    let mut p = Vec::with_capacity(texels);
    let mut q = Vec::with_capacity(texels);
    let mut a = Vec::with_capacity(texels);
    for texel in rgba.chunks_exact(4) {
        let ([r, g, b], alpha) = composite_over(texel, avg);
        let (tl, tp, tq) = rgb_to_lpq(r, g, b);
        l.push(tl);
        p.push(tp);
        q.push(tq);
        a.push(alpha);
    }

    let l_coeffs = encode_channel(
        &l,
        w,
        h,
        usize::from(lx).max(MIN_L_TERMS),
        usize::from(ly).max(MIN_L_TERMS),
    );
    let p_coeffs = encode_channel(&p, w, h, CHROMA_TERMS, CHROMA_TERMS);
    let q_coeffs = encode_channel(&q, w, h, CHROMA_TERMS, CHROMA_TERMS);
    let a_coeffs = has_alpha.then(|| encode_channel(&a, w, h, ALPHA_TERMS, ALPHA_TERMS));

    let is_landscape = width > height;
    let header = Header {
        l_dc: quantize_unit(l_coeffs.dc, L_DC_LEVELS),
        p_dc: quantize_signed(p_coeffs.dc, CHROMA_DC_LEVELS),
        q_dc: quantize_signed(q_coeffs.dc, CHROMA_DC_LEVELS),
        l_scale: quantize_unit(l_coeffs.scale, L_SCALE_LEVELS),
        has_alpha,
        short_terms: if is_landscape { ly } else { lx },
        p_scale: quantize_unit(p_coeffs.scale, CHROMA_SCALE_LEVELS),
        q_scale: quantize_unit(q_coeffs.scale, CHROMA_SCALE_LEVELS),
        is_landscape,
        a_dc: a_coeffs
            .as_ref()
            .map_or(ALPHA_LEVELS, |c| quantize_unit(c.dc, ALPHA_LEVELS)),
        a_scale: a_coeffs
            .as_ref()
            .map_or(0, |c| quantize_unit(c.scale, ALPHA_LEVELS)),
    };

    let mut bytes = Vec::with_capacity(header.token_len());
    header.write(&mut bytes);

    let mut writer = NibbleWriter::new(&mut bytes);
    let channels = [Some(&l_coeffs), Some(&p_coeffs), Some(&q_coeffs), a_coeffs.as_ref()];
    for coeffs in channels.into_iter().flatten() {
        write_ac(&mut writer, coeffs);
    }

    log::trace!(
        "encoded {width}x{height} thumbhash: alpha={has_alpha}, luminance terms {lx}x{ly}, {} bytes",
        bytes.len()
    );

    Ok(ThumbHash::from_parts(header, bytes))
}

fn write_ac(writer: &mut NibbleWriter<'_>, coeffs: &ChannelCoefficients) {
    for &ac in &coeffs.ac {
        writer.push(quantize_unit(normalize_ac(ac, coeffs.scale), AC_LEVELS));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, texel: [u8; 4]) -> Vec<u8> {
        texel.repeat(width * height)
    }

    #[test]
    fn test_encode_solid_black_vector() {
        // Every channel is exactly zero, so every coefficient is exact.
        let hash = encode(1, 1, &[0, 0, 0, 255]).unwrap();
        let mut expected = vec![0, 8, 2, 7, 0];
        expected.extend(std::iter::repeat(0).take(19));
        assert_eq!(hash.as_bytes(), expected.as_slice());
    }

    #[test]
    fn test_encode_opaque_square_length() {
        let hash = encode(4, 4, &solid(4, 4, [128, 64, 32, 255])).unwrap();
        assert_eq!(hash.len(), 24);
        assert!(!hash.has_alpha());
    }

    #[test]
    fn test_encode_alpha_flag() {
        let mut rgba = solid(4, 4, [10, 200, 30, 255]);
        rgba[3] = 0;
        let hash = encode(4, 4, &rgba).unwrap();
        assert!(hash.has_alpha());
        assert_eq!(hash.as_bytes()[2] & 0x80, 0x80);
        assert_eq!(hash.len(), 25);
    }

    #[test]
    fn test_encode_landscape_term_count() {
        // 7 * 2 / 4 = 3.5 rounds up to 4 terms on the short axis.
        let hash = encode(4, 2, &solid(4, 2, [90, 90, 90, 255])).unwrap();
        let bytes = hash.as_bytes();
        assert_eq!(bytes[4] & 0x80, 0x80);
        assert_eq!(bytes[3] & 7, 4);
        assert_eq!(hash.len(), 5 + (18 + 10 + 1) / 2);
    }

    #[test]
    fn test_encode_extreme_aspect_keeps_one_term() {
        let hash = encode(100, 1, &solid(100, 1, [0, 0, 0, 255])).unwrap();
        assert_eq!(hash.as_bytes()[3] & 7, 1);
        assert_eq!(hash.len(), 17);
    }

    #[test]
    fn test_encode_fully_transparent() {
        let hash = encode(3, 3, &solid(3, 3, [255, 255, 255, 0])).unwrap();
        assert!(hash.has_alpha());
        // Alpha DC quantizes to zero.
        assert_eq!(hash.as_bytes()[5] & 15, 0);
    }

    #[test]
    fn test_encode_dimension_validation() {
        assert!(matches!(
            encode(0, 4, &[]),
            Err(ThumbHashError::InvalidInput(InputError::ZeroDimension { .. }))
        ));
        assert!(matches!(
            encode(4, 0, &[]),
            Err(ThumbHashError::InvalidInput(InputError::ZeroDimension { .. }))
        ));
    }

    #[test]
    fn test_encode_buffer_validation() {
        assert_eq!(
            encode(2, 2, &[0u8; 12]),
            Err(ThumbHashError::InvalidInput(InputError::BufferLength {
                expected: 16,
                actual: 12
            }))
        );
        // RGB instead of RGBA
        assert!(encode(4, 4, &[0u8; 4 * 4 * 3]).is_err());
    }

    #[test]
    fn test_encode_deterministic() {
        let mut rgba = Vec::new();
        for y in 0..8u8 {
            for x in 0..8u8 {
                rgba.extend_from_slice(&[x * 30, y * 30, 128, 255 - x * 10]);
            }
        }
        let first = encode(8, 8, &rgba).unwrap();
        let second = encode(8, 8, &rgba).unwrap();
        assert_eq!(first, second);
    }
}
