//! ThumbHash decoding: convert a token back into a small RGBA preview.
//!
//! The decoder validates the header, dequantizes the DC and AC terms and
//! evaluates the inverse DCT on a raster whose long edge is 32 pixels and
//! whose aspect ratio comes from the stored luminance term counts.

use crate::color::{lpq_to_rgb, unit_to_byte};
use crate::dct::{basis, inverse_cosines};
use crate::error::ThumbHashError;
use crate::header::Header;
use crate::packing::NibbleReader;
use crate::preview::Preview;
use crate::quant::{
    dequantize_signed, dequantize_unit, AC_LEVELS, ALPHA_LEVELS, ALPHA_TERMS, CHROMA_AC_BOOST,
    CHROMA_DC_LEVELS, CHROMA_SCALE_LEVELS, CHROMA_TERMS, L_DC_LEVELS, L_SCALE_LEVELS,
    PREVIEW_EDGE,
};

/// Average color of a token, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageColor {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha, 1 for tokens without an alpha channel.
    pub a: f64,
}

/// Validate a token and return its parsed header, logging the reason for a
/// rejection.
pub(crate) fn parse_token(token: &[u8]) -> Result<Header, ThumbHashError> {
    Header::parse(token).map_err(|err| {
        log::debug!("rejecting {}-byte thumbhash token: {err}", token.len());
        err.into()
    })
}

/// Decode a ThumbHash token into an RGBA preview.
///
/// The preview is at most 32x32; its shape follows the aspect ratio recorded
/// in the token. Stretching it to the display size is up to the caller.
///
/// # Errors
///
/// Returns [`ThumbHashError::MalformedToken`] if the token is truncated, has
/// trailing bytes, or declares term counts outside the valid range.
///
/// # Examples
///
/// ```
/// use thumbhash_core::{decode, encode};
/// let hash = encode(2, 1, &[255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
/// let preview = decode(hash.as_bytes()).unwrap();
/// assert_eq!((preview.width, preview.height), (32, 18));
/// assert_eq!(preview.rgba.len(), 32 * 18 * 4);
/// ```
pub fn decode(token: &[u8]) -> Result<Preview, ThumbHashError> {
    let header = parse_token(token)?;
    Ok(render(&header, token))
}

/// Average color of a token, derived from its DC terms alone.
///
/// # Errors
///
/// Same as [`decode`].
///
/// # Examples
///
/// ```
/// use thumbhash_core::{average_rgba, encode};
/// let hash = encode(1, 1, &[0, 0, 0, 255]).unwrap();
/// let avg = average_rgba(hash.as_bytes()).unwrap();
/// assert!(avg.r < 0.05 && avg.g < 0.05 && avg.b < 0.05);
/// assert_eq!(avg.a, 1.0);
/// ```
pub fn average_rgba(token: &[u8]) -> Result<AverageColor, ThumbHashError> {
    parse_token(token).map(|header| average_of(&header))
}

/// Approximate width / height ratio of the image a token was made from.
///
/// # Errors
///
/// Same as [`decode`].
pub fn approximate_aspect_ratio(token: &[u8]) -> Result<f64, ThumbHashError> {
    parse_token(token).map(|header| header.aspect_ratio())
}

pub(crate) fn average_of(header: &Header) -> AverageColor {
    let l = dequantize_unit(header.l_dc, L_DC_LEVELS);
    let p = dequantize_signed(header.p_dc, CHROMA_DC_LEVELS);
    let q = dequantize_signed(header.q_dc, CHROMA_DC_LEVELS);
    let (r, g, b) = lpq_to_rgb(l, p, q);
    AverageColor {
        r: r.clamp(0.0, 1.0),
        g: g.clamp(0.0, 1.0),
        b: b.clamp(0.0, 1.0),
        a: dequantize_unit(header.a_dc, ALPHA_LEVELS),
    }
}

/// Read the AC terms of one channel, paired with their basis indices.
fn read_channel(
    reader: &mut NibbleReader<'_>,
    nx: usize,
    ny: usize,
    scale: f64,
) -> Vec<(usize, usize, f64)> {
    basis(nx, ny)
        .skip(1)
        .map(|(cx, cy)| {
            let ac = dequantize_signed(reader.next_nibble(), AC_LEVELS) * scale;
            (cx, cy, ac)
        })
        .collect()
}

/// Evaluate the inverse transform of an already validated token.
pub(crate) fn render(header: &Header, token: &[u8]) -> Preview {
    let l_dc = dequantize_unit(header.l_dc, L_DC_LEVELS);
    let p_dc = dequantize_signed(header.p_dc, CHROMA_DC_LEVELS);
    let q_dc = dequantize_signed(header.q_dc, CHROMA_DC_LEVELS);
    let a_dc = dequantize_unit(header.a_dc, ALPHA_LEVELS);
    let l_scale = dequantize_unit(header.l_scale, L_SCALE_LEVELS);
    let p_scale = dequantize_unit(header.p_scale, CHROMA_SCALE_LEVELS);
    let q_scale = dequantize_unit(header.q_scale, CHROMA_SCALE_LEVELS);
    let a_scale = dequantize_unit(header.a_scale, ALPHA_LEVELS);

    let (lx, ly) = header.luminance_grid();
    let mut reader = NibbleReader::new(&token[header.ac_start()..]);
    let l_ac = read_channel(&mut reader, lx, ly, l_scale);
    let p_ac = read_channel(&mut reader, CHROMA_TERMS, CHROMA_TERMS, p_scale * CHROMA_AC_BOOST);
    let q_ac = read_channel(&mut reader, CHROMA_TERMS, CHROMA_TERMS, q_scale * CHROMA_AC_BOOST);
    let a_ac = if header.has_alpha {
        read_channel(&mut reader, ALPHA_TERMS, ALPHA_TERMS, a_scale)
    } else {
        Vec::new()
    };

    let ratio = header.aspect_ratio();
    let (wf, hf) = if ratio > 1.0 {
        (PREVIEW_EDGE, (PREVIEW_EDGE / ratio).round())
    } else {
        ((PREVIEW_EDGE * ratio).round(), PREVIEW_EDGE)
    };
    let w = wf as usize;
    let h = hf as usize;

    let min_terms = if header.has_alpha {
        ALPHA_TERMS
    } else {
        CHROMA_TERMS
    };
    let cos_x = inverse_cosines(lx.max(min_terms), w);
    let cos_y = inverse_cosines(ly.max(min_terms), h);

    let mut fx = vec![0.0f64; cos_x.len()];
    let mut fy2 = vec![0.0f64; cos_y.len()];
    let mut rgba = Vec::with_capacity(w * h * 4);

    for y in 0..h {
        for (f, row) in fy2.iter_mut().zip(&cos_y) {
            *f = row[y] * 2.0;
        }
        for x in 0..w {
            for (f, row) in fx.iter_mut().zip(&cos_x) {
                *f = row[x];
            }

            let mut l = l_dc;
            for &(cx, cy, ac) in &l_ac {
                l += ac * fx[cx] * fy2[cy];
            }

            let mut p = p_dc;
            let mut q = q_dc;
            for (&(cx, cy, pa), &(_, _, qa)) in p_ac.iter().zip(&q_ac) {
                let f = fx[cx] * fy2[cy];
                p += pa * f;
                q += qa * f;
            }

            let mut a = a_dc;
            for &(cx, cy, ac) in &a_ac {
                a += ac * fx[cx] * fy2[cy];
            }

            let (r, g, b) = lpq_to_rgb(l, p, q);
            rgba.extend_from_slice(&[
                unit_to_byte(r),
                unit_to_byte(g),
                unit_to_byte(b),
                unit_to_byte(a),
            ]);
        }
    }

    Preview {
        width: w as u32,
        height: h as u32,
        rgba,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
