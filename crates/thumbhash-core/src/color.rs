//! Color conversions between RGB and the LPQ space used by ThumbHash.
//!
//! L is luminance, P is the yellow-blue difference and Q the red-green
//! difference. Keeping luminance separate lets the encoder spend more basis
//! terms on it than on the two chroma channels. All values are gamma-encoded
//! (no sRGB linearization), in `[0, 1]` for RGB and L, `[-1, 1]` for P and Q.

/// Convert an RGB triple in `[0, 1]` to `(l, p, q)`.
///
/// # Examples
///
/// ```
/// use thumbhash_core::color::rgb_to_lpq;
/// let (l, p, q) = rgb_to_lpq(1.0, 1.0, 1.0);
/// assert_eq!((l, p, q), (1.0, 0.0, 0.0));
/// ```
#[inline]
pub fn rgb_to_lpq(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    ((r + g + b) / 3.0, (r + g) / 2.0 - b, r - g)
}

/// Convert `(l, p, q)` back to an RGB triple. Values are not clamped.
///
/// # Examples
///
/// ```
/// use thumbhash_core::color::lpq_to_rgb;
/// let (r, g, b) = lpq_to_rgb(0.5, 0.0, 0.0);
/// assert!((r - 0.5).abs() < 1e-12 && (g - 0.5).abs() < 1e-12 && (b - 0.5).abs() < 1e-12);
/// ```
#[inline]
pub fn lpq_to_rgb(l: f64, p: f64, q: f64) -> (f64, f64, f64) {
    let b = l - 2.0 / 3.0 * p;
    let r = (3.0 * l - b + q) / 2.0;
    let g = r - q;
    (r, g, b)
}

/// Convert a channel value to a byte, clamping to `[0, 1]` and truncating.
///
/// # Examples
///
/// ```
/// use thumbhash_core::color::unit_to_byte;
/// assert_eq!(unit_to_byte(1.5), 255);
/// assert_eq!(unit_to_byte(-0.1), 0);
/// assert_eq!(unit_to_byte(0.5), 127);
/// ```
#[inline]
pub fn unit_to_byte(value: f64) -> u8 {
    (255.0 * value.min(1.0)).max(0.0) as u8
}

/// Composite a straight-alpha RGBA texel over `background`, returning RGB in
/// `[0, 1]`.
/// Fully transparent texels take the background color.
#[inline]
pub(crate) fn composite_over(texel: &[u8], background: [f64; 3]) -> ([f64; 3], f64) {
    let alpha = f64::from(texel[3]) / 255.0;
    let rgb = [
        background[0] * (1.0 - alpha) + alpha / 255.0 * f64::from(texel[0]),
        background[1] * (1.0 - alpha) + alpha / 255.0 * f64::from(texel[1]),
        background[2] * (1.0 - alpha) + alpha / 255.0 * f64::from(texel[2]),
    ];
    (rgb, alpha)
}
