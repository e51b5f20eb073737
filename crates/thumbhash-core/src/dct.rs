//! Truncated 2-D DCT over a triangular set of low-frequency basis functions.
//!
//! For an `nx` by `ny` grid the retained terms are `(cx, cy)` with
//! `cx * ny < nx * (ny - cy)`: all of the first row, progressively fewer of the
//! higher vertical frequencies. `(0, 0)` is the DC term.

use std::f64::consts::PI;

/// Iterate the retained `(cx, cy)` terms of an `nx` by `ny` grid, DC first,
/// row by row.
pub(crate) fn basis(nx: usize, ny: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..ny).flat_map(move |cy| {
        (0..nx)
            .take_while(move |&cx| cx * ny < nx * (ny - cy))
            .map(move |cx| (cx, cy))
    })
}

/// Number of AC terms (all retained terms except DC) of an `nx` by `ny` grid.
pub(crate) fn ac_count(nx: usize, ny: usize) -> usize {
    basis(nx, ny).count().saturating_sub(1)
}

// Operand order is part of the format: reordering the products changes the
// last bit of some coefficients and with it the occasional token nibble.

/// `table[c][i] = cos(PI / len * c * (i + 0.5))`, used by the encoder.
pub(crate) fn forward_cosines(terms: usize, len: usize) -> Vec<Vec<f64>> {
    let lf = len as f64;
    (0..terms)
        .map(|c| {
            (0..len)
                .map(|i| (PI / lf * c as f64 * (i as f64 + 0.5)).cos())
                .collect()
        })
        .collect()
}

/// `table[c][i] = cos(PI / len * (i + 0.5) * c)`, used by the decoder.
pub(crate) fn inverse_cosines(terms: usize, len: usize) -> Vec<Vec<f64>> {
    let lf = len as f64;
    (0..terms)
        .map(|c| {
            (0..len)
                .map(|i| (PI / lf * (i as f64 + 0.5) * c as f64).cos())
                .collect()
        })
        .collect()
}

/// Forward transform of one channel.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChannelCoefficients {
    /// Average value of the channel.
    pub(crate) dc: f64,
    /// AC terms in [`basis`] order, not yet normalized.
    pub(crate) ac: Vec<f64>,
    /// Largest absolute AC term, zero for a flat channel.
    pub(crate) scale: f64,
}

/// Project a row-major `width` by `height` channel onto the retained basis of
/// an `nx` by `ny` grid.
pub(crate) fn encode_channel(
    channel: &[f64],
    width: usize,
    height: usize,
    nx: usize,
    ny: usize,
) -> ChannelCoefficients {
    debug_assert_eq!(channel.len(), width * height);

    let cos_x = forward_cosines(nx, width);
    let cos_y = forward_cosines(ny, height);
    let norm = (width * height) as f64;

    let mut dc = 0.0;
    let mut ac = Vec::with_capacity(ac_count(nx, ny));
    let mut scale: f64 = 0.0;

    for (cx, cy) in basis(nx, ny) {
        let fx = &cos_x[cx];
        let mut f = 0.0f64;
        for (row, &fy) in channel.chunks_exact(width).zip(&cos_y[cy]) {
            for (&value, &cos) in row.iter().zip(fx) {
                f += value * cos * fy;
            }
        }
        f /= norm;

        if cx == 0 && cy == 0 {
            dc = f;
        } else {
            scale = scale.max(f.abs());
            ac.push(f);
        }
    }

    ChannelCoefficients { dc, ac, scale }
}
