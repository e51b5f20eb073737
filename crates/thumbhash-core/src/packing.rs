//! 4-bit packing of quantized AC coefficients.
//!
//! Coefficient `i` of the AC stream is stored in byte `i / 2`, in the low
//! nibble when `i` is even and the high nibble when `i` is odd. A stream with an
//! odd number of coefficients leaves the final high nibble zero.

/// Number of bytes needed to hold `count` nibbles.
#[inline]
pub(crate) const fn packed_len(count: usize) -> usize {
    count.div_ceil(2)
}

/// Appends nibbles to the end of a byte buffer.
pub(crate) struct NibbleWriter<'a> {
    out: &'a mut Vec<u8>,
    start: usize,
    index: usize,
}

impl<'a> NibbleWriter<'a> {
    /// Start a nibble stream at the current end of `out`.
    pub(crate) fn new(out: &'a mut Vec<u8>) -> Self {
        let start = out.len();
        Self {
            out,
            start,
            index: 0,
        }
    }

    /// Append the low 4 bits of `value`.
    pub(crate) fn push(&mut self, value: u8) {
        let nibble = value & 0x0f;
        if self.index & 1 == 0 {
            self.out.push(nibble);
        } else {
            let pos = self.start + (self.index >> 1);
            self.out[pos] |= nibble << 4;
        }
        self.index += 1;
    }
}

/// Reads nibbles in the order [`NibbleWriter`] wrote them.
pub(crate) struct NibbleReader<'a> {
    bytes: &'a [u8],
    index: usize,
}

impl<'a> NibbleReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, index: 0 }
    }

    /// Next nibble, or zero past the end of the buffer.
    pub(crate) fn next_nibble(&mut self) -> u8 {
        let byte = self.bytes.get(self.index >> 1).copied().unwrap_or(0);
        let shift = (self.index & 1) << 2;
        self.index += 1;
        (byte >> shift) & 0x0f
    }
}
