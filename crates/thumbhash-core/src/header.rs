//! The fixed-size token header.
//!
//! ```text
//! byte 0..3  header24: l_dc:6 | p_dc:6 | q_dc:6 | l_scale:5 | has_alpha:1
//! byte 3..5  header16: short_terms:3 | p_scale:6 | q_scale:6 | is_landscape:1
//! byte 5     (alpha only) a_dc:4 | a_scale:4
//! ```
//!
//! Fields are packed least significant bit first. `short_terms` is the
//! luminance term count along the shorter image axis; the longer axis always
//! gets the full luminance budget for the token's alpha mode.

use crate::dct;
use crate::error::TokenError;
use crate::packing::packed_len;
use crate::quant::{
    ALPHA_L_TERMS, ALPHA_LEVELS, ALPHA_TERMS, CHROMA_TERMS, MIN_L_TERMS, OPAQUE_L_TERMS,
};

/// Header size of a token without an alpha channel.
pub(crate) const OPAQUE_HEADER_LEN: usize = 5;
/// Header size of a token with an alpha channel.
pub(crate) const ALPHA_HEADER_LEN: usize = 6;

/// Quantized header fields, exactly as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Header {
    pub(crate) l_dc: u8,
    pub(crate) p_dc: u8,
    pub(crate) q_dc: u8,
    pub(crate) l_scale: u8,
    pub(crate) has_alpha: bool,
    pub(crate) short_terms: u8,
    pub(crate) p_scale: u8,
    pub(crate) q_scale: u8,
    pub(crate) is_landscape: bool,
    /// `ALPHA_LEVELS` (fully opaque) when the token has no alpha byte.
    pub(crate) a_dc: u8,
    pub(crate) a_scale: u8,
}

/// Luminance terms along the long axis for the given alpha mode.
#[inline]
pub(crate) const fn luminance_limit(has_alpha: bool) -> u8 {
    if has_alpha {
        ALPHA_L_TERMS
    } else {
        OPAQUE_L_TERMS
    }
}

impl Header {
    /// Parse and validate a complete token, including its total length.
    pub(crate) fn parse(bytes: &[u8]) -> Result<Self, TokenError> {
        if bytes.len() < OPAQUE_HEADER_LEN {
            return Err(TokenError::TooShort {
                expected: OPAQUE_HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let header24 =
            u32::from(bytes[0]) | (u32::from(bytes[1]) << 8) | (u32::from(bytes[2]) << 16);
        let header16 = u16::from(bytes[3]) | (u16::from(bytes[4]) << 8);

        let has_alpha = (header24 >> 23) & 1 == 1;
        if has_alpha && bytes.len() < ALPHA_HEADER_LEN {
            return Err(TokenError::TooShort {
                expected: ALPHA_HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let short_terms = (header16 & 7) as u8;
        let limit = luminance_limit(has_alpha);
        if short_terms == 0 || short_terms > limit {
            return Err(TokenError::TermCount {
                value: short_terms,
                limit,
            });
        }

        let (a_dc, a_scale) = if has_alpha {
            (bytes[5] & 15, bytes[5] >> 4)
        } else {
            (ALPHA_LEVELS, 0)
        };

        let header = Self {
            l_dc: (header24 & 63) as u8,
            p_dc: ((header24 >> 6) & 63) as u8,
            q_dc: ((header24 >> 12) & 63) as u8,
            l_scale: ((header24 >> 18) & 31) as u8,
            has_alpha,
            short_terms,
            p_scale: ((header16 >> 3) & 63) as u8,
            q_scale: ((header16 >> 9) & 63) as u8,
            is_landscape: (header16 >> 15) == 1,
            a_dc,
            a_scale,
        };

        let expected = header.token_len();
        if bytes.len() != expected {
            return Err(TokenError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(header)
    }

    /// Append the header bytes to `out`.
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        let header24 = u32::from(self.l_dc)
            | (u32::from(self.p_dc) << 6)
            | (u32::from(self.q_dc) << 12)
            | (u32::from(self.l_scale) << 18)
            | (u32::from(self.has_alpha) << 23);
        let header16 = u16::from(self.short_terms)
            | (u16::from(self.p_scale) << 3)
            | (u16::from(self.q_scale) << 9)
            | (u16::from(self.is_landscape) << 15);

        out.extend_from_slice(&[
            header24 as u8,
            (header24 >> 8) as u8,
            (header24 >> 16) as u8,
            header16 as u8,
            (header16 >> 8) as u8,
        ]);
        if self.has_alpha {
            out.push(self.a_dc | (self.a_scale << 4));
        }
    }

    /// Stored luminance term counts `(lx, ly)`, before the minimum grid size
    /// is applied.
    pub(crate) fn luminance_terms(&self) -> (u8, u8) {
        let limit = luminance_limit(self.has_alpha);
        if self.is_landscape {
            (limit, self.short_terms)
        } else {
            (self.short_terms, limit)
        }
    }

    /// Luminance grid actually transformed: at least 3 by 3.
    pub(crate) fn luminance_grid(&self) -> (usize, usize) {
        let (lx, ly) = self.luminance_terms();
        (
            usize::from(lx).max(MIN_L_TERMS),
            usize::from(ly).max(MIN_L_TERMS),
        )
    }

    /// Offset of the first AC nibble.
    pub(crate) fn ac_start(&self) -> usize {
        if self.has_alpha {
            ALPHA_HEADER_LEN
        } else {
            OPAQUE_HEADER_LEN
        }
    }

    /// Total number of AC coefficients across all channels.
    pub(crate) fn ac_count(&self) -> usize {
        let (nx, ny) = self.luminance_grid();
        let chroma = dct::ac_count(CHROMA_TERMS, CHROMA_TERMS);
        let alpha = if self.has_alpha {
            dct::ac_count(ALPHA_TERMS, ALPHA_TERMS)
        } else {
            0
        };
        dct::ac_count(nx, ny) + 2 * chroma + alpha
    }

    /// Exact token length implied by this header.
    pub(crate) fn token_len(&self) -> usize {
        self.ac_start() + packed_len(self.ac_count())
    }

    /// Width over height, as far as the stored term counts can tell.
    pub(crate) fn aspect_ratio(&self) -> f64 {
        let (lx, ly) = self.luminance_terms();
        f64::from(lx) / f64::from(ly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque_square() -> Header {
        Header {
            l_dc: 40,
            p_dc: 20,
            q_dc: 50,
            l_scale: 17,
            has_alpha: false,
            short_terms: 7,
            p_scale: 33,
            q_scale: 9,
            is_landscape: false,
            a_dc: ALPHA_LEVELS,
            a_scale: 0,
        }
    }

    fn token_for(header: &Header) -> Vec<u8> {
        let mut out = Vec::new();
        header.write(&mut out);
        out.resize(header.token_len(), 0);
        out
    }

    #[test]
    fn test_write_then_parse() {
        let header = opaque_square();
        let token = token_for(&header);
        assert_eq!(token.len(), 24);
        assert_eq!(Header::parse(&token).unwrap(), header);
    }

    #[test]
    fn test_write_then_parse_alpha_landscape() {
        let header = Header {
            has_alpha: true,
            is_landscape: true,
            short_terms: 3,
            a_dc: 9,
            a_scale: 4,
            ..opaque_square()
        };
        let token = token_for(&header);
        assert_eq!(token[5], 9 | (4 << 4));
        assert_eq!(Header::parse(&token).unwrap(), header);
    }

    #[test]
    fn test_flag_bits() {
        let mut token = Vec::new();
        Header {
            has_alpha: true,
            is_landscape: true,
            short_terms: 2,
            ..opaque_square()
        }
        .write(&mut token);
        assert_eq!(token[2] & 0x80, 0x80);
        assert_eq!(token[4] & 0x80, 0x80);
        assert_eq!(token[3] & 7, 2);
    }

    #[test]
    fn test_luminance_terms_follow_orientation() {
        let portrait = Header {
            short_terms: 4,
            ..opaque_square()
        };
        assert_eq!(portrait.luminance_terms(), (4, 7));
        assert_eq!(portrait.luminance_grid(), (4, 7));

        let landscape = Header {
            is_landscape: true,
            short_terms: 1,
            ..opaque_square()
        };
        assert_eq!(landscape.luminance_terms(), (7, 1));
        assert_eq!(landscape.luminance_grid(), (7, 3));
        assert!((landscape.aspect_ratio() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_token_len_range() {
        // Smallest: opaque 7x3 luminance grid. Largest: alpha 5x5.
        let smallest = Header {
            is_landscape: true,
            short_terms: 1,
            ..opaque_square()
        };
        assert_eq!(smallest.token_len(), 17);
        let largest = Header {
            has_alpha: true,
            short_terms: 5,
            ..opaque_square()
        };
        assert_eq!(largest.token_len(), 25);
    }

    #[test]
    fn test_parse_too_short() {
        assert_eq!(
            Header::parse(&[0, 0, 0, 7]),
            Err(TokenError::TooShort {
                expected: 5,
                actual: 4
            })
        );
        // Alpha flag set but no alpha byte.
        assert_eq!(
            Header::parse(&[0, 0, 0x80, 5, 0]),
            Err(TokenError::TooShort {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn test_parse_rejects_term_count() {
        let mut token = token_for(&opaque_square());
        token[3] &= !7;
        assert_eq!(
            Header::parse(&token),
            Err(TokenError::TermCount { value: 0, limit: 7 })
        );

        let mut token = token_for(&Header {
            has_alpha: true,
            short_terms: 5,
            ..opaque_square()
        });
        token[3] = (token[3] & !7) | 6;
        assert_eq!(
            Header::parse(&token),
            Err(TokenError::TermCount { value: 6, limit: 5 })
        );
    }

    #[test]
    fn test_parse_rejects_length_mismatch() {
        let token = token_for(&opaque_square());
        assert_eq!(
            Header::parse(&token[..token.len() - 1]),
            Err(TokenError::LengthMismatch {
                expected: 24,
                actual: 23
            })
        );

        let mut longer = token.clone();
        longer.push(0);
        assert!(matches!(
            Header::parse(&longer),
            Err(TokenError::LengthMismatch { .. })
        ));
    }
}
