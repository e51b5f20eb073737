//! # thumbhash-core
//!
//! ThumbHash image placeholder encoding and decoding in pure Rust.
//!
//! A ThumbHash is a 17 to 25 byte token that captures the gist of an image:
//! its average color, coarse luminance and chroma structure, alpha and
//! approximate aspect ratio. Decoding yields a blurry preview of at most
//! 32x32 pixels to show while the real image loads.
//!
//! ## Quick Start
//!
//! ```
//! use thumbhash_core::{decode, encode};
//!
//! // Encode: image pixels -> token
//! let rgba = [200u8, 120, 40, 255].repeat(8 * 4); // 8x4 orange image
//! let hash = encode(8, 4, &rgba).unwrap();
//! assert!((17..=25).contains(&hash.len()));
//!
//! // Decode: token -> preview pixels
//! let preview = decode(hash.as_bytes()).unwrap();
//! assert_eq!((preview.width, preview.height), (32, 18));
//! assert_eq!(preview.rgba.len(), 32 * 18 * 4);
//! ```
//!
//! ## Features
//!
//! * `data-url` (default): PNG and `data:` URL output for previews.
//! * `cache` (default): [`cache::LruThumbHashCache`], a bounded token store.

pub mod color;
pub mod error;

#[cfg(feature = "cache")]
pub mod cache;

mod dct;
mod decode_impl;
mod encode_impl;
mod header;
mod packing;
mod preview;
mod quant;
mod token;

// Re-export primary API at crate root.
pub use decode_impl::{approximate_aspect_ratio, average_rgba, decode, AverageColor};
pub use encode_impl::encode;
pub use error::{ErrorKind, InputError, ThumbHashError, TokenError};
pub use preview::Preview;
#[cfg(feature = "data-url")]
pub use preview::{rgba_to_data_url, to_data_url};
pub use token::ThumbHash;
