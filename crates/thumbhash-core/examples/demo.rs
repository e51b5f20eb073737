//! ThumbHash Demo - Encode and decode example
//!
//! Run with: RUST_LOG=trace cargo run --example demo

use thumbhash_core::{decode, encode, ThumbHash};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== ThumbHash Demo ===\n");

    // A 64x48 gradient that fades to transparent at the bottom.
    let width = 64u32;
    let height = 48u32;
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);

    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / (width - 1)) as u8;
            let g = (y * 255 / (height - 1)) as u8;
            let a = 255 - (y * 128 / (height - 1)) as u8;
            pixels.extend_from_slice(&[r, g, 128, a]);
        }
    }

    println!("1. Created a {width}x{height} gradient image");
    println!("   Pixels (first 8 bytes): {:?}...\n", &pixels[..8]);

    let hash = encode(width, height, &pixels)?;
    println!("2. Encoded to ThumbHash: {hash}");
    println!("   Token length: {} bytes", hash.len());
    println!("   Has alpha: {}\n", hash.has_alpha());

    // Tokens travel as base64 text.
    let parsed: ThumbHash = hash.to_string().parse()?;
    let avg = parsed.average_rgba();
    println!(
        "3. Average color: rgba({:.0}, {:.0}, {:.0}, {:.2})",
        avg.r * 255.0,
        avg.g * 255.0,
        avg.b * 255.0,
        avg.a
    );
    println!(
        "   Approximate aspect ratio: {:.3}\n",
        parsed.approximate_aspect_ratio()
    );

    let preview = decode(hash.as_bytes())?;
    let last = preview.rgba.len() - 4;
    println!(
        "4. Decoded to {}x{} preview ({} bytes)",
        preview.width,
        preview.height,
        preview.rgba.len()
    );
    println!("   First pixel RGBA: {:?}", &preview.rgba[..4]);
    println!("   Last pixel RGBA: {:?}\n", &preview.rgba[last..]);

    let url = preview.to_data_url()?;
    println!("5. Data URL ({} characters):", url.len());
    println!("   {}...", &url[..url.len().min(72)]);

    println!("\n=== Demo Complete ===");
    println!("\nSee README.md for Python and TypeScript usage.");
    Ok(())
}
