//! PNG encoding for RGBA image data.
//!
//! Figures are continuous-tone, so only the RGBA form (color type 6) is
//! implemented; there is no palette path.

use std::io::Write;

use crate::error::Result;

/// Create a PNG image from RGBA pixel data (4 bytes per pixel).
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    let mut png = Vec::new();

    // PNG signature
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    // IHDR chunk
    let mut ihdr_data = Vec::new();
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(6); // color type (RGBA)
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    // IDAT chunk (image data)
    write_chunk(&mut png, b"IDAT", &deflate_idat_rgba(pixels, width, height)?);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a PNG chunk
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let crc_data = [chunk_type.as_slice(), data].concat();
    png.extend_from_slice(&crc32fast::hash(&crc_data).to_be_bytes());
}

/// Deflate RGBA image data for the IDAT chunk.
fn deflate_idat_rgba(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    // Each scanline is a filter byte (0 = none) plus the raw RGBA row.
    let mut uncompressed = Vec::with_capacity(height * (1 + width * 4));
    for y in 0..height {
        uncompressed.push(0); // filter type: none
        let row_start = y * width * 4;
        uncompressed.extend_from_slice(&pixels[row_start..row_start + width * 4]);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&uncompressed)?;
    Ok(encoder.finish()?)
}
