use crate::{pixelformat::yuv_to_rgb, *};

/// Convert an NV21 frame to packed `[R, G, B, ...]`.
///
/// Each 2x2 block of luma samples shares one V/U pair.
pub fn nv21_to_rgb(frame: &FrameBuffer) -> Result<Vec<u8>, ImageError> {
    frame.ensure_even()?;
    let width = frame.width();
    let (luma, chroma) = frame.planes();
    let mut rgb = Vec::with_capacity(luma.len() * 3);

    for (row, line) in luma.chunks_exact(width).enumerate() {
        let chroma_row = &chroma[(row / 2) * width..(row / 2 + 1) * width];
        for (col, &y) in line.iter().enumerate() {
            let pair = col & !1;
            let (r, g, b) = yuv_to_rgb(y, chroma_row[pair + 1], chroma_row[pair]);
            rgb.extend_from_slice(&[r, g, b]);
        }
    }

    Ok(rgb)
}
