use {crate::*, base::Size, crates_image::ImageEncoder};

/// Encode packed RGB pixels as JPEG.
pub fn rgb_to_jpeg(size: Size, data: &[u8], quality: u8) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    let encoder = crates_image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder.write_image(
        data,
        size.width as u32,
        size.height as u32,
        crates_image::ExtendedColorType::Rgb8,
    )?;
    Ok(buffer)
}

pub fn nv21_to_jpeg(frame: &FrameBuffer, quality: u8) -> Result<Vec<u8>, ImageError> {
    let rgb = nv21_to_rgb(frame)?;
    rgb_to_jpeg(frame.size(), &rgb, quality)
}

/// Encode an NV21 frame as JPEG on tokio's blocking thread pool.
pub async fn encode_jpeg(frame: FrameBuffer, quality: u8) -> Result<Vec<u8>, ImageError> {
    tokio::task::spawn_blocking(move || nv21_to_jpeg(&frame, quality))
        .await
        .map_err(|e| ImageError::Encode(e.to_string()))?
}
