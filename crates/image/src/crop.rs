use {crate::*, base::Rect};

/// Crop an NV21 frame.
///
/// `rect` is first aligned to the chroma grid by rounding its origin and
/// extent down to even values. Luma rows are copied from the aligned
/// rectangle, chroma rows from the matching half-resolution rectangle, so
/// V/U interleaving is preserved.
///
/// # Errors
///
/// Returns `ImageError::InvalidDimensions` if the input has an odd dimension,
/// and `ImageError::InvalidCrop` if the aligned rectangle is empty or does not
/// fit inside the input.
pub fn crop(input: &FrameBuffer, rect: Rect) -> Result<FrameBuffer, ImageError> {
    input.ensure_even()?;
    let aligned = rect.aligned_even();
    if aligned.is_empty() {
        return Err(ImageError::InvalidCrop(format!(
            "{} is empty after even alignment",
            rect
        )));
    }
    if !aligned.fits_within(input.size()) {
        return Err(ImageError::InvalidCrop(format!(
            "{} exceeds {} frame",
            aligned,
            input.size()
        )));
    }

    let stride = input.width();
    let (luma, chroma) = input.planes();
    let mut data = Vec::with_capacity(nv21_len(aligned.size()));

    for row in aligned.top..aligned.bottom() {
        let start = row * stride;
        data.extend_from_slice(&luma[start + aligned.left..start + aligned.right()]);
    }

    // one chroma row covers two luma rows; a V/U pair covers two luma columns,
    // so the byte range within a chroma row equals the luma column range
    for row in aligned.top / 2..aligned.bottom() / 2 {
        let start = row * stride;
        data.extend_from_slice(&chroma[start + aligned.left..start + aligned.right()]);
    }

    FrameBuffer::new(aligned.size(), data)
}

// Scale `value` from a `from`-wide axis onto a `to`-wide axis, truncating.
fn scale(value: usize, from: usize, to: usize) -> usize {
    (value as f32 / from as f32 * to as f32) as usize
}

/// Rotate a frame into display orientation, then crop a region given in
/// on-screen preview coordinates.
///
/// `preview` is where the preview is shown on screen and `crop_rect` is the
/// region of interest in the same coordinate space. The region is mapped
/// linearly onto the rotated frame before cropping. When `crop_rect` equals
/// `preview` the rotated frame is returned as is.
pub fn rotate_and_crop(
    input: &FrameBuffer,
    rotation: Option<Rotation>,
    preview: Rect,
    crop_rect: Rect,
) -> Result<FrameBuffer, ImageError> {
    let rotated = match rotation {
        Some(rotation) => rotate(input, rotation)?,
        None => input.clone(),
    };

    if crop_rect == preview {
        return Ok(rotated);
    }
    if preview.is_empty() {
        return Err(ImageError::InvalidCrop(format!(
            "preview area {} is empty",
            preview
        )));
    }

    let mapped = Rect::new(
        scale(
            crop_rect.left.saturating_sub(preview.left),
            preview.width,
            rotated.width(),
        ),
        scale(
            crop_rect.top.saturating_sub(preview.top),
            preview.height,
            rotated.height(),
        ),
        scale(crop_rect.width, preview.width, rotated.width()),
        scale(crop_rect.height, preview.height, rotated.height()),
    );
    log::debug!(
        "cropping {} preview region {} as {} of {} frame",
        preview,
        crop_rect,
        mapped,
        rotated.size()
    );
    crop(&rotated, mapped)
}
