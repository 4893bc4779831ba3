use base::{Rect, Size};
use image::{FrameBuffer, ImageError, Rotation, crop, nv21_len, rotate, rotate_and_crop};

fn pattern(width: usize, height: usize) -> FrameBuffer {
    let size = Size::new(width, height);
    let data = (0..nv21_len(size)).map(|i| i as u8).collect();
    FrameBuffer::new(size, data).unwrap()
}

#[test]
fn test_full_frame_crop_is_identity() {
    let frame = pattern(8, 6);
    assert_eq!(crop(&frame, frame.bounds()).unwrap(), frame);
}

#[test]
fn test_crop_copies_luma_and_chroma() {
    // 4x4: luma 0..16, chroma rows [16..20] and [20..24]
    let frame = pattern(4, 4);
    let out = crop(&frame, Rect::new(2, 2, 2, 2)).unwrap();
    assert_eq!(out.size(), Size::new(2, 2));
    assert_eq!(out.data(), &[10, 11, 14, 15, 22, 23]);
}

#[test]
fn test_odd_rect_is_aligned_even() {
    let frame = pattern(8, 6);
    let out = crop(&frame, Rect::new(1, 3, 5, 3)).unwrap();
    assert_eq!(out.size(), Size::new(4, 2));
    assert_eq!(out, crop(&frame, Rect::new(0, 2, 4, 2)).unwrap());
}

#[test]
fn test_odd_extent_always_yields_even_output() {
    let frame = pattern(16, 12);
    for width in 2..=9 {
        for height in 2..=7 {
            let out = crop(&frame, Rect::new(1, 1, width, height)).unwrap();
            assert!(out.size().is_even(), "{}x{}", width, height);
            assert_eq!(out.data().len(), nv21_len(out.size()));
        }
    }
}

#[test]
fn test_rect_empty_after_alignment() {
    let frame = pattern(8, 6);
    assert!(matches!(
        crop(&frame, Rect::new(2, 2, 1, 4)),
        Err(ImageError::InvalidCrop(_))
    ));
}

#[test]
fn test_rect_out_of_bounds() {
    let frame = pattern(8, 6);
    assert!(matches!(
        crop(&frame, Rect::new(4, 0, 6, 2)),
        Err(ImageError::InvalidCrop(_))
    ));
    assert!(matches!(
        crop(&frame, Rect::new(10, 10, 2, 2)),
        Err(ImageError::InvalidCrop(_))
    ));
}

#[test]
fn test_rect_edge_past_usize_max() {
    let frame = pattern(4, 4);
    assert!(matches!(
        crop(&frame, Rect::new(usize::MAX - 1, 0, 4, 2)),
        Err(ImageError::InvalidCrop(_))
    ));
    assert!(matches!(
        crop(&frame, Rect::new(0, usize::MAX - 1, 2, 4)),
        Err(ImageError::InvalidCrop(_))
    ));
}

#[test]
fn test_crop_leaves_input_untouched() {
    let frame = pattern(8, 6);
    let before = frame.clone();
    let _ = crop(&frame, Rect::new(2, 2, 4, 2)).unwrap();
    assert_eq!(frame, before);
}

#[test]
fn test_crop_odd_source_fails() {
    let frame = FrameBuffer::new(Size::new(3, 2), vec![0u8; 9]).unwrap();
    assert!(matches!(
        crop(&frame, Rect::new(0, 0, 2, 2)),
        Err(ImageError::InvalidDimensions { .. })
    ));
}

// --- rotate_and_crop ---

#[test]
fn test_rotate_and_crop_full_preview_only_rotates() {
    let frame = pattern(8, 4);
    let preview = Rect::new(0, 0, 400, 800);
    let out = rotate_and_crop(&frame, Some(Rotation::Deg90), preview, preview).unwrap();
    assert_eq!(out, rotate(&frame, Rotation::Deg90).unwrap());
}

#[test]
fn test_rotate_and_crop_scales_preview_region() {
    // preview shown at half the frame's resolution
    let frame = pattern(8, 4);
    let preview = Rect::new(0, 0, 4, 2);
    let out = rotate_and_crop(&frame, None, preview, Rect::new(2, 0, 2, 2)).unwrap();
    assert_eq!(out, crop(&frame, Rect::new(4, 0, 4, 4)).unwrap());
}

#[test]
fn test_rotate_and_crop_offsets_by_preview_origin() {
    let frame = pattern(8, 4);
    let preview = Rect::new(100, 50, 8, 4);
    let out = rotate_and_crop(&frame, None, preview, Rect::new(102, 50, 4, 4)).unwrap();
    assert_eq!(out, crop(&frame, Rect::new(2, 0, 4, 4)).unwrap());
}

#[test]
fn test_rotate_and_crop_after_rotation() {
    let frame = pattern(8, 4);
    // rotated frame is 4x8; the preview is 40x80 on screen
    let preview = Rect::new(0, 0, 40, 80);
    let out = rotate_and_crop(&frame, Some(Rotation::Deg270), preview, Rect::new(0, 40, 40, 40))
        .unwrap();
    let rotated = rotate(&frame, Rotation::Deg270).unwrap();
    assert_eq!(out, crop(&rotated, Rect::new(0, 4, 4, 4)).unwrap());
}

#[test]
fn test_rotate_and_crop_empty_preview() {
    let frame = pattern(8, 4);
    assert!(matches!(
        rotate_and_crop(&frame, None, Rect::new(0, 0, 0, 0), Rect::new(0, 0, 2, 2)),
        Err(ImageError::InvalidCrop(_))
    ));
}
