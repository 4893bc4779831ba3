use base::{Rect, Size};
use image::{FrameBuffer, ImageError, PixelFormat, nv21_len};

#[test]
fn test_nv21_len() {
    assert_eq!(nv21_len(Size::new(640, 480)), 460_800);
    assert_eq!(nv21_len(Size::new(2, 2)), 6);
}

#[test]
fn test_new_accepts_exact_length() {
    let frame = FrameBuffer::new(Size::new(4, 2), vec![0u8; 12]).unwrap();
    assert_eq!(frame.size(), Size::new(4, 2));
    assert_eq!(frame.width(), 4);
    assert_eq!(frame.height(), 2);
    assert_eq!(frame.format(), PixelFormat::Nv21);
    assert_eq!(frame.bounds(), Rect::new(0, 0, 4, 2));
}

#[test]
fn test_new_rejects_wrong_length() {
    let err = FrameBuffer::new(Size::new(4, 2), vec![0u8; 8]).unwrap_err();
    assert_eq!(err, ImageError::InvalidLength { expected: 12, got: 8 });
}

#[test]
fn test_new_rejects_zero_dimension() {
    let err = FrameBuffer::new(Size::new(0, 2), Vec::new()).unwrap_err();
    assert_eq!(err, ImageError::InvalidDimensions { width: 0, height: 2 });
}

#[test]
fn test_planes_split_at_luma_size() {
    let data: Vec<u8> = (0..12).collect();
    let frame = FrameBuffer::new(Size::new(4, 2), data).unwrap();
    let (luma, chroma) = frame.planes();
    assert_eq!(luma, &[0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(chroma, &[8, 9, 10, 11]);
}

#[test]
fn test_ensure_even() {
    // 3x2 is a well-sized buffer but cannot carry a chroma grid
    let odd = FrameBuffer::new(Size::new(3, 2), vec![0u8; 9]).unwrap();
    assert!(matches!(
        odd.ensure_even(),
        Err(ImageError::InvalidDimensions { width: 3, height: 2 })
    ));

    let even = FrameBuffer::new(Size::new(2, 2), vec![0u8; 6]).unwrap();
    assert!(even.ensure_even().is_ok());
}

#[test]
fn test_into_data_returns_buffer() {
    let data: Vec<u8> = (0..6).collect();
    let frame = FrameBuffer::new(Size::new(2, 2), data.clone()).unwrap();
    assert_eq!(frame.into_data(), data);
}

#[test]
fn test_debug_does_not_dump_pixels() {
    let frame = FrameBuffer::new(Size::new(640, 480), vec![7u8; 460_800]).unwrap();
    let text = format!("{:?}", frame);
    assert!(text.contains("460800"));
    assert!(text.len() < 200);
}

#[test]
fn test_pixel_format_fourcc() {
    assert_eq!(image::fourcc_to_string(PixelFormat::Nv21.as_fourcc()), "NV21");
    assert_eq!(
        PixelFormat::from_fourcc(PixelFormat::Jpeg.as_fourcc()),
        Some(PixelFormat::Jpeg)
    );
    assert_eq!(PixelFormat::from_fourcc(u32::from_le_bytes(*b"YUYV")), None);
}
