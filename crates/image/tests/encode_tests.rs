use base::Size;
use image::{FrameBuffer, ImageError, encode_jpeg, nv21_len, nv21_to_jpeg, nv21_to_rgb, rgb_to_jpeg};

fn uniform(size: Size, y: u8, v: u8, u: u8) -> FrameBuffer {
    let mut data = vec![y; size.area()];
    for _ in 0..size.area() / 4 {
        data.extend_from_slice(&[v, u]);
    }
    FrameBuffer::new(size, data).unwrap()
}

#[test]
fn test_nv21_to_rgb_gray() {
    let rgb = nv21_to_rgb(&uniform(Size::new(2, 2), 128, 128, 128)).unwrap();
    assert_eq!(rgb, vec![128; 12]);
}

#[test]
fn test_nv21_to_rgb_black_and_white() {
    assert_eq!(
        nv21_to_rgb(&uniform(Size::new(2, 2), 0, 128, 128)).unwrap(),
        vec![0; 12]
    );
    assert_eq!(
        nv21_to_rgb(&uniform(Size::new(2, 2), 255, 128, 128)).unwrap(),
        vec![255; 12]
    );
}

#[test]
fn test_nv21_to_rgb_reads_v_before_u() {
    // V=255 pushes red up and green down, U neutral leaves blue at Y
    let rgb = nv21_to_rgb(&uniform(Size::new(2, 2), 128, 255, 128)).unwrap();
    assert_eq!(&rgb[..3], &[255, 38, 128]);
}

#[test]
fn test_nv21_to_rgb_pair_shared_by_2x2_block() {
    // 4x2: left block neutral, right block strong V
    let size = Size::new(4, 2);
    let mut data = vec![128u8; size.area()];
    data.extend_from_slice(&[128, 128, 255, 128]);
    let rgb = nv21_to_rgb(&FrameBuffer::new(size, data).unwrap()).unwrap();

    let pixel = |x: usize, y: usize| &rgb[(y * 4 + x) * 3..(y * 4 + x) * 3 + 3];
    assert_eq!(pixel(0, 0), pixel(1, 1));
    assert_eq!(pixel(2, 0), pixel(3, 1));
    assert_ne!(pixel(1, 0), pixel(2, 0));
}

#[test]
fn test_nv21_to_rgb_odd_dimensions() {
    let frame = FrameBuffer::new(Size::new(3, 2), vec![0u8; 9]).unwrap();
    assert!(matches!(
        nv21_to_rgb(&frame),
        Err(ImageError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_rgb_to_jpeg_soi_marker() {
    let data: Vec<u8> = (0..48).collect();
    let jpeg = rgb_to_jpeg(Size::new(4, 4), &data, 90).unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
}

#[test]
fn test_rgb_to_jpeg_quality_affects_size() {
    let data: Vec<u8> = (0..192).map(|v| (v * 37 % 256) as u8).collect();
    let low = rgb_to_jpeg(Size::new(8, 8), &data, 10).unwrap();
    let high = rgb_to_jpeg(Size::new(8, 8), &data, 100).unwrap();
    assert!(low.len() < high.len());
}

#[test]
fn test_nv21_to_jpeg_decodes_back_to_same_size() {
    let size = Size::new(16, 8);
    let data = (0..nv21_len(size)).map(|i| (i % 256) as u8).collect();
    let frame = FrameBuffer::new(size, data).unwrap();

    let jpeg = nv21_to_jpeg(&frame, 95).unwrap();
    let decoded = crates_image::load_from_memory(&jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (16, 8));
}

#[tokio::test]
async fn test_encode_jpeg_on_blocking_pool() {
    let frame = uniform(Size::new(8, 8), 90, 128, 128);
    let jpeg = encode_jpeg(frame, 80).await.unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
}
