use {
    base::Size,
    camera::{testing::test_pattern, *},
    futures_util::StreamExt,
    image::{FrameBuffer, Rotation},
};

fn frame(index: usize) -> FrameBuffer {
    test_pattern(Size::new(8, 4), index).unwrap()
}

#[tokio::test]
async fn test_frames_arrive_in_order() {
    let (sink, mut frames) = FrameSink::channel(4, None);
    assert!(sink.on_frame(frame(0)));
    assert!(sink.on_frame(frame(1)));
    drop(sink);

    assert_eq!(frames.recv().await, Some(frame(0)));
    assert_eq!(frames.next().await, Some(frame(1)));
    assert_eq!(frames.next().await, None);
}

#[test]
fn test_full_queue_drops_frames() {
    let (sink, mut frames) = FrameSink::channel(1, None);
    assert!(sink.on_frame(frame(0)));
    assert!(!sink.on_frame(frame(1)));

    assert_eq!(frames.try_recv(), Some(frame(0)));
    assert_eq!(frames.try_recv(), None);
    assert!(sink.on_frame(frame(2)));
}

#[test]
fn test_zero_capacity_is_clamped() {
    let (sink, mut frames) = FrameSink::channel(0, None);
    assert!(sink.on_frame(frame(0)));
    assert!(frames.try_recv().is_some());
}

#[test]
fn test_rotation_is_applied() {
    let (sink, mut frames) = FrameSink::channel(2, Some(Rotation::Deg90));
    assert_eq!(sink.rotation(), Some(Rotation::Deg90));
    assert!(sink.on_frame(frame(0)));

    let rotated = frames.try_recv().unwrap();
    assert_eq!(rotated.size(), Size::new(4, 8));
    assert_eq!(rotated, image::rotate(&frame(0), Rotation::Deg90).unwrap());
}

#[test]
fn test_unrotatable_frame_is_dropped() {
    let (sink, mut frames) = FrameSink::channel(2, Some(Rotation::Deg180));
    let odd = FrameBuffer::new(Size::new(3, 2), vec![0; 9]).unwrap();
    assert!(!sink.on_frame(odd));
    assert!(frames.try_recv().is_none());
}

#[test]
fn test_sink_sees_closed_receiver() {
    let (sink, frames) = FrameSink::channel(2, None);
    let clone = sink.clone();
    assert!(!clone.is_closed());
    drop(frames);
    assert!(sink.is_closed());
    assert!(!clone.on_frame(frame(0)));
}
