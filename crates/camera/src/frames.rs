use {
    futures_core::Stream,
    image::{FrameBuffer, Rotation, rotate},
    std::{
        pin::Pin,
        task::{Context, Poll},
    },
    tokio::sync::mpsc::{self, error::TrySendError},
};

/// Capture-side end of the frame channel.
///
/// Backends call `on_frame` from their capture thread. Frames are rotated
/// upright if a rotation was configured and queued without blocking; when the
/// queue is full the frame is dropped.
#[derive(Clone, Debug)]
pub struct FrameSink {
    sender: mpsc::Sender<FrameBuffer>,
    rotation: Option<Rotation>,
}

impl FrameSink {
    /// Create a sink and its receiving half. `capacity` is at least 1.
    pub fn channel(capacity: usize, rotation: Option<Rotation>) -> (FrameSink, PreviewFrames) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (FrameSink { sender, rotation }, PreviewFrames { receiver })
    }

    pub fn rotation(&self) -> Option<Rotation> {
        self.rotation
    }

    /// Deliver a frame. Returns false if it was dropped.
    pub fn on_frame(&self, frame: FrameBuffer) -> bool {
        let frame = match self.rotation {
            Some(rotation) => match rotate(&frame, rotation) {
                Ok(rotated) => rotated,
                Err(e) => {
                    log::warn!("dropping frame: {}", e);
                    return false;
                }
            },
            None => frame,
        };
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::trace!("frame queue full, dropping frame");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// True once the receiving half is gone.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Consumer-side end of the frame channel.
///
/// Ends once every `FrameSink` clone is dropped, which happens when the
/// preview stops.
#[derive(Debug)]
pub struct PreviewFrames {
    receiver: mpsc::Receiver<FrameBuffer>,
}

impl PreviewFrames {
    /// Receive the next frame, or `None` when the preview has stopped.
    pub async fn recv(&mut self) -> Option<FrameBuffer> {
        self.receiver.recv().await
    }

    /// Take a queued frame without waiting.
    pub fn try_recv(&mut self) -> Option<FrameBuffer> {
        self.receiver.try_recv().ok()
    }
}

impl Stream for PreviewFrames {
    type Item = FrameBuffer;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}
