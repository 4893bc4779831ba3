use {
    crate::*,
    base::{Rect, Size},
};

/// Number of bytes an NV21 buffer of `size` occupies.
pub fn nv21_len(size: Size) -> usize {
    let luma = size.area();
    luma + luma / 2
}

/// A raw NV21 frame as delivered by the capture callback.
///
/// The buffer always satisfies `data.len() == nv21_len(size)`. Transforms
/// never mutate a frame; they return a new one.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    size: Size,
    data: Vec<u8>,
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("size", &self.size)
            .field("format", &self.format())
            .field("len", &self.data.len())
            .finish()
    }
}

impl FrameBuffer {
    pub fn new(size: Size, data: Vec<u8>) -> Result<Self, ImageError> {
        if size.is_zero() {
            return Err(ImageError::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }
        let expected = nv21_len(size);
        if data.len() != expected {
            return Err(ImageError::InvalidLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { size, data })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.width
    }

    pub fn height(&self) -> usize {
        self.size.height
    }

    pub fn format(&self) -> PixelFormat {
        PixelFormat::Nv21
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// The luma plane followed by the interleaved chroma plane.
    pub fn planes(&self) -> (&[u8], &[u8]) {
        self.data.split_at(self.size.area())
    }

    /// Fails with `InvalidDimensions` unless both dimensions are even.
    pub fn ensure_even(&self) -> Result<(), ImageError> {
        if !self.size.is_even() {
            return Err(ImageError::InvalidDimensions {
                width: self.size.width,
                height: self.size.height,
            });
        }
        Ok(())
    }
}
