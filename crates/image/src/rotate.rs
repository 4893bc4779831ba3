use {crate::*, base::Size};

/// Clockwise rotation applied to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Map a clockwise angle to a rotation. The angle is taken modulo 360;
    /// 0 yields `None`, anything that is not a quarter turn is rejected.
    pub fn from_degrees(degrees: u32) -> Result<Option<Self>, ImageError> {
        match degrees % 360 {
            0 => Ok(None),
            90 => Ok(Some(Rotation::Deg90)),
            180 => Ok(Some(Rotation::Deg180)),
            270 => Ok(Some(Rotation::Deg270)),
            _ => Err(ImageError::UnsupportedRotation(degrees)),
        }
    }

    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn swaps_dimensions(&self) -> bool {
        !matches!(self, Rotation::Deg180)
    }

    /// Size of a frame of `size` after this rotation.
    pub fn apply_to(&self, size: Size) -> Size {
        if self.swaps_dimensions() {
            size.transposed()
        } else {
            size
        }
    }
}

// Rotate a row-major grid of `cols` x `rows` samples, each `sample` bytes wide,
// appending the result to `out`. Samples are moved whole, so an interleaved
// V/U pair is never split.
fn rotate_plane(
    src: &[u8],
    cols: usize,
    rows: usize,
    sample: usize,
    rotation: Rotation,
    out: &mut Vec<u8>,
) {
    let at = |row: usize, col: usize| {
        let i = (row * cols + col) * sample;
        &src[i..i + sample]
    };
    match rotation {
        // source columns left to right, each read bottom to top
        Rotation::Deg90 => {
            for col in 0..cols {
                for row in (0..rows).rev() {
                    out.extend_from_slice(at(row, col));
                }
            }
        }
        Rotation::Deg180 => {
            for s in src.chunks_exact(sample).rev() {
                out.extend_from_slice(s);
            }
        }
        // source columns right to left, each read top to bottom
        Rotation::Deg270 => {
            for col in (0..cols).rev() {
                for row in 0..rows {
                    out.extend_from_slice(at(row, col));
                }
            }
        }
    }
}

/// Rotate an NV21 frame clockwise.
///
/// The luma plane is permuted sample by sample. The chroma plane is permuted
/// on its half-resolution grid with each V/U pair kept together, so the
/// output is again a well-formed NV21 buffer. For 90 and 270 degrees the
/// output is `height x width`.
///
/// # Errors
///
/// Returns `ImageError::InvalidDimensions` if either dimension is odd.
pub fn rotate(input: &FrameBuffer, rotation: Rotation) -> Result<FrameBuffer, ImageError> {
    input.ensure_even()?;
    let (width, height) = (input.width(), input.height());
    let (luma, chroma) = input.planes();

    let mut data = Vec::with_capacity(input.data().len());
    rotate_plane(luma, width, height, 1, rotation, &mut data);
    rotate_plane(chroma, width / 2, height / 2, 2, rotation, &mut data);

    FrameBuffer::new(rotation.apply_to(input.size()), data)
}

/// Rotate by an angle in degrees. 0 (mod 360) returns a copy of the input.
pub fn rotate_degrees(input: &FrameBuffer, degrees: u32) -> Result<FrameBuffer, ImageError> {
    match Rotation::from_degrees(degrees)? {
        Some(rotation) => rotate(input, rotation),
        None => Ok(input.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 4x2 frame: luma 0..8, chroma pairs (100,101) (102,103)
    fn frame_4x2() -> FrameBuffer {
        let mut data: Vec<u8> = (0..8).collect();
        data.extend_from_slice(&[100, 101, 102, 103]);
        FrameBuffer::new(Size::new(4, 2), data).unwrap()
    }

    #[test]
    fn test_rotate_90_luma_layout() {
        // 0 1 2 3        4 0
        // 4 5 6 7   ->   5 1
        //                6 2
        //                7 3
        let out = rotate(&frame_4x2(), Rotation::Deg90).unwrap();
        assert_eq!(out.size(), Size::new(2, 4));
        assert_eq!(&out.data()[..8], &[4, 0, 5, 1, 6, 2, 7, 3]);
        // chroma grid is 2x1 pairs -> 1x2 pairs, top pair is the left source pair
        assert_eq!(&out.data()[8..], &[100, 101, 102, 103]);
    }

    #[test]
    fn test_rotate_270_luma_layout() {
        let out = rotate(&frame_4x2(), Rotation::Deg270).unwrap();
        assert_eq!(out.size(), Size::new(2, 4));
        assert_eq!(&out.data()[..8], &[3, 7, 2, 6, 1, 5, 0, 4]);
        assert_eq!(&out.data()[8..], &[102, 103, 100, 101]);
    }

    #[test]
    fn test_rotate_180_keeps_pair_order() {
        let out = rotate(&frame_4x2(), Rotation::Deg180).unwrap();
        assert_eq!(out.size(), Size::new(4, 2));
        assert_eq!(&out.data()[..8], &[7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(&out.data()[8..], &[102, 103, 100, 101]);
    }

    #[test]
    fn test_from_degrees_normalizes() {
        assert_eq!(Rotation::from_degrees(450).unwrap(), Some(Rotation::Deg90));
        assert_eq!(Rotation::from_degrees(360).unwrap(), None);
        assert!(Rotation::from_degrees(45).is_err());
    }
}
