use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    /// Zero, or odd where the chroma grid needs even, width/height.
    InvalidDimensions { width: usize, height: usize },
    /// Buffer length does not match the NV21 size for its dimensions.
    InvalidLength { expected: usize, got: usize },
    /// Crop rectangle empty or out of bounds after even alignment.
    InvalidCrop(String),
    UnsupportedRotation(u32),
    Encode(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            ImageError::InvalidLength { expected, got } => {
                write!(f, "invalid buffer length: expected {expected} bytes, got {got}")
            }
            ImageError::InvalidCrop(msg) => write!(f, "invalid crop: {msg}"),
            ImageError::UnsupportedRotation(degrees) => {
                write!(f, "unsupported rotation: {degrees} degrees")
            }
            ImageError::Encode(msg) => write!(f, "encode error: {msg}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Encode(err.to_string())
    }
}
