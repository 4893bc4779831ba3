use {crate::PreviewState, image::ImageError, std::fmt};

#[derive(Debug)]
pub enum CameraError {
    /// No supported size survived filtering and no active size was available.
    NoCandidateSize,
    DeviceOpenFailed(String),
    /// Every allowed attempt to start the preview failed.
    PreviewStartFailed { attempts: u32, reason: String },
    Device(String),
    InvalidState {
        operation: &'static str,
        state: PreviewState,
    },
    Canceled,
    Image(ImageError),
    Channel(String),
}

impl CameraError {
    /// True for failures a host should present as "camera unavailable".
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            CameraError::DeviceOpenFailed(_) | CameraError::PreviewStartFailed { .. }
        )
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoCandidateSize => write!(f, "no usable camera size"),
            CameraError::DeviceOpenFailed(msg) => write!(f, "device open failed: {msg}"),
            CameraError::PreviewStartFailed { attempts, reason } => {
                write!(f, "preview start failed after {attempts} attempts: {reason}")
            }
            CameraError::Device(msg) => write!(f, "device error: {msg}"),
            CameraError::InvalidState { operation, state } => {
                write!(f, "cannot {operation} while {state}")
            }
            CameraError::Canceled => write!(f, "canceled"),
            CameraError::Image(err) => write!(f, "image error: {err}"),
            CameraError::Channel(msg) => write!(f, "channel error: {msg}"),
        }
    }
}

impl std::error::Error for CameraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CameraError::Image(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Device(err.to_string())
    }
}

impl From<ImageError> for CameraError {
    fn from(err: ImageError) -> Self {
        CameraError::Image(err)
    }
}
