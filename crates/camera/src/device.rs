use {
    crate::{CameraError, Facing, FrameSink},
    base::Size,
    image::PixelFormat,
    std::ops::{Deref, DerefMut},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusMode {
    Auto,
    ContinuousVideo,
    ContinuousPicture,
    Fixed,
    Infinity,
}

/// A camera the backend can open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraInfo {
    pub id: u32,
    pub facing: Facing,
    /// Clockwise angle the sensor image must be rotated to appear upright
    /// in the device's natural orientation.
    pub sensor_orientation: u32,
}

/// Enumerates and opens cameras.
pub trait CameraBackend: Send {
    type Handle: CameraHandle;

    fn cameras(&self) -> Vec<CameraInfo>;

    /// Open camera `id` for exclusive use.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::DeviceOpenFailed` if the camera is missing or busy.
    fn open(&mut self, id: u32) -> Result<Self::Handle, CameraError>;
}

/// An opened camera.
///
/// Sizes are in sensor orientation. Frames are delivered through the
/// `FrameSink` passed to `start_preview`, from whatever thread the backend
/// captures on.
pub trait CameraHandle: Send {
    fn supported_preview_sizes(&self) -> Result<Vec<Size>, CameraError>;
    fn supported_picture_sizes(&self) -> Result<Vec<Size>, CameraError>;
    fn preview_size(&self) -> Result<Size, CameraError>;
    fn picture_size(&self) -> Result<Size, CameraError>;
    fn set_preview_size(&mut self, size: Size) -> Result<(), CameraError>;
    fn set_picture_size(&mut self, size: Size) -> Result<(), CameraError>;
    fn set_display_orientation(&mut self, degrees: u32) -> Result<(), CameraError>;
    fn supported_focus_modes(&self) -> Result<Vec<FocusMode>, CameraError>;
    fn set_focus_mode(&mut self, mode: FocusMode) -> Result<(), CameraError>;
    fn set_preview_format(&mut self, format: PixelFormat) -> Result<(), CameraError>;
    fn start_preview(&mut self, sink: FrameSink) -> Result<(), CameraError>;
    fn stop_preview(&mut self) -> Result<(), CameraError>;
    /// Capture a still image, returned as encoded bytes.
    fn take_picture(&mut self) -> Result<Vec<u8>, CameraError>;
    fn release(&mut self) -> Result<(), CameraError>;
}

/// Exclusive ownership of an opened camera.
///
/// The handle is released exactly once: by `release` or, failing that, when
/// the lease is dropped. A failing release is logged, never returned.
pub struct DeviceLease<H: CameraHandle> {
    handle: H,
    released: bool,
}

impl<H: CameraHandle> DeviceLease<H> {
    pub fn new(handle: H) -> Self {
        Self {
            handle,
            released: false,
        }
    }

    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.handle.release() {
            log::warn!("camera release failed: {}", e);
        }
    }
}

impl<H: CameraHandle> Deref for DeviceLease<H> {
    type Target = H;

    fn deref(&self) -> &H {
        &self.handle
    }
}

impl<H: CameraHandle> DerefMut for DeviceLease<H> {
    fn deref_mut(&mut self) -> &mut H {
        &mut self.handle
    }
}

impl<H: CameraHandle> Drop for DeviceLease<H> {
    fn drop(&mut self) {
        if !self.released {
            log::debug!("releasing camera on drop");
        }
        self.release_once();
    }
}
