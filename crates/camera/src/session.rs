use {
    crate::*,
    base::Size,
    image::{PixelFormat, Rotation},
    std::{
        fmt,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PreviewState {
    Closed,
    Opening,
    Previewing,
    Failed,
}

impl fmt::Display for PreviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PreviewState::Closed => "closed",
            PreviewState::Opening => "opening",
            PreviewState::Previewing => "previewing",
            PreviewState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Asks a running `PreviewSession::open` to stop retrying.
///
/// The flag is checked before every re-attempt, so an attempt already in
/// progress runs to completion first.
#[derive(Clone, Debug)]
pub struct SessionCanceller {
    cancel: Arc<AtomicBool>,
}

impl SessionCanceller {
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

/// Owns one camera for the lifetime of a preview.
///
/// `open` acquires the camera, negotiates sizes, applies parameters and
/// starts the preview, retrying a bounded number of times. `close` stops and
/// releases it. Dropping the session closes it.
pub struct PreviewSession<B: CameraBackend> {
    backend: B,
    config: SessionConfig,
    state: PreviewState,
    lease: Option<DeviceLease<B::Handle>>,
    camera: Option<CameraInfo>,
    attempts: u32,
    cancel: Arc<AtomicBool>,
    preview_size: Option<Size>,
    picture_size: Option<Size>,
    frames: Option<PreviewFrames>,
    phone_degree: u32,
}

impl<B: CameraBackend> PreviewSession<B> {
    pub fn new(backend: B, config: SessionConfig) -> Self {
        let phone_degree = config.phone_degree();
        Self {
            backend,
            config,
            state: PreviewState::Closed,
            lease: None,
            camera: None,
            attempts: 0,
            cancel: Arc::new(AtomicBool::new(false)),
            preview_size: None,
            picture_size: None,
            frames: None,
            phone_degree,
        }
    }

    pub fn state(&self) -> PreviewState {
        self.state
    }

    /// Start attempts made by the current or last `open`. Reset by `close`.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn preview_size(&self) -> Option<Size> {
        self.preview_size
    }

    pub fn picture_size(&self) -> Option<Size> {
        self.picture_size
    }

    pub fn camera(&self) -> Option<&CameraInfo> {
        self.camera.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn canceller(&self) -> SessionCanceller {
        SessionCanceller {
            cancel: Arc::clone(&self.cancel),
        }
    }

    /// Record a new phone orientation. Takes effect for the next `open`.
    pub fn set_phone_degree(&mut self, degree: u32) {
        self.phone_degree = degree % 360;
    }

    /// Rotation applied to delivered frames, from the phone orientation and
    /// the sensor orientation of the selected camera.
    pub fn frame_rotation(&self) -> Option<Rotation> {
        let camera = self.camera.as_ref()?;
        let degrees = frame_rotation_degrees(self.phone_degree, camera.sensor_orientation);
        Rotation::from_degrees(degrees).unwrap_or_else(|e| {
            log::warn!("ignoring frame rotation: {}", e);
            None
        })
    }

    /// Frames of the running preview. Handed out once per `open`.
    pub fn take_frames(&mut self) -> Option<PreviewFrames> {
        self.frames.take()
    }

    // sizes only describe a camera the session currently holds
    fn forget_sizes(&mut self) {
        self.preview_size = None;
        self.picture_size = None;
    }

    fn transition(&mut self, next: PreviewState) {
        if self.state != next {
            log::info!("preview session: {} -> {}", self.state, next);
        }
        self.state = next;
    }

    fn find_camera(&self) -> Result<CameraInfo, CameraError> {
        let facing = self.config.facing();
        self.backend
            .cameras()
            .into_iter()
            .find(|camera| camera.facing == facing)
            .ok_or_else(|| CameraError::DeviceOpenFailed(format!("no {:?} facing camera", facing)))
    }

    /// Open the camera and start the preview.
    ///
    /// Each failed attempt releases the camera before the next one. After
    /// `max_start_attempts` failures the session is `Failed`.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is `Closed` or `Failed`
    /// - `DeviceOpenFailed` if no camera with the configured facing exists
    /// - `PreviewStartFailed` once every attempt failed
    /// - `Canceled` if a `SessionCanceller` fired between attempts
    pub fn open(&mut self) -> Result<(), CameraError> {
        match self.state {
            PreviewState::Closed | PreviewState::Failed => {}
            state => {
                return Err(CameraError::InvalidState {
                    operation: "open",
                    state,
                });
            }
        }
        self.cancel.store(false, Ordering::Relaxed);
        self.attempts = 0;
        self.frames = None;
        self.forget_sizes();
        self.transition(PreviewState::Opening);

        let camera = match self.find_camera() {
            Ok(camera) => camera,
            Err(e) => {
                log::error!("{}", e);
                self.transition(PreviewState::Failed);
                return Err(e);
            }
        };
        self.camera = Some(camera.clone());

        let (sink, frames) = FrameSink::channel(self.config.frame_capacity(), self.frame_rotation());
        let max_attempts = self.config.max_start_attempts();

        loop {
            self.attempts += 1;
            log::info!(
                "starting preview on camera {} (attempt {}/{})",
                camera.id,
                self.attempts,
                max_attempts
            );
            let error = match self.try_start(&camera, sink.clone()) {
                Ok(lease) => {
                    self.lease = Some(lease);
                    self.frames = Some(frames);
                    self.transition(PreviewState::Previewing);
                    return Ok(());
                }
                Err(e) => e,
            };
            log::warn!("preview attempt {} failed: {}", self.attempts, error);

            if self.cancel.load(Ordering::Relaxed) {
                log::info!("preview start canceled");
                self.attempts = 0;
                self.forget_sizes();
                self.transition(PreviewState::Closed);
                return Err(CameraError::Canceled);
            }
            if self.attempts >= max_attempts {
                log::error!("giving up on camera {} after {} attempts", camera.id, self.attempts);
                self.forget_sizes();
                self.transition(PreviewState::Failed);
                return Err(CameraError::PreviewStartFailed {
                    attempts: self.attempts,
                    reason: error.to_string(),
                });
            }
        }
    }

    // One attempt. The lease is released on every error path by its drop.
    fn try_start(
        &mut self,
        camera: &CameraInfo,
        sink: FrameSink,
    ) -> Result<DeviceLease<B::Handle>, CameraError> {
        let mut lease = DeviceLease::new(self.backend.open(camera.id)?);
        self.configure(&mut lease, camera);
        lease.start_preview(sink)?;
        Ok(lease)
    }

    // Parameter failures are not fatal; the device keeps whatever it had.
    fn configure(&mut self, handle: &mut B::Handle, camera: &CameraInfo) {
        let request = self.config.preview_request();
        let active = handle.preview_size().ok();
        self.preview_size = apply_size(
            "preview",
            handle.supported_preview_sizes(),
            &request,
            active,
            |size| handle.set_preview_size(size),
        );

        self.picture_size = match self.preview_size {
            Some(preview) => {
                let request = self.config.picture_request(preview);
                let active = handle.picture_size().ok();
                apply_size(
                    "picture",
                    handle.supported_picture_sizes(),
                    &request,
                    active,
                    |size| handle.set_picture_size(size),
                )
            }
            None => None,
        };

        let degrees = display_orientation(
            self.config.screen(),
            camera.facing,
            camera.sensor_orientation,
        );
        if let Err(e) = handle.set_display_orientation(degrees) {
            log::warn!("cannot set display orientation {}: {}", degrees, e);
        }

        match handle.supported_focus_modes() {
            Ok(modes) if modes.contains(&FocusMode::ContinuousVideo) => {
                if let Err(e) = handle.set_focus_mode(FocusMode::ContinuousVideo) {
                    log::warn!("cannot set focus mode: {}", e);
                }
            }
            Ok(_) => log::debug!("continuous video focus not supported"),
            Err(e) => log::warn!("cannot list focus modes: {}", e),
        }

        if let Err(e) = handle.set_preview_format(PixelFormat::Nv21) {
            log::warn!("cannot set NV21 preview format: {}", e);
        }
    }

    /// Capture a still picture from the running preview.
    pub fn take_picture(&mut self) -> Result<Vec<u8>, CameraError> {
        let state = self.state;
        match (&mut self.lease, state) {
            (Some(lease), PreviewState::Previewing) => lease.take_picture(),
            _ => Err(CameraError::InvalidState {
                operation: "take picture",
                state,
            }),
        }
    }

    /// Stop the preview and release the camera. Failures are logged only.
    pub fn close(&mut self) {
        self.attempts = 0;
        self.frames = None;
        if let Some(mut lease) = self.lease.take() {
            if let Err(e) = lease.stop_preview() {
                log::warn!("cannot stop preview: {}", e);
            }
            lease.release();
        }
        self.forget_sizes();
        self.transition(PreviewState::Closed);
    }
}

// Negotiate a size and apply it with `set`. Any failure leaves the active
// size in place.
fn apply_size(
    what: &str,
    candidates: Result<Vec<Size>, CameraError>,
    request: &SizeRequest,
    active: Option<Size>,
    set: impl FnOnce(Size) -> Result<(), CameraError>,
) -> Option<Size> {
    let candidates = candidates.unwrap_or_else(|e| {
        log::warn!("cannot list {} sizes: {}", what, e);
        Vec::new()
    });
    let size = match negotiate(&candidates, request, active) {
        Ok(size) => size,
        Err(e) => {
            log::warn!("{} size: {}", what, e);
            return active;
        }
    };
    match set(size) {
        Ok(()) => {
            log::info!("{} size {}", what, size);
            Some(size)
        }
        Err(e) => {
            log::warn!("cannot set {} size {}: {}", what, size, e);
            active
        }
    }
}

impl<B: CameraBackend> Drop for PreviewSession<B> {
    fn drop(&mut self) {
        self.close();
    }
}
