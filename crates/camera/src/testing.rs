//! In-process camera backend with scripted behavior.
//!
//! `SimulatedBackend` records every call it receives in a `Journal`, can be
//! told to fail a number of opens or preview starts, and produces NV21 test
//! pattern frames.

use {
    crate::*,
    base::Size,
    image::{FrameBuffer, PixelFormat, nv21_len},
    std::{
        sync::{
            Arc, Mutex, MutexGuard,
            atomic::{AtomicBool, Ordering},
        },
        thread::{self, JoinHandle},
        time::Duration,
    },
};

/// A call made on the simulated backend or one of its handles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Open(u32),
    SetPreviewSize(Size),
    SetPictureSize(Size),
    SetDisplayOrientation(u32),
    SetFocusMode(FocusMode),
    SetPreviewFormat(PixelFormat),
    StartPreview,
    StopPreview,
    TakePicture,
    Release,
}

/// Shared, ordered record of calls.
#[derive(Clone, Debug, Default)]
pub struct Journal {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Journal {
    fn lock(&self) -> MutexGuard<'_, Vec<Call>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: Call) {
        self.lock().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.lock().iter().filter(|c| *c == call).count()
    }

    pub fn opens(&self) -> usize {
        self.lock()
            .iter()
            .filter(|c| matches!(c, Call::Open(_)))
            .count()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

// failure budgets shared between the backend and its handles
#[derive(Debug, Default)]
struct Script {
    open_failures: u32,
    start_failures: u32,
    starts: u32,
}

type StartHook = Arc<dyn Fn(u32) + Send + Sync>;

/// Deterministic NV21 frame: a diagonal luma ramp shifted by `index`, with
/// the chroma plane split into a red-ish top half and a blue-ish bottom half.
pub fn test_pattern(size: Size, index: usize) -> Result<FrameBuffer, CameraError> {
    let mut data = Vec::with_capacity(nv21_len(size));
    for y in 0..size.height {
        for x in 0..size.width {
            data.push(((x + y + index) % 256) as u8);
        }
    }
    let chroma_rows = size.height / 2;
    for row in 0..chroma_rows {
        let (v, u) = if row < chroma_rows / 2 { (200, 90) } else { (90, 200) };
        for _ in 0..size.width / 2 {
            data.push(v);
            data.push(u);
        }
    }
    Ok(FrameBuffer::new(size, data)?)
}

pub struct SimulatedBackend {
    cameras: Vec<CameraInfo>,
    preview_sizes: Vec<Size>,
    picture_sizes: Vec<Size>,
    active_preview: Size,
    active_picture: Size,
    focus_modes: Vec<FocusMode>,
    frames_on_start: usize,
    frame_interval: Option<Duration>,
    fail_release: bool,
    fail_parameters: bool,
    start_hook: Option<StartHook>,
    script: Arc<Mutex<Script>>,
    journal: Journal,
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self {
            cameras: vec![
                CameraInfo {
                    id: 0,
                    facing: Facing::Back,
                    sensor_orientation: 90,
                },
                CameraInfo {
                    id: 1,
                    facing: Facing::Front,
                    sensor_orientation: 270,
                },
            ],
            preview_sizes: vec![
                Size::new(1920, 1080),
                Size::new(1280, 720),
                Size::new(640, 480),
                Size::new(320, 240),
            ],
            picture_sizes: vec![
                Size::new(4032, 3024),
                Size::new(1920, 1080),
                Size::new(1280, 960),
            ],
            active_preview: Size::new(640, 480),
            active_picture: Size::new(1280, 960),
            focus_modes: vec![FocusMode::Auto, FocusMode::ContinuousVideo],
            frames_on_start: 0,
            frame_interval: None,
            fail_release: false,
            fail_parameters: false,
            start_hook: None,
            script: Arc::new(Mutex::new(Script::default())),
            journal: Journal::default(),
        }
    }
}

impl std::fmt::Debug for SimulatedBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedBackend")
            .field("cameras", &self.cameras)
            .field("preview_sizes", &self.preview_sizes)
            .field("picture_sizes", &self.picture_sizes)
            .field("script", &self.script)
            .finish()
    }
}

impl SimulatedBackend {
    pub fn with_cameras(mut self, cameras: Vec<CameraInfo>) -> Self {
        self.cameras = cameras;
        self
    }

    pub fn with_preview_sizes(mut self, sizes: Vec<Size>) -> Self {
        self.preview_sizes = sizes;
        self
    }

    pub fn with_picture_sizes(mut self, sizes: Vec<Size>) -> Self {
        self.picture_sizes = sizes;
        self
    }

    /// Size a freshly opened handle reports before any size is set.
    pub fn with_active_preview(mut self, size: Size) -> Self {
        self.active_preview = size;
        self
    }

    pub fn with_focus_modes(mut self, modes: Vec<FocusMode>) -> Self {
        self.focus_modes = modes;
        self
    }

    /// Fail the next `count` opens.
    pub fn with_open_failures(self, count: u32) -> Self {
        self.lock_script().open_failures = count;
        self
    }

    /// Fail the next `count` preview starts.
    pub fn with_start_failures(self, count: u32) -> Self {
        self.lock_script().start_failures = count;
        self
    }

    /// Push `count` frames into the sink as soon as a preview starts.
    pub fn with_frames_on_start(mut self, count: usize) -> Self {
        self.frames_on_start = count;
        self
    }

    /// Keep producing frames from a worker thread while previewing.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }

    pub fn with_failing_release(mut self) -> Self {
        self.fail_release = true;
        self
    }

    /// Make every parameter setter fail.
    pub fn with_failing_parameters(mut self) -> Self {
        self.fail_parameters = true;
        self
    }

    /// Call `hook` with the running start count on every preview start.
    pub fn with_start_hook(mut self, hook: impl Fn(u32) + Send + Sync + 'static) -> Self {
        self.start_hook = Some(Arc::new(hook));
        self
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    fn lock_script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CameraBackend for SimulatedBackend {
    type Handle = SimulatedHandle;

    fn cameras(&self) -> Vec<CameraInfo> {
        self.cameras.clone()
    }

    fn open(&mut self, id: u32) -> Result<SimulatedHandle, CameraError> {
        self.journal.record(Call::Open(id));
        if !self.cameras.iter().any(|camera| camera.id == id) {
            return Err(CameraError::DeviceOpenFailed(format!("no camera {}", id)));
        }
        {
            let mut script = self.lock_script();
            if script.open_failures > 0 {
                script.open_failures -= 1;
                return Err(CameraError::DeviceOpenFailed(format!("camera {} is busy", id)));
            }
        }
        Ok(SimulatedHandle {
            preview_sizes: self.preview_sizes.clone(),
            picture_sizes: self.picture_sizes.clone(),
            preview_size: self.active_preview,
            picture_size: self.active_picture,
            focus_modes: self.focus_modes.clone(),
            frames_on_start: self.frames_on_start,
            frame_interval: self.frame_interval,
            fail_release: self.fail_release,
            fail_parameters: self.fail_parameters,
            start_hook: self.start_hook.clone(),
            script: Arc::clone(&self.script),
            journal: self.journal.clone(),
            worker: None,
        })
    }
}

struct Worker {
    stop: Arc<AtomicBool>,
    join_handle: JoinHandle<()>,
}

pub struct SimulatedHandle {
    preview_sizes: Vec<Size>,
    picture_sizes: Vec<Size>,
    preview_size: Size,
    picture_size: Size,
    focus_modes: Vec<FocusMode>,
    frames_on_start: usize,
    frame_interval: Option<Duration>,
    fail_release: bool,
    fail_parameters: bool,
    start_hook: Option<StartHook>,
    script: Arc<Mutex<Script>>,
    journal: Journal,
    worker: Option<Worker>,
}

impl std::fmt::Debug for SimulatedHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedHandle")
            .field("preview_size", &self.preview_size)
            .field("picture_size", &self.picture_size)
            .field("streaming", &self.worker.is_some())
            .finish()
    }
}

impl SimulatedHandle {
    fn parameter(&self, call: Call) -> Result<(), CameraError> {
        self.journal.record(call);
        if self.fail_parameters {
            return Err(CameraError::Device("parameter rejected".to_string()));
        }
        Ok(())
    }

    fn stop_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop.store(true, Ordering::Relaxed);
            if worker.join_handle.join().is_err() {
                log::error!("simulated frame worker panicked");
            }
        }
    }
}

impl CameraHandle for SimulatedHandle {
    fn supported_preview_sizes(&self) -> Result<Vec<Size>, CameraError> {
        Ok(self.preview_sizes.clone())
    }

    fn supported_picture_sizes(&self) -> Result<Vec<Size>, CameraError> {
        Ok(self.picture_sizes.clone())
    }

    fn preview_size(&self) -> Result<Size, CameraError> {
        Ok(self.preview_size)
    }

    fn picture_size(&self) -> Result<Size, CameraError> {
        Ok(self.picture_size)
    }

    fn set_preview_size(&mut self, size: Size) -> Result<(), CameraError> {
        self.parameter(Call::SetPreviewSize(size))?;
        self.preview_size = size;
        Ok(())
    }

    fn set_picture_size(&mut self, size: Size) -> Result<(), CameraError> {
        self.parameter(Call::SetPictureSize(size))?;
        self.picture_size = size;
        Ok(())
    }

    fn set_display_orientation(&mut self, degrees: u32) -> Result<(), CameraError> {
        self.parameter(Call::SetDisplayOrientation(degrees))
    }

    fn supported_focus_modes(&self) -> Result<Vec<FocusMode>, CameraError> {
        Ok(self.focus_modes.clone())
    }

    fn set_focus_mode(&mut self, mode: FocusMode) -> Result<(), CameraError> {
        self.parameter(Call::SetFocusMode(mode))
    }

    fn set_preview_format(&mut self, format: PixelFormat) -> Result<(), CameraError> {
        self.parameter(Call::SetPreviewFormat(format))
    }

    fn start_preview(&mut self, sink: FrameSink) -> Result<(), CameraError> {
        self.journal.record(Call::StartPreview);
        let (start, fail) = {
            let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
            script.starts += 1;
            let fail = script.start_failures > 0;
            if fail {
                script.start_failures -= 1;
            }
            (script.starts, fail)
        };
        if let Some(hook) = &self.start_hook {
            hook(start);
        }
        if fail {
            return Err(CameraError::Device(
                "simulated preview start failure".to_string(),
            ));
        }

        for index in 0..self.frames_on_start {
            sink.on_frame(test_pattern(self.preview_size, index)?);
        }

        if let Some(interval) = self.frame_interval {
            let stop = Arc::new(AtomicBool::new(false));
            let size = self.preview_size;
            let join_handle = thread::spawn({
                let stop = Arc::clone(&stop);
                let first = self.frames_on_start;
                move || {
                    let mut index = first;
                    while !stop.load(Ordering::Relaxed) && !sink.is_closed() {
                        match test_pattern(size, index) {
                            Ok(frame) => {
                                sink.on_frame(frame);
                            }
                            Err(e) => {
                                log::error!("simulated frame worker: {}", e);
                                return;
                            }
                        }
                        index += 1;
                        thread::sleep(interval);
                    }
                }
            });
            self.worker = Some(Worker { stop, join_handle });
        }
        Ok(())
    }

    fn stop_preview(&mut self) -> Result<(), CameraError> {
        self.journal.record(Call::StopPreview);
        self.stop_worker();
        Ok(())
    }

    fn take_picture(&mut self) -> Result<Vec<u8>, CameraError> {
        self.journal.record(Call::TakePicture);
        let frame = test_pattern(self.picture_size, 0)?;
        Ok(image::nv21_to_jpeg(&frame, 90)?)
    }

    fn release(&mut self) -> Result<(), CameraError> {
        self.journal.record(Call::Release);
        self.stop_worker();
        if self.fail_release {
            return Err(CameraError::Device("simulated release failure".to_string()));
        }
        Ok(())
    }
}
