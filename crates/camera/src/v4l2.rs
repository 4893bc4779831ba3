use {
    crate::*,
    base::Size,
    image::{FrameBuffer, PixelFormat, nv21_len},
    std::{
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
            mpsc,
        },
        thread::{self, JoinHandle},
    },
    v4l::{
        Device, Format, FourCC, buffer::Type, framesize::FrameSizeEnum,
        io::mmap::Stream as MmapStream, io::traits::CaptureStream, video::Capture,
    },
};

const BUFFER_COUNT: u32 = 4;

fn fourcc_for(format: PixelFormat) -> FourCC {
    FourCC::new(&format.as_fourcc().to_le_bytes())
}

/// Cameras exposed as `/dev/videoN` nodes.
///
/// V4L2 does not report which way a camera faces or how its sensor is
/// mounted, so every node is listed with the facing and orientation given
/// here.
#[derive(Clone, Debug)]
pub struct V4l2Backend {
    facing: Facing,
    sensor_orientation: u32,
}

impl V4l2Backend {
    pub fn new(facing: Facing) -> Self {
        Self {
            facing,
            sensor_orientation: 0,
        }
    }

    pub fn with_sensor_orientation(mut self, degrees: u32) -> Self {
        self.sensor_orientation = degrees % 360;
        self
    }
}

impl CameraBackend for V4l2Backend {
    type Handle = V4l2Handle;

    fn cameras(&self) -> Vec<CameraInfo> {
        v4l::context::enum_devices()
            .into_iter()
            .map(|node| CameraInfo {
                id: node.index() as u32,
                facing: self.facing,
                sensor_orientation: self.sensor_orientation,
            })
            .collect()
    }

    fn open(&mut self, id: u32) -> Result<V4l2Handle, CameraError> {
        let device = Device::new(id as usize)
            .map_err(|e| CameraError::DeviceOpenFailed(format!("/dev/video{}: {}", id, e)))?;
        let format = Capture::format(&device)
            .map_err(|e| CameraError::DeviceOpenFailed(format!("/dev/video{}: {}", id, e)))?;
        log::info!(
            "opened /dev/video{} ({}x{} {})",
            id,
            format.width,
            format.height,
            format.fourcc
        );
        Ok(V4l2Handle {
            index: id as usize,
            device,
            picture_size: Size::new(format.width as usize, format.height as usize),
            worker: None,
        })
    }
}

struct Worker {
    stop: Arc<AtomicBool>,
    join_handle: JoinHandle<()>,
}

pub struct V4l2Handle {
    index: usize,
    device: Device,
    picture_size: Size,
    worker: Option<Worker>,
}

impl std::fmt::Debug for V4l2Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Handle")
            .field("index", &self.index)
            .field("device", &"<v4l::Device>")
            .field("picture_size", &self.picture_size)
            .field("streaming", &self.worker.is_some())
            .finish()
    }
}

impl V4l2Handle {
    fn discrete_sizes(&self) -> Result<Vec<Size>, CameraError> {
        let sizes = Capture::enum_framesizes(&self.device, fourcc_for(PixelFormat::Nv21))?;
        Ok(sizes
            .into_iter()
            .filter_map(|framesize| match framesize.size {
                FrameSizeEnum::Discrete(discrete) => Some(Size::new(
                    discrete.width as usize,
                    discrete.height as usize,
                )),
                FrameSizeEnum::Stepwise(_) => None,
            })
            .collect())
    }

    // The stream is created on its own file descriptor so the capture thread
    // does not borrow the handle's device.
    fn capture_loop(
        index: usize,
        size: Size,
        sink: FrameSink,
        stop: Arc<AtomicBool>,
        init: mpsc::Sender<Result<(), CameraError>>,
    ) {
        let stream = Device::new(index).and_then(|device| {
            MmapStream::with_buffers(&device, Type::VideoCapture, BUFFER_COUNT)
        });
        let mut stream = match stream {
            Ok(stream) => {
                let _ = init.send(Ok(()));
                stream
            }
            Err(e) => {
                let _ = init.send(Err(CameraError::Device(e.to_string())));
                return;
            }
        };

        let expected = nv21_len(size);
        log::info!("v4l2 worker: capturing {} NV21 frames", size);
        while !stop.load(Ordering::Relaxed) && !sink.is_closed() {
            match CaptureStream::next(&mut stream) {
                Ok((data, _metadata)) => {
                    if data.len() < expected {
                        log::warn!(
                            "v4l2 worker: short frame ({} of {} bytes)",
                            data.len(),
                            expected
                        );
                        continue;
                    }
                    match FrameBuffer::new(size, data[..expected].to_vec()) {
                        Ok(frame) => {
                            sink.on_frame(frame);
                        }
                        Err(e) => log::warn!("v4l2 worker: {}", e),
                    }
                }
                Err(e) => {
                    log::error!("v4l2 worker: capture failed: {}", e);
                    break;
                }
            }
        }
    }

    fn stop_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop.store(true, Ordering::Relaxed);
            if worker.join_handle.join().is_err() {
                log::error!("v4l2 worker panicked");
            }
        }
    }
}

impl CameraHandle for V4l2Handle {
    fn supported_preview_sizes(&self) -> Result<Vec<Size>, CameraError> {
        self.discrete_sizes()
    }

    // V4L2 has no separate still pipeline; pictures use the streaming sizes.
    fn supported_picture_sizes(&self) -> Result<Vec<Size>, CameraError> {
        self.discrete_sizes()
    }

    fn preview_size(&self) -> Result<Size, CameraError> {
        let format = Capture::format(&self.device)?;
        Ok(Size::new(format.width as usize, format.height as usize))
    }

    fn picture_size(&self) -> Result<Size, CameraError> {
        Ok(self.picture_size)
    }

    fn set_preview_size(&mut self, size: Size) -> Result<(), CameraError> {
        let current = Capture::format(&self.device)?;
        let actual = Capture::set_format(
            &self.device,
            &Format::new(size.width as u32, size.height as u32, current.fourcc),
        )?;
        if actual.width as usize != size.width || actual.height as usize != size.height {
            return Err(CameraError::Device(format!(
                "device chose {}x{} instead of {}",
                actual.width, actual.height, size
            )));
        }
        Ok(())
    }

    fn set_picture_size(&mut self, size: Size) -> Result<(), CameraError> {
        self.picture_size = size;
        Ok(())
    }

    fn set_display_orientation(&mut self, degrees: u32) -> Result<(), CameraError> {
        log::debug!("display orientation {} is applied by the host", degrees);
        Ok(())
    }

    fn supported_focus_modes(&self) -> Result<Vec<FocusMode>, CameraError> {
        Ok(Vec::new())
    }

    fn set_focus_mode(&mut self, mode: FocusMode) -> Result<(), CameraError> {
        Err(CameraError::Device(format!("focus mode {:?} not supported", mode)))
    }

    fn set_preview_format(&mut self, format: PixelFormat) -> Result<(), CameraError> {
        let current = Capture::format(&self.device)?;
        let fourcc = fourcc_for(format);
        let actual = Capture::set_format(
            &self.device,
            &Format::new(current.width, current.height, fourcc),
        )?;
        if actual.fourcc != fourcc {
            return Err(CameraError::Device(format!(
                "{} format not supported by device",
                fourcc
            )));
        }
        Ok(())
    }

    fn start_preview(&mut self, sink: FrameSink) -> Result<(), CameraError> {
        self.stop_worker();
        let format = Capture::format(&self.device)?;
        if format.fourcc != fourcc_for(PixelFormat::Nv21) {
            return Err(CameraError::Device(format!(
                "preview format is {}, not NV21",
                format.fourcc
            )));
        }
        let size = Size::new(format.width as usize, format.height as usize);

        let stop = Arc::new(AtomicBool::new(false));
        let (init_tx, init_rx) = mpsc::channel();
        let index = self.index;
        let join_handle = thread::spawn({
            let stop = Arc::clone(&stop);
            move || Self::capture_loop(index, size, sink, stop, init_tx)
        });

        let init = init_rx
            .recv()
            .map_err(|_| CameraError::Device("capture thread died during init".to_string()));
        match init {
            Ok(Ok(())) => {
                self.worker = Some(Worker { stop, join_handle });
                Ok(())
            }
            Ok(Err(e)) | Err(e) => {
                let _ = join_handle.join();
                Err(e)
            }
        }
    }

    fn stop_preview(&mut self) -> Result<(), CameraError> {
        self.stop_worker();
        Ok(())
    }

    fn take_picture(&mut self) -> Result<Vec<u8>, CameraError> {
        Err(CameraError::Device(
            "still capture not supported by V4L2 devices".to_string(),
        ))
    }

    fn release(&mut self) -> Result<(), CameraError> {
        self.stop_worker();
        Ok(())
    }
}
