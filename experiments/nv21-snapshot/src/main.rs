use {
    anyhow::{Context, Result, anyhow},
    base::{Rect, Size, log},
    camera::{CameraBackend, PreviewSession, SessionConfig, fit_viewport},
    futures_util::StreamExt,
    image::{encode_jpeg, rotate_and_crop},
    std::time::Duration,
};

const DEFAULT_OUTPUT: &str = "snapshot.jpg";
const FRAMES_TO_SKIP: usize = 10;
const JPEG_QUALITY: u8 = 90;
const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

// middle half of the on-screen preview
fn centre_crop(preview: Rect) -> Rect {
    Rect::new(
        preview.left + preview.width / 4,
        preview.top + preview.height / 4,
        preview.width / 2,
        preview.height / 2,
    )
}

async fn snapshot<B: CameraBackend>(backend: B, config: SessionConfig) -> Result<Vec<u8>> {
    let mut session = PreviewSession::new(backend, config);
    session.open()?;
    let preview_size = session
        .preview_size()
        .ok_or_else(|| anyhow!("camera reported no preview size"))?;
    log::info!(
        "previewing {} on camera {:?}, frame rotation {:?}",
        preview_size,
        session.camera(),
        session.frame_rotation()
    );

    let mut frames = session
        .take_frames()
        .ok_or_else(|| anyhow!("preview frames already taken"))?;
    let mut frame = None;
    for _ in 0..FRAMES_TO_SKIP {
        match tokio::time::timeout(FRAME_TIMEOUT, frames.next()).await {
            Ok(Some(next)) => frame = Some(next),
            Ok(None) => break,
            Err(_) => return Err(anyhow!("no frame within {:?}", FRAME_TIMEOUT)),
        }
    }
    session.close();
    let frame = frame.ok_or_else(|| anyhow!("preview ended before any frame arrived"))?;

    // lay the preview out the way a host view would, then crop its middle
    let config = session.config();
    let shown = fit_viewport(
        config.fit_style(),
        config.viewport(),
        preview_size,
        config.screen(),
    );
    let preview = Rect::from_size(shown);
    let region = centre_crop(preview);
    log::info!("preview shown at {}, cropping {}", shown, region);

    // frames already arrive upright, so no further rotation here
    let cropped = rotate_and_crop(&frame, None, preview, region)?;
    Ok(encode_jpeg(cropped, JPEG_QUALITY).await?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // usage: nv21-snapshot [output.jpg] [log-dir]
    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    match args.next() {
        Some(dir) => base::init_file_logger(dir)?,
        None => base::init_stdout_logger(),
    }
    let config = SessionConfig::default().with_viewport(Size::new(1080, 1920));

    #[cfg(feature = "v4l2")]
    let jpeg = snapshot(
        camera::V4l2Backend::new(config.facing()),
        config.with_min_dimension(240),
    )
    .await?;

    #[cfg(not(feature = "v4l2"))]
    let jpeg = snapshot(
        camera::testing::SimulatedBackend::default().with_frame_interval(Duration::from_millis(33)),
        config,
    )
    .await?;

    std::fs::write(&output, &jpeg).with_context(|| format!("writing {}", output))?;
    log::info!("wrote {} bytes to {}", jpeg.len(), output);
    Ok(())
}
