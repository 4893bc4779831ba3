//! Camera preview sessions.
//!
//! A `PreviewSession` opens one camera through a `CameraBackend`, picks
//! preview and picture sizes for the screen, starts the preview with a
//! bounded number of retries and streams NV21 frames, rotated upright, to
//! the consumer. Backends for V4L2 devices (feature `v4l2`) and an
//! in-process simulator are included.

mod config;
pub use config::*;

mod device;
pub use device::*;

mod error;
pub use error::*;

mod fit;
pub use fit::*;

mod frames;
pub use frames::*;

mod negotiate;
pub use negotiate::*;

mod orientation;
pub use orientation::*;

mod session;
pub use session::*;

pub mod testing;

#[cfg(feature = "v4l2")]
pub mod v4l2;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Backend;
