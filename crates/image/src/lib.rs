//! NV21 frame buffers and the transforms applied to them between capture and
//! display: quarter-turn rotation, chroma-aligned cropping, RGB conversion and
//! JPEG encoding.
//!
//! Every transform takes a frame by reference and returns a new one; none of
//! them hold state, so they can run on any thread.

mod crop;
pub use crop::*;

mod error;
pub use error::*;

mod frame;
pub use frame::*;

mod jpeg;
pub use jpeg::*;

mod pixelformat;
pub use pixelformat::*;

mod rgb;
pub use rgb::*;

mod rotate;
pub use rotate::*;
