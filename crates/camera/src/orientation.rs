use image::Rotation;

/// Orientation the host UI is laid out in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScreenOrientation {
    Landscape,
    Portrait,
}

impl ScreenOrientation {
    pub fn is_landscape(&self) -> bool {
        matches!(self, ScreenOrientation::Landscape)
    }
}

/// Which way a camera faces relative to the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    Front,
    Back,
}

/// Bucket a raw orientation sensor reading (degrees, clockwise) into the
/// nearest quarter turn.
///
/// Readings in `[0, 45]` and `(315, 360]` map to 0, `(45, 135]` to 90,
/// `(135, 225]` to 180 and `(225, 315]` to 270. Negative readings mean the
/// device is lying flat and yield `None`.
pub fn phone_degree(reading: i32) -> Option<u32> {
    match reading {
        0..=45 => Some(0),
        46..=135 => Some(90),
        136..=225 => Some(180),
        226..=315 => Some(270),
        316..=360 => Some(0),
        _ => None,
    }
}

/// Clockwise rotation the preview must be displayed with.
///
/// Landscape screens show the sensor image unrotated. In portrait a front
/// camera is mirrored, so its correction runs the opposite way round.
pub fn display_orientation(
    screen: ScreenOrientation,
    facing: Facing,
    sensor_orientation: u32,
) -> u32 {
    let sensor = sensor_orientation % 360;
    match (screen, facing) {
        (ScreenOrientation::Landscape, _) => 0,
        (ScreenOrientation::Portrait, Facing::Front) => (360 - sensor) % 360,
        (ScreenOrientation::Portrait, Facing::Back) => sensor,
    }
}

/// Clockwise rotation that brings a captured frame upright.
pub fn frame_rotation_degrees(phone_degree: u32, sensor_orientation: u32) -> u32 {
    (phone_degree + sensor_orientation) % 360
}

/// Follows orientation sensor readings and reports quarter-turn changes.
#[derive(Clone, Debug)]
pub struct OrientationTracker {
    sensor_orientation: u32,
    phone_degree: u32,
}

impl OrientationTracker {
    pub fn new(sensor_orientation: u32) -> Self {
        Self {
            sensor_orientation: sensor_orientation % 360,
            phone_degree: 0,
        }
    }

    pub fn phone_degree(&self) -> u32 {
        self.phone_degree
    }

    pub fn sensor_orientation(&self) -> u32 {
        self.sensor_orientation
    }

    /// Feed a raw sensor reading. Returns the new phone degree when the
    /// bucketed value changed, `None` otherwise.
    pub fn update(&mut self, reading: i32) -> Option<u32> {
        let degree = phone_degree(reading)?;
        if degree == self.phone_degree {
            return None;
        }
        log::debug!("phone orientation {} -> {}", self.phone_degree, degree);
        self.phone_degree = degree;
        Some(degree)
    }

    /// True when the phone is held sideways relative to its natural orientation.
    pub fn is_rotated(&self) -> bool {
        self.phone_degree % 180 != 0
    }

    /// Rotation to apply to frames, `None` when they are already upright.
    pub fn frame_rotation(&self) -> Option<Rotation> {
        let degrees = frame_rotation_degrees(self.phone_degree, self.sensor_orientation);
        match Rotation::from_degrees(degrees) {
            Ok(rotation) => rotation,
            Err(e) => {
                log::warn!("ignoring frame rotation: {}", e);
                None
            }
        }
    }
}
