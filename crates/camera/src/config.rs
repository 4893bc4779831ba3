use {
    crate::{DEFAULT_MIN_DIMENSION, Facing, FitStyle, ScreenOrientation, SizeRequest},
    base::Size,
};

/// Configuration for a preview session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    facing: Facing,
    expected_preview: Size,
    expected_picture: Option<Size>,
    viewport: Size,
    screen: ScreenOrientation,
    min_dimension: usize,
    max_start_attempts: u32,
    frame_capacity: usize,
    fit_style: FitStyle,
    phone_degree: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            facing: Facing::Front,
            expected_preview: Size::new(1920, 1080),
            expected_picture: None,
            viewport: Size::new(1080, 1920),
            screen: ScreenOrientation::Portrait,
            min_dimension: DEFAULT_MIN_DIMENSION,
            max_start_attempts: 3,
            frame_capacity: 4,
            fit_style: FitStyle::FillWidthHeight,
            phone_degree: 0,
        }
    }
}

impl SessionConfig {
    /// Set which camera to open.
    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    /// Set the preferred preview size, in screen orientation.
    pub fn with_expected_preview(mut self, size: Size) -> Self {
        self.expected_preview = size;
        self
    }

    /// Set the preferred picture size, in screen orientation.
    pub fn with_expected_picture(mut self, size: Size) -> Self {
        self.expected_picture = Some(size);
        self
    }

    /// Set the on-screen size of the preview view.
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_screen(mut self, screen: ScreenOrientation) -> Self {
        self.screen = screen;
        self
    }

    /// Set the smallest width or height a negotiated size may have.
    pub fn with_min_dimension(mut self, min_dimension: usize) -> Self {
        self.min_dimension = min_dimension;
        self
    }

    /// Set how many times the preview start is attempted before giving up.
    /// Values below 1 are treated as 1.
    pub fn with_max_start_attempts(mut self, attempts: u32) -> Self {
        self.max_start_attempts = attempts.max(1);
        self
    }

    /// Set how many frames may queue before new ones are dropped.
    pub fn with_frame_capacity(mut self, capacity: usize) -> Self {
        self.frame_capacity = capacity.max(1);
        self
    }

    pub fn with_fit_style(mut self, style: FitStyle) -> Self {
        self.fit_style = style;
        self
    }

    /// Set the initial phone orientation (0, 90, 180 or 270).
    pub fn with_phone_degree(mut self, degree: u32) -> Self {
        self.phone_degree = degree % 360;
        self
    }

    // Getters
    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn expected_preview(&self) -> Size {
        self.expected_preview
    }

    pub fn expected_picture(&self) -> Option<Size> {
        self.expected_picture
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn screen(&self) -> ScreenOrientation {
        self.screen
    }

    pub fn min_dimension(&self) -> usize {
        self.min_dimension
    }

    pub fn max_start_attempts(&self) -> u32 {
        self.max_start_attempts
    }

    pub fn frame_capacity(&self) -> usize {
        self.frame_capacity
    }

    pub fn fit_style(&self) -> FitStyle {
        self.fit_style
    }

    pub fn phone_degree(&self) -> u32 {
        self.phone_degree
    }

    /// Negotiation parameters for the preview size.
    pub fn preview_request(&self) -> SizeRequest {
        SizeRequest::new(self.expected_preview, self.viewport, self.screen)
            .with_min_dimension(self.min_dimension)
    }

    /// Negotiation parameters for the picture size. Without an explicit
    /// expected picture size, the negotiated `preview` size (sensor
    /// orientation) is used, turned into screen orientation.
    pub fn picture_request(&self, preview: Size) -> SizeRequest {
        let expected = self.expected_picture.unwrap_or(match self.screen {
            ScreenOrientation::Landscape => preview,
            ScreenOrientation::Portrait => preview.transposed(),
        });
        SizeRequest::new(expected, self.viewport, self.screen)
            .with_min_dimension(self.min_dimension)
    }
}
