use {crate::ScreenOrientation, base::Size};

/// How the preview view is stretched to keep the camera aspect ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FitStyle {
    /// Keep the measured view size.
    None,
    /// Keep the width, derive the height.
    FillWidth,
    /// Keep the height, derive the width.
    FillHeight,
    /// Grow whichever axis is needed so the view is fully covered.
    #[default]
    FillWidthHeight,
}

/// Size the preview view should take so the camera image fills it without
/// distortion.
///
/// `view` is the measured size of the host view and `preview` the negotiated
/// preview size in sensor orientation. A zero preview leaves `view` as is.
pub fn fit_viewport(
    style: FitStyle,
    view: Size,
    preview: Size,
    screen: ScreenOrientation,
) -> Size {
    if style == FitStyle::None || preview.is_zero() {
        return view;
    }
    let ratio = if screen.is_landscape() {
        preview
    } else {
        preview.transposed()
    };
    let width_for_height =
        (view.height as f32 / ratio.height as f32 * ratio.width as f32) as usize;
    let height_for_width =
        (view.width as f32 / ratio.width as f32 * ratio.height as f32) as usize;

    match style {
        FitStyle::None => view,
        FitStyle::FillWidth => Size::new(view.width, height_for_width),
        FitStyle::FillHeight => Size::new(width_for_height, view.height),
        FitStyle::FillWidthHeight => {
            if view.width < width_for_height {
                Size::new(width_for_height, view.height)
            } else if view.height < height_for_width {
                Size::new(view.width, height_for_width)
            } else {
                view
            }
        }
    }
}
