use {
    crate::{CameraError, ScreenOrientation},
    base::Size,
};

/// Sizes with either side below this are never selected.
pub const DEFAULT_MIN_DIMENSION: usize = 480;

/// Parameters of a size negotiation.
///
/// `expected` and `viewport` are given in screen orientation, candidates in
/// sensor orientation (landscape).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeRequest {
    pub expected: Size,
    pub viewport: Size,
    pub screen: ScreenOrientation,
    pub min_dimension: usize,
}

impl SizeRequest {
    pub fn new(expected: Size, viewport: Size, screen: ScreenOrientation) -> Self {
        Self {
            expected,
            viewport,
            screen,
            min_dimension: DEFAULT_MIN_DIMENSION,
        }
    }

    pub fn with_min_dimension(mut self, min_dimension: usize) -> Self {
        self.min_dimension = min_dimension;
        self
    }

    // aspect ratio to aim for; an unmeasured viewport falls back to the expected size
    fn target_ratio(&self) -> f32 {
        if self.viewport.is_zero() {
            self.expected.aspect_ratio()
        } else {
            self.viewport.aspect_ratio()
        }
    }

    // candidate as seen on screen
    fn oriented(&self, candidate: Size) -> Size {
        match self.screen {
            ScreenOrientation::Landscape => candidate,
            ScreenOrientation::Portrait => candidate.transposed(),
        }
    }
}

/// Pick the candidate that best matches `request`.
///
/// Zero-sized candidates and those with a side below `min_dimension` are
/// skipped. A candidate that equals the expected size (after orientation)
/// wins immediately. Otherwise
/// the candidate whose aspect ratio is closest to the viewport's wins; on a
/// tie the larger `width + height` is kept. Among fully equal candidates the
/// first one listed wins, so the result depends only on the input order.
pub fn select_size(candidates: &[Size], request: &SizeRequest) -> Option<Size> {
    let target = request.target_ratio();
    let mut best: Option<(Size, f32)> = None;

    for &candidate in candidates {
        if candidate.is_zero()
            || candidate.width < request.min_dimension
            || candidate.height < request.min_dimension
        {
            continue;
        }
        let oriented = request.oriented(candidate);
        if oriented == request.expected {
            return Some(candidate);
        }

        let difference = (target - oriented.aspect_ratio()).abs();
        let better = match best {
            None => true,
            Some((current, current_difference)) => {
                difference < current_difference
                    || (difference == current_difference && candidate.sum() > current.sum())
            }
        };
        if better {
            best = Some((candidate, difference));
        }
    }

    best.map(|(size, _)| size)
}

/// Negotiate a size, falling back to the currently `active` size when no
/// candidate qualifies.
pub fn negotiate(
    candidates: &[Size],
    request: &SizeRequest,
    active: Option<Size>,
) -> Result<Size, CameraError> {
    for candidate in candidates {
        log::debug!("supported size {}", candidate);
    }
    match select_size(candidates, request).or(active) {
        Some(size) => {
            log::debug!(
                "negotiated {} for expected {} ({:?})",
                size,
                request.expected,
                request.screen
            );
            Ok(size)
        }
        None => Err(CameraError::NoCandidateSize),
    }
}
