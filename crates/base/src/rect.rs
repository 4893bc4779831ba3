use {crate::Size, std::fmt};

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
}

fn round_down_even(value: usize) -> usize {
    value & !1
}

impl Rect {
    pub const fn new(left: usize, top: usize, width: usize, height: usize) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The rectangle covering a whole `size`, anchored at the origin.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> usize {
        self.left + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> usize {
        self.top + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Origin and extent each rounded down to the nearest even value, so the
    /// rectangle lands on the 2x2 chroma grid.
    pub fn aligned_even(&self) -> Self {
        Self::new(
            round_down_even(self.left),
            round_down_even(self.top),
            round_down_even(self.width),
            round_down_even(self.height),
        )
    }

    /// True when the rectangle lies entirely inside `0..size.width` x `0..size.height`.
    /// Edges past `usize::MAX` never fit.
    pub fn fits_within(&self, size: Size) -> bool {
        self.left
            .checked_add(self.width)
            .is_some_and(|right| right <= size.width)
            && self
                .top
                .checked_add(self.height)
                .is_some_and(|bottom| bottom <= size.height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.left, self.top, self.width, self.height
        )
    }
}
