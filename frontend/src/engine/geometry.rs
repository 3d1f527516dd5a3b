/// Vertical extent of an element in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Builds a document rect from a client (viewport-relative) rect.
    pub fn from_client(top: f64, bottom: f64, scroll_y: f64) -> Self {
        Self {
            top: top + scroll_y,
            bottom: bottom + scroll_y,
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Zero-size (or NaN) rects come from nodes that are not laid out yet.
    pub fn is_degenerate(&self) -> bool {
        !(self.height() > 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, width: f64, height: f64) -> Self {
        Self {
            scroll_y,
            width,
            height,
        }
    }

    /// Top and bottom of `rect` relative to the top of the viewport.
    pub fn project(&self, rect: Rect) -> (f64, f64) {
        (rect.top - self.scroll_y, rect.bottom - self.scroll_y)
    }
}

/// A point on the target meeting a point on the viewport, both as fractions
/// of their heights. `Intersection::new(0.0, 0.9)` reads "start 0.9": the
/// target's top edge sits 90% of the way down the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub target: f64,
    pub viewport: f64,
}

impl Intersection {
    pub const fn new(target: f64, viewport: f64) -> Self {
        Self { target, viewport }
    }

    /// Scroll offset at which the two points line up.
    fn scroll_offset(&self, rect: Rect, viewport_height: f64) -> f64 {
        rect.top + self.target * rect.height() - self.viewport * viewport_height
    }
}

/// The scroll span over which a target's progress runs from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollOffsets {
    pub start: Intersection,
    pub end: Intersection,
}

impl ScrollOffsets {
    /// From the target's top touching the viewport bottom until its bottom
    /// leaves through the viewport top.
    #[cfg(test)]
    pub const ENTER_EXIT: Self = Self::new(Intersection::new(0.0, 1.0), Intersection::new(1.0, 0.0));
    /// 0 until the viewport top has scrolled strictly past the target's top
    /// edge, then 1. Used for pixel thresholds.
    pub const PAST_TOP: Self = Self::new(Intersection::new(0.0, 0.0), Intersection::new(0.0, 0.0));
    /// Top edges meet, then bottom edges meet: the pass of a sticky block.
    pub const PINNED: Self = Self::new(Intersection::new(0.0, 0.0), Intersection::new(1.0, 1.0));
    /// Headings: top edge travels from 90% to 25% of the viewport.
    pub const HEADING_REVEAL: Self =
        Self::new(Intersection::new(0.0, 0.9), Intersection::new(0.0, 0.25));
    /// Lists: from the top at 85% until the bottom reaches 40%.
    pub const LIST_STRIKE: Self =
        Self::new(Intersection::new(0.0, 0.85), Intersection::new(1.0, 0.4));

    pub const fn new(start: Intersection, end: Intersection) -> Self {
        Self { start, end }
    }

    /// Normalized progress of `viewport` through `rect`, clamped to [0, 1].
    ///
    /// Returns `None` for degenerate rects so callers keep the previous value
    /// instead of snapping to either end. A zero-length span is a step that
    /// flips once the scroll offset is strictly past it.
    pub fn progress(&self, rect: Rect, viewport: &Viewport) -> Option<f64> {
        if rect.is_degenerate() {
            return None;
        }
        let from = self.start.scroll_offset(rect, viewport.height);
        let to = self.end.scroll_offset(rect, viewport.height);
        let span = to - from;
        if span.abs() < f64::EPSILON {
            return Some(if viewport.scroll_y > to { 1.0 } else { 0.0 });
        }
        Some(((viewport.scroll_y - from) / span).clamp(0.0, 1.0))
    }
}

impl Default for ScrollOffsets {
    fn default() -> Self {
        Self::PINNED
    }
}
