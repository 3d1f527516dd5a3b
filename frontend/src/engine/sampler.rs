use super::geometry::{Rect, ScrollOffsets, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleDecision {
    /// Request one animation frame for this event.
    Schedule,
    /// Too soon after the previous sample.
    Discard,
    /// A frame is already on its way and will pick this event up.
    Pending,
}

/// Gate between raw scroll/resize events and computation passes.
///
/// Never computes anything itself: it only decides whether an event earns a
/// frame. At most one frame is outstanding at a time.
#[derive(Debug)]
pub struct FrameThrottle {
    min_interval_ms: f64,
    last_sample: Option<f64>,
    frame_pending: bool,
}

impl FrameThrottle {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            min_interval_ms,
            last_sample: None,
            frame_pending: false,
        }
    }

    pub fn on_raw_event(&mut self, now: f64) -> SampleDecision {
        if let Some(last) = self.last_sample {
            if now - last < self.min_interval_ms {
                return SampleDecision::Discard;
            }
        }
        self.last_sample = Some(now);
        if self.frame_pending {
            return SampleDecision::Pending;
        }
        self.frame_pending = true;
        SampleDecision::Schedule
    }

    /// Forces a frame regardless of the interval, e.g. right after attach.
    pub fn request(&mut self) -> SampleDecision {
        if self.frame_pending {
            return SampleDecision::Pending;
        }
        self.frame_pending = true;
        SampleDecision::Schedule
    }

    pub fn frame_ran(&mut self) {
        self.frame_pending = false;
    }

    pub fn cancel(&mut self) {
        self.frame_pending = false;
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.frame_pending
    }
}

/// Progress bookkeeping for one tracked target.
#[derive(Debug)]
pub struct ProgressTrack {
    offsets: ScrollOffsets,
    last: Option<f64>,
}

impl ProgressTrack {
    pub fn new(offsets: ScrollOffsets) -> Self {
        Self {
            offsets,
            last: None,
        }
    }

    /// Recomputes progress and returns it only if the rounded value moved.
    ///
    /// A missing or degenerate rect leaves the previous value in place.
    pub fn sample(&mut self, rect: Option<Rect>, viewport: &Viewport, precision: u32) -> Option<f64> {
        let progress = self.offsets.progress(rect?, viewport)?;
        let rounded = round_to(progress, precision);
        if self.last == Some(rounded) {
            return None;
        }
        self.last = Some(rounded);
        Some(rounded)
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<f64> {
        self.last
    }
}

pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}
