use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;

use super::geometry::{Rect, Viewport};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(String);

impl RegionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RegionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Horizontal zone of the viewport, as fractions of its height measured
/// from the top. `top == bottom` makes it a line.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct DetectionBand {
    pub top: f64,
    pub bottom: f64,
}

impl DetectionBand {
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn intersects(&self, rect: Rect, viewport: &Viewport) -> bool {
        if rect.is_degenerate() {
            return false;
        }
        let (top, bottom) = viewport.project(rect);
        let band_top = self.top * viewport.height;
        let band_bottom = self.bottom * viewport.height;
        if band_bottom <= band_top {
            return top <= band_top && bottom > band_top;
        }
        top < band_bottom && bottom > band_top
    }
}

impl Default for DetectionBand {
    /// A 10% band around the middle of the viewport.
    fn default() -> Self {
        Self::new(0.45, 0.55)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibilityDelta {
    pub entered: Vec<RegionId>,
    pub left: Vec<RegionId>,
}

impl VisibilityDelta {
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.left.is_empty()
    }
}

/// Active set rebuilt on the consumer side from the delta stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActiveSet(BTreeSet<RegionId>);

impl ActiveSet {
    /// Leaves are applied before entries, so a region that left and came
    /// back within one delta stays active.
    pub fn apply(&mut self, delta: &VisibilityDelta) {
        for id in &delta.left {
            self.0.remove(id);
        }
        for id in &delta.entered {
            self.0.insert(id.clone());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|region| region.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Region {
    id: RegionId,
    active: bool,
}

/// Tracks which regions overlap the detection band.
///
/// Membership only moves on enter/leave transitions; callers get the delta,
/// never the full set.
#[derive(Debug)]
pub struct VisibilityTracker {
    band: DetectionBand,
    regions: BTreeMap<RegionId, Region>,
}

impl VisibilityTracker {
    pub fn new(band: DetectionBand) -> Self {
        Self {
            band,
            regions: BTreeMap::new(),
        }
    }

    /// Returns false if the id is already taken.
    pub fn register(&mut self, id: RegionId) -> bool {
        if self.regions.contains_key(&id) {
            return false;
        }
        self.regions.insert(
            id.clone(),
            Region { id, active: false },
        );
        true
    }

    /// Removes the region; an active region reports that it left.
    pub fn unregister(&mut self, id: &RegionId) -> VisibilityDelta {
        let mut delta = VisibilityDelta::default();
        if let Some(region) = self.regions.remove(id) {
            if region.active {
                delta.left.push(region.id);
            }
        }
        delta
    }

    /// Feeds a fresh geometry sample for one region.
    ///
    /// `None` means the node is gone (unmount race) and the sample is
    /// skipped. Unknown ids are ignored.
    pub fn observe(
        &mut self,
        id: &RegionId,
        rect: Option<Rect>,
        viewport: &Viewport,
        delta: &mut VisibilityDelta,
    ) {
        let Some(rect) = rect else {
            return;
        };
        let Some(region) = self.regions.get_mut(id) else {
            return;
        };
        let active = self.band.intersects(rect, viewport);
        if active == region.active {
            return;
        }
        region.active = active;
        if active {
            delta.entered.push(region.id.clone());
        } else {
            delta.left.push(region.id.clone());
        }
    }

    #[cfg(test)]
    pub fn is_active(&self, id: &RegionId) -> bool {
        self.regions.get(id).map_or(false, |region| region.active)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.regions.len()
    }
}
