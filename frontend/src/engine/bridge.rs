/// Input capability of the device, read once when the engine is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    FinePointer,
    CoarsePointer,
}

impl Capability {
    pub fn from_media(hover_none: bool, pointer_coarse: bool) -> Self {
        if hover_none || pointer_coarse {
            Self::CoarsePointer
        } else {
            Self::FinePointer
        }
    }

    pub fn is_touch(self) -> bool {
        matches!(self, Self::CoarsePointer)
    }
}

/// How computed values reach the display layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateStrategy {
    /// Stored in component state; the render tree re-evaluates.
    StateTriggered,
    /// Written onto already-rendered nodes' style, bypassing re-render.
    DirectWrite,
}

impl UpdateStrategy {
    pub fn for_high_frequency(capability: Capability, prefer_direct_write: bool) -> Self {
        if capability.is_touch() || prefer_direct_write {
            Self::DirectWrite
        } else {
            Self::StateTriggered
        }
    }
}

/// Which style property a segment value drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentStyle {
    Opacity,
    ScaleX,
}

impl SegmentStyle {
    pub fn property(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::ScaleX => "transform",
        }
    }

    pub fn format(self, value: f64) -> String {
        match self {
            Self::Opacity => format!("{:.3}", value),
            Self::ScaleX => format!("scaleX({:.3})", value),
        }
    }

    /// Inline style for the state-triggered path.
    pub fn inline(self, value: f64) -> String {
        format!("{}: {};", self.property(), self.format(value))
    }
}

/// Destination for direct writes, one slot per segment.
pub trait StyleSink {
    /// Returns false when the node for `index` no longer exists.
    fn write(&self, index: usize, property: &str, value: &str) -> bool;
}

/// Direct-write path: pushes only values that changed since the last write.
#[derive(Debug)]
pub struct SegmentWriter<S> {
    sink: S,
    style: SegmentStyle,
    written: Vec<Option<String>>,
}

impl<S: StyleSink> SegmentWriter<S> {
    pub fn new(sink: S, style: SegmentStyle, len: usize) -> Self {
        Self {
            sink,
            style,
            written: vec![None; len],
        }
    }

    /// Returns how many nodes were touched.
    pub fn apply(&mut self, values: &[f64]) -> usize {
        let mut touched = 0;
        for (index, (value, written)) in values.iter().zip(self.written.iter_mut()).enumerate() {
            let formatted = self.style.format(*value);
            if written.as_deref() == Some(formatted.as_str()) {
                continue;
            }
            // a missing node is an unmount race: skip it and retry next frame
            if self.sink.write(index, self.style.property(), &formatted) {
                *written = Some(formatted);
                touched += 1;
            }
        }
        touched
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        mounted: RefCell<Vec<bool>>,
        writes: RefCell<Vec<(usize, String, String)>>,
    }

    impl StyleSink for &RecordingSink {
        fn write(&self, index: usize, property: &str, value: &str) -> bool {
            if !self.mounted.borrow().get(index).copied().unwrap_or(false) {
                return false;
            }
            self.writes
                .borrow_mut()
                .push((index, property.to_string(), value.to_string()));
            true
        }
    }

    #[test]
    fn touch_devices_always_write_directly() {
        let touch = Capability::from_media(true, false);
        assert_eq!(touch, Capability::CoarsePointer);
        assert_eq!(
            UpdateStrategy::for_high_frequency(touch, false),
            UpdateStrategy::DirectWrite
        );

        let mouse = Capability::from_media(false, false);
        assert_eq!(
            UpdateStrategy::for_high_frequency(mouse, false),
            UpdateStrategy::StateTriggered
        );
        assert_eq!(
            UpdateStrategy::for_high_frequency(mouse, true),
            UpdateStrategy::DirectWrite
        );
    }

    #[test]
    fn writer_skips_unchanged_values() {
        let sink = RecordingSink {
            mounted: RefCell::new(vec![true; 3]),
            ..Default::default()
        };
        let mut writer = SegmentWriter::new(&sink, SegmentStyle::Opacity, 3);

        assert_eq!(writer.apply(&[0.1, 0.1, 0.1]), 3);
        assert_eq!(writer.apply(&[1.0, 0.55, 0.1]), 2);
        assert_eq!(writer.apply(&[1.0, 0.55, 0.1]), 0);

        let writes = sink.writes.borrow();
        assert_eq!(writes.len(), 5);
        assert_eq!(writes[3], (0, "opacity".to_string(), "1.000".to_string()));
        assert_eq!(writes[4], (1, "opacity".to_string(), "0.550".to_string()));
    }

    #[test]
    fn writer_skips_missing_nodes_and_retries_later() {
        let sink = RecordingSink {
            mounted: RefCell::new(vec![true, false]),
            ..Default::default()
        };
        let mut writer = SegmentWriter::new(&sink, SegmentStyle::ScaleX, 2);
        assert_eq!(writer.apply(&[0.5, 0.5]), 1);
        assert_eq!(writer.apply(&[0.5, 0.5]), 0);

        sink.mounted.borrow_mut()[1] = true;
        assert_eq!(writer.apply(&[0.5, 0.5]), 1);
        assert_eq!(
            sink.writes.borrow().last().cloned(),
            Some((1, "transform".to_string(), "scaleX(0.500)".to_string()))
        );
    }

    #[test]
    fn inline_style_matches_direct_write() {
        assert_eq!(SegmentStyle::Opacity.inline(0.25), "opacity: 0.250;");
        assert_eq!(SegmentStyle::ScaleX.inline(1.0), "transform: scaleX(1.000);");
    }
}
