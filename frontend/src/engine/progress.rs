use serde::Deserialize;

/// Sub-range of the progress domain owned by one word or list item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Local reveal in [0, 1] for overall progress `p`.
    pub fn value_at(&self, p: f64) -> f64 {
        if p <= self.start {
            return 0.0;
        }
        if p >= self.end {
            return 1.0;
        }
        ((p - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }
}

/// `n` back-to-back segments of width `1/n` covering the whole domain.
pub fn contiguous(n: usize) -> Vec<Segment> {
    let width = 1.0 / n.max(1) as f64;
    (0..n)
        .map(|i| {
            let start = i as f64 * width;
            Segment::new(start, start + width)
        })
        .collect()
}

/// Segments starting every `step`, each `width` long. A width larger than
/// the step gives the deliberate overlap used by list animations.
pub fn staggered(n: usize, step: f64, width: f64) -> Vec<Segment> {
    (0..n)
        .map(|i| {
            let start = (i as f64 * step).min(1.0);
            Segment::new(start, (start + width).min(1.0))
        })
        .collect()
}

pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Affine map from a local reveal value to the display range.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct OutputRange {
    pub from: f64,
    pub to: f64,
}

impl OutputRange {
    /// Unrevealed words stay faintly readable.
    pub const DIMMED_OPACITY: Self = Self::new(0.1, 1.0);
    pub const UNIT: Self = Self::new(0.0, 1.0);

    pub const fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    pub fn map(&self, value: f64) -> f64 {
        self.from + (self.to - self.from) * value
    }
}

/// Computes every segment's display value from one progress read.
#[derive(Debug)]
pub struct ProgressMapper {
    segments: Vec<Segment>,
    output: OutputRange,
    values: Vec<f64>,
}

impl ProgressMapper {
    pub fn new(segments: Vec<Segment>, output: OutputRange) -> Self {
        let values = vec![output.map(0.0); segments.len()];
        Self {
            segments,
            output,
            values,
        }
    }

    pub fn update(&mut self, progress: f64) -> &[f64] {
        let p = progress.clamp(0.0, 1.0);
        for (value, segment) in self.values.iter_mut().zip(&self.segments) {
            *value = self.output.map(segment.value_at(p));
        }
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn staggered_list_at_a_quarter_of_the_way() {
        let mut mapper = ProgressMapper::new(staggered(4, 0.18, 0.22), OutputRange::UNIT);
        let values = mapper.update(0.27);

        assert_eq!(values[0], 1.0);
        assert!(values[1] > 0.0 && values[1] < 1.0);
        assert!(close(values[1], 0.09 / 0.22));
        assert_eq!(values[2], 0.0);
        assert_eq!(values[3], 0.0);
    }

    #[test]
    fn values_never_decrease_as_progress_grows() {
        let layouts = [contiguous(7), staggered(4, 0.18, 0.22), staggered(5, 0.2, 0.2)];
        for segments in layouts {
            let mut mapper = ProgressMapper::new(segments, OutputRange::DIMMED_OPACITY);
            let mut previous = mapper.update(0.0).to_vec();
            for step in 0..=1000 {
                let current = mapper.update(step as f64 / 1000.0).to_vec();
                for (before, after) in previous.iter().zip(&current) {
                    assert!(after >= before);
                }
                previous = current;
            }
        }
    }

    #[test]
    fn values_pin_to_the_range_ends_outside_each_segment() {
        let segments = contiguous(5);
        let mut mapper = ProgressMapper::new(segments.clone(), OutputRange::DIMMED_OPACITY);

        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(mapper.update(segment.start)[i], 0.1);
            assert_eq!(mapper.update(segment.start - 0.05)[i], 0.1);
            assert_eq!(mapper.update(segment.end)[i], 1.0);
            assert_eq!(mapper.update(segment.end + 0.05)[i], 1.0);
        }
    }

    #[test]
    fn contiguous_segments_tile_the_domain() {
        let segments = contiguous(6);
        assert_eq!(segments.first().map(|s| s.start), Some(0.0));
        assert!(close(segments.last().map_or(0.0, |s| s.end), 1.0));
        for pair in segments.windows(2) {
            assert!(close(pair[0].end, pair[1].start));
        }
    }

    #[test]
    fn out_of_domain_progress_is_clamped() {
        let mut mapper = ProgressMapper::new(contiguous(2), OutputRange::UNIT);
        assert_eq!(mapper.update(-3.0), &[0.0, 0.0]);
        assert_eq!(mapper.update(7.0), &[1.0, 1.0]);
    }

    #[test]
    fn zero_width_segment_is_a_step() {
        let segment = Segment::new(0.5, 0.5);
        assert_eq!(segment.value_at(0.49), 0.0);
        assert_eq!(segment.value_at(0.5), 0.0);
        assert_eq!(segment.value_at(0.51), 1.0);
    }

    #[test]
    fn words_ignore_repeated_whitespace() {
        assert_eq!(
            split_words("  we replace  manual work "),
            vec!["we", "replace", "manual", "work"]
        );
        assert!(split_words("   ").is_empty());
    }

    #[test]
    fn zero_progress_leaves_every_word_dimmed() {
        let mut mapper = ProgressMapper::new(contiguous(3), OutputRange::DIMMED_OPACITY);
        assert_eq!(mapper.update(0.0), &[0.1, 0.1, 0.1]);
    }
}
