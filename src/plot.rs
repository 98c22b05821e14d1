//! Geometry of the sample chart: data bounds, axis ticks, and mapping into window pixels.
//!
//! Window coordinates have their origin at the top left corner, matching the UI layer; GL viewport
//! coordinates have their origin at the bottom left corner.

/// Fraction of each data range added on both sides so that the trace does not touch the frame.
const PADDING: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub lo: f32,
    pub hi: f32,
}

impl Range {
    pub fn new(lo: f32, hi: f32) -> Range {
        Range { lo, hi }
    }

    pub fn span(&self) -> f32 {
        self.hi - self.lo
    }

    fn padded(self) -> Range {
        let pad = self.span() * PADDING;
        Range { lo: self.lo - pad, hi: self.hi + pad }
    }

    /// Position of `value` within the range, `0.0` at `lo` and `1.0` at `hi`.
    pub fn normalize(&self, value: f32) -> f32 {
        (value - self.lo) / self.span()
    }
}

/// Data ranges shown on the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Sample index.
    pub x: Range,
    /// Sample value.
    pub y: Range,
}

impl Bounds {
    /// Compute bounds enclosing every sample of `samples`.
    ///
    /// Degenerate ranges (no samples, a single sample, or a flat trace) are widened so that
    /// the chart always has a non-zero extent on both axes.
    pub fn of(samples: &[u16]) -> Bounds {
        let x_hi = samples.len().saturating_sub(1).max(1) as f32;
        let (y_lo, y_hi) = match (samples.iter().min(), samples.iter().max()) {
            (Some(&lo), Some(&hi)) if lo < hi => (lo as f32, hi as f32),
            (Some(&value), _) => (value as f32 - 1.0, value as f32 + 1.0),
            (None, _) => (0.0, 1.0),
        };
        Bounds {
            x: Range::new(0.0, x_hi).padded(),
            y: Range::new(y_lo, y_hi).padded(),
        }
    }
}

/// Choose tick positions for `range` with steps of 1, 2, or 5 times a power of ten, such that
/// there are approximately `target` ticks. Only ticks inside the range are returned.
pub fn ticks(range: Range, target: usize) -> Vec<f32> {
    if !(range.span() > 0.0) || target == 0 {
        return Vec::new()
    }
    let rough_step = range.span() / target as f32;
    let magnitude = 10f32.powi(rough_step.log10().floor() as i32);
    let step = [1.0, 2.0, 5.0, 10.0].into_iter()
        .map(|factor| factor * magnitude)
        .find(|&step| step >= rough_step)
        .unwrap_or(10.0 * magnitude);
    let first = (range.lo / step).ceil() as i64;
    let last = (range.hi / step).floor() as i64;
    (first..=last).map(|index| index as f32 * step).collect()
}

/// Format a tick value without a fractional part when it is integral.
pub fn tick_label(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Placement of the plot area within a window of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl Layout {
    /// Lay out a window of `width`x`height` pixels, with margins sized for text that is
    /// `font_size` pixels tall.
    pub fn new(width: f32, height: f32, font_size: f32) -> Layout {
        Layout {
            width,
            height,
            margin_left: font_size * 5.0,
            margin_right: font_size * 1.5,
            margin_top: font_size * 2.0,
            margin_bottom: font_size * 3.5,
        }
    }

    pub fn plot_left(&self) -> f32 {
        self.margin_left
    }

    pub fn plot_right(&self) -> f32 {
        (self.width - self.margin_right).max(self.plot_left())
    }

    pub fn plot_top(&self) -> f32 {
        self.margin_top
    }

    pub fn plot_bottom(&self) -> f32 {
        (self.height - self.margin_bottom).max(self.plot_top())
    }

    /// Map a point in data coordinates to window coordinates.
    pub fn to_window(&self, bounds: &Bounds, x: f32, y: f32) -> [f32; 2] {
        [
            self.plot_left() + bounds.x.normalize(x) * (self.plot_right() - self.plot_left()),
            self.plot_bottom() - bounds.y.normalize(y) * (self.plot_bottom() - self.plot_top()),
        ]
    }

    /// GL viewport covering the plot area.
    pub fn viewport(&self) -> Viewport {
        Viewport {
            x: self.plot_left().round() as i32,
            y: (self.height - self.plot_bottom()).round() as i32,
            width: (self.plot_right() - self.plot_left()).round() as i32,
            height: (self.plot_bottom() - self.plot_top()).round() as i32,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_range_eq(actual: Range, lo: f32, hi: f32) {
        assert!((actual.lo - lo).abs() < 1e-3 && (actual.hi - hi).abs() < 1e-3,
            "{:?} != {}..{}", actual, lo, hi);
    }

    #[test]
    fn test_bounds_ramp() {
        let bounds = Bounds::of(&[1, 2, 3, 4, 5]);
        assert_range_eq(bounds.x, -0.2, 4.2);
        assert_range_eq(bounds.y, 0.8, 5.2);
    }

    #[test]
    fn test_bounds_flat() {
        let bounds = Bounds::of(&[2048; 16]);
        assert_range_eq(bounds.y, 2046.9, 2049.1);
        assert!((bounds.y.normalize(2048.0) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_bounds_single() {
        let bounds = Bounds::of(&[7]);
        assert_range_eq(bounds.x, -0.05, 1.05);
        assert_range_eq(bounds.y, 5.9, 8.1);
    }

    #[test]
    fn test_bounds_empty() {
        let bounds = Bounds::of(&[]);
        assert!(bounds.x.span() > 0.0);
        assert!(bounds.y.span() > 0.0);
    }

    #[test]
    fn test_ticks() {
        assert_eq!(ticks(Range::new(0.0, 10.0), 5), [0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(ticks(Range::new(-204.75, 4299.75), 10), [
            0.0, 500.0, 1000.0, 1500.0, 2000.0, 2500.0, 3000.0, 3500.0, 4000.0
        ]);
        assert_eq!(ticks(Range::new(3.0, 3.0), 5), [] as [f32; 0]);
        assert_eq!(ticks(Range::new(0.0, 1.0), 0), [] as [f32; 0]);
    }

    #[test]
    fn test_tick_label() {
        assert_eq!(tick_label(4000.0), "4000");
        assert_eq!(tick_label(-2.0), "-2");
        assert_eq!(tick_label(0.5), "0.5");
    }

    #[test]
    fn test_layout_mapping() {
        let layout = Layout::new(800.0, 600.0, 20.0);
        let bounds = Bounds {
            x: Range::new(0.0, 10.0),
            y: Range::new(0.0, 100.0),
        };
        assert_eq!(layout.to_window(&bounds, 0.0, 0.0), [100.0, 530.0]);
        assert_eq!(layout.to_window(&bounds, 10.0, 100.0), [770.0, 40.0]);
        assert_eq!(layout.viewport(), Viewport { x: 100, y: 70, width: 670, height: 490 });
    }

    #[test]
    fn test_layout_tiny_window() {
        let layout = Layout::new(10.0, 10.0, 20.0);
        let viewport = layout.viewport();
        assert_eq!(viewport.width, 0);
        assert_eq!(viewport.height, 0);
    }
}
