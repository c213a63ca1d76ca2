#![forbid(unsafe_code)]

//! Page geometry.

/// An axis-aligned rectangle in CSS pixels, in page coordinates
/// (origin at the top-left of the document).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle. Negative extents are clamped to zero.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Check if the rectangle covers no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// The same rectangle moved vertically by `dy`.
    #[inline]
    pub fn offset_y(&self, dy: f64) -> Self {
        Self { y: self.y + dy, ..*self }
    }

    /// Overlap of two rectangles, or an empty default if they are disjoint.
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// Overlap of two rectangles, `None` if they do not overlap.
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Fraction of this rectangle's area that lies inside `viewport`.
    ///
    /// Always in `[0.0, 1.0]`. An element with no area reports `0.0`, and an
    /// element entirely inside the viewport reports exactly `1.0`.
    pub fn visible_fraction(&self, viewport: &Rect) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let fx = axis_fraction(self.x, self.width, viewport.x, viewport.right());
        let fy = axis_fraction(self.y, self.height, viewport.y, viewport.bottom());
        fx * fy
    }
}

/// Share of the span `[start, start + len)` covered by `[lo, hi)`. A span
/// lying inside `[lo, hi)` is exactly `1.0`.
fn axis_fraction(start: f64, len: f64, lo: f64, hi: f64) -> f64 {
    let end = start + len;
    if lo <= start && end <= hi {
        return 1.0;
    }
    let covered = end.min(hi) - start.max(lo);
    if covered <= 0.0 {
        return 0.0;
    }
    (covered / len).clamp(0.0, 1.0)
}
