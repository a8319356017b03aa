use crate::sentinel::Sentinel;

/// A rectangle derived from a descriptor's bounds object.
///
/// Either all six fields are real measurements or all six are `-1.0`:
/// [`DescriptorNav::get_bounds`](crate::DescriptorNav::get_bounds) never
/// produces a partially filled value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Right edge
    pub right: f64,
    /// Bottom edge
    pub bottom: f64,
    /// `right - left`
    pub width: f64,
    /// `bottom - top`
    pub height: f64,
}

impl Bounds {
    /// The all-sentinel bounds.
    pub const SENTINEL: Bounds = Bounds {
        left: -1.0,
        top: -1.0,
        right: -1.0,
        bottom: -1.0,
        width: -1.0,
        height: -1.0,
    };

    /// Bounds from four edges, with width and height derived.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Whether these bounds hold real measurements.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.is_sentinel()
    }

    fn fields(&self) -> [f64; 6] {
        [
            self.left,
            self.top,
            self.right,
            self.bottom,
            self.width,
            self.height,
        ]
    }
}

impl Sentinel for Bounds {
    fn sentinel() -> Self {
        Bounds::SENTINEL
    }

    fn is_sentinel(&self) -> bool {
        self.fields().iter().all(|f| f.is_sentinel())
    }
}
