//! Three-point history window anchored on the closed bar

/// Values at `t - 2`, `t - 1` and `t`.
///
/// Can only be built from defined values, so decision logic never sees a
/// warm-up slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window3 {
    pub prev2: f64,
    pub prev: f64,
    pub current: f64,
}

impl Window3 {
    pub fn new(prev2: f64, prev: f64, current: f64) -> Self {
        Self {
            prev2,
            prev,
            current,
        }
    }

    /// Read `series[anchor - 2..=anchor]`; `None` if out of range or undefined.
    pub fn read(series: &[f64], anchor: usize) -> Option<Self> {
        let start = anchor.checked_sub(2)?;
        let slice = series.get(start..=anchor)?;
        if slice.iter().any(|v| !v.is_finite()) {
            return None;
        }
        Some(Self::new(slice[0], slice[1], slice[2]))
    }

    /// Slope turned from falling or flat to rising (a trough).
    pub fn turned_up(&self) -> bool {
        self.current > self.prev && self.prev <= self.prev2
    }

    /// Slope turned from rising or flat to falling (a peak).
    pub fn turned_down(&self) -> bool {
        self.current < self.prev && self.prev >= self.prev2
    }
}
