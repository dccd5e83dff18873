//! Curve points and tenor grids.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// A single (tenor, rate) observation.
///
/// Tenors are whole months; rates are percentages (4.25 means 4.25%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Tenor in months.
    pub tenor: u32,
    /// Rate in percent.
    pub rate: f64,
}

impl CurvePoint {
    /// Creates a new curve point.
    #[must_use]
    pub fn new(tenor: u32, rate: f64) -> Self {
        Self { tenor, rate }
    }
}

impl From<(u32, f64)> for CurvePoint {
    fn from((tenor, rate): (u32, f64)) -> Self {
        Self::new(tenor, rate)
    }
}

/// A regular grid of integer-month tenors: `start, start + step, ..., end`.
///
/// # Example
///
/// ```rust
/// use passthru_curves::TenorGrid;
///
/// let grid = TenorGrid::semi_annual();
/// assert_eq!(grid.len(), 61);
/// assert_eq!(grid.index_of(120), Some(20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct TenorGrid {
    start: u32,
    end: u32,
    step: u32,
}

#[derive(Deserialize)]
struct RawGrid {
    start: u32,
    end: u32,
    step: u32,
}

impl TryFrom<RawGrid> for TenorGrid {
    type Error = CurveError;

    fn try_from(raw: RawGrid) -> CurveResult<Self> {
        Self::new(raw.start, raw.end, raw.step)
    }
}

impl TenorGrid {
    /// Creates a grid. `end` is included only if it lies on the step;
    /// otherwise it is rounded down to the last tenor on the grid, so grids
    /// with the same tenors compare equal.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidGrid` if `step == 0` or `end < start`.
    pub fn new(start: u32, end: u32, step: u32) -> CurveResult<Self> {
        if step == 0 {
            return Err(CurveError::invalid_grid("step must be positive"));
        }
        if end < start {
            return Err(CurveError::invalid_grid(format!(
                "end {end} is before start {start}"
            )));
        }
        let end = start + (end - start) / step * step;
        Ok(Self { start, end, step })
    }

    /// Every six months from 0 to 360: the bootstrap grid.
    #[must_use]
    pub fn semi_annual() -> Self {
        Self {
            start: 0,
            end: 360,
            step: 6,
        }
    }

    /// Every month from 1 to 360: the Z-spread discounting grid.
    #[must_use]
    pub fn monthly() -> Self {
        Self {
            start: 1,
            end: 360,
            step: 1,
        }
    }

    /// First tenor.
    #[must_use]
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last tenor on the grid.
    #[must_use]
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Grid spacing in months.
    #[must_use]
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Number of tenors.
    #[must_use]
    pub fn len(&self) -> usize {
        ((self.end - self.start) / self.step) as usize + 1
    }

    /// Always false; a valid grid holds at least its start tenor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the tenors in ascending order.
    pub fn tenors(&self) -> impl Iterator<Item = u32> {
        (self.start..=self.end).step_by(self.step as usize)
    }

    /// Position of `tenor` on the grid, if it is a grid point.
    #[must_use]
    pub fn index_of(&self, tenor: u32) -> Option<usize> {
        if tenor < self.start || tenor > self.end {
            return None;
        }
        let offset = tenor - self.start;
        (offset % self.step == 0).then(|| (offset / self.step) as usize)
    }

    /// Tenor at position `index`.
    #[must_use]
    pub fn tenor_at(&self, index: usize) -> Option<u32> {
        (index < self.len()).then(|| self.start + self.step * index as u32)
    }

    /// True for a 6-month grid starting at 0, where index `k` is tenor `6k`.
    #[must_use]
    pub fn is_semi_annual_from_zero(&self) -> bool {
        self.start == 0 && self.step == 6
    }
}
