use std::fmt::{self, Display};

use crate::errors::{Result, TyphoonError};

///
/// GenomicWindow struct, one contiguous interval `[start, end]` on a chromosome
/// that is aggregated into a single subplot.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct GenomicWindow {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
}

impl GenomicWindow {
    ///
    /// Create a window, checking that `0 <= start < end`.
    ///
    pub fn new(chrom: &str, start: i64, end: i64) -> Result<Self> {
        if start < 0 {
            return Err(TyphoonError::InvalidWindow {
                chrom: chrom.to_string(),
                start,
                end,
                reason: "start must not be negative".to_string(),
            });
        }

        if end <= start {
            return Err(TyphoonError::InvalidWindow {
                chrom: chrom.to_string(),
                start,
                end,
                reason: "end must be greater than start".to_string(),
            });
        }

        Ok(GenomicWindow {
            chrom: chrom.to_string(),
            start,
            end,
        })
    }

    ///
    /// Window centered on `origin`, reaching `offset` bases to either side.
    ///
    pub fn around(chrom: &str, origin: i64, offset: i64) -> Result<Self> {
        Self::new(chrom, origin - offset, origin + offset)
    }

    ///
    /// Tile `[origin, limit)` with consecutive windows of width `extent`.
    ///
    /// Tiles are generated while their start is below `limit`, so the last
    /// tile may reach past `limit`.
    ///
    pub fn tile(chrom: &str, origin: i64, extent: i64, limit: i64) -> Result<Vec<Self>> {
        if extent <= 0 {
            return Err(TyphoonError::InvalidParameter(format!(
                "window extent must be positive, got {}",
                extent
            )));
        }

        let mut windows = Vec::new();
        let mut start = origin;
        while start < limit {
            let end = start + extent;
            windows.push(Self::new(chrom, start, end)?);
            start = end;
        }

        if windows.is_empty() {
            return Err(TyphoonError::InvalidWindow {
                chrom: chrom.to_string(),
                start: origin,
                end: limit,
                reason: "limit must be greater than origin".to_string(),
            });
        }

        Ok(windows)
    }

    pub fn width(&self) -> i64 {
        self.end - self.start
    }

    /// Number of matrix columns; both ends of the window are drawn.
    pub fn n_columns(&self) -> usize {
        (self.width() + 1) as usize
    }

    pub fn contains(&self, position: i64) -> bool {
        position >= self.start && position <= self.end
    }
}

impl Display for GenomicWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}
