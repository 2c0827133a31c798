use log::debug;
use ndarray::{Array2, s};

use typhoon_core::errors::{Result, TyphoonError};
use typhoon_core::models::{GenomicWindow, ReadRecord};
use typhoon_core::utils::round_half_even;
use typhoon_core::OutOfRangePolicy;

///
/// Fragment occupancy over one window: rows are template lengths
/// `0..=max_len`, columns are positions `window.start..=window.end`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyMatrix {
    window: GenomicWindow,
    ceiling: u32,
    counts: Array2<u32>,
}

impl OccupancyMatrix {
    pub fn zeros(window: &GenomicWindow, max_len: usize, ceiling: u32) -> Self {
        OccupancyMatrix {
            window: window.clone(),
            ceiling,
            counts: Array2::zeros((max_len + 1, window.n_columns())),
        }
    }

    pub fn window(&self) -> &GenomicWindow {
        &self.window
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    pub fn max_len(&self) -> usize {
        self.counts.nrows() - 1
    }

    /// `(max_len + 1, window width + 1)`
    pub fn shape(&self) -> (usize, usize) {
        self.counts.dim()
    }

    pub fn counts(&self) -> &Array2<u32> {
        &self.counts
    }

    /// Count at a fragment length and absolute genomic position.
    pub fn get(&self, fragment_len: usize, position: i64) -> Option<u32> {
        if !self.window.contains(position) {
            return None;
        }
        let column = (position - self.window.start) as usize;
        self.counts.get((fragment_len, column)).copied()
    }

    ///
    /// Non-empty cells as `(fragment_len, position, count)`.
    ///
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, i64, u32)> + '_ {
        let start = self.window.start;
        self.counts
            .indexed_iter()
            .filter(|(_, count)| **count > 0)
            .map(move |((row, column), count)| (row, start + column as i64, *count))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| *c as u64).sum()
    }

    fn add_span(&mut self, row: usize, first: i64, last: i64) {
        let lo = (first - self.window.start) as usize;
        let hi = (last - self.window.start) as usize;
        let ceiling = self.ceiling;
        self.counts
            .slice_mut(s![row, lo..hi + 1])
            .mapv_inplace(|count| (count + 1).min(ceiling));
    }
}

/// Per-window tally of what happened to each read.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BinningStats {
    /// Reads that touched at least one cell.
    pub binned: usize,
    /// Reads skipped because their template length had no row.
    pub dropped: usize,
    /// Reads whose template length was clamped into the row range.
    pub clamped: usize,
    /// Reads whose drawn span missed the window entirely.
    pub outside: usize,
}

///
/// Turns the reads of one window into an [`OccupancyMatrix`].
///
/// Each read is drawn as a shrunken footprint: it starts `round(L / 5)` bases
/// after the read start and covers `3 * round(L / 5)` further bases, on the row
/// of its template length `L`. Every cell saturates at `ceiling`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionBinner {
    pub max_len: usize,
    pub ceiling: u32,
    pub policy: OutOfRangePolicy,
}

impl RegionBinner {
    pub fn new(max_len: usize, ceiling: u32, policy: OutOfRangePolicy) -> Self {
        RegionBinner {
            max_len,
            ceiling,
            policy,
        }
    }

    ///
    /// Row of a template length, failing when it has none.
    ///
    pub fn row_for(&self, template_length: i64) -> Result<usize> {
        if template_length < 0 || template_length > self.max_len as i64 {
            return Err(TyphoonError::RecordOutOfRange {
                template_length,
                max_len: self.max_len,
            });
        }
        Ok(template_length as usize)
    }

    ///
    /// Template length a read is drawn with under the configured policy;
    /// `None` means the read is dropped.
    ///
    fn effective_length(&self, template_length: i64) -> Option<i64> {
        match self.row_for(template_length) {
            Ok(_) => Some(template_length),
            Err(_) => match self.policy {
                OutOfRangePolicy::Drop => None,
                OutOfRangePolicy::Clamp => Some(template_length.clamp(0, self.max_len as i64)),
            },
        }
    }

    ///
    /// Drawn span `[first, last]` of a read with the given template length,
    /// clamped on both sides to the window. `None` if nothing is left.
    ///
    pub fn footprint(
        start_position: i64,
        template_length: i64,
        window: &GenomicWindow,
    ) -> Option<(i64, i64)> {
        let offset_start = round_half_even(template_length as f64 / 5.0) as i64;
        let offset_end = offset_start * 3;

        let drawn_start = start_position + offset_start;
        let last = (drawn_start + offset_end).min(window.end);
        let first = drawn_start.max(window.start);

        if first > last {
            return None;
        }
        Some((first, last))
    }

    pub fn bin<I>(&self, window: &GenomicWindow, reads: I) -> (OccupancyMatrix, BinningStats)
    where
        I: IntoIterator<Item = ReadRecord>,
    {
        let mut matrix = OccupancyMatrix::zeros(window, self.max_len, self.ceiling);
        let mut stats = BinningStats::default();

        for read in reads {
            let length = match self.effective_length(read.template_length) {
                Some(length) => length,
                None => {
                    stats.dropped += 1;
                    continue;
                }
            };
            if length != read.template_length {
                stats.clamped += 1;
            }

            match Self::footprint(read.start_position, length, window) {
                Some((first, last)) => {
                    matrix.add_span(length as usize, first, last);
                    stats.binned += 1;
                }
                None => stats.outside += 1,
            }
        }

        debug!(
            "{}: binned {} reads, dropped {}, clamped {}, outside {}",
            window, stats.binned, stats.dropped, stats.clamped, stats.outside
        );

        (matrix, stats)
    }
}
