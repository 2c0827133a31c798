use std::fs::File;
use std::path::{Path, PathBuf};

use log::debug;
use noodles::bam;
use noodles::bgzf::Reader;
use noodles::core::{Position, Region};
use noodles::sam;

use typhoon_core::errors::{Result, TyphoonError};
use typhoon_core::models::{GenomicWindow, ReadRecord};

///
/// Anything that can hand out the reads overlapping a window.
///
pub trait ReadSource {
    fn fetch(&mut self, window: &GenomicWindow) -> Result<Vec<ReadRecord>>;
}

///
/// Indexed BAM file. The `.bai` index must sit next to the BAM file
/// (create one with `samtools index your_file.bam`).
///
/// The file handle is opened once and reused for every window; it is closed
/// when the source is dropped.
///
pub struct BamReadSource {
    path: PathBuf,
    reader: bam::io::IndexedReader<Reader<File>>,
    header: sam::Header,
}

impl BamReadSource {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TyphoonError::MissingInputFile(path.to_path_buf()));
        }

        let query_error =
            |e: std::io::Error| TyphoonError::AlignmentQuery(format!("{:?}: {}", path, e));

        let mut reader = bam::io::indexed_reader::Builder::default()
            .build_from_path(path)
            .map_err(query_error)?;
        let header = reader.read_header().map_err(query_error)?;

        Ok(BamReadSource {
            path: path.to_path_buf(),
            reader,
            header,
        })
    }
}

/// 0-based `[start, end)` as a 1-based inclusive noodles region.
fn window_region(window: &GenomicWindow) -> Result<Region> {
    let invalid = || TyphoonError::InvalidWindow {
        chrom: window.chrom.clone(),
        start: window.start,
        end: window.end,
        reason: "window can't be expressed as a BAM region".to_string(),
    };

    let start = Position::new((window.start + 1) as usize).ok_or_else(invalid)?;
    let end = Position::new(window.end as usize).ok_or_else(invalid)?;

    Ok(Region::new(window.chrom.as_str(), start..=end))
}

impl ReadSource for BamReadSource {
    fn fetch(&mut self, window: &GenomicWindow) -> Result<Vec<ReadRecord>> {
        let region = window_region(window)?;
        let query_error = |e: std::io::Error| {
            TyphoonError::AlignmentQuery(format!("{:?} at {}: {}", self.path, window, e))
        };

        let records = self
            .reader
            .query(&self.header, &region)
            .map_err(query_error)?;

        let mut reads = Vec::new();
        let mut unmapped = 0;
        for result in records {
            let record = result.map_err(query_error)?;

            let position = match record.alignment_start() {
                Some(position) => position.map_err(query_error)?,
                None => {
                    unmapped += 1;
                    continue;
                }
            };

            reads.push(ReadRecord::new(
                position.get() as i64 - 1,
                record.template_length() as i64,
            ));
        }

        debug!(
            "{:?}: fetched {} reads in {} ({} unmapped skipped)",
            self.path,
            reads.len(),
            window,
            unmapped
        );

        Ok(reads)
    }
}

///
/// Reads held in memory, e.g. from a previous pass or a test. A read belongs
/// to a window when its start lies in `[start, end)`.
///
#[derive(Debug, Clone, Default)]
pub struct MemoryReadSource {
    reads: Vec<ReadRecord>,
}

impl MemoryReadSource {
    pub fn new(reads: Vec<ReadRecord>) -> Self {
        MemoryReadSource { reads }
    }
}

impl ReadSource for MemoryReadSource {
    fn fetch(&mut self, window: &GenomicWindow) -> Result<Vec<ReadRecord>> {
        Ok(self
            .reads
            .iter()
            .filter(|r| r.start_position >= window.start && r.start_position < window.end)
            .copied()
            .collect())
    }
}
