use typhoon_core::errors::{Result, TyphoonError};
use typhoon_core::models::GenomicWindow;

/// A group of consecutive windows rendered into one output file.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowBatch<'a> {
    /// 1-based batch number, used in the output file name.
    pub index: usize,
    /// 0-based position of the first window among all windows.
    pub offset: usize,
    pub windows: &'a [GenomicWindow],
}

///
/// Split windows into batches of at most `batch_size`, in order.
///
pub fn plan_batches(windows: &[GenomicWindow], batch_size: usize) -> Result<Vec<WindowBatch<'_>>> {
    if batch_size == 0 {
        return Err(TyphoonError::InvalidParameter(
            "batch size must be at least 1".to_string(),
        ));
    }

    Ok(windows
        .chunks(batch_size)
        .enumerate()
        .map(|(i, chunk)| WindowBatch {
            index: i + 1,
            offset: i * batch_size,
            windows: chunk,
        })
        .collect())
}
