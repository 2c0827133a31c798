use crate::utils::round_half_even;

/// A single aligned read as seen by the binner.
///
/// `start_position` is 0-based and `template_length` keeps the sign reported
/// by the aligner (negative for the rightmost mate).
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ReadRecord {
    pub start_position: i64,
    pub template_length: i64,
}

impl ReadRecord {
    pub fn new(start_position: i64, template_length: i64) -> Self {
        ReadRecord {
            start_position,
            template_length,
        }
    }

    /// Fragment midpoint: `start + round(template_length / 2)`, ties to even.
    pub fn midpoint(&self) -> i64 {
        self.start_position + round_half_even(self.template_length as f64 / 2.0) as i64
    }
}
