use std::io::BufRead;
use std::path::Path;

use crate::errors::{Result, TyphoonError};
use crate::models::GenomicWindow;
use crate::utils::get_dynamic_reader;

///
/// GeneBody struct, one annotated gene drawn over a typhoon plot.
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GeneBody {
    pub name: String,
    pub left: i64,
    pub right: i64,
}

impl GeneBody {
    pub fn length(&self) -> i64 {
        self.right - self.left
    }

    pub fn center(&self) -> f64 {
        0.5 * (self.left + self.right) as f64
    }

    pub fn overlaps(&self, window: &GenomicWindow) -> bool {
        self.right >= window.start && self.left <= window.end
    }

    ///
    /// Parse one `name,<reserved>,left,right` line.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    ///
    pub fn from_line(line: &str) -> std::result::Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 4 {
            return Err(format!(
                "expected 4 comma-separated fields, found {}: {:?}",
                fields.len(),
                line
            ));
        }

        let left: i64 = fields[2]
            .parse()
            .map_err(|_| format!("left coordinate is not an integer: {:?}", fields[2]))?;
        let right: i64 = fields[3]
            .parse()
            .map_err(|_| format!("right coordinate is not an integer: {:?}", fields[3]))?;

        if right < left {
            return Err(format!(
                "gene {} ends ({}) before it starts ({})",
                fields[0], right, left
            ));
        }

        Ok(Some(GeneBody {
            name: fields[0].to_string(),
            left,
            right,
        }))
    }
}

///
/// Read every gene body from a comma-delimited annotation file.
///
/// # Arguments
///
/// - path: path to the annotation file (may be gzipped)
///
pub fn read_gene_bodies(path: &Path) -> Result<Vec<GeneBody>> {
    let annotation_error = |reason: String| TyphoonError::AnnotationFileError {
        path: path.to_path_buf(),
        reason,
    };

    let reader = get_dynamic_reader(path).map_err(|e| annotation_error(e.to_string()))?;

    let mut genes = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| annotation_error(e.to_string()))?;
        match GeneBody::from_line(&line) {
            Ok(Some(gene)) => genes.push(gene),
            Ok(None) => continue,
            Err(reason) => return Err(annotation_error(format!("line {}: {}", index + 1, reason))),
        }
    }

    Ok(genes)
}
