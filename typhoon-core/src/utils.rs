use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> io::Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Round to the nearest integer, ties to even.
pub fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}

pub fn remove_all_extensions(path: &Path) -> String {
    let mut stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut parent_path = path.with_file_name(&stem);
    while parent_path.extension().is_some() {
        parent_path = parent_path.with_extension("");
        stem = parent_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
    }

    stem
}

/// Last path component, used to label panels and figures.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

///
/// Output path of one batch in multi-window mode: `<dir>/<stem>_<index>.png`.
///
/// A trailing `.png` on `output` is dropped before the suffix is added.
///
pub fn batch_output_path(output: &Path, index: usize) -> PathBuf {
    let stem = match output.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("png") => output.with_extension(""),
        _ => output.to_path_buf(),
    };

    let mut name = stem.into_os_string();
    name.push(format!("_{}.png", index));
    PathBuf::from(name)
}
