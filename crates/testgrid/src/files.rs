//! Results file naming and creation

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

/// Timestamp suffix format: minutes resolution, e.g. `202403151342`
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

/// `dir/<name>.xlsx`
pub fn results_file_path<P: AsRef<Path>>(dir: P, name: &str) -> PathBuf {
    dir.as_ref().join(format!("{}.xlsx", name))
}

/// `dir/<name>_<yyyyMMddHHmm>.xlsx` for the given local time
pub fn timestamped_file_path<P: AsRef<Path>>(dir: P, name: &str, at: NaiveDateTime) -> PathBuf {
    dir.as_ref()
        .join(format!("{}_{}.xlsx", name, at.format(TIMESTAMP_FORMAT)))
}

fn create_empty(path: PathBuf) -> io::Result<PathBuf> {
    File::create(&path)?;
    log::info!("created {}", path.display());
    Ok(path)
}

/// Create (or truncate) `dir/<name>.xlsx` and return its path.
///
/// The file is left empty. It becomes a workbook once
/// [`write_header`](crate::write_header) is called on it.
pub fn create_results_file_in<P: AsRef<Path>>(dir: P, name: &str) -> io::Result<PathBuf> {
    create_empty(results_file_path(dir, name))
}

/// [`create_results_file_in`] for the current working directory
pub fn create_results_file(name: &str) -> io::Result<PathBuf> {
    create_results_file_in(std::env::current_dir()?, name)
}

/// Create (or truncate) `dir/<name>_<yyyyMMddHHmm>.xlsx`, stamped with the
/// current local time, and return its path.
pub fn create_results_file_with_timestamp_in<P: AsRef<Path>>(
    dir: P,
    name: &str,
) -> io::Result<PathBuf> {
    create_empty(timestamped_file_path(dir, name, Local::now().naive_local()))
}

/// [`create_results_file_with_timestamp_in`] for the current working directory
pub fn create_results_file_with_timestamp(name: &str) -> io::Result<PathBuf> {
    create_results_file_with_timestamp_in(std::env::current_dir()?, name)
}
