//! File adapters around the pure pipeline stages.

use crate::error::PipelineResult;
use log::debug;
use std::fs;
use std::path::Path;

pub mod generate;
pub mod lesson;
pub mod records;

pub use generate::{run_all_stages, run_stage, Stage};
pub use lesson::{build_lessons, LessonStats};
pub use records::{read_records, write_records};

/// Write a whole output file, creating its directory first
pub(crate) fn write_output(path: &Path, contents: impl AsRef<[u8]>) -> PipelineResult<()> {
    let contents = contents.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    debug!("Wrote {} bytes to {:?}", contents.len(), path);
    Ok(())
}
