//! Lesson driver: annotated PBN to one lesson file per variant.

use super::write_output;
use crate::config::PipelinePaths;
use crate::error::PipelineResult;
use crate::lesson::{write_lesson, LessonSeries};
use crate::pbn::read_document;
use crate::render::{pdf_path_for, PdfRenderer};
use log::{error, info};
use std::fs;

/// Statistics from a lesson run
#[derive(Debug, Default)]
pub struct LessonStats {
    pub boards: usize,
    pub lessons_written: usize,
    pub pdfs_rendered: usize,
    pub render_failures: usize,
}

/// Write every lesson variant of `series`.
///
/// When a renderer is given each lesson is also rendered to PDF. A failed
/// render is logged and the remaining variants are still built.
pub fn build_lessons(
    paths: &PipelinePaths,
    series: &LessonSeries,
    renderer: Option<&PdfRenderer>,
) -> PipelineResult<LessonStats> {
    let mut stats = LessonStats::default();

    info!("Reading annotated PBN: {:?}", paths.annotated_pbn);
    let boards = read_document(&fs::read_to_string(&paths.annotated_pbn)?);
    stats.boards = boards.len();
    info!("Found {} boards", boards.len());

    for variant in &series.variants {
        let output = paths.lessons_dir.join(series.file_name(variant));
        write_output(&output, write_lesson(&boards, variant, series))?;
        stats.lessons_written += 1;
        info!("Wrote {} lesson to {:?}", variant.label, output);

        if let Some(renderer) = renderer {
            match renderer.render(&output, &pdf_path_for(&output)) {
                Ok(()) => stats.pdfs_rendered += 1,
                Err(e) => {
                    stats.render_failures += 1;
                    error!("{} lesson PDF failed: {}", variant.label, e);
                }
            }
        }
    }

    Ok(stats)
}
