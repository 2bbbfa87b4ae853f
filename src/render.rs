//! PDF rendering through the external `pbn-to-pdf` tool.

use crate::error::{PipelineError, PipelineResult};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default install location of the renderer
pub const DEFAULT_RENDERER: &str = "/Applications/Bridge Utilities/pbn-to-pdf";

/// Renderer runs as an external process, one call per document
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    program: PathBuf,
}

impl PdfRenderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Render `pbn` into `pdf`, one board per page.
    ///
    /// The renderer's output is passed to the log. A non-zero exit code is
    /// returned as [`PipelineError::RendererFailed`].
    pub fn render(&self, pbn: &Path, pdf: &Path) -> PipelineResult<()> {
        info!("Running: {:?} {:?} -o {:?} -n 1 -v", self.program, pbn, pdf);

        let output = Command::new(&self.program)
            .arg(pbn)
            .arg("-o")
            .arg(pdf)
            .args(["-n", "1", "-v"])
            .output()
            .map_err(|source| PipelineError::RendererSpawnFailed {
                program: self.program.display().to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("{}", stdout.trim_end());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            warn!("{}", stderr.trim_end());
        }

        if !output.status.success() {
            return Err(PipelineError::RendererFailed(
                output.status.code().unwrap_or(-1),
            ));
        }

        info!("Wrote PDF to {:?}", pdf);
        Ok(())
    }
}

/// PDF path next to a PBN file
pub fn pdf_path_for(pbn: &Path) -> PathBuf {
    pbn.with_extension("pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_path_for() {
        assert_eq!(
            pdf_path_for(Path::new("Results/Precision 1C Mixed.pbn")),
            PathBuf::from("Results/Precision 1C Mixed.pdf")
        );
    }

    #[test]
    fn test_missing_renderer_fails_to_spawn() {
        let renderer = PdfRenderer::new("/nonexistent/pbn-to-pdf");
        let err = renderer
            .render(Path::new("in.pbn"), Path::new("out.pdf"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::RendererSpawnFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_is_reported() {
        let renderer = PdfRenderer::new("false");
        let err = renderer
            .render(Path::new("in.pbn"), Path::new("out.pdf"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::RendererFailed(1)));

        let renderer = PdfRenderer::new("true");
        assert!(renderer
            .render(Path::new("in.pbn"), Path::new("out.pdf"))
            .is_ok());
    }
}
