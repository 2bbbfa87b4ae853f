//! Generation driver: runs stages 1-5 through their files.

use super::records::{read_records, write_records};
use super::write_output;
use crate::config::PipelinePaths;
use crate::error::PipelineResult;
use crate::generate::{
    expand_records, extract_records, merge_records, normalize_text, DealRecord, NotedRecord,
    NotedRow,
};
use crate::pbn::{read_reference, write_document};
use crate::render::PdfRenderer;
use log::{debug, info};
use std::fs;

/// One step of the generation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Annotation text to deal records
    Normalize,
    /// Shorthand auctions to explicit calls
    Expand,
    /// Parenthesized meanings to numbered footnotes
    Notes,
    /// Records plus reference deals to the annotated PBN
    Merge,
    /// Annotated PBN to PDF
    Render,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Normalize,
        Stage::Expand,
        Stage::Notes,
        Stage::Merge,
        Stage::Render,
    ];

    /// Stage by its 1-based number
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1..=5 => Some(Self::ALL[usize::from(n - 1)]),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Stage::Normalize => 1,
            Stage::Expand => 2,
            Stage::Notes => 3,
            Stage::Merge => 4,
            Stage::Render => 5,
        }
    }
}

/// Run a single stage. Its input must have been produced already.
pub fn run_stage(
    stage: Stage,
    paths: &PipelinePaths,
    max_deal: u32,
    renderer: &PdfRenderer,
) -> PipelineResult<()> {
    debug!("Starting stage {} ({:?})", stage.number(), stage);
    match stage {
        Stage::Normalize => normalize_stage(paths, max_deal),
        Stage::Expand => expand_stage(paths),
        Stage::Notes => notes_stage(paths),
        Stage::Merge => merge_stage(paths),
        Stage::Render => renderer.render(&paths.annotated_pbn, &paths.annotated_pdf),
    }
}

/// Run stages 1 to 5 in order, stopping at the first failure
pub fn run_all_stages(
    paths: &PipelinePaths,
    max_deal: u32,
    renderer: &PdfRenderer,
) -> PipelineResult<()> {
    for stage in Stage::ALL {
        run_stage(stage, paths, max_deal, renderer)?;
    }
    Ok(())
}

fn normalize_stage(paths: &PipelinePaths, max_deal: u32) -> PipelineResult<()> {
    let text = fs::read_to_string(&paths.auction_text)?;
    let records = normalize_text(&text, max_deal);
    write_records(&paths.parsed_csv, &records)?;
    info!(
        "Stage 1: parsed {} auctions into {:?}",
        records.len(),
        paths.parsed_csv
    );
    Ok(())
}

fn expand_stage(paths: &PipelinePaths) -> PipelineResult<()> {
    let records: Vec<DealRecord> = read_records(&paths.parsed_csv)?;
    let expanded = expand_records(&records);
    write_records(&paths.expanded_csv, &expanded)?;
    info!(
        "Stage 2: expanded {} auctions into {:?}",
        expanded.len(),
        paths.expanded_csv
    );
    Ok(())
}

fn notes_stage(paths: &PipelinePaths) -> PipelineResult<()> {
    let records: Vec<DealRecord> = read_records(&paths.expanded_csv)?;
    let noted = extract_records(&records);
    let rows: Vec<NotedRow> = noted.iter().map(NotedRow::from).collect();
    write_records(&paths.noted_csv, &rows)?;
    info!(
        "Stage 3: extracted notes for {} auctions into {:?}",
        rows.len(),
        paths.noted_csv
    );
    Ok(())
}

fn merge_stage(paths: &PipelinePaths) -> PipelineResult<()> {
    let rows: Vec<NotedRow> = read_records(&paths.noted_csv)?;
    let records: Vec<NotedRecord> = rows.into_iter().map(NotedRecord::from).collect();
    let reference = read_reference(&fs::read_to_string(&paths.reference_pbn)?);

    let boards = merge_records(&records, &reference);
    write_output(
        &paths.annotated_pbn,
        write_document(boards.iter().map(|board| board.to_pbn())),
    )?;
    info!(
        "Stage 4: wrote {} of {} boards to {:?}",
        boards.len(),
        records.len(),
        paths.annotated_pbn
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::generate::DEFAULT_MAX_DEAL;
    use crate::pbn::read_document;
    use std::path::Path;

    const AUCTIONS: &str = "Precision 1C auctions

1) 1C - [P] - 1D(shows 4+ D) - all pass
Note: Opener has QH
2) 1C - 1H(5+ H, 8+ HCP) - 2H - all pass
3) Like #1


System notes
";

    const REFERENCE: &str = r#"% PBN 2.1

[Event "Leveled"]
[Board "1"]
[Dealer "N"]
[Vulnerable "None"]
[Deal "N:K843.T542.J6.863 AQJ7.K.Q75.AT942 962.AJ7.KT82.J75 T5.Q9863.A943.KQ"]

[Event "Leveled"]
[Board "2"]
[Dealer "N"]
[Vulnerable "NS"]
[Deal "N:Q7.AKT9.JT3.JT96 J653.QJ8.A.AQ732 K92.654.K954.K84 AT84.732.Q8762.5"]
"#;

    fn project(dir: &Path) -> PipelinePaths {
        let paths = PipelinePaths::from_base_dir(dir);
        fs::create_dir_all(paths.auction_text.parent().unwrap()).unwrap();
        fs::write(&paths.auction_text, AUCTIONS).unwrap();
        fs::write(&paths.reference_pbn, REFERENCE).unwrap();
        paths
    }

    #[test]
    fn test_stage_numbers() {
        assert_eq!(Stage::from_number(1), Some(Stage::Normalize));
        assert_eq!(Stage::from_number(5), Some(Stage::Render));
        assert_eq!(Stage::from_number(0), None);
        assert_eq!(Stage::from_number(6), None);
        for stage in Stage::ALL {
            assert_eq!(Stage::from_number(stage.number()), Some(stage));
        }
    }

    #[test]
    fn test_stages_one_to_four() {
        let dir = tempfile::tempdir().unwrap();
        let paths = project(dir.path());
        let renderer = PdfRenderer::new("/nonexistent/pbn-to-pdf");

        for stage in [Stage::Normalize, Stage::Expand, Stage::Notes, Stage::Merge] {
            run_stage(stage, &paths, DEFAULT_MAX_DEAL, &renderer).unwrap();
        }

        let expanded: Vec<DealRecord> = read_records(&paths.expanded_csv).unwrap();
        assert_eq!(expanded.len(), 3);
        assert_eq!(expanded[0].auction, "1C Pass 1D(shows 4+ D) Pass Pass Pass");
        assert_eq!(expanded[2].auction, expanded[0].auction);

        let boards = read_document(&fs::read_to_string(&paths.annotated_pbn).unwrap());
        // Deal 3 has no reference board and is skipped
        assert_eq!(boards.len(), 2);
        assert_eq!(boards[0].tag("Board"), Some("1"));
        assert_eq!(boards[0].notes, vec!["1:shows 4+\\Ds".to_string()]);
        assert_eq!(boards[1].tag("Vulnerable"), Some("NS"));
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PipelinePaths::from_base_dir(dir.path());
        let renderer = PdfRenderer::new("/nonexistent/pbn-to-pdf");
        let err = run_stage(Stage::Expand, &paths, DEFAULT_MAX_DEAL, &renderer).unwrap_err();
        assert!(matches!(err, PipelineError::CsvError(_)));
    }

    #[test]
    fn test_render_failure_stops_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let paths = project(dir.path());
        let renderer = PdfRenderer::new("/nonexistent/pbn-to-pdf");

        let err = run_all_stages(&paths, DEFAULT_MAX_DEAL, &renderer).unwrap_err();
        assert!(matches!(err, PipelineError::RendererSpawnFailed { .. }));
        // Everything before the render stage was written
        assert!(paths.annotated_pbn.exists());
    }
}
