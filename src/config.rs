//! File layout of a lesson project directory.

use std::path::{Path, PathBuf};

/// Where every stage reads and writes, relative to one base directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    /// Raw annotation text (stage 1 input)
    pub auction_text: PathBuf,
    /// Reference deal data (stage 4 input)
    pub reference_pbn: PathBuf,
    pub parsed_csv: PathBuf,
    pub expanded_csv: PathBuf,
    pub noted_csv: PathBuf,
    /// Annotated PBN (stage 4 output, lesson input)
    pub annotated_pbn: PathBuf,
    pub annotated_pdf: PathBuf,
    pub lessons_dir: PathBuf,
}

impl PipelinePaths {
    pub fn from_base_dir(base: &Path) -> Self {
        let original = base.join("Original Material");
        let intermediate = base.join("Intermediate Results");
        let results = base.join("Results");

        Self {
            auction_text: original.join("Precision 1C Auctions and System.txt"),
            reference_pbn: original.join("Precision 1C Leveled by Responses x100.pbn"),
            parsed_csv: intermediate.join("temp_auctions.csv"),
            expanded_csv: intermediate.join("temp_auctions_expanded.csv"),
            noted_csv: intermediate.join("temp_auctions_noted.csv"),
            annotated_pbn: results.join("Precision 1C Auctions with Notes.pbn"),
            annotated_pdf: results.join("Precision 1C Auctions with Notes.pdf"),
            lessons_dir: base.join("Lock-Step Lessons"),
        }
    }
}
