//! PBN Lessons Library
//!
//! Turns an annotated list of Precision 1C auctions into a PBN document of
//! bidding examples, then into interactive lesson documents built on it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌─────────────────┐
//! │ Auctions text   │────▶│  generate        │────▶│  Annotated PBN  │────▶ PDF
//! │ (annotations)   │ CSV │  (stages 1-4)    │     │  (Results/)     │
//! └─────────────────┘     └──────────────────┘     └─────────────────┘
//!                                  ▲                        │
//!                       reference  │                        ▼
//!                       deal data ─┘               ┌─────────────────┐
//!                                                  │  lesson         │────▶ PDF
//!                                                  │  (3 variants)   │
//!                                                  └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`generate`] - Pure stage functions from annotation text to boards
//! - [`lesson`] - Auction reconstruction, narration and lesson documents
//! - [`pbn`] - PBN reading and writing
//! - [`batch`] - File adapters and stage drivers
//! - [`render`] - External PDF renderer
//! - [`config`] - Project file layout
//! - [`error`] - Error types

pub mod batch;
pub mod config;
pub mod error;
pub mod generate;
pub mod lesson;
pub mod pbn;
pub mod render;

pub use batch::{build_lessons, run_all_stages, run_stage, LessonStats, Stage};
pub use config::PipelinePaths;
pub use error::{PipelineError, PipelineResult};
pub use lesson::LessonSeries;
pub use render::{PdfRenderer, DEFAULT_RENDERER};
