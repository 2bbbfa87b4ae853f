//! PBN Lessons: Precision 1C bidding examples and lock-step lessons
//!
//! Builds the annotated PBN from the auction notes, then derives the lesson
//! documents from it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, error, info};
use pbn_lessons::generate::DEFAULT_MAX_DEAL;
use pbn_lessons::{
    build_lessons, run_all_stages, run_stage, LessonSeries, PdfRenderer, PipelinePaths, Stage,
    DEFAULT_RENDERER,
};
use std::path::{Path, PathBuf};

/// Precision 1C lesson builder
///
/// Generates the annotated auction PBN and the lock-step lesson files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Project directory holding "Original Material" and the output folders
    #[arg(long = "base-dir", global = true, default_value = ".", value_name = "DIR")]
    base_dir: PathBuf,

    /// Path to the pbn-to-pdf renderer
    #[arg(long, global = true, default_value = DEFAULT_RENDERER, value_name = "FILE")]
    renderer: PathBuf,

    /// Enable verbose logging (use -vv for trace output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the annotated PBN (and its PDF) from the auction notes
    Generate {
        /// Run only this stage (1-5); all stages run when omitted
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        stage: Option<u8>,

        /// Highest deal number read from the auction notes
        #[arg(long = "max-deal", default_value_t = DEFAULT_MAX_DEAL, value_name = "N")]
        max_deal: u32,
    },

    /// Build the Responder, Opener and Mixed lesson files
    Lesson {
        /// Write the PBN files only
        #[arg(long = "skip-pdf", default_value_t = false)]
        skip_pdf: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging based on verbosity level
    let log_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("PBN Lessons v{}", env!("CARGO_PKG_VERSION"));
    debug!("Base directory: {:?}", args.base_dir);
    debug!("Renderer: {:?}", args.renderer);

    let paths = PipelinePaths::from_base_dir(&args.base_dir);
    let renderer = PdfRenderer::new(&args.renderer);

    match args.command {
        Command::Generate { stage, max_deal } => {
            match stage.and_then(Stage::from_number) {
                Some(stage) => {
                    require_input(stage_input(stage, &paths))?;
                    run_stage(stage, &paths, max_deal, &renderer)
                        .with_context(|| format!("Stage {} failed", stage.number()))?;
                }
                None => {
                    require_input(&paths.auction_text)?;
                    require_input(&paths.reference_pbn)?;
                    run_all_stages(&paths, max_deal, &renderer)
                        .context("Failed to generate annotated PBN")?;
                }
            }
            info!("Done");
        }
        Command::Lesson { skip_pdf } => {
            require_input(&paths.annotated_pbn)?;
            let series = LessonSeries::precision_1c();
            let renderer = (!skip_pdf).then_some(&renderer);

            let stats = build_lessons(&paths, &series, renderer)
                .context("Failed to build lessons")?;

            info!(
                "Built {} lessons from {} boards",
                stats.lessons_written, stats.boards
            );
            if stats.render_failures > 0 {
                error!("{} lesson PDFs failed to render", stats.render_failures);
            }
        }
    }

    Ok(())
}

/// File a single stage reads
fn stage_input(stage: Stage, paths: &PipelinePaths) -> &Path {
    match stage {
        Stage::Normalize => &paths.auction_text,
        Stage::Expand => &paths.parsed_csv,
        Stage::Notes => &paths.expanded_csv,
        Stage::Merge => &paths.noted_csv,
        Stage::Render => &paths.annotated_pbn,
    }
}

fn require_input(path: &Path) -> Result<()> {
    if !path.exists() {
        error!("Input file not found: {:?}", path);
        anyhow::bail!("Input file not found: {:?}", path);
    }
    Ok(())
}
