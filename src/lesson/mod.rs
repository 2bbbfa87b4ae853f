//! Lesson pipeline: annotated PBN to interactive lesson documents.
//!
//! Each board's auction is rebuilt from its PBN body, narrated from South's
//! point of view and wrapped in commentary the lesson player steps through.
//! The three variants differ only in which boards are turned around.

pub mod auction;
pub mod commentary;
pub mod writer;

pub use auction::{reconstruct_auction, trim_trailing_passes, Call, SeatCall, Strain};
pub use commentary::{commentary_block, meaning_phrase, narrate};
pub use writer::{
    lesson_board, rotate_deal, write_lesson, LessonBoard, LessonSeries, LessonVariant, Rotation,
};
