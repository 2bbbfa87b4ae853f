//! Lesson PBN writer: one document per variant.

use super::auction::{reconstruct_auction, trim_trailing_passes};
use super::commentary::{commentary_block, narrate};
use crate::pbn::writer::{push_auction_section, push_tags};
use crate::pbn::{write_document, Board, Seat, TagPair};

/// Which boards get turned around so the student plays the other hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    All,
    /// Odd positions in the document (0-based)
    Alternate,
}

impl Rotation {
    pub fn applies_to(self, index: usize) -> bool {
        match self {
            Rotation::None => false,
            Rotation::All => true,
            Rotation::Alternate => index % 2 == 1,
        }
    }
}

/// One lesson file derived from the annotated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonVariant {
    /// Short name, also used for the output file name
    pub label: String,
    pub event: String,
    pub skill_path: String,
    pub rotation: Rotation,
}

/// Fixed settings shared by every lesson in a series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSeries {
    pub title: String,
    pub student: Seat,
    pub flags: String,
    pub category: String,
    pub difficulty: String,
    pub variants: Vec<LessonVariant>,
}

impl LessonSeries {
    /// The Precision 1C responder/opener/mixed lessons
    pub fn precision_1c() -> Self {
        let title = "Precision 1C";
        let variant = |label: &str, rotation| LessonVariant {
            label: label.to_string(),
            event: format!("{} - {}", title, label),
            skill_path: format!("precision/1c_{}", label.to_lowercase()),
            rotation,
        };

        Self {
            title: title.to_string(),
            student: Seat::South,
            flags: "1f".to_string(),
            category: "Precision".to_string(),
            difficulty: "intermediate".to_string(),
            variants: vec![
                variant("Responder", Rotation::None),
                variant("Opener", Rotation::All),
                variant("Mixed", Rotation::Alternate),
            ],
        }
    }

    /// Output file name for a variant, e.g. `Precision 1C Opener.pbn`
    pub fn file_name(&self, variant: &LessonVariant) -> String {
        format!("{} {}.pbn", self.title, variant.label)
    }

    fn lesson_tags(&self, variant: &LessonVariant) -> Vec<TagPair> {
        vec![
            TagPair::new("Student", self.student.to_string()),
            TagPair::new("BCFlags", self.flags.as_str()),
            TagPair::new("Category", self.category.as_str()),
            TagPair::new("Difficulty", self.difficulty.as_str()),
            TagPair::new("SkillPath", variant.skill_path.as_str()),
        ]
    }
}

/// A board prepared for a lesson, with its generated commentary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonBoard {
    pub board: Board,
    pub lesson_tags: Vec<TagPair>,
    pub commentary: String,
}

impl LessonBoard {
    pub fn to_pbn(&self) -> String {
        let mut out = String::new();
        push_tags(&mut out, &self.board.tags);
        push_auction_section(&mut out, &self.board);
        push_tags(&mut out, &self.lesson_tags);
        out.push_str(&self.commentary);
        out.push('\n');
        out
    }
}

/// Turn a Deal value around: `N:...` becomes `S:...`
pub fn rotate_deal(deal: &str) -> String {
    let mut chars = deal.chars();
    match chars.next().and_then(Seat::from_char) {
        Some(seat) => format!("{}{}", seat.rotated(), chars.as_str()),
        None => deal.to_string(),
    }
}

fn rotate_seat_value(value: &str) -> String {
    Seat::from_pbn(value).map_or_else(|| value.to_string(), |seat| seat.rotated().to_string())
}

/// Derive the lesson board for the board at `index`; the source is untouched
pub fn lesson_board(
    board: &Board,
    index: usize,
    variant: &LessonVariant,
    series: &LessonSeries,
) -> LessonBoard {
    let rotate = variant.rotation.applies_to(index);

    let tags = board
        .tags
        .iter()
        .map(|tag| {
            let value = match tag.name.as_str() {
                "Event" => variant.event.clone(),
                "Deal" if rotate => rotate_deal(&tag.value),
                "Dealer" if rotate => rotate_seat_value(&tag.value),
                _ => tag.value.clone(),
            };
            TagPair::new(tag.name.as_str(), value)
        })
        .collect();

    let dealer = if rotate {
        board.auction_dealer.rotated()
    } else {
        board.auction_dealer
    };

    let calls = trim_trailing_passes(reconstruct_auction(&board.auction, dealer));
    let narration = narrate(&calls, &board.footnotes());
    let title = format!("{} {}", series.title, board.tag("Board").unwrap_or(""));
    let commentary = commentary_block(&title, &narration, board.commentary.as_deref());

    LessonBoard {
        board: Board {
            tags,
            auction_dealer: dealer,
            auction: board.auction.clone(),
            notes: board.notes.clone(),
            commentary: None,
        },
        lesson_tags: series.lesson_tags(variant),
        commentary,
    }
}

/// Render the lesson document for one variant
pub fn write_lesson(boards: &[Board], variant: &LessonVariant, series: &LessonSeries) -> String {
    write_document(
        boards
            .iter()
            .enumerate()
            .map(|(index, board)| lesson_board(board, index, variant, series).to_pbn()),
    )
}
