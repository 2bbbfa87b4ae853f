//! Generation pipeline: annotation text to annotated PBN.
//!
//! ```text
//! text ──▶ normalize ──▶ expand ──▶ notes ──▶ merge ──▶ PBN
//!          (stage 1)     (stage 2)  (stage 3)  (stage 4)
//! ```
//!
//! Every stage is a pure function over in-memory records; the `batch`
//! module moves the records through the intermediate CSV files.

use crate::error::PipelineError;
use crate::pbn::Footnote;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod expand;
pub mod merge;
pub mod normalize;
pub mod notes;

pub use expand::{expand_auction, expand_records};
pub use merge::{format_auction_lines, merge_records};
pub use normalize::{normalize_text, DEFAULT_MAX_DEAL};
pub use notes::{add_suit_symbols, extract_bid_notes, extract_records};

/// Deal identifier: a board number, optionally `-N` for an alternate line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DealId {
    pub number: u32,
    pub alternate: Option<u32>,
}

impl DealId {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            alternate: None,
        }
    }

    pub fn with_alternate(self, alternate: u32) -> Self {
        Self {
            alternate: Some(alternate),
            ..self
        }
    }
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alternate {
            Some(alt) => write!(f, "{}-{}", self.number, alt),
            None => write!(f, "{}", self.number),
        }
    }
}

impl FromStr for DealId {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PipelineError::InvalidDealId(s.to_string());
        let (number, alternate) = match s.trim().split_once('-') {
            Some((number, alt)) => (number, Some(alt.parse().map_err(|_| invalid())?)),
            None => (s.trim(), None),
        };
        Ok(Self {
            number: number.parse().map_err(|_| invalid())?,
            alternate,
        })
    }
}

impl TryFrom<String> for DealId {
    type Error = PipelineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DealId> for String {
    fn from(id: DealId) -> Self {
        id.to_string()
    }
}

/// Stage 1 and stage 2 row: one auction line of a deal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealRecord {
    pub deal: DealId,
    pub auction: String,
    pub notes: String,
}

impl DealRecord {
    pub fn new(deal: DealId, auction: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            deal,
            auction: auction.into(),
            notes: notes.into(),
        }
    }
}

/// Stage 3 result: auction with `=N=` markers and its footnotes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotedRecord {
    pub deal: DealId,
    pub auction: String,
    pub footnotes: Vec<Footnote>,
    pub notes: String,
}

/// Stage 3 CSV row; footnotes are serialized as `N:text` joined by `|`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotedRow {
    pub deal: DealId,
    pub auction: String,
    pub bid_notes: String,
    pub notes: String,
}

impl From<&NotedRecord> for NotedRow {
    fn from(record: &NotedRecord) -> Self {
        let bid_notes = record
            .footnotes
            .iter()
            .map(Footnote::to_string)
            .collect::<Vec<_>>()
            .join("|");
        Self {
            deal: record.deal,
            auction: record.auction.clone(),
            bid_notes,
            notes: record.notes.clone(),
        }
    }
}

impl From<NotedRow> for NotedRecord {
    fn from(row: NotedRow) -> Self {
        let mut footnotes: Vec<Footnote> = Vec::new();
        for entry in row.bid_notes.split('|').filter(|entry| !entry.is_empty()) {
            if let Some(note) = Footnote::parse(entry) {
                footnotes.push(note);
            } else if let Some(previous) = footnotes.last_mut() {
                // A `|` inside the note text itself
                previous.text.push('|');
                previous.text.push_str(entry);
            } else {
                warn!("Deal {}: dropping bid note {:?}", row.deal, entry);
            }
        }
        Self {
            deal: row.deal,
            auction: row.auction,
            footnotes,
            notes: row.notes,
        }
    }
}
