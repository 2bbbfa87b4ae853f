//! PBN document reader.

use super::{Board, Seat, TagPair};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// `[Name "value"]` at the start of a line
    static ref RE_TAG: Regex = Regex::new(r#"^\[(\w+)\s+"(.*)"\]"#).unwrap();
}

/// Reference boards keyed by their Board tag value
pub type ReferenceBoards = HashMap<String, Vec<TagPair>>;

/// Parse a tag pair from a line: [TagName "value"]
pub fn parse_tag_pair(line: &str) -> Option<TagPair> {
    let caps = RE_TAG.captures(line.trim())?;
    Some(TagPair::new(&caps[1], &caps[2]))
}

/// Read the deal-data reference document.
///
/// Boards are blank-line separated blocks of tag pairs; blocks without a
/// Board tag are dropped. Everything that is not a tag line is ignored.
pub fn read_reference(content: &str) -> ReferenceBoards {
    let mut boards = ReferenceBoards::new();
    let mut current: Vec<TagPair> = Vec::new();

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() {
            flush_reference(&mut boards, &mut current);
            continue;
        }

        if let Some(tag) = parse_tag_pair(line) {
            // Later duplicates replace earlier ones
            current.retain(|existing| existing.name != tag.name);
            current.push(tag);
        }
    }
    flush_reference(&mut boards, &mut current);

    debug!("Reference document holds {} boards", boards.len());
    boards
}

fn flush_reference(boards: &mut ReferenceBoards, current: &mut Vec<TagPair>) {
    let tags = std::mem::take(current);
    if let Some(number) = super::find_tag(&tags, "Board") {
        boards.insert(number.to_string(), tags);
    }
}

/// Read boards from a tagged document.
///
/// An Event tag opens a new board. The Auction tag starts the auction body,
/// which runs until the next tag or commentary line. Commentary in `{ }` may
/// span lines and is stored without its braces.
pub fn read_document(content: &str) -> Vec<Board> {
    let mut boards = Vec::new();
    let mut current: Option<Board> = None;
    let mut commentary = String::new();
    let mut in_auction = false;
    let mut in_commentary = false;

    for line in content.lines() {
        let line = line.trim();

        if in_commentary {
            // An Event tag always opens a new board, even inside an unclosed block
            if parse_tag_pair(line).map_or(true, |tag| tag.name != "Event") {
                commentary.push_str(line);
                commentary.push('\n');
                if line.contains('}') {
                    in_commentary = false;
                }
                continue;
            }
            warn!("Unclosed commentary block ends at {:?}", line);
            in_commentary = false;
        }

        if line.starts_with('%') {
            continue;
        }

        if let Some(tag) = parse_tag_pair(line) {
            in_auction = false;

            if tag.name == "Event" {
                if let Some(board) = current.take() {
                    boards.push(finish_board(board, &commentary));
                }
                commentary.clear();
                current = Some(Board::new(Seat::North));
            }

            let Some(board) = current.as_mut() else {
                continue;
            };

            match tag.name.as_str() {
                "Auction" => {
                    board.auction_dealer = Seat::from_pbn(&tag.value).unwrap_or_else(|| {
                        warn!("Unknown auction dealer {:?}, using North", tag.value);
                        Seat::North
                    });
                    in_auction = true;
                }
                "Note" => board.notes.push(tag.value),
                _ => board.tags.push(tag),
            }
            continue;
        }

        if line.starts_with('{') {
            in_auction = false;
            commentary.push_str(line);
            commentary.push('\n');
            in_commentary = !line[1..].contains('}');
            continue;
        }

        if in_auction && !line.is_empty() {
            if let Some(board) = current.as_mut() {
                board.auction.push(line.to_string());
            }
        }
    }

    if in_commentary {
        warn!("Document ends inside a commentary block");
    }
    if let Some(board) = current {
        boards.push(finish_board(board, &commentary));
    }

    boards
}

fn finish_board(mut board: Board, commentary: &str) -> Board {
    board.commentary = strip_braces(commentary);
    board
}

/// Remove the outer `{` and `}` of a commentary block
fn strip_braces(raw: &str) -> Option<String> {
    let text = raw.trim();
    let text = text.strip_prefix('{').unwrap_or(text).trim_end();
    let text = text.strip_suffix('}').unwrap_or(text).trim();
    (!text.is_empty()).then(|| text.to_string())
}
