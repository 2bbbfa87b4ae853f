//! Stage 1: split the annotation text into deal records.
//!
//! The auction section is a run of blocks, each opened by `<n>) <auction>`.
//! Two blank lines in a row end the section. Blank-line termination is a
//! heuristic; an incidental double blank inside the section truncates it.

use super::{DealId, DealRecord};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

/// Deals numbered above this end the auction section
pub const DEFAULT_MAX_DEAL: u32 = 40;

lazy_static! {
    static ref RE_DEAL_HEADER: Regex = Regex::new(r"^(\d+)\)\s+(.*)").unwrap();
    static ref RE_ALTERNATE: Regex =
        Regex::new(r"(?i)^(Alternative|Without interference|No interference):\s*(1C\b.*)").unwrap();
    static ref RE_NOTE: Regex = Regex::new(r"^\*?Note:\s*(.*)").unwrap();
}

#[derive(Debug)]
struct DealBlock {
    number: u32,
    auction: String,
    extra_lines: Vec<String>,
}

/// Parse annotation text into one record per deal plus one per alternate line
pub fn normalize_text(text: &str, max_deal: u32) -> Vec<DealRecord> {
    collect_blocks(text, max_deal)
        .iter()
        .flat_map(block_records)
        .collect()
}

fn collect_blocks(text: &str, max_deal: u32) -> Vec<DealBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<DealBlock> = None;
    let mut consecutive_blanks = 0;

    for line in text.lines() {
        let line = line.trim();

        if line.is_empty() {
            consecutive_blanks += 1;
            if consecutive_blanks >= 2 {
                if let Some(block) = current.take() {
                    debug!("Auction section ends after deal {}", block.number);
                    blocks.push(block);
                }
            }
            continue;
        }
        consecutive_blanks = 0;

        // Section already closed by a double blank
        if current.is_none() && !blocks.is_empty() {
            break;
        }

        if let Some(caps) = RE_DEAL_HEADER.captures(line) {
            let number = caps[1].parse().unwrap_or(u32::MAX);
            if number > max_deal {
                break;
            }
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            current = Some(DealBlock {
                number,
                auction: caps[2].trim().to_string(),
                extra_lines: Vec::new(),
            });
        } else if let Some(block) = current.as_mut() {
            block.extra_lines.push(line.to_string());
        }
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    blocks
}

fn block_records(block: &DealBlock) -> Vec<DealRecord> {
    let mut notes: Vec<&str> = Vec::new();
    let mut alternates: Vec<(&str, &str)> = Vec::new();

    for extra in &block.extra_lines {
        if let Some(caps) = RE_ALTERNATE.captures(extra) {
            let label = caps.get(1).map_or("", |m| m.as_str().trim());
            let auction = caps.get(2).map_or("", |m| m.as_str().trim());
            alternates.push((label, auction));
        } else if let Some(caps) = RE_NOTE.captures(extra) {
            notes.push(caps.get(1).map_or("", |m| m.as_str().trim()));
        } else {
            notes.push(extra);
        }
    }

    let deal = DealId::new(block.number);
    let mut records = vec![DealRecord::new(
        deal,
        block.auction.as_str(),
        notes.join(" ").trim(),
    )];

    for (alt, (label, auction)) in (1..).zip(alternates) {
        records.push(DealRecord::new(deal.with_alternate(alt), auction, label));
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Precision 1C auctions

1) 1C - 1D (waiting) - 1H - 2H
Note: Opener has 5+ H
Responder raises with three.
2) 1C - [1S] - X - all pass
Without interference: 1C - 1NT - 3NT
Alternative: 1C - 2C (6+ C) - 3NT
3) Like #1
*Note: Same shape, fewer points.


System summary follows
4) 1C - 1D
";

    #[test]
    fn test_normalize_blocks() {
        let records = normalize_text(SAMPLE, DEFAULT_MAX_DEAL);
        let ids: Vec<String> = records.iter().map(|r| r.deal.to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "2-1", "2-2", "3"]);

        assert_eq!(records[0].auction, "1C - 1D (waiting) - 1H - 2H");
        assert_eq!(
            records[0].notes,
            "Opener has 5+ H Responder raises with three."
        );
        assert_eq!(records[1].notes, "");
        assert_eq!(records[2].auction, "1C - 1NT - 3NT");
        assert_eq!(records[2].notes, "Without interference");
        assert_eq!(records[3].notes, "Alternative");
        assert_eq!(records[4].auction, "Like #1");
        assert_eq!(records[4].notes, "Same shape, fewer points.");
    }

    #[test]
    fn test_deal_number_cap_stops_parsing() {
        let text = "39) 1C - 1D\n41) 1C - 1H\n40) 1C - 1S\n";
        let records = normalize_text(text, DEFAULT_MAX_DEAL);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].deal, DealId::new(39));
    }

    #[test]
    fn test_single_blank_line_keeps_section_open() {
        let text = "1) 1C - 1D\n\n2) 1C - 1H\n";
        let records = normalize_text(text, DEFAULT_MAX_DEAL);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_alternate_needs_1c_auction() {
        let text = "5) 1C - 1S\nAlternative: pass it out\n";
        let records = normalize_text(text, DEFAULT_MAX_DEAL);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].notes, "Alternative: pass it out");
    }
}
