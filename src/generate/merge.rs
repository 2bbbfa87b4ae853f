//! Stage 4: merge noted auctions with the reference deal data into boards.

use super::NotedRecord;
use crate::pbn::{find_tag, Board, ReferenceBoards, Seat};
use log::{debug, warn};

/// Bids per auction line (one round of the table)
const BIDS_PER_LINE: usize = 4;

/// Build a board for each record whose board number is in the reference data.
///
/// Records without reference data are skipped with a warning.
pub fn merge_records(records: &[NotedRecord], reference: &ReferenceBoards) -> Vec<Board> {
    let mut boards = Vec::with_capacity(records.len());

    for record in records {
        let base = record.deal.number.to_string();
        let Some(tags) = reference.get(&base) else {
            warn!("No PBN data for board {}", base);
            continue;
        };

        let tag = |name: &str| find_tag(tags, name).unwrap_or("");
        let dealer = find_tag(tags, "Dealer").unwrap_or("N");
        let deal = tag("Deal");

        if deal.chars().next().and_then(Seat::from_char).is_none() {
            warn!("Board {}: Deal {:?} does not start with a seat", base, deal);
        }

        let auction_dealer = Seat::from_pbn(dealer).unwrap_or_else(|| {
            warn!("Board {}: unknown dealer {:?}, using North", base, dealer);
            Seat::North
        });

        let mut board = Board::new(auction_dealer);
        board.set_tag("Event", tag("Event"));
        board.set_tag("Site", tag("Site"));
        board.set_tag("Date", tag("Date"));
        board.set_tag("Board", &record.deal.to_string());
        for player in ["West", "North", "East", "South"] {
            board.set_tag(player, "");
        }
        board.set_tag("Dealer", dealer);
        board.set_tag("Vulnerable", find_tag(tags, "Vulnerable").unwrap_or("None"));
        board.set_tag("Deal", deal);
        for result_tag in ["Scoring", "Declarer", "Contract", "Result"] {
            board.set_tag(result_tag, "");
        }

        board.auction = format_auction_lines(&record.auction);
        board.notes = record.footnotes.iter().map(ToString::to_string).collect();
        if !record.notes.is_empty() {
            board.commentary = Some(record.notes.clone());
        }

        debug!(
            "Board {}: {} auction lines, {} notes",
            record.deal,
            board.auction.len(),
            board.notes.len()
        );
        boards.push(board);
    }

    boards
}

/// Format an auction into lines of four bids.
///
/// A bid followed by its `=N=` marker counts as one bid.
pub fn format_auction_lines(auction: &str) -> Vec<String> {
    let tokens: Vec<&str> = auction.split_whitespace().collect();
    let mut bids: Vec<String> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let mut bid = tokens[i].to_string();
        match tokens.get(i + 1) {
            Some(next) if is_note_marker(next) => {
                bid.push(' ');
                bid.push_str(next);
                i += 2;
            }
            _ => i += 1,
        }
        bids.push(bid);
    }

    bids.chunks(BIDS_PER_LINE)
        .map(|line| line.join(" "))
        .collect()
}

fn is_note_marker(token: &str) -> bool {
    token.len() > 1 && token.starts_with('=') && token.ends_with('=')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::DealId;
    use crate::pbn::{read_document, read_reference, write_document, Footnote};

    const REFERENCE: &str = r#"% PBN 2.1

[Event "Precision 1C Leveled"]
[Site "Club"]
[Date "2024.01.01"]
[Board "3"]
[Dealer "E"]
[Vulnerable "NS"]
[Deal "E:Q7.AKT9.JT3.JT96 J653.QJ8.A.AQ732 K92.654.K954.K84 AT84.732.Q8762.5"]
"#;

    fn noted(deal: DealId) -> NotedRecord {
        NotedRecord {
            deal,
            auction: "Pass 1C =1= Pass 1D =2= Pass 1H Pass 2H Pass Pass Pass".to_string(),
            footnotes: vec![Footnote::new(1, "16+ HCP"), Footnote::new(2, "waiting")],
            notes: "Opener shows 5+\\Hs".to_string(),
        }
    }

    #[test]
    fn test_format_auction_lines() {
        let lines = format_auction_lines("1C =1= Pass 1D =2= Pass 1H Pass Pass Pass");
        assert_eq!(
            lines,
            vec!["1C =1= Pass 1D =2= Pass", "1H Pass Pass Pass"]
        );
        assert!(format_auction_lines("").is_empty());
    }

    #[test]
    fn test_merge_copies_reference_tags() {
        let reference = read_reference(REFERENCE);
        let boards = merge_records(&[noted(DealId::new(3).with_alternate(1))], &reference);
        assert_eq!(boards.len(), 1);

        let board = &boards[0];
        assert_eq!(board.tag("Board"), Some("3-1"));
        assert_eq!(board.tag("Event"), Some("Precision 1C Leveled"));
        assert_eq!(board.tag("Vulnerable"), Some("NS"));
        assert_eq!(board.tag("North"), Some(""));
        assert_eq!(board.tag("Result"), Some(""));
        assert_eq!(board.auction_dealer, Seat::East);
        assert_eq!(board.auction.len(), 3);
        assert_eq!(board.notes, vec!["1:16+ HCP", "2:waiting"]);
        assert_eq!(board.commentary.as_deref(), Some("Opener shows 5+\\Hs"));
    }

    #[test]
    fn test_merge_skips_missing_board() {
        let reference = read_reference(REFERENCE);
        let boards = merge_records(&[noted(DealId::new(9)), noted(DealId::new(3))], &reference);
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].tag("Board"), Some("3"));
    }

    #[test]
    fn test_merged_board_survives_round_trip() {
        let reference = read_reference(REFERENCE);
        let boards = merge_records(&[noted(DealId::new(3))], &reference);
        let pbn = write_document(boards.iter().map(Board::to_pbn));

        let parsed = read_document(&pbn);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].auction_dealer, boards[0].auction_dealer);
        assert_eq!(parsed[0].auction, boards[0].auction);
        assert_eq!(parsed[0].footnotes(), boards[0].footnotes());
        assert_eq!(parsed[0], boards[0]);
    }
}
