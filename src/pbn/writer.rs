//! PBN document writer.

use super::{Board, TagPair};

/// Header lines opening every generated document
pub const PBN_HEADER: &str = "% PBN 2.1\n% EXPORT\n%Content-type: text/x-pbn; charset=ISO-8859-1\n";

/// Assemble a document from rendered board blocks.
///
/// Each block is followed by a blank line.
pub fn write_document<I, S>(blocks: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut output = String::from(PBN_HEADER);
    output.push('\n');

    for block in blocks {
        output.push_str(block.as_ref());
        output.push('\n');
    }

    output
}

pub(crate) fn push_tag(out: &mut String, name: &str, value: &str) {
    out.push_str(&format!("[{} \"{}\"]\n", name, value));
}

pub(crate) fn push_tags(out: &mut String, tags: &[TagPair]) {
    for tag in tags {
        push_tag(out, &tag.name, &tag.value);
    }
}

/// Auction tag, auction body lines and Note tags
pub(crate) fn push_auction_section(out: &mut String, board: &Board) {
    push_tag(out, "Auction", &board.auction_dealer.to_string());
    for line in &board.auction {
        out.push_str(line);
        out.push('\n');
    }
    for note in &board.notes {
        push_tag(out, "Note", note);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbn::{read_document, Seat};

    fn sample_board() -> Board {
        let mut board = Board::new(Seat::West);
        board.set_tag("Event", "Precision 1C");
        board.set_tag("Board", "7-1");
        board.set_tag("Deal", "W:AKQ2.K.Q75.AT94 K843.T542.J6.863 962.AJ7.KT82.J75 T5.Q9863.A943.KQ");
        board.auction = vec![
            "1C =1= Pass 1H =2= Pass".to_string(),
            "Pass Pass".to_string(),
        ];
        board.notes = vec!["1:16+ HCP".to_string(), "2:5+\\Hs".to_string()];
        board.commentary = Some("Without interference".to_string());
        board
    }

    #[test]
    fn test_write_pbn_header() {
        let pbn = write_document(Vec::<String>::new());
        assert!(pbn.starts_with("% PBN 2.1\n"));
        assert!(pbn.contains("% EXPORT"));
        assert!(pbn.ends_with("ISO-8859-1\n\n"));
    }

    #[test]
    fn test_board_to_pbn() {
        let pbn = sample_board().to_pbn();
        assert!(pbn.contains("[Board \"7-1\"]\n"));
        assert!(pbn.contains("[Auction \"W\"]\n1C =1= Pass 1H =2= Pass\nPass Pass\n"));
        assert!(pbn.contains("[Note \"2:5+\\Hs\"]\n"));
        assert!(pbn.ends_with("{ Without interference }\n"));
    }

    #[test]
    fn test_round_trip() {
        let board = sample_board();
        let pbn = write_document([board.to_pbn()]);
        let boards = read_document(&pbn);

        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0], board);
    }
}
