//! Stage 3: pull parenthetical bid notes out of the auction as footnotes.

use super::{DealRecord, NotedRecord};
use crate::pbn::Footnote;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Count or range + space + suit: "5+ C" -> "5+\Cs"
    static ref RE_COUNT_SUIT: Regex = Regex::new(r"(\d[\d+-]*) ([CDHS])\b").unwrap();
    /// Card rank + suit: "QH" -> "Q\H"
    static ref RE_CARD_SUIT: Regex = Regex::new(r"([KQAJT])([CDHS])\b").unwrap();
    /// Bid reference: "1S" -> "1\S"
    static ref RE_BID_SUIT: Regex = Regex::new(r"(\d)([CDHS])\b").unwrap();
    /// Suit before "keycard", unless already escaped: "H keycard" -> "\H keycard"
    static ref RE_KEYCARD_SUIT: Regex = Regex::new(r"(^|[^\\\w])([CDHS]) (keycard)").unwrap();
    /// "for" + suit: "keycard for C" -> "keycard for \C"
    static ref RE_FOR_SUIT: Regex = Regex::new(r"(for )([CDHS])\b").unwrap();
}

/// Extract footnotes and escape suit letters for every record
pub fn extract_records(records: &[DealRecord]) -> Vec<NotedRecord> {
    records
        .iter()
        .map(|record| {
            let (auction, footnotes) = extract_bid_notes(&record.auction);
            let footnotes = footnotes
                .into_iter()
                .map(|note| Footnote::new(note.number, add_suit_symbols(&note.text)))
                .collect();
            NotedRecord {
                deal: record.deal,
                auction,
                footnotes,
                notes: add_suit_symbols(&record.notes),
            }
        })
        .collect()
}

/// Replace each `(...)` group with an `=N=` marker.
///
/// Nested parentheses stay inside their outer note. Whitespace before the
/// group is dropped so the marker follows its bid with one space.
pub fn extract_bid_notes(auction: &str) -> (String, Vec<Footnote>) {
    let mut cleaned = String::new();
    let mut footnotes = Vec::new();
    let mut rest = auction;

    while let Some(open) = rest.find('(') {
        cleaned.push_str(&rest[..open]);
        let (text, remainder) = split_at_matching_paren(&rest[open + 1..]);

        let number = footnotes.len() as u32 + 1;
        footnotes.push(Footnote::new(number, text));

        cleaned.truncate(cleaned.trim_end().len());
        cleaned.push_str(&format!(" ={}=", number));
        rest = remainder;
    }
    cleaned.push_str(rest);

    let cleaned = cleaned
        .split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    (cleaned, footnotes)
}

/// Split text following an open paren at its matching close paren.
///
/// Unterminated groups run to the end of the input.
fn split_at_matching_paren(s: &str) -> (&str, &str) {
    let mut depth = 1;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return (&s[..i], &s[i + 1..]);
                }
            }
            _ => {}
        }
    }
    (s, "")
}

/// Escape suit letters as PBN suit symbols (`\C`, `\D`, `\H`, `\S`).
///
/// Rules run in order; later rules only see text the earlier ones left
/// alone. Running this on already escaped text changes nothing.
pub fn add_suit_symbols(text: &str) -> String {
    let text = RE_COUNT_SUIT.replace_all(text, r"${1}\${2}s");
    let text = RE_CARD_SUIT.replace_all(&text, r"${1}\${2}");
    let text = RE_BID_SUIT.replace_all(&text, r"${1}\${2}");
    let text = RE_KEYCARD_SUIT.replace_all(&text, r"${1}\${2} ${3}");
    let text = RE_FOR_SUIT.replace_all(&text, r"${1}\${2}");
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{expand_auction, DealId};

    #[test]
    fn test_extract_single_note() {
        let (cleaned, notes) = extract_bid_notes("1C Pass 1D(waiting) Pass Pass Pass");
        assert_eq!(cleaned, "1C Pass 1D =1= Pass Pass Pass");
        assert_eq!(notes, vec![Footnote::new(1, "waiting")]);
    }

    #[test]
    fn test_extract_nested_note() {
        let (cleaned, notes) = extract_bid_notes("2C (shows (at least) 4+ clubs)");
        assert_eq!(cleaned, "2C =1=");
        assert_eq!(notes[0].to_string(), "1:shows (at least) 4+ clubs");
    }

    #[test]
    fn test_extract_numbers_notes_in_order() {
        let (cleaned, notes) =
            extract_bid_notes("1C (16+) Pass 1H  (5+ H) Pass 2NT (balanced) Pass");
        assert_eq!(cleaned, "1C =1= Pass 1H =2= Pass 2NT =3= Pass");
        let numbers: Vec<u32> = notes.iter().map(|n| n.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(notes[1].text, "5+ H");
    }

    #[test]
    fn test_extract_unterminated_note() {
        let (cleaned, notes) = extract_bid_notes("1C Pass 1S (to be continued");
        assert_eq!(cleaned, "1C Pass 1S =1=");
        assert_eq!(notes[0].text, "to be continued");
    }

    #[test]
    fn test_suit_symbol_rules() {
        assert_eq!(add_suit_symbols("5+ C"), "5+\\Cs");
        assert_eq!(add_suit_symbols("4-5 S, 8+ HCP"), "4-5\\Ss, 8+ HCP");
        assert_eq!(add_suit_symbols("QH and KS"), "Q\\H and K\\S");
        assert_eq!(add_suit_symbols("after 1S, bid 3D"), "after 1\\S, bid 3\\D");
        assert_eq!(add_suit_symbols("H keycard"), "\\H keycard");
        assert_eq!(add_suit_symbols("keycard for C"), "keycard for \\C");
        assert_eq!(add_suit_symbols("1-4-4-4, 8+ HCP"), "1-4-4-4, 8+ HCP");
        assert_eq!(add_suit_symbols("shows 4+ diamonds"), "shows 4+ diamonds");
    }

    #[test]
    fn test_suit_symbols_idempotent() {
        for text in [
            "5+ C",
            "QH and KS",
            "after 1S, bid 3D",
            "S keycard ask",
            "asks for H",
            "4 S, denies AH",
            "1-4-4-4, 8+ HCP, 4 H keycard for D",
        ] {
            let once = add_suit_symbols(text);
            assert_eq!(add_suit_symbols(&once), once, "escaping {:?} twice", text);
        }
    }

    #[test]
    fn test_end_to_end_record() {
        let expanded = expand_auction("1C - [P] - 1D(shows 4+ D) - all pass");
        assert_eq!(expanded, "1C Pass 1D(shows 4+ D) Pass Pass Pass");

        let records = vec![DealRecord::new(DealId::new(3), expanded, "Opener has QH")];
        let noted = extract_records(&records);
        assert_eq!(noted[0].auction, "1C Pass 1D =1= Pass Pass Pass");
        assert_eq!(noted[0].footnotes[0].to_string(), "1:shows 4+\\Ds");
        assert_eq!(noted[0].notes, "Opener has Q\\H");
    }
}
