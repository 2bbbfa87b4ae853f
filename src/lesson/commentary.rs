//! Step-by-step lesson commentary for the student sitting South.

use super::auction::{Call, SeatCall};
use crate::pbn::Seat;
use std::collections::BTreeMap;

/// A phrasing rule for a footnote text
struct PhraseRule {
    applies: fn(&str) -> bool,
    phrase: fn(&str) -> String,
}

/// Checked top to bottom, first match wins. Several predicates overlap.
const PHRASE_RULES: &[PhraseRule] = &[
    PhraseRule {
        applies: |m| m.is_empty(),
        phrase: |_| String::new(),
    },
    PhraseRule {
        applies: |m| m == "waiting",
        phrase: |_| " waiting".to_string(),
    },
    PhraseRule {
        applies: |m| m == "cue" || m == "cue bid",
        phrase: |_| " showing a control".to_string(),
    },
    PhraseRule {
        applies: |m| m.starts_with("to play"),
        phrase: |m| format!(" {}", m),
    },
    PhraseRule {
        applies: |m| m.ends_with('?'),
        phrase: |m| format!(" asking {}", m),
    },
    PhraseRule {
        applies: |m| m == "sets trump" || m == "set trump",
        phrase: |_| ", setting trump".to_string(),
    },
    PhraseRule {
        applies: |m| m == "sets suit" || m == "set suit",
        phrase: |_| ", setting the suit".to_string(),
    },
    PhraseRule {
        applies: |m| m == "start cuebidding",
        phrase: |_| ", starting cuebidding".to_string(),
    },
    PhraseRule {
        applies: |m| m == "forced",
        phrase: |_| ", forced".to_string(),
    },
    PhraseRule {
        applies: |m| m == "relay",
        phrase: |_| ", a relay".to_string(),
    },
    // Singular only; "keycards" falls through to the later rules
    PhraseRule {
        applies: |m| m.contains("keycard") && !m.contains("keycards"),
        phrase: |m| format!(" asking {}", m),
    },
    PhraseRule {
        applies: |m| m.starts_with("ask"),
        phrase: |m| format!(", asking{}", &m["ask".len()..]),
    },
];

/// Phrase appended to a narration line for a footnote text
pub fn meaning_phrase(meaning: &str) -> String {
    PHRASE_RULES
        .iter()
        .find(|rule| (rule.applies)(meaning))
        .map(|rule| (rule.phrase)(meaning))
        .unwrap_or_else(|| format!(" showing {}", meaning))
}

fn third_person(seat: Seat, call: Call) -> String {
    let name = seat.name();
    match call {
        Call::Pass => format!("{} passes", name),
        Call::Double => format!("{} doubles", name),
        Call::Redouble => format!("{} redoubles", name),
        Call::Bid { .. } => format!("{} bids {}", name, call.display()),
    }
}

fn second_person(call: Call) -> String {
    match call {
        Call::Pass => "You pass".to_string(),
        Call::Double => "You double".to_string(),
        Call::Redouble => "You redouble".to_string(),
        Call::Bid { .. } => format!("You bid {}", call.display()),
    }
}

/// Narrate the auction as South sees it.
///
/// South's calls become a `[BID x]` prompt, the answer and a blank line.
/// An opponent's pass without a footnote is left out.
pub fn narrate(calls: &[SeatCall], footnotes: &BTreeMap<u32, String>) -> Vec<String> {
    let mut lines = Vec::new();

    for seat_call in calls {
        let meaning = seat_call
            .note
            .and_then(|n| footnotes.get(&n))
            .map_or("", String::as_str);
        let phrase = meaning_phrase(meaning);
        let call = seat_call.call;

        match seat_call.seat {
            Seat::South => {
                lines.push(format!("What will you bid now? [BID {}]", call.display()));
                lines.push(format!("{}{}.", second_person(call), phrase));
                lines.push(String::new());
            }
            Seat::North => {
                lines.push(format!("{}{}.", third_person(Seat::North, call), phrase));
            }
            seat @ (Seat::East | Seat::West) => {
                if call == Call::Pass && meaning.is_empty() {
                    continue;
                }
                lines.push(format!("{}{}.", third_person(seat, call), phrase));
            }
        }
    }

    lines
}

/// Assemble the lesson commentary: a title block, then the narration shown
/// to South followed by the board's own commentary shown to both.
pub fn commentary_block(title: &str, narration: &[String], existing: Option<&str>) -> String {
    let body = narration.join("\n");
    let mut block = format!(
        "{{{}}}\n{{[show S]\n\n{}\n\n[show NS]\n\n",
        title,
        body.trim()
    );

    if let Some(text) = existing.map(str::trim).filter(|t| !t.is_empty()) {
        block.push_str(text);
        block.push_str("\n\n");
    }

    block.push('}');
    block
}
