//! Rebuild the seat-by-seat call sequence from an auction body.

use crate::pbn::Seat;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref RE_CONTRACT_BID: Regex = Regex::new(r"^([1-7])(C|D|H|S|NT)$").unwrap();
    static ref RE_NOTE_MARKER: Regex = Regex::new(r"^=(\d+)=$").unwrap();
}

/// Denomination of a contract bid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strain {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    NoTrump,
}

impl Strain {
    fn from_pbn(s: &str) -> Option<Self> {
        match s {
            "C" => Some(Strain::Clubs),
            "D" => Some(Strain::Diamonds),
            "H" => Some(Strain::Hearts),
            "S" => Some(Strain::Spades),
            "NT" => Some(Strain::NoTrump),
            _ => None,
        }
    }

    fn to_pbn(self) -> &'static str {
        match self {
            Strain::Clubs => "C",
            Strain::Diamonds => "D",
            Strain::Hearts => "H",
            Strain::Spades => "S",
            Strain::NoTrump => "NT",
        }
    }
}

/// A call in the auction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Pass,
    Double,
    Redouble,
    Bid { level: u8, strain: Strain },
}

impl Call {
    /// Parse an auction token; a trailing `?` (doubtful call) is ignored
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim_end_matches('?');
        match token.to_ascii_uppercase().as_str() {
            "PASS" | "P" => return Some(Call::Pass),
            "X" => return Some(Call::Double),
            "XX" => return Some(Call::Redouble),
            _ => {}
        }
        let caps = RE_CONTRACT_BID.captures(token)?;
        Some(Call::Bid {
            level: caps[1].parse().ok()?,
            strain: Strain::from_pbn(&caps[2])?,
        })
    }

    /// Lesson display form: suit bids use the PBN suit escape (`2\D`)
    pub fn display(self) -> String {
        match self {
            Call::Pass => "pass".to_string(),
            Call::Double => "X".to_string(),
            Call::Redouble => "XX".to_string(),
            Call::Bid {
                level,
                strain: Strain::NoTrump,
            } => format!("{}NT", level),
            Call::Bid { level, strain } => format!("{}\\{}", level, strain.to_pbn()),
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Call::Pass => write!(f, "Pass"),
            Call::Double => write!(f, "X"),
            Call::Redouble => write!(f, "XX"),
            Call::Bid { level, strain } => write!(f, "{}{}", level, strain.to_pbn()),
        }
    }
}

/// A call with the seat that made it and its footnote number, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatCall {
    pub seat: Seat,
    pub call: Call,
    pub note: Option<u32>,
}

/// Assign seats to the calls of an auction body, starting from the dealer.
///
/// Stops at `or` (an alternative branch) or at the first token that is not
/// a call. Stray `=N=` markers are skipped; a marker right after a call
/// belongs to it.
pub fn reconstruct_auction<S: AsRef<str>>(lines: &[S], dealer: Seat) -> Vec<SeatCall> {
    let tokens: Vec<&str> = lines
        .iter()
        .flat_map(|line| line.as_ref().split_whitespace())
        .collect();

    let mut calls = Vec::new();
    let mut seat = dealer;
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];

        if token.eq_ignore_ascii_case("or") {
            break;
        }
        if RE_NOTE_MARKER.is_match(token) {
            i += 1;
            continue;
        }
        let Some(call) = Call::parse(token) else {
            break;
        };

        let note = tokens.get(i + 1).and_then(|next| note_number(next));
        i += if note.is_some() { 2 } else { 1 };

        calls.push(SeatCall { seat, call, note });
        seat = seat.next();
    }

    calls
}

fn note_number(token: &str) -> Option<u32> {
    RE_NOTE_MARKER
        .captures(token)
        .and_then(|caps| caps[1].parse().ok())
}

/// Drop the closing passes; a pass carrying a footnote is kept
pub fn trim_trailing_passes(mut calls: Vec<SeatCall>) -> Vec<SeatCall> {
    while calls
        .last()
        .is_some_and(|last| last.call == Call::Pass && last.note.is_none())
    {
        calls.pop();
    }
    calls
}
