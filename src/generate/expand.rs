//! Stage 2: expand shorthand auctions into complete call sequences.
//!
//! The shorthand lists only our side's calls separated by ` - `; an
//! opponent's call appears in brackets. Between two of our calls the
//! opponent's pass is implied and gets written out.

use super::DealRecord;
use log::debug;
use std::collections::HashMap;

const SEPARATOR: &str = " - ";
const EN_DASH_SEPARATOR: &str = " \u{2013} ";
const PASS: &str = "Pass";

/// Who made the previous call in the shorthand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastCall {
    /// Our side (unbracketed), so an opponent pass must come next
    OwnSide,
    /// The opponents (bracketed)
    Opponent,
}

/// Expand every record, resolving `Like #N` against the raw auctions
pub fn expand_records(records: &[DealRecord]) -> Vec<DealRecord> {
    let raw_by_deal: HashMap<String, &str> = records
        .iter()
        .map(|r| (r.deal.to_string(), r.auction.as_str()))
        .collect();

    records
        .iter()
        .map(|record| {
            let raw = resolve_reference(&record.auction, &raw_by_deal);
            let expanded = expand_auction(raw);
            debug!("Deal {}: {}", record.deal, expanded);
            DealRecord::new(record.deal, expanded, record.notes.as_str())
        })
        .collect()
}

/// Substitute `Like #N` with deal N's raw auction; unknown references stay as-is
fn resolve_reference<'a>(raw: &'a str, raw_by_deal: &HashMap<String, &'a str>) -> &'a str {
    if !raw.starts_with("Like #") {
        return raw;
    }
    let target = raw.split('#').nth(1).unwrap_or("").trim();
    raw_by_deal.get(target).copied().unwrap_or(raw)
}

/// Expand a raw auction string into a space-joined call sequence ending in three passes
pub fn expand_auction(raw: &str) -> String {
    let normalized = raw.replace(EN_DASH_SEPARATOR, SEPARATOR);

    let mut calls: Vec<String> = Vec::new();
    let mut last = LastCall::OwnSide;

    for (idx, element) in split_elements(&normalized).into_iter().enumerate() {
        let element = element.trim();
        if element.is_empty() {
            continue;
        }

        if element.eq_ignore_ascii_case("all pass") {
            calls.extend(std::iter::repeat(PASS.to_string()).take(3));
            last = LastCall::OwnSide;
        } else if element.starts_with('[') && element.contains(']') {
            calls.push(element.replace('[', "").replace(']', ""));
            last = LastCall::Opponent;
        } else {
            if idx > 0 && last == LastCall::OwnSide {
                calls.push(PASS.to_string());
            }
            calls.push(element.to_string());
            last = LastCall::OwnSide;
        }
    }

    for call in calls.iter_mut() {
        normalize_pass(call);
    }

    while !ends_with_three_passes(&calls.join(" ")) {
        calls.push(PASS.to_string());
    }

    calls.join(" ")
}

/// Split on the separator, never inside parentheses
fn split_elements(auction: &str) -> Vec<&str> {
    let mut elements = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut chars = auction.char_indices();

    while let Some((i, ch)) = chars.next() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            ' ' if depth == 0 && auction[i..].starts_with(SEPARATOR) => {
                elements.push(&auction[start..i]);
                start = i + SEPARATOR.len();
                // Skip the rest of the separator
                chars.nth(SEPARATOR.len() - 2);
            }
            _ => {}
        }
    }

    if start < auction.len() {
        elements.push(&auction[start..]);
    }

    elements
}

/// `P` and `P (...)` / `P(...)` become `Pass`
fn normalize_pass(call: &mut String) {
    if call == "P" || call.starts_with("P ") || call.starts_with("P(") {
        call.replace_range(..1, PASS);
    }
}

/// Split an expanded auction into calls, keeping annotations with their call.
///
/// Whitespace inside parentheses does not split, and a bare `(...)` word
/// belongs to the call before it.
pub(crate) fn split_calls(auction: &str) -> Vec<String> {
    let mut calls: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;

    for ch in auction.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if ch.is_whitespace() && depth == 0 {
            push_call(&mut calls, &mut current);
        } else {
            current.push(ch);
        }
    }
    push_call(&mut calls, &mut current);

    calls
}

fn push_call(calls: &mut Vec<String>, current: &mut String) {
    if current.is_empty() {
        return;
    }
    let word = std::mem::take(current);
    match calls.last_mut() {
        Some(prev) if word.starts_with('(') => {
            prev.push(' ');
            prev.push_str(&word);
        }
        _ => calls.push(word),
    }
}

fn is_pass(call: &str) -> bool {
    call.split('(').next().unwrap_or("").trim() == PASS
}

fn ends_with_three_passes(auction: &str) -> bool {
    let calls = split_calls(auction);
    calls.len() >= 3 && calls[calls.len() - 3..].iter().all(|c| is_pass(c))
}
