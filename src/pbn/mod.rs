//! PBN (Portable Bridge Notation) documents as used by the lesson pipeline.
//!
//! Boards here keep their tags as ordered name/value pairs rather than
//! decoding hands, since every stage only copies or rewrites tag text.

use std::collections::BTreeMap;
use std::fmt;

mod reader;
pub(crate) mod writer;

pub use reader::{parse_tag_pair, read_document, read_reference, ReferenceBoards};
pub use writer::{write_document, PBN_HEADER};

/// A seat at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    North,
    East,
    South,
    West,
}

impl Seat {
    /// Parse a seat from its PBN letter
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Seat::North),
            'E' => Some(Seat::East),
            'S' => Some(Seat::South),
            'W' => Some(Seat::West),
            _ => None,
        }
    }

    /// Parse a seat from a tag value such as `"N"`
    pub fn from_pbn(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Seat::North => 'N',
            Seat::East => 'E',
            Seat::South => 'S',
            Seat::West => 'W',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        }
    }

    /// Next seat clockwise (the next player to call)
    pub fn next(self) -> Self {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }

    /// Seat opposite at the table (180 degree rotation)
    pub fn rotated(self) -> Self {
        match self {
            Seat::North => Seat::South,
            Seat::East => Seat::West,
            Seat::South => Seat::North,
            Seat::West => Seat::East,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A parsed PBN tag pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPair {
    pub name: String,
    pub value: String,
}

impl TagPair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Look up a tag value by name (first occurrence wins)
pub fn find_tag<'a>(tags: &'a [TagPair], name: &str) -> Option<&'a str> {
    tags.iter()
        .find(|tag| tag.name == name)
        .map(|tag| tag.value.as_str())
}

/// An indexed bid annotation, carried in PBN as `[Note "N:text"]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footnote {
    pub number: u32,
    pub text: String,
}

impl Footnote {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// Parse a `N:text` Note value
    pub fn parse(value: &str) -> Option<Self> {
        let (number, text) = value.split_once(':')?;
        let number = number.trim().parse().ok()?;
        Some(Self::new(number, text))
    }
}

impl fmt::Display for Footnote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.number, self.text)
    }
}

/// One board of a tagged document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Metadata tags in document order (everything except Auction and Note)
    pub tags: Vec<TagPair>,
    /// Value of the Auction tag: the seat making the first call
    pub auction_dealer: Seat,
    /// Auction body lines following the Auction tag
    pub auction: Vec<String>,
    /// Note tag values in document order
    pub notes: Vec<String>,
    /// Free-text commentary without its `{ }` wrapper
    pub commentary: Option<String>,
}

impl Board {
    pub fn new(auction_dealer: Seat) -> Self {
        Self {
            tags: Vec::new(),
            auction_dealer,
            auction: Vec::new(),
            notes: Vec::new(),
            commentary: None,
        }
    }

    /// Get a tag value by name
    pub fn tag(&self, name: &str) -> Option<&str> {
        find_tag(&self.tags, name)
    }

    /// Set or update a tag value
    pub fn set_tag(&mut self, name: &str, value: &str) {
        if let Some(tag) = self.tags.iter_mut().find(|tag| tag.name == name) {
            tag.value = value.to_string();
        } else {
            self.tags.push(TagPair::new(name, value));
        }
    }

    /// Footnote texts keyed by number, for Note values of the form `N:text`
    pub fn footnotes(&self) -> BTreeMap<u32, String> {
        self.notes
            .iter()
            .filter_map(|value| Footnote::parse(value))
            .map(|note| (note.number, note.text))
            .collect()
    }

    /// Render the board as PBN text, ending with a newline
    pub fn to_pbn(&self) -> String {
        let mut out = String::new();
        writer::push_tags(&mut out, &self.tags);
        writer::push_auction_section(&mut out, self);
        if let Some(ref text) = self.commentary {
            out.push_str(&format!("{{ {} }}\n", text));
        }
        out
    }
}
