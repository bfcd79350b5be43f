//! Line-oriented extraction of `#card` blocks.
//!
//! ```markdown
//! What is the borrow checker?
//! #card <!--2023/11/25/borrowck-->
//! The part of the compiler that enforces ownership rules.
//! ---
//! ```
//!
//! The line above the marker is the front. Everything after it up to the next
//! `---` line (or the end of the file) is the back.

use crate::card::Card;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Line that ends the back of a card.
pub const SEPARATOR: &str = "---";

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"#card <!--([0-9]{4}/[0-9]{2}/[0-9]{2}/[a-zA-Z0-9]+)-->")
            .expect("marker pattern is a valid regex")
    })
}

/// Returns the card identifier if `line` carries a `#card <!--YYYY/MM/DD/token-->` marker.
pub fn parse_marker(line: &str) -> Option<&str> {
    marker_regex()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Non-fatal problems noticed while extracting a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractWarning {
    /// The marker sits on the first line, so there is no front.
    MissingFront { id: String },
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractWarning::MissingFront { id } => write!(f, "no front for card {}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCard {
    pub card: Card,
    /// 1-based line number of the marker.
    pub line_number: usize,
    pub warning: Option<ExtractWarning>,
}

/// Lazily yields one [`ExtractedCard`] per marker line, top to bottom.
///
/// Every marker scans its own back independently, so two markers inside the
/// same `---` block both capture everything up to that separator.
pub struct CardExtractor<'a> {
    lines: Vec<&'a str>,
    cursor: usize,
}

impl<'a> CardExtractor<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            // `split` keeps the empty element after a trailing newline
            lines: content.split('\n').collect(),
            cursor: 0,
        }
    }

    fn extract_at(&self, index: usize, id: &str) -> ExtractedCard {
        let (front, warning) = match index.checked_sub(1) {
            Some(prev) => (self.lines[prev].to_string(), None),
            None => (
                String::new(),
                Some(ExtractWarning::MissingFront { id: id.to_string() }),
            ),
        };

        let mut back = String::new();
        for line in self.lines[index + 1..]
            .iter()
            .take_while(|line| **line != SEPARATOR)
        {
            back.push_str(line);
            back.push('\n');
        }

        ExtractedCard {
            card: Card::new(id, front, back),
            line_number: index + 1,
            warning,
        }
    }
}

impl Iterator for CardExtractor<'_> {
    type Item = ExtractedCard;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.lines.len() {
            let index = self.cursor;
            self.cursor += 1;

            if let Some(id) = parse_marker(self.lines[index]) {
                return Some(self.extract_at(index, id));
            }
        }
        None
    }
}

pub fn extract_cards(content: &str) -> CardExtractor<'_> {
    CardExtractor::new(content)
}
