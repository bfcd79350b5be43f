pub mod card_extractor;

pub use card_extractor::{extract_cards, parse_marker, CardExtractor, ExtractWarning, ExtractedCard};

use serde::{Deserialize, Serialize};

/// One flashcard lifted out of a markdown file.
///
/// Field order is the serialized order: `id`, `front`, `back`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub front: String,
    pub back: String,
}

impl Card {
    pub fn new<I, F, B>(id: I, front: F, back: B) -> Self
    where
        I: Into<String>,
        F: Into<String>,
        B: Into<String>,
    {
        Self {
            id: id.into(),
            front: front.into(),
            back: back.into(),
        }
    }

    /// Slash-separated parts of the identifier, e.g. `["2023", "11", "25", "card1"]`.
    pub fn id_segments(&self) -> impl Iterator<Item = &str> {
        self.id.split('/')
    }
}
