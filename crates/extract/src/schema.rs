use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Entity categories. Declaration order is the display order in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Band,
    Loc,
    Gpe,
    Org,
    Person,
    Date,
}

impl EntityLabel {
    pub const ALL: [EntityLabel; 6] = [
        Self::Band,
        Self::Loc,
        Self::Gpe,
        Self::Org,
        Self::Person,
        Self::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Band => "BAND",
            Self::Loc => "LOC",
            Self::Gpe => "GPE",
            Self::Org => "ORG",
            Self::Person => "PERSON",
            Self::Date => "DATE",
        }
    }

    /// Parse a recognizer tag. Accepts the long forms some models emit.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_uppercase().as_str() {
            "BAND" => Some(Self::Band),
            "LOC" | "LOCATION" => Some(Self::Loc),
            "GPE" => Some(Self::Gpe),
            "ORG" | "ORGANIZATION" | "ORGANISATION" => Some(Self::Org),
            "PERSON" | "PER" => Some(Self::Person),
            "DATE" => Some(Self::Date),
            _ => None,
        }
    }

    /// LOC and GPE are the categories subject to location verification
    pub fn is_place(&self) -> bool {
        matches!(self, Self::Loc | Self::Gpe)
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recognizer hit inside one sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize, // byte offsets in the sentence
    end: usize,
}

impl Span {
    /// Span whose text is exactly the sentence bytes at `start`
    pub fn new(text: impl Into<String>, label: EntityLabel, start: usize) -> Self {
        let text = text.into();
        let end = start + text.len();
        Self {
            text,
            label,
            start,
            end,
        }
    }

    /// Span covering `range` whose text may differ from the matched bytes
    pub fn covering(text: impl Into<String>, label: EntityLabel, range: Range<usize>) -> Self {
        Self {
            text: text.into(),
            label,
            start: range.start,
            end: range.end,
        }
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

/// A classified entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    #[serde(rename = "type")]
    pub label: EntityLabel,
    pub certain: bool,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel, certain: bool) -> Self {
        Self {
            text: text.into(),
            label,
            certain,
        }
    }
}
