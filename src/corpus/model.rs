//! Record types for the corpus document.
//!
//! Field names follow the JSON document layout (`shlokas`, `key_events`,
//! `shloka_number`, ...) through serde renames; the Rust names describe what
//! the field holds. Every field except the identifying numbers is optional in
//! the document and defaults to an empty value.

use serde::{Deserialize, Serialize};

/// A life problem and the verses held up as relevant to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// The problem key (e.g. `"anger"`). Filled from the map key on load.
    #[serde(skip_deserializing)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    /// Ordered references. They need not resolve to a loaded verse.
    #[serde(default)]
    pub references: Vec<Reference>,
}

/// A pointer to a `(chapter, verse)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reference {
    pub chapter: u32,
    #[serde(rename = "shloka")]
    pub verse: u32,
}

impl Reference {
    pub fn new(chapter: u32, verse: u32) -> Self {
        Self { chapter, verse }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.chapter, self.verse)
    }
}

/// A chapter with its verses and narrative annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub main_theme: String,
    #[serde(default)]
    pub philosophical_aspects: Vec<String>,
    #[serde(default)]
    pub life_problems_addressed: Vec<String>,
    #[serde(default)]
    pub yoga_type: String,
    #[serde(default, rename = "shlokas")]
    pub verses: Vec<Verse>,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default, rename = "character_relationships")]
    pub relationships: Vec<CharacterRelationship>,
    #[serde(default, rename = "key_events")]
    pub events: Vec<Event>,
}

impl Chapter {
    /// Look up a verse by its number within this chapter.
    pub fn verse(&self, number: u32) -> Option<&Verse> {
        self.verses.iter().find(|v| v.number == number)
    }

    /// Look up a character by exact name.
    pub fn character(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }
}

/// A single verse ("shloka").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    /// Number of the enclosing chapter. Filled on load.
    #[serde(skip_deserializing)]
    pub chapter: u32,
    #[serde(rename = "shloka_number")]
    pub number: u32,
    #[serde(default)]
    pub sanskrit_text: String,
    #[serde(default)]
    pub transliteration: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub interpretation: String,
    #[serde(default)]
    pub life_application: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Verse {
    pub fn reference(&self) -> Reference {
        Reference::new(self.chapter, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRelationship {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub description: String,
}

impl CharacterRelationship {
    /// Whether `name` occurs in either endpoint name (substring match).
    pub fn involves(&self, name: &str) -> bool {
        self.from.contains(name) || self.to.contains(name)
    }
}

/// A key event of a chapter, tying characters to the verses that narrate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "event")]
    pub description: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default, rename = "shlokas")]
    pub verses: Vec<u32>,
}

impl Event {
    pub fn features(&self, character: &str) -> bool {
        self.characters.iter().any(|c| c == character)
    }
}
