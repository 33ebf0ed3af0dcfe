//! Document model - a flat, grammar-constrained sequence of items bound to media sources
//!
//! Paragraphs are encoded with `ParagraphStart` / `ParagraphBreak` sentinels rather
//! than nesting. Content is shared behind an `Arc<[Item]>`; edits always build a new
//! sequence, so two documents with the same content pointer are guaranteed equal.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::grammar::{self, GrammarViolation};

/// Identifier of a media source inside a document archive
pub type SourceId = String;

/// Immutable, shareable content sequence
pub type Content = Arc<[Item]>;

/// Stable identity token of a single item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Mint a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The payload of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    /// Opens a paragraph spoken by `speaker`
    ParagraphStart {
        speaker: Option<String>,
        #[serde(default)]
        language: Option<String>,
    },
    /// A transcribed word backed by `[source_start, source_start + length)` of `source`
    Text {
        source: SourceId,
        #[serde(rename = "sourceStart")]
        source_start: f64,
        length: f64,
        text: String,
        #[serde(default = "full_confidence")]
        conf: f64,
    },
    /// A source span without transcribed text (noise, pauses)
    NonText {
        source: SourceId,
        #[serde(rename = "sourceStart")]
        source_start: f64,
        length: f64,
    },
    /// Synthetic silence that is not backed by any source
    ArtificialSilence { length: f64 },
    /// Closes the current paragraph
    ParagraphBreak,
}

fn full_confidence() -> f64 {
    1.0
}

/// One unit of the flat document sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "uuid", default)]
    pub id: ItemId,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            kind,
        }
    }

    pub fn paragraph_start(speaker: Option<&str>) -> Self {
        Self::new(ItemKind::ParagraphStart {
            speaker: speaker.map(str::to_string),
            language: None,
        })
    }

    pub fn paragraph_break() -> Self {
        Self::new(ItemKind::ParagraphBreak)
    }

    pub fn text(text: &str, source: &str, source_start: f64, length: f64) -> Self {
        Self::new(ItemKind::Text {
            source: source.to_string(),
            source_start,
            length,
            text: text.to_string(),
            conf: 1.0,
        })
    }

    pub fn non_text(source: &str, source_start: f64, length: f64) -> Self {
        Self::new(ItemKind::NonText {
            source: source.to_string(),
            source_start,
            length,
        })
    }

    pub fn silence(length: f64) -> Self {
        Self::new(ItemKind::ArtificialSilence { length })
    }

    /// Copy of this item carrying a freshly minted id
    pub fn with_fresh_id(&self) -> Self {
        Self::new(self.kind.clone())
    }

    /// Playback duration of this item; zero for paragraph sentinels
    pub fn length(&self) -> f64 {
        match &self.kind {
            ItemKind::Text { length, .. }
            | ItemKind::NonText { length, .. }
            | ItemKind::ArtificialSilence { length } => *length,
            ItemKind::ParagraphStart { .. } | ItemKind::ParagraphBreak => 0.0,
        }
    }

    /// Source id for source-backed items
    pub fn source(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Text { source, .. } | ItemKind::NonText { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn is_paragraph_start(&self) -> bool {
        matches!(self.kind, ItemKind::ParagraphStart { .. })
    }

    pub fn is_paragraph_break(&self) -> bool {
        matches!(self.kind, ItemKind::ParagraphBreak)
    }

    /// True for items that may only occur inside a paragraph
    pub fn is_paragraph_item(&self) -> bool {
        matches!(
            self.kind,
            ItemKind::Text { .. } | ItemKind::NonText { .. } | ItemKind::ArtificialSilence { .. }
        )
    }

    /// Speaker of a paragraph start, `None` for every other item
    pub fn speaker(&self) -> Option<Option<&str>> {
        match &self.kind {
            ItemKind::ParagraphStart { speaker, .. } => Some(speaker.as_deref()),
            _ => None,
        }
    }

    /// Transcribed text of a text item
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// A media file referenced by `text` / `non_text` items
///
/// Decoding and playback handles belong to the host's player; the core only carries the
/// raw bytes so they can be written back to archives and clipboard payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub file_contents: Arc<[u8]>,
}

impl Source {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            file_contents: bytes.into(),
        }
    }
}

/// Display preferences stored alongside the content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub display_speaker_names: bool,
    #[serde(default)]
    pub display_video: bool,
}

/// A transcript document: content, the sources it plays from, and metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub content: Content,
    pub sources: BTreeMap<SourceId, Source>,
    pub metadata: DocumentMetadata,
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    /// A document holding a single empty paragraph without a speaker
    pub fn empty() -> Self {
        Self::from_content(empty_content())
    }

    /// Document without sources; content is not validated
    pub fn from_content(content: Vec<Item>) -> Self {
        Self {
            content: content.into(),
            sources: BTreeMap::new(),
            metadata: DocumentMetadata::default(),
        }
    }

    pub fn with_sources(mut self, sources: BTreeMap<SourceId, Source>) -> Self {
        self.sources = sources;
        self
    }

    pub fn validate(&self) -> Result<(), GrammarViolation> {
        grammar::validate(&self.content)
    }

    /// True for the `[paragraph_start(None), paragraph_break]` placeholder document
    pub fn is_empty_placeholder(&self) -> bool {
        is_empty_placeholder(&self.content)
    }

    /// Ids of every source referenced by the content
    pub fn referenced_sources(&self) -> BTreeSet<&str> {
        self.content.iter().filter_map(Item::source).collect()
    }

    /// Drop every source no item refers to
    pub fn prune_sources(&mut self) {
        let referenced: BTreeSet<String> = self
            .referenced_sources()
            .into_iter()
            .map(str::to_string)
            .collect();
        self.sources.retain(|id, _| referenced.contains(id));
    }

    /// Distinct speaker names in order of first appearance
    pub fn speakers(&self) -> Vec<Option<&str>> {
        let mut speakers: Vec<Option<&str>> = Vec::new();
        for speaker in self.content.iter().filter_map(Item::speaker) {
            if !speakers.contains(&speaker) {
                speakers.push(speaker);
            }
        }
        speakers
    }

    /// Total playback duration in seconds
    pub fn duration(&self) -> f64 {
        self.content.iter().map(Item::length).sum()
    }
}

pub fn empty_content() -> Vec<Item> {
    vec![Item::paragraph_start(None), Item::paragraph_break()]
}

pub fn is_empty_placeholder(content: &[Item]) -> bool {
    matches!(
        content,
        [
            Item {
                kind: ItemKind::ParagraphStart { speaker: None, .. },
                ..
            },
            Item {
                kind: ItemKind::ParagraphBreak,
                ..
            }
        ]
    )
}

/// Compare two item sequences ignoring identity tokens
pub fn same_kinds(a: &[Item], b: &[Item]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.kind == y.kind)
}
