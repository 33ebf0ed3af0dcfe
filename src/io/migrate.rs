//! Manifest versions and the upgrade path to the current item model
//!
//! - v1: a list of paragraphs `{speaker, content: [word | silence | artificial_silence]}`
//! - v2: a flat list where `paragraph_break {speaker}` opens a paragraph, plus headings
//! - v3: the current flat model with explicit start and break sentinels

use serde::Deserialize;
use serde_json::Value;

use crate::error::ArchiveError;
use crate::model::document::empty_content;
use crate::model::{DocumentMetadata, Item, ItemKind};

pub const CURRENT_VERSION: u64 = 3;

#[derive(Deserialize)]
struct V1Document {
    content: Vec<V1Paragraph>,
}

#[derive(Deserialize)]
struct V1Paragraph {
    speaker: Option<String>,
    content: Vec<LegacyItem>,
}

#[derive(Deserialize)]
struct V2Document {
    content: Vec<LegacyItem>,
}

#[derive(Deserialize)]
struct V3Document {
    content: Vec<Item>,
    #[serde(default)]
    metadata: DocumentMetadata,
}

/// Items of the v1 and v2 formats
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum LegacyItem {
    ParagraphBreak {
        speaker: Option<String>,
    },
    Heading {
        text: String,
    },
    Word {
        word: String,
        source: String,
        #[serde(rename = "sourceStart")]
        source_start: f64,
        length: f64,
        #[serde(default = "full_confidence")]
        conf: f64,
    },
    Silence {
        source: String,
        #[serde(rename = "sourceStart")]
        source_start: f64,
        length: f64,
    },
    ArtificialSilence {
        length: f64,
    },
}

fn full_confidence() -> f64 {
    1.0
}

/// Bring a parsed `document.json` up to the current version
///
/// The returned content is not yet validated against the paragraph grammar.
pub fn upgrade_manifest(manifest: Value) -> Result<(Vec<Item>, DocumentMetadata), ArchiveError> {
    let version = manifest
        .get("version")
        .and_then(Value::as_u64)
        .ok_or(ArchiveError::MissingVersion)?;

    match version {
        1 => {
            let v1: V1Document = serde_json::from_value(manifest)?;
            tracing::info!(paragraphs = v1.content.len(), "upgrading v1 document");
            Ok((v2_to_v3(v1_to_v2(v1.content)), DocumentMetadata::default()))
        }
        2 => {
            let v2: V2Document = serde_json::from_value(manifest)?;
            tracing::info!(items = v2.content.len(), "upgrading v2 document");
            Ok((v2_to_v3(v2.content), DocumentMetadata::default()))
        }
        CURRENT_VERSION => {
            let v3: V3Document = serde_json::from_value(manifest)?;
            Ok((v3.content, v3.metadata))
        }
        other => Err(ArchiveError::UnsupportedVersion(other)),
    }
}

fn v1_to_v2(paragraphs: Vec<V1Paragraph>) -> Vec<LegacyItem> {
    let mut items = Vec::new();
    for paragraph in paragraphs {
        items.push(LegacyItem::ParagraphBreak {
            speaker: paragraph.speaker,
        });
        items.extend(paragraph.content);
    }
    items
}

fn v2_to_v3(items: Vec<LegacyItem>) -> Vec<Item> {
    let mut content = Vec::with_capacity(items.len() + 1);
    let mut open = false;

    for item in items {
        let kind = match item {
            LegacyItem::ParagraphBreak { speaker } => {
                if open {
                    content.push(Item::paragraph_break());
                }
                content.push(Item::new(ItemKind::ParagraphStart {
                    speaker,
                    language: None,
                }));
                open = true;
                continue;
            }
            LegacyItem::Heading { text } => {
                tracing::warn!(heading = %text, "dropping heading, headings are no longer supported");
                continue;
            }
            LegacyItem::Word {
                word,
                source,
                source_start,
                length,
                conf,
            } => ItemKind::Text {
                source,
                source_start,
                length,
                text: word,
                conf,
            },
            LegacyItem::Silence {
                source,
                source_start,
                length,
            } => ItemKind::NonText {
                source,
                source_start,
                length,
            },
            LegacyItem::ArtificialSilence { length } => ItemKind::ArtificialSilence { length },
        };

        if !open {
            content.push(Item::paragraph_start(None));
            open = true;
        }
        content.push(Item::new(kind));
    }

    if open {
        content.push(Item::paragraph_break());
    }
    if content.is_empty() {
        return empty_content();
    }
    content
}
