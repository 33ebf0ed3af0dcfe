//! Render items - minimal contiguous playback segments derived from content
//!
//! This is the only view of a document the playback scheduler and the media export
//! pipeline consume. Output is a point-in-time snapshot; consumers re-derive after
//! every content change.

use serde::Serialize;

use super::document::{ItemKind, SourceId};
use super::timing::{rough_eq, TimedItem};
use crate::error::EditError;

/// A coalesced playable segment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderItem {
    #[serde(rename_all = "camelCase")]
    Media {
        absolute_start: f64,
        length: f64,
        source: SourceId,
        source_start: f64,
        speaker: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Silence { absolute_start: f64, length: f64 },
}

impl RenderItem {
    pub fn absolute_start(&self) -> f64 {
        match self {
            RenderItem::Media { absolute_start, .. } | RenderItem::Silence { absolute_start, .. } => {
                *absolute_start
            }
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            RenderItem::Media { length, .. } | RenderItem::Silence { length, .. } => *length,
        }
    }

    pub fn absolute_end(&self) -> f64 {
        self.absolute_start() + self.length()
    }

    /// Whether `next` continues this segment without a seek or speaker change
    pub fn continues_with(&self, next: &RenderItem) -> bool {
        match (self, next) {
            (
                RenderItem::Media {
                    source,
                    source_start,
                    length,
                    speaker,
                    ..
                },
                RenderItem::Media {
                    source: next_source,
                    source_start: next_start,
                    speaker: next_speaker,
                    ..
                },
            ) => {
                source == next_source
                    && rough_eq(source_start + length, *next_start)
                    && speaker == next_speaker
            }
            (RenderItem::Silence { .. }, RenderItem::Silence { .. }) => true,
            _ => false,
        }
    }

    fn extend_by(&mut self, extra: f64) {
        match self {
            RenderItem::Media { length, .. } | RenderItem::Silence { length, .. } => {
                *length += extra
            }
        }
    }
}

/// Coalesce timed items into render items
///
/// The active speaker is taken from each paragraph start, i.e. it is the speaker of the
/// paragraph being opened. Paragraph boundaries alone do not split segments; only a
/// change of speaker, source or source position does.
pub fn render_items(timed: &[TimedItem]) -> Result<Vec<RenderItem>, EditError> {
    render_items_from(timed, None)
}

/// Like [`render_items`], seeding the active speaker for slices that begin mid-paragraph
pub fn render_items_from(
    timed: &[TimedItem],
    initial_speaker: Option<Option<String>>,
) -> Result<Vec<RenderItem>, EditError> {
    let mut output: Vec<RenderItem> = Vec::new();
    let mut speaker = initial_speaker;

    for timed_item in timed {
        let candidate = match &timed_item.item.kind {
            ItemKind::ParagraphStart { speaker: next, .. } => {
                speaker = Some(next.clone());
                continue;
            }
            ItemKind::ParagraphBreak => continue,
            ItemKind::Text {
                source,
                source_start,
                length,
                ..
            }
            | ItemKind::NonText {
                source,
                source_start,
                length,
            } => {
                let Some(active) = &speaker else {
                    return Err(EditError::NoActiveSpeaker(timed_item.absolute_index));
                };
                RenderItem::Media {
                    absolute_start: timed_item.absolute_start,
                    length: *length,
                    source: source.clone(),
                    source_start: *source_start,
                    speaker: active.clone(),
                }
            }
            ItemKind::ArtificialSilence { length } => {
                if speaker.is_none() {
                    return Err(EditError::NoActiveSpeaker(timed_item.absolute_index));
                }
                RenderItem::Silence {
                    absolute_start: timed_item.absolute_start,
                    length: *length,
                }
            }
        };

        match output.last_mut() {
            Some(open) if open.continues_with(&candidate) => open.extend_by(candidate.length()),
            _ => output.push(candidate),
        }
    }

    Ok(output)
}

/// Trim render items to the time window `[from, until)`
///
/// Items fully outside the window are dropped; partially covered ones are cut and
/// their source position shifted accordingly.
pub fn clip_render_items(items: &[RenderItem], from: f64, until: f64) -> Vec<RenderItem> {
    items
        .iter()
        .filter_map(|item| {
            let start = item.absolute_start().max(from);
            let end = item.absolute_end().min(until);
            if end - start <= 0.0 || rough_eq(start, end) {
                return None;
            }
            let skipped = start - item.absolute_start();
            Some(match item {
                RenderItem::Media {
                    source,
                    source_start,
                    speaker,
                    ..
                } => RenderItem::Media {
                    absolute_start: start,
                    length: end - start,
                    source: source.clone(),
                    source_start: source_start + skipped,
                    speaker: speaker.clone(),
                },
                RenderItem::Silence { .. } => RenderItem::Silence {
                    absolute_start: start,
                    length: end - start,
                },
            })
        })
        .collect()
}
