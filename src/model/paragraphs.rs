//! Paragraph grouping over timed items

use super::document::ItemKind;
use super::timing::TimedItem;
use crate::error::EditError;

/// A paragraph with its timed paragraph items (sentinels excluded)
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub speaker: Option<String>,
    pub language: Option<String>,
    pub absolute_start: f64,
    /// Index of the paragraph's first item (its start sentinel when present)
    pub absolute_index: usize,
    pub items: Vec<TimedItem>,
}

impl Paragraph {
    /// Words of the paragraph joined by single spaces
    pub fn text(&self) -> String {
        self.items
            .iter()
            .filter_map(|timed| timed.item.as_text())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Group `timed` into paragraphs
///
/// Works on slices too: a slice that begins mid-paragraph opens its first paragraph with
/// `leading_speaker`, which must then be `Some`.
pub fn paragraphs_from(
    timed: &[TimedItem],
    leading_speaker: Option<(Option<String>, Option<String>)>,
) -> Result<Vec<Paragraph>, EditError> {
    let mut result = Vec::new();
    let mut open: Option<Paragraph> = leading_speaker.and_then(|(speaker, language)| {
        timed.first().map(|first| Paragraph {
            speaker,
            language,
            absolute_start: first.absolute_start,
            absolute_index: first.absolute_index,
            items: Vec::new(),
        })
    });

    for timed_item in timed {
        match &timed_item.item.kind {
            ItemKind::ParagraphStart { speaker, language } => {
                if let Some(paragraph) = open.take() {
                    result.push(paragraph);
                }
                open = Some(Paragraph {
                    speaker: speaker.clone(),
                    language: language.clone(),
                    absolute_start: timed_item.absolute_start,
                    absolute_index: timed_item.absolute_index,
                    items: Vec::new(),
                });
            }
            ItemKind::ParagraphBreak => {
                if let Some(paragraph) = open.take() {
                    result.push(paragraph);
                }
            }
            _ => match open.as_mut() {
                Some(paragraph) => paragraph.items.push(timed_item.clone()),
                None => return Err(EditError::NoActiveSpeaker(timed_item.absolute_index)),
            },
        }
    }

    if let Some(paragraph) = open {
        result.push(paragraph);
    }
    Ok(result)
}

pub fn paragraphs(timed: &[TimedItem]) -> Result<Vec<Paragraph>, EditError> {
    paragraphs_from(timed, None)
}
