//! Plain-text rendering

use crate::model::Paragraph;

/// Paragraph words joined by spaces, paragraphs separated by a blank line
///
/// With `speaker_names` every named paragraph gets a `Speaker:` line above its text.
/// Paragraphs that render to nothing are skipped.
pub fn paragraphs_to_text(paragraphs: &[Paragraph], speaker_names: bool) -> String {
    paragraphs
        .iter()
        .map(|paragraph| {
            let text = paragraph.text();
            match paragraph.speaker.as_deref() {
                Some(speaker) if speaker_names => [format!("{speaker}:"), text]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n"),
                _ => text,
            }
        })
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
