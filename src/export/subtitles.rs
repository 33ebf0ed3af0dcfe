//! WebVTT and SRT subtitle export
//!
//! One cue per non-empty paragraph. A line-length limit splits long paragraphs into
//! several cues before the word that would overflow it.

use std::str::FromStr;

use crate::error::EditError;
use crate::model::{flatten, paragraphs::paragraphs, Item, ItemKind, Paragraph};

pub const SUBTITLE_HEADER: &str = "WEBVTT This file was generated using cutscript";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubtitleFormat {
    #[default]
    Vtt,
    Srt,
}

impl FromStr for SubtitleFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vtt" | "webvtt" => Ok(Self::Vtt),
            "srt" => Ok(Self::Srt),
            other => Err(format!("unknown subtitle format: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleOptions {
    pub format: SubtitleFormat,
    /// Per-word `<timestamp><c>word</c>` tags (WebVTT only)
    pub word_timings: bool,
    pub speaker_names: bool,
    /// Maximum characters per cue, counting word characters only
    pub line_limit: Option<usize>,
}

/// A single subtitle cue; `payload` is already formatted for the target format
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub start: f64,
    pub end: f64,
    pub payload: String,
}

/// Build the cues for `content`
pub fn subtitle_cues(content: &[Item], options: &SubtitleOptions) -> Result<Vec<Cue>, EditError> {
    let timed = match options.line_limit {
        Some(limit) => flatten(&split_long_paragraphs(content, limit)),
        None => flatten(content),
    };
    Ok(paragraphs(&timed)?
        .iter()
        .filter_map(|paragraph| paragraph_to_cue(paragraph, options))
        .collect())
}

/// Render `content` as a subtitle file
pub fn to_subtitles(content: &[Item], options: &SubtitleOptions) -> Result<String, EditError> {
    let cues = subtitle_cues(content, options)?;
    tracing::debug!(target: "export", cues = cues.len(), format = ?options.format, "rendering subtitles");

    let mut blocks = Vec::with_capacity(cues.len() + 1);
    match options.format {
        SubtitleFormat::Vtt => {
            blocks.push(SUBTITLE_HEADER.to_string());
            for cue in &cues {
                blocks.push(format!(
                    "{} --> {}\n{}",
                    format_timestamp(cue.start, '.'),
                    format_timestamp(cue.end, '.'),
                    cue.payload
                ));
            }
        }
        SubtitleFormat::Srt => {
            for (number, cue) in cues.iter().enumerate() {
                blocks.push(format!(
                    "{}\n{} --> {}\n{}",
                    number + 1,
                    format_timestamp(cue.start, ','),
                    format_timestamp(cue.end, ','),
                    cue.payload
                ));
            }
        }
    }
    Ok(blocks.join("\n\n"))
}

/// `hh:mm:ss<sep>mmm`
pub fn format_timestamp(seconds: f64, separator: char) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let secs = (total_ms / 1000) % 60;
    let minutes = (total_ms / 60_000) % 60;
    let hours = total_ms / 3_600_000;
    format!("{hours:02}:{minutes:02}:{secs:02}{separator}{ms:03}")
}

fn split_long_paragraphs(content: &[Item], limit: usize) -> Vec<Item> {
    let mut result = Vec::with_capacity(content.len());
    let mut voice: Option<(Option<String>, Option<String>)> = None;
    let mut current_len = 0;

    for item in content {
        match &item.kind {
            ItemKind::ParagraphStart { speaker, language } => {
                voice = Some((speaker.clone(), language.clone()));
                current_len = 0;
            }
            ItemKind::Text { text, .. } => {
                let len = text.chars().count();
                if current_len > 0 && current_len + len > limit {
                    if let Some((speaker, language)) = &voice {
                        result.push(Item::paragraph_break());
                        result.push(Item::new(ItemKind::ParagraphStart {
                            speaker: speaker.clone(),
                            language: language.clone(),
                        }));
                        current_len = 0;
                    }
                }
                current_len += len;
            }
            _ => {}
        }
        result.push(item.clone());
    }
    result
}

fn paragraph_to_cue(paragraph: &Paragraph, options: &SubtitleOptions) -> Option<Cue> {
    let first = paragraph.items.first()?;
    let last = paragraph.items.last()?;
    let vtt = options.format == SubtitleFormat::Vtt;

    let mut payload = match paragraph.speaker.as_deref().filter(|_| options.speaker_names) {
        Some(speaker) if vtt => format!("<v {}>", escape(speaker)),
        Some(speaker) => format!("{speaker}: "),
        None => String::new(),
    };

    let words: Vec<String> = paragraph
        .items
        .iter()
        .filter_map(|timed| timed.item.as_text().map(|text| (timed, text)))
        .map(|(timed, text)| match (vtt, options.word_timings) {
            (true, true) => format!(
                "<{}><c>{}</c>",
                format_timestamp(timed.absolute_start, '.'),
                escape(text)
            ),
            (true, false) => escape(text),
            (false, _) => text.to_string(),
        })
        .collect();
    payload.push_str(&words.join(" "));

    Some(Cue {
        start: first.absolute_start,
        end: last.absolute_end(),
        payload,
    })
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
