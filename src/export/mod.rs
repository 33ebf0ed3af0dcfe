//! Text and subtitle export over paragraph groupings

mod subtitles;
mod text;

pub use subtitles::{
    format_timestamp, subtitle_cues, to_subtitles, Cue, SubtitleFormat, SubtitleOptions,
    SUBTITLE_HEADER,
};
pub use text::paragraphs_to_text;
