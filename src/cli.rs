//! Command-line interface for inspecting and converting document archives
//!
//! Supports:
//! - Summaries of an archive (items, speakers, sources)
//! - Dumping the coalesced render items
//! - Plain-text and subtitle export
//! - Renaming speakers in place
//! - Creating an empty archive

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::EditorConfig;
use crate::export::{paragraphs_to_text, to_subtitles, SubtitleFormat, SubtitleOptions};
use crate::io::{load_document, save_document};
use crate::messages::EditMsg;
use crate::model::{clip_render_items, Document, EditorState, RenderItem};
use crate::update::update;

/// Transcript-driven audio document tool
#[derive(Parser, Debug)]
#[command(name = "cutscript", version, about = "Transcript-driven audio document tool")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print item, paragraph, speaker and source counts
    Info { archive: PathBuf },

    /// Print the playback segments of a document
    Render {
        archive: PathBuf,
        /// Window start in seconds
        #[arg(long, value_name = "SECONDS")]
        start: Option<f64>,
        /// Window length in seconds
        #[arg(long, value_name = "SECONDS")]
        length: Option<f64>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export the transcript as plain text
    Text {
        archive: PathBuf,
        #[arg(long)]
        speaker_names: bool,
    },

    /// Export subtitles
    Subtitles {
        archive: PathBuf,
        #[arg(long, value_enum, default_value_t = FormatArg::Vtt)]
        format: FormatArg,
        #[arg(long)]
        word_timings: bool,
        #[arg(long)]
        speaker_names: bool,
        /// Split cues longer than N characters
        #[arg(long, value_name = "N")]
        line_limit: Option<usize>,
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Rename a speaker in every paragraph; omit --from to name unnamed paragraphs
    RenameSpeaker {
        archive: PathBuf,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        /// Write to FILE instead of overwriting the archive
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write an empty document
    New { archive: PathBuf },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Vtt,
    Srt,
}

impl From<FormatArg> for SubtitleFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Vtt => SubtitleFormat::Vtt,
            FormatArg::Srt => SubtitleFormat::Srt,
        }
    }
}

impl Command {
    /// Execute the command, writing human-readable output to `out`
    pub fn run(self, config: &EditorConfig, out: &mut impl Write) -> Result<()> {
        match self {
            Command::Info { archive } => {
                let editor = open(&archive, config)?;
                write_info(&editor, out)
            }
            Command::Render {
                archive,
                start,
                length,
                json,
            } => {
                let editor = open(&archive, config)?;
                let mut items = editor.render_items()?;
                if start.is_some() || length.is_some() {
                    let from = start.unwrap_or(0.0);
                    let until = length.map(|l| from + l).unwrap_or(f64::INFINITY);
                    items = clip_render_items(&items, from, until);
                }
                if json {
                    serde_json::to_writer_pretty(&mut *out, &items)?;
                    writeln!(out)?;
                } else {
                    write_render_table(&items, out)?;
                }
                Ok(())
            }
            Command::Text {
                archive,
                speaker_names,
            } => {
                let editor = open(&archive, config)?;
                let speaker_names = speaker_names
                    || config.display_speaker_names
                    || editor.document.metadata.display_speaker_names;
                let text = paragraphs_to_text(&editor.paragraphs()?, speaker_names);
                writeln!(out, "{text}")?;
                Ok(())
            }
            Command::Subtitles {
                archive,
                format,
                word_timings,
                speaker_names,
                line_limit,
                output,
            } => {
                let editor = open(&archive, config)?;
                let defaults = config.subtitle_options();
                let options = SubtitleOptions {
                    format: format.into(),
                    word_timings,
                    speaker_names: speaker_names || defaults.speaker_names,
                    line_limit: line_limit.or(defaults.line_limit),
                };
                let subtitles = to_subtitles(editor.content(), &options)?;
                match output {
                    Some(path) => std::fs::write(&path, subtitles)
                        .with_context(|| format!("Failed to write {}", path.display()))?,
                    None => writeln!(out, "{subtitles}")?,
                }
                Ok(())
            }
            Command::RenameSpeaker {
                archive,
                from,
                to,
                output,
            } => {
                let mut editor = open(&archive, config)?;
                let before = editor.content().clone();
                update(
                    &mut editor,
                    EditMsg::RenameSpeaker {
                        old: from.clone(),
                        new: to.clone(),
                    }
                    .into(),
                )?;
                if std::sync::Arc::ptr_eq(&before, editor.content()) {
                    bail!("No paragraph is spoken by {}", speaker_label(from.as_deref()));
                }
                let target = output.unwrap_or(archive);
                save_document(&editor.document, &target)
                    .with_context(|| format!("Failed to save {}", target.display()))?;
                writeln!(
                    out,
                    "Renamed {} to {}",
                    speaker_label(from.as_deref()),
                    speaker_label(to.as_deref())
                )?;
                Ok(())
            }
            Command::New { archive } => {
                if archive.exists() {
                    bail!("{} already exists", archive.display());
                }
                save_document(&Document::empty(), &archive)
                    .with_context(|| format!("Failed to create {}", archive.display()))?;
                writeln!(out, "Created {}", archive.display())?;
                Ok(())
            }
        }
    }
}

fn open(path: &Path, config: &EditorConfig) -> Result<EditorState> {
    let document =
        load_document(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut editor = EditorState::with_history(document, config.history());
    editor.path = Some(path.to_path_buf());
    Ok(editor)
}

fn speaker_label(speaker: Option<&str>) -> String {
    match speaker {
        Some(name) => format!("\"{name}\""),
        None => "the unnamed speaker".to_string(),
    }
}

fn write_info(editor: &EditorState, out: &mut impl Write) -> Result<()> {
    let document = &editor.document;
    let paragraphs = editor.paragraphs()?;
    let words = document
        .content
        .iter()
        .filter(|item| item.as_text().is_some())
        .count();

    writeln!(out, "items:      {}", document.content.len())?;
    writeln!(out, "paragraphs: {}", paragraphs.len())?;
    writeln!(out, "words:      {}", words)?;
    writeln!(out, "duration:   {:.3}s", editor.duration())?;
    writeln!(out, "speakers:")?;
    for speaker in document.speakers() {
        writeln!(out, "  {}", speaker.unwrap_or("(unnamed)"))?;
    }
    writeln!(out, "sources:")?;
    for (id, source) in &document.sources {
        writeln!(out, "  {} ({} bytes)", id, source.file_contents.len())?;
    }
    Ok(())
}

fn write_render_table(items: &[RenderItem], out: &mut impl Write) -> Result<()> {
    for item in items {
        match item {
            RenderItem::Media {
                absolute_start,
                length,
                source,
                source_start,
                speaker,
            } => writeln!(
                out,
                "{:>10.3} {:>8.3}  media    {}@{:.3}  {}",
                absolute_start,
                length,
                source,
                source_start,
                speaker.as_deref().unwrap_or("-")
            )?,
            RenderItem::Silence {
                absolute_start,
                length,
            } => writeln!(out, "{:>10.3} {:>8.3}  silence", absolute_start, length)?,
        }
    }
    Ok(())
}
