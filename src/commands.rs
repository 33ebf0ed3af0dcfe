//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The core never talks to the system clipboard or the media player itself.

/// Clipboard format identifier for serialized document archives
pub const DOCUMENT_CLIPBOARD_FORMAT: &str = "application/x-cutscript-document+zip";

/// Commands returned by update functions
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Put a serialized document archive on the clipboard
    WriteClipboard { format: &'static str, data: Vec<u8> },
    /// Put plain text on the clipboard
    WriteClipboardText(String),
    /// Stop the media player (its position is no longer authoritative)
    StopPlayback,
    /// Multiple commands to run
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Combine optional commands, flattening away empty results
    pub fn batch(cmds: impl IntoIterator<Item = Option<Cmd>>) -> Option<Cmd> {
        let mut cmds: Vec<Cmd> = cmds.into_iter().flatten().collect();
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Cmd::Batch(cmds)),
        }
    }
}
