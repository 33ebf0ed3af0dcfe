//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::model::{Document, Selection};

pub use crate::model::Direction;

/// Cursor movement and playback position
#[derive(Debug, Clone, PartialEq)]
pub enum CursorMsg {
    /// Step one addressable item left or right (arrow keys)
    Navigate(Direction),
    /// Place a user cursor at an item index (mouse click)
    SetUserIndex(usize),
    /// Playback position reported by the player
    SetPlayerTime(f64),
    SetPlaying(bool),
    TogglePlaying,
}

/// Selection changes
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionMsg {
    /// Create or grow/shrink the selection at its head (Shift+Arrow)
    Extend(Direction),
    SelectAll,
    /// Extend the selection so it covers an item, keeping its anchor (mouse drag)
    GrowToInclude(usize),
    /// Move the selection head to an index boundary, keeping the anchor (Shift+click)
    MoveHeadTo(usize),
    Set(Option<Selection>),
    Clear,
}

/// Structural edits; every variant here is undoable
#[derive(Debug, Clone, PartialEq)]
pub enum EditMsg {
    /// Split the paragraph at the cursor
    InsertParagraphBreak,
    /// Merge the paragraph ending at this break with the next one
    DeleteParagraphBreak(usize),
    DeleteSelection,
    /// Backspace / Delete: select the adjacent item first, delete on the second press
    Delete(Direction),
    SetText { index: usize, text: String },
    ReassignParagraph { index: usize, speaker: Option<String> },
    RenameSpeaker { old: Option<String>, new: Option<String> },
    /// Insert a sub-document read from the clipboard
    Paste(Document),
}

/// Clipboard output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardMsg {
    Copy,
    Cut,
    /// Copy the selection as plain text
    CopyText,
}

/// Transcript correction of a single source-contiguous span
#[derive(Debug, Clone, PartialEq)]
pub enum CorrectionMsg {
    Start(Direction),
    SetText(String),
    Finish,
    Abort,
}

/// Whole-document operations
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentMsg {
    /// A new document was opened or imported
    Replace(Document),
    ToggleDisplaySpeakerNames,
    ToggleDisplayVideo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMsg {
    Undo,
    Redo,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Cursor(CursorMsg),
    Selection(SelectionMsg),
    Edit(EditMsg),
    Clipboard(ClipboardMsg),
    Correction(CorrectionMsg),
    Document(DocumentMsg),
    History(HistoryMsg),
}

impl Msg {
    /// Whether a document change made by this message is recorded in the undo history
    pub fn is_undoable(&self) -> bool {
        matches!(
            self,
            Msg::Edit(_)
                | Msg::Clipboard(ClipboardMsg::Cut)
                | Msg::Correction(CorrectionMsg::Finish)
        )
    }

    /// Short name for log lines
    pub fn name(&self) -> String {
        match self {
            Msg::Cursor(m) => format!("Cursor::{}", variant_name(m)),
            Msg::Selection(m) => format!("Selection::{}", variant_name(m)),
            Msg::Edit(EditMsg::Paste(doc)) => format!("Edit::Paste({} items)", doc.content.len()),
            Msg::Edit(m) => format!("Edit::{}", variant_name(m)),
            Msg::Clipboard(m) => format!("Clipboard::{:?}", m),
            Msg::Correction(CorrectionMsg::SetText(_)) => "Correction::SetText".to_string(),
            Msg::Correction(m) => format!("Correction::{:?}", m),
            Msg::Document(DocumentMsg::Replace(_)) => "Document::Replace".to_string(),
            Msg::Document(m) => format!("Document::{:?}", m),
            Msg::History(m) => format!("History::{:?}", m),
        }
    }
}

fn variant_name(msg: &impl std::fmt::Debug) -> String {
    let debug = format!("{:?}", msg);
    debug
        .split(|c: char| c == '(' || c == ' ' || c == '{')
        .next()
        .unwrap_or_default()
        .to_string()
}

impl From<CursorMsg> for Msg {
    fn from(msg: CursorMsg) -> Self {
        Msg::Cursor(msg)
    }
}

impl From<SelectionMsg> for Msg {
    fn from(msg: SelectionMsg) -> Self {
        Msg::Selection(msg)
    }
}

impl From<EditMsg> for Msg {
    fn from(msg: EditMsg) -> Self {
        Msg::Edit(msg)
    }
}

impl From<ClipboardMsg> for Msg {
    fn from(msg: ClipboardMsg) -> Self {
        Msg::Clipboard(msg)
    }
}

impl From<CorrectionMsg> for Msg {
    fn from(msg: CorrectionMsg) -> Self {
        Msg::Correction(msg)
    }
}

impl From<DocumentMsg> for Msg {
    fn from(msg: DocumentMsg) -> Self {
        Msg::Document(msg)
    }
}

impl From<HistoryMsg> for Msg {
    fn from(msg: HistoryMsg) -> Self {
        Msg::History(msg)
    }
}
