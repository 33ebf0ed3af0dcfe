//! Editor state - document, cursor, selection and the derived views over them

use std::path::PathBuf;
use std::sync::Arc;

use super::cursor::{Cursor, Selection};
use super::document::{Content, Document, Item, ItemKind};
use super::paragraphs::{self, Paragraph};
use super::render::{self, RenderItem};
use super::timing::{self, rough_eq, TimedItem, TimingCache};
use crate::error::EditError;
use crate::history::{EditHistory, EditorSnapshot};

/// Speaker and language of a paragraph
pub type ParagraphVoice = (Option<String>, Option<String>);

/// The complete editing state for one open document
///
/// Derived views are only ever computed from committed content. Update functions build
/// the next content sequence first and assign it in one step via [`EditorState::commit`].
#[derive(Debug, Clone)]
pub struct EditorState {
    pub document: Document,
    /// Archive the document was loaded from, if any
    pub path: Option<PathBuf>,
    pub cursor: Cursor,
    pub selection: Option<Selection>,
    pub playing: bool,
    /// Working text of an in-progress transcript correction
    pub transcript_correction: Option<String>,
    pub history: EditHistory,
    timing: TimingCache,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Document::empty())
    }
}

impl EditorState {
    pub fn new(document: Document) -> Self {
        Self::with_history(document, EditHistory::new())
    }

    pub fn with_history(document: Document, history: EditHistory) -> Self {
        let mut state = Self {
            document,
            path: None,
            cursor: Cursor::User(0),
            selection: None,
            playing: false,
            transcript_correction: None,
            history,
            timing: TimingCache::new(),
        };
        state.cursor = Cursor::User(state.first_valid_index());
        state
    }

    /// Swap in a whole new document, resetting cursor, selection and history
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.cursor = Cursor::User(self.first_valid_index());
        self.selection = None;
        self.playing = false;
        self.transcript_correction = None;
        self.history.clear();
    }

    pub fn content(&self) -> &Content {
        &self.document.content
    }

    /// Replace the content sequence in one step
    pub fn commit(&mut self, content: Vec<Item>) {
        self.document.content = content.into();
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            document: self.document.clone(),
            cursor: self.cursor,
            selection: self.selection,
        }
    }

    pub fn restore(&mut self, snapshot: EditorSnapshot) {
        self.document = snapshot.document;
        self.cursor = snapshot.cursor;
        self.selection = snapshot.selection;
        self.transcript_correction = None;
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// Timed items of the committed content (memoized)
    pub fn timed_items(&self) -> Arc<[TimedItem]> {
        self.timing.get(&self.document.content)
    }

    pub fn duration(&self) -> f64 {
        self.timed_items()
            .last()
            .map(TimedItem::absolute_end)
            .unwrap_or(0.0)
    }

    pub fn render_items(&self) -> Result<Vec<RenderItem>, EditError> {
        render::render_items(&self.timed_items())
    }

    pub fn paragraphs(&self) -> Result<Vec<Paragraph>, EditError> {
        paragraphs::paragraphs(&self.timed_items())
    }

    /// Timed items covered by the selection, empty without one
    pub fn selected_items(&self) -> Vec<TimedItem> {
        let timed = self.timed_items();
        match self.selection.and_then(|sel| sel.clamped(timed.len())) {
            Some(sel) => timed[sel.range()].to_vec(),
            None => Vec::new(),
        }
    }

    /// Render items of the selection slice, speaker seeded from the enclosing paragraph
    pub fn selection_render_items(&self) -> Result<Vec<RenderItem>, EditError> {
        let Some(sel) = self.selection else {
            return Ok(Vec::new());
        };
        let voice = self.paragraph_voice_at(sel.start_index).map(|(speaker, _)| speaker);
        render::render_items_from(&self.selected_items(), voice)
    }

    /// Paragraphs touched by the selection
    pub fn selected_paragraphs(&self) -> Result<Vec<Paragraph>, EditError> {
        let Some(sel) = self.selection else {
            return Ok(Vec::new());
        };
        let items = self.selected_items();
        let leading = match items.first() {
            Some(first) if !first.item.is_paragraph_start() => {
                self.paragraph_voice_at(sel.start_index)
            }
            _ => None,
        };
        paragraphs::paragraphs_from(&items, leading)
    }

    // ========================================================================
    // Cursor resolution
    // ========================================================================

    /// Index of the item under the cursor
    pub fn current_index(&self) -> usize {
        match self.cursor {
            Cursor::User(index) => index,
            Cursor::Player(time) => timing::index_at_time(&self.timed_items(), time).unwrap_or(0),
        }
    }

    /// Index of the item left of the cursor, `None` at document start
    ///
    /// A player cursor strictly inside an item counts that item as being on its left.
    pub fn current_index_left(&self) -> Option<usize> {
        match self.cursor {
            Cursor::User(index) => index.checked_sub(1),
            Cursor::Player(time) => {
                let timed = self.timed_items();
                let index = timing::index_at_time(&timed, time)?;
                match timed.get(index) {
                    Some(item) if !rough_eq(item.absolute_start, time) => Some(index),
                    _ => index.checked_sub(1),
                }
            }
        }
    }

    /// Playback time of the cursor
    pub fn current_time(&self) -> f64 {
        match self.cursor {
            Cursor::Player(time) => time,
            Cursor::User(index) => {
                let timed = self.timed_items();
                match timed.get(index) {
                    Some(item) => item.absolute_start,
                    None => timed.last().map(TimedItem::absolute_end).unwrap_or(0.0),
                }
            }
        }
    }

    /// 1 when content opens with a break (degenerate empty-speaker sentinel), else 0
    pub fn first_valid_index(&self) -> usize {
        match self.document.content.first() {
            Some(item) if item.is_paragraph_break() => 1,
            _ => 0,
        }
    }

    /// Clamp to `[first_valid_index, len - 1]`
    pub fn clamp_user_index(&self, index: usize) -> usize {
        let last = self.document.content.len().saturating_sub(1);
        index.clamp(self.first_valid_index().min(last), last)
    }

    pub fn set_user_index(&mut self, index: usize) {
        self.cursor = Cursor::User(self.clamp_user_index(index));
    }

    /// Speaker and language of the paragraph containing `index`
    ///
    /// Scans back to the nearest paragraph start at or before `index`.
    pub fn paragraph_voice_at(&self, index: usize) -> Option<ParagraphVoice> {
        voice_at(&self.document.content, index)
    }

    /// Position where inserted content lands for the current cursor
    ///
    /// A player cursor splits at the temporal midpoint of the item under it.
    pub fn insertion_index(&self) -> usize {
        let index = match self.cursor {
            Cursor::User(index) => index,
            Cursor::Player(time) => {
                let timed = self.timed_items();
                let index = timing::index_at_time(&timed, time).unwrap_or(0);
                match timed.get(index) {
                    Some(item) if time >= item.absolute_start + item.length() / 2.0 => index + 1,
                    _ => index,
                }
            }
        };
        normalize_insertion_index(&self.document.content, index)
    }

    /// Debug-build check that committed state is well formed
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        debug_assert!(
            self.document.validate().is_ok(),
            "content must satisfy the paragraph grammar: {:?}",
            self.document.validate()
        );
        if let Cursor::User(index) = self.cursor {
            debug_assert!(
                index <= self.document.content.len(),
                "user cursor {} out of range",
                index
            );
        }
        if let Some(sel) = self.selection {
            debug_assert!(sel.length > 0, "selection must not be empty");
            debug_assert!(
                sel.end_index() <= self.document.content.len(),
                "selection {:?} out of range",
                sel
            );
        }
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}

/// Speaker and language of the paragraph containing `index` in `content`
pub fn voice_at(content: &[Item], index: usize) -> Option<ParagraphVoice> {
    let end = (index + 1).min(content.len());
    content[..end].iter().rev().find_map(|item| match &item.kind {
        ItemKind::ParagraphStart { speaker, language } => Some((speaker.clone(), language.clone())),
        _ => None,
    })
}

/// Move an insertion index inside a paragraph: past the end it targets the final
/// break, and on a paragraph start it targets the first slot after it
pub fn normalize_insertion_index(content: &[Item], index: usize) -> usize {
    let Some(last) = content.len().checked_sub(1) else {
        return 0;
    };
    let index = index.min(last);
    if content[index].is_paragraph_start() {
        index + 1
    } else {
        index
    }
}
