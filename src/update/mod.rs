//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through [`update`]. Sub-handlers either succeed and leave
//! a committed, grammar-valid document behind, or fail without touching the editor.

mod clipboard;
mod correction;
mod cursor;
mod document;
mod edit;
mod paste;
mod selection;

use tracing::{debug, span, warn, Level};

use crate::commands::Cmd;
use crate::error::EditError;
use crate::messages::{HistoryMsg, Msg};
use crate::model::EditorState;

pub use clipboard::{copy_text, selection_document, update_clipboard};
pub use correction::update_correction;
pub use cursor::{is_paragraph_gap, navigate, skip_paragraph_gap, update_cursor};
pub use document::update_document;
pub use edit::{
    delete_directional, delete_paragraph_break, delete_selection, insert_paragraph_break,
    reassign_paragraph, rename_speaker, set_text, update_edit,
};
pub use paste::paste;
pub use selection::{
    extend_selection, from_anchor_and_head, grow_to_include, move_head_to, select_all,
    set_selection, update_selection,
};

/// Main update function - dispatches to sub-handlers
///
/// Undoable messages that change the document push the pre-edit snapshot onto the
/// history. Rejected messages leave state and history untouched.
pub fn update(editor: &mut EditorState, msg: Msg) -> Result<Option<Cmd>, EditError> {
    let msg_name = msg.name();
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();
    debug!(target: "message", msg = %msg_name, "processing");

    let before = msg.is_undoable().then(|| editor.snapshot());

    let result = update_inner(editor, msg);

    match &result {
        Ok(_) => {
            if let Some(before) = before {
                if !std::sync::Arc::ptr_eq(&before.document.content, &editor.document.content) {
                    editor.history.push(before);
                    debug!(
                        target: "history",
                        undo = editor.history.undo_count(),
                        "recorded snapshot"
                    );
                }
            }
        }
        Err(e) => warn!(target: "message", msg = %msg_name, error = %e, "update rejected"),
    }

    editor.assert_invariants();
    result
}

fn update_inner(editor: &mut EditorState, msg: Msg) -> Result<Option<Cmd>, EditError> {
    match msg {
        Msg::Cursor(m) => Ok(cursor::update_cursor(editor, m)),
        Msg::Selection(m) => Ok(selection::update_selection(editor, m)),
        Msg::Edit(m) => edit::update_edit(editor, m),
        Msg::Clipboard(m) => clipboard::update_clipboard(editor, m),
        Msg::Correction(m) => correction::update_correction(editor, m),
        Msg::Document(m) => document::update_document(editor, m),
        Msg::History(m) => Ok(update_history(editor, m)),
    }
}

fn update_history(editor: &mut EditorState, msg: HistoryMsg) -> Option<Cmd> {
    let current = editor.snapshot();
    let restored = match msg {
        HistoryMsg::Undo => editor.history.undo(current),
        HistoryMsg::Redo => editor.history.redo(current),
    };
    match restored {
        Some(snapshot) => editor.restore(snapshot),
        None => debug!(target: "history", ?msg, "nothing to restore"),
    }
    None
}
