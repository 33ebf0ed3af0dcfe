//! Transcript correction: retype the words of one contiguous source span
//!
//! The corrected span collapses into a single item covering the whole source range, so
//! word-level timing inside it is lost.

use crate::commands::Cmd;
use crate::error::EditError;
use crate::messages::CorrectionMsg;
use crate::model::{Cursor, Direction, EditorState, Item, ItemKind, RenderItem};

use super::edit::delete_range;
use super::selection::extend_selection;

pub fn update_correction(
    editor: &mut EditorState,
    msg: CorrectionMsg,
) -> Result<Option<Cmd>, EditError> {
    match msg {
        CorrectionMsg::Start(direction) => start(editor, direction),
        CorrectionMsg::SetText(text) => {
            editor.transcript_correction = Some(text);
            Ok(None)
        }
        CorrectionMsg::Finish => {
            finish(editor)?;
            Ok(None)
        }
        CorrectionMsg::Abort => {
            editor.transcript_correction = None;
            Ok(None)
        }
    }
}

/// Begin correcting the selection, or the adjacent item when nothing is selected
fn start(editor: &mut EditorState, direction: Direction) -> Result<Option<Cmd>, EditError> {
    let previous = (editor.cursor, editor.selection);
    if editor.selection.is_none() {
        extend_selection(editor, direction);
    }

    let text = match correction_text(editor) {
        Ok(text) => text,
        Err(e) => {
            (editor.cursor, editor.selection) = previous;
            return Err(e);
        }
    };

    tracing::debug!(target: "correction", %text, "starting transcript correction");
    editor.transcript_correction = Some(text);
    let was_playing = std::mem::replace(&mut editor.playing, false);
    Ok(was_playing.then_some(Cmd::StopPlayback))
}

/// Words of the selection joined by spaces, if the selection can be corrected
fn correction_text(editor: &EditorState) -> Result<String, EditError> {
    let items = editor.selected_items();
    if items.is_empty() {
        return Err(EditError::Correction("needs a selection"));
    }
    if items.iter().any(|timed| !timed.item.is_paragraph_item()) {
        return Err(EditError::Correction(
            "can't be performed on selections spanning multiple paragraphs",
        ));
    }
    match editor.selection_render_items()?.as_slice() {
        [RenderItem::Media { .. }] => {}
        _ => {
            return Err(EditError::Correction(
                "can only be performed on selections that are continuous from the same audio source",
            ))
        }
    }

    Ok(items
        .iter()
        .filter_map(|timed| timed.item.as_text())
        .collect::<Vec<_>>()
        .join(" "))
}

/// Replace the selection with one item carrying the corrected text
fn finish(editor: &mut EditorState) -> Result<(), EditError> {
    let Some(text) = editor.transcript_correction.clone() else {
        return Ok(());
    };
    if text == correction_text(editor)? {
        editor.transcript_correction = None;
        return Ok(());
    }

    let Some(sel) = editor.selection else {
        return Err(EditError::Correction("needs a selection"));
    };
    let items = editor.selected_items();
    let Some(first) = items.first() else {
        return Err(EditError::Correction("needs a selection"));
    };
    let (source, source_start) = match &first.item.kind {
        ItemKind::Text {
            source,
            source_start,
            ..
        }
        | ItemKind::NonText {
            source,
            source_start,
            ..
        } => (source.clone(), *source_start),
        _ => {
            return Err(EditError::Correction(
                "can only be performed on selections that are continuous from the same audio source",
            ))
        }
    };
    let length: f64 = items.iter().map(|timed| timed.length()).sum();

    let kind = if text.trim().is_empty() {
        ItemKind::NonText {
            source,
            source_start,
            length,
        }
    } else {
        ItemKind::Text {
            source,
            source_start,
            length,
            text,
            conf: 1.0,
        }
    };
    let replacement = Item {
        id: first.item.id.clone(),
        kind,
    };

    let mut content = delete_range(editor.content(), sel.range());
    content.insert(sel.start_index, replacement);

    tracing::debug!(
        target: "correction",
        index = sel.start_index,
        replaced = sel.length,
        "transcript correction applied"
    );
    editor.commit(content);
    editor.cursor = Cursor::User(sel.start_index);
    editor.selection = None;
    editor.transcript_correction = None;
    Ok(())
}
