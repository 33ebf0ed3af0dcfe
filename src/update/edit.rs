//! Structural edit operations
//!
//! Each operation checks its preconditions, builds the next content sequence, and
//! commits it in a single step. An error always leaves the editor untouched.

use std::ops::Range;

use crate::commands::Cmd;
use crate::error::EditError;
use crate::messages::EditMsg;
use crate::model::document::empty_content;
use crate::model::grammar::{state_before, GrammarState};
use crate::model::{Cursor, Direction, EditorState, Item, ItemKind};

use super::paste::paste;
use super::selection::set_selection;

/// Handle edit messages
pub fn update_edit(editor: &mut EditorState, msg: EditMsg) -> Result<Option<Cmd>, EditError> {
    match msg {
        EditMsg::InsertParagraphBreak => insert_paragraph_break(editor),
        EditMsg::DeleteParagraphBreak(index) => delete_paragraph_break(editor, index)?,
        EditMsg::DeleteSelection => delete_selection(editor),
        EditMsg::Delete(direction) => delete_directional(editor, direction),
        EditMsg::SetText { index, text } => set_text(editor, index, text)?,
        EditMsg::ReassignParagraph { index, speaker } => {
            reassign_paragraph(editor, index, speaker)?
        }
        EditMsg::RenameSpeaker { old, new } => rename_speaker(editor, old.as_deref(), new),
        EditMsg::Paste(document) => paste(editor, document)?,
    }
    Ok(None)
}

/// Split the paragraph at the cursor; the new paragraph keeps speaker and language
pub fn insert_paragraph_break(editor: &mut EditorState) {
    let split = editor.insertion_index();
    let (speaker, language) = editor.paragraph_voice_at(split).unwrap_or_default();

    let mut content = editor.content().to_vec();
    content.splice(
        split..split,
        [
            Item::paragraph_break(),
            Item::new(ItemKind::ParagraphStart { speaker, language }),
        ],
    );

    editor.commit(content);
    editor.cursor = Cursor::User(split + 2);
    editor.selection = None;
}

/// Merge the paragraph closed by the break at `index` with the following one
///
/// The final break of the document has nothing to merge with and is left alone.
pub fn delete_paragraph_break(editor: &mut EditorState, index: usize) -> Result<(), EditError> {
    match editor.content().get(index) {
        Some(item) if item.is_paragraph_break() => {}
        _ => {
            return Err(EditError::precondition(format!(
                "delete_paragraph_break called on item {} that is not a paragraph break",
                index
            )))
        }
    }
    if index + 1 >= editor.content().len() {
        return Ok(());
    }

    let mut content = editor.content().to_vec();
    content.drain(index..index + 2);
    editor.commit(content);
    editor.cursor = Cursor::User(index);
    editor.selection = None;
    Ok(())
}

/// Remove the selected range and repair the paragraph structure around it
pub fn delete_selection(editor: &mut EditorState) {
    let len = editor.content().len();
    let Some(sel) = editor.selection.and_then(|sel| sel.clamped(len)) else {
        editor.selection = None;
        return;
    };

    let content = delete_range(editor.content(), sel.range());
    if content[..] != editor.content()[..] {
        editor.commit(content);
    }
    editor.cursor = Cursor::User(sel.start_index);
    editor.selection = None;
}

/// `content` without `range`, keeping the paragraph boundaries at its edges
///
/// Every remaining item stays in a paragraph of its old speaker:
/// - when the paragraph open before the range lost its break, that break is put back
/// - when the paragraph continuing after the range lost its start, that start is put back
/// - removing everything leaves the empty document
///
/// A range holding only the boundary between two paragraphs therefore changes nothing;
/// merging paragraphs is [`delete_paragraph_break`]'s job.
pub(crate) fn delete_range(content: &[Item], range: Range<usize>) -> Vec<Item> {
    let start = range.start.min(content.len());
    let end = range.end.clamp(start, content.len());
    let removed = &content[start..end];

    let mut result: Vec<Item> = content[..start].to_vec();
    if state_before(content, start) == GrammarState::InParagraph {
        result.extend(removed.iter().find(|item| item.is_paragraph_break()).cloned());
    }
    if content.get(end).is_some_and(|next| !next.is_paragraph_start()) {
        result.extend(removed.iter().rev().find(|item| item.is_paragraph_start()).cloned());
    }
    result.extend_from_slice(&content[end..]);

    if result.is_empty() {
        result = empty_content();
    }
    result
}

/// Backspace / Delete
///
/// With a selection this deletes it. Otherwise the adjacent item decides:
/// a paragraph boundary merges the two paragraphs right away, while a paragraph item
/// is only selected; pressing again deletes that selection.
pub fn delete_directional(editor: &mut EditorState, direction: Direction) {
    if editor.selection.is_some() {
        delete_selection(editor);
        return;
    }

    let len = editor.content().len();
    let index = match direction {
        Direction::Left => editor.current_index_left(),
        Direction::Right => Some(editor.current_index()),
    };
    let Some(index) = index.filter(|&index| index < len) else {
        return;
    };

    let item = &editor.content()[index];
    if item.is_paragraph_break() {
        if index + 1 < len {
            merge_at(editor, index);
        }
    } else if item.is_paragraph_start() {
        if index > 0 {
            merge_at(editor, index - 1);
        }
    } else {
        set_selection(editor, Some(crate::model::Selection::single(index, direction)));
    }
}

/// Drop the break at `break_index` and the start right after it
fn merge_at(editor: &mut EditorState, break_index: usize) {
    let mut content = editor.content().to_vec();
    content.drain(break_index..break_index + 2);
    editor.commit(content);
    editor.cursor = Cursor::User(break_index);
}

pub fn set_text(editor: &mut EditorState, index: usize, text: String) -> Result<(), EditError> {
    let mut item = match editor.content().get(index) {
        Some(item) if matches!(item.kind, ItemKind::Text { .. }) => item.clone(),
        _ => {
            return Err(EditError::precondition(format!(
                "set_text called on item {} that is not a text",
                index
            )))
        }
    };
    if let ItemKind::Text { text: current, .. } = &mut item.kind {
        *current = text;
    }

    let mut content = editor.content().to_vec();
    content[index] = item;
    editor.commit(content);
    Ok(())
}

pub fn reassign_paragraph(
    editor: &mut EditorState,
    index: usize,
    speaker: Option<String>,
) -> Result<(), EditError> {
    let mut item = match editor.content().get(index) {
        Some(item) if item.is_paragraph_start() => item.clone(),
        _ => {
            return Err(EditError::precondition(format!(
                "reassign_paragraph called on item {} that is not a paragraph_start",
                index
            )))
        }
    };
    if let ItemKind::ParagraphStart { speaker: current, .. } = &mut item.kind {
        *current = speaker;
    }

    let mut content = editor.content().to_vec();
    content[index] = item;
    editor.commit(content);
    Ok(())
}

/// Rewrite every paragraph start spoken by `old`
pub fn rename_speaker(editor: &mut EditorState, old: Option<&str>, new: Option<String>) {
    if !editor
        .content()
        .iter()
        .any(|item| item.speaker() == Some(old))
    {
        return;
    }

    let content = editor
        .content()
        .iter()
        .map(|item| match &item.kind {
            ItemKind::ParagraphStart { speaker, language } if speaker.as_deref() == old => Item {
                id: item.id.clone(),
                kind: ItemKind::ParagraphStart {
                    speaker: new.clone(),
                    language: language.clone(),
                },
            },
            _ => item.clone(),
        })
        .collect();
    editor.commit(content);
}
