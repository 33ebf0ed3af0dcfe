//! Clipboard output: copy, cut and plain-text copy
//!
//! The core never touches the system clipboard; it returns a [`Cmd`] carrying the bytes.

use crate::commands::{Cmd, DOCUMENT_CLIPBOARD_FORMAT};
use crate::error::EditError;
use crate::export::paragraphs_to_text;
use crate::io::serialize_document;
use crate::messages::ClipboardMsg;
use crate::model::{Document, EditorState, Item, ItemKind};

use super::edit::delete_selection;

pub fn update_clipboard(
    editor: &mut EditorState,
    msg: ClipboardMsg,
) -> Result<Option<Cmd>, EditError> {
    match msg {
        ClipboardMsg::Copy => copy(editor),
        ClipboardMsg::Cut => {
            let cmd = copy(editor)?;
            if cmd.is_some() {
                delete_selection(editor);
            }
            Ok(cmd)
        }
        ClipboardMsg::CopyText => Ok(copy_text(editor)?.map(Cmd::WriteClipboardText)),
    }
}

fn copy(editor: &EditorState) -> Result<Option<Cmd>, EditError> {
    let Some(document) = selection_document(editor) else {
        return Ok(None);
    };
    let data = serialize_document(&document)?;
    tracing::debug!(
        target: "clipboard",
        items = document.content.len(),
        sources = document.sources.len(),
        bytes = data.len(),
        "copied selection"
    );
    Ok(Some(Cmd::WriteClipboard {
        format: DOCUMENT_CLIPBOARD_FORMAT,
        data,
    }))
}

/// The selection as a standalone, grammar-valid document
///
/// A slice that starts inside a paragraph is opened with that paragraph's voice; one that
/// ends inside a paragraph is closed with a break. Only referenced sources are kept.
pub fn selection_document(editor: &EditorState) -> Option<Document> {
    let content = editor.content();
    let sel = editor.selection?.clamped(content.len())?;

    let mut items: Vec<Item> = content[sel.range()].to_vec();
    if !items.first().is_some_and(Item::is_paragraph_start) {
        let (speaker, language) = editor
            .paragraph_voice_at(sel.start_index)
            .unwrap_or_default();
        items.insert(0, Item::new(ItemKind::ParagraphStart { speaker, language }));
    }
    if !items.last().is_some_and(Item::is_paragraph_break) {
        items.push(Item::paragraph_break());
    }

    let mut document = Document::from_content(items).with_sources(editor.document.sources.clone());
    document.prune_sources();
    Some(document)
}

/// Plain text of the selection, `None` without one
pub fn copy_text(editor: &EditorState) -> Result<Option<String>, EditError> {
    if editor.selection.is_none() {
        return Ok(None);
    }
    let paragraphs = editor.selected_paragraphs()?;
    Ok(Some(paragraphs_to_text(
        &paragraphs,
        editor.document.metadata.display_speaker_names,
    )))
}
