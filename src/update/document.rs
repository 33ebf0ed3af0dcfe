//! Whole-document updates: replacing the open document and metadata toggles

use crate::commands::Cmd;
use crate::error::EditError;
use crate::messages::DocumentMsg;
use crate::model::EditorState;

/// Handle document messages; a malformed replacement leaves the editor untouched
pub fn update_document(
    editor: &mut EditorState,
    msg: DocumentMsg,
) -> Result<Option<Cmd>, EditError> {
    match msg {
        DocumentMsg::Replace(document) => {
            document.validate()?;
            tracing::debug!(
                target: "document",
                items = document.content.len(),
                sources = document.sources.len(),
                "replacing document"
            );
            editor.replace_document(document);
        }
        DocumentMsg::ToggleDisplaySpeakerNames => {
            let metadata = &mut editor.document.metadata;
            metadata.display_speaker_names = !metadata.display_speaker_names;
        }
        DocumentMsg::ToggleDisplayVideo => {
            let metadata = &mut editor.document.metadata;
            metadata.display_video = !metadata.display_video;
        }
    }
    Ok(None)
}
