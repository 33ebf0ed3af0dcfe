//! Selection updates: directional extension, select all, mouse-drag growth
//!
//! The user cursor always follows the selection head.

use crate::commands::Cmd;
use crate::messages::SelectionMsg;
use crate::model::{Cursor, Direction, EditorState, Selection};

use super::cursor::skip_paragraph_gap;

/// Handle selection messages
pub fn update_selection(editor: &mut EditorState, msg: SelectionMsg) -> Option<Cmd> {
    match msg {
        SelectionMsg::Extend(direction) => extend_selection(editor, direction),
        SelectionMsg::SelectAll => select_all(editor),
        SelectionMsg::GrowToInclude(index) => grow_to_include(editor, index),
        SelectionMsg::MoveHeadTo(index) => move_head_to(editor, index),
        SelectionMsg::Set(selection) => {
            let len = editor.content().len();
            set_selection(editor, selection.and_then(|sel| sel.clamped(len)));
        }
        SelectionMsg::Clear => editor.selection = None,
    }
    None
}

/// Replace the selection and move the user cursor to its head
pub fn set_selection(editor: &mut EditorState, selection: Option<Selection>) {
    editor.selection = selection;
    if let Some(sel) = selection {
        editor.cursor = Cursor::User(sel.head_index());
    }
}

/// Shift+Arrow: create a one-item selection, or move the head of the existing one
///
/// The head never stops on a zero-width paragraph gap. Moving the head onto the
/// anchor collapses the selection.
pub fn extend_selection(editor: &mut EditorState, direction: Direction) {
    let len = editor.content().len();

    let Some(sel) = editor.selection else {
        let index = match direction {
            Direction::Left => editor.current_index_left(),
            Direction::Right => Some(editor.current_index()),
        };
        if let Some(index) = index.filter(|&index| index < len) {
            set_selection(editor, Some(Selection::single(index, direction)));
        }
        return;
    };

    let anchor = match sel.head_side {
        Direction::Left => sel.end_index(),
        Direction::Right => sel.start_index,
    };
    let head = sel.head_index();
    let moved = match direction {
        Direction::Left => head.checked_sub(1),
        Direction::Right => Some(head + 1).filter(|&head| head <= len),
    };
    let Some(moved) = moved else {
        return;
    };
    let moved = skip_paragraph_gap(editor.content(), moved, direction).min(len);

    editor.cursor = Cursor::User(moved);
    editor.selection = from_anchor_and_head(anchor, moved);
}

/// Selection between two index boundaries, `None` when they coincide
pub fn from_anchor_and_head(anchor: usize, head: usize) -> Option<Selection> {
    if anchor == head {
        return None;
    }
    let side = if head < anchor {
        Direction::Left
    } else {
        Direction::Right
    };
    Some(Selection::new(anchor.min(head), anchor.abs_diff(head), side))
}

pub fn select_all(editor: &mut EditorState) {
    let len = editor.content().len();
    editor.selection = (len > 0).then(|| Selection::new(0, len, Direction::Left));
}

/// Grow the selection so it fully contains item `index`, preserving the anchor
pub fn grow_to_include(editor: &mut EditorState, index: usize) {
    if index >= editor.content().len() {
        tracing::debug!(target: "selection", index, "grow_to_include out of range, ignored");
        return;
    }
    let next = match editor.selection {
        Some(sel) => sel.grown_to_include(index),
        None => Selection::single(index, Direction::Right),
    };
    set_selection(editor, Some(next));
}

/// Move the head to boundary `index`, anchoring at the cursor when nothing is selected
pub fn move_head_to(editor: &mut EditorState, index: usize) {
    let index = index.min(editor.content().len());
    let anchor = match editor.selection {
        Some(sel) => match sel.head_side {
            Direction::Left => sel.end_index(),
            Direction::Right => sel.start_index,
        },
        None => editor.current_index(),
    };
    editor.selection = from_anchor_and_head(anchor, index);
    editor.cursor = Cursor::User(index);
}
