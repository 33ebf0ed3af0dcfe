//! Cursor navigation and playback position

use crate::commands::Cmd;
use crate::messages::CursorMsg;
use crate::model::{Cursor, Direction, EditorState, Item};

/// Handle cursor messages
pub fn update_cursor(editor: &mut EditorState, msg: CursorMsg) -> Option<Cmd> {
    match msg {
        CursorMsg::Navigate(direction) => {
            navigate(editor, direction);
            None
        }
        CursorMsg::SetUserIndex(index) => {
            editor.set_user_index(index);
            editor.selection = None;
            None
        }
        CursorMsg::SetPlayerTime(time) => {
            editor.cursor = Cursor::Player(time.max(0.0));
            None
        }
        CursorMsg::SetPlaying(playing) => {
            set_playing(editor, playing);
            None
        }
        CursorMsg::TogglePlaying => {
            let playing = !editor.playing;
            set_playing(editor, playing);
            None
        }
    }
}

/// Start or stop playback; playback always starts from the cursor's time
fn set_playing(editor: &mut EditorState, playing: bool) {
    if playing && editor.cursor.is_user() {
        editor.cursor = Cursor::Player(editor.current_time());
    }
    editor.playing = playing;
}

/// Step one addressable position left or right and switch to a user cursor
pub fn navigate(editor: &mut EditorState, direction: Direction) {
    let target = match direction {
        Direction::Left => match editor.cursor {
            Cursor::User(index) => index.checked_sub(1),
            Cursor::Player(_) => editor.current_index_left(),
        },
        Direction::Right => Some(editor.current_index() + 1),
    };

    let target = target
        .map(|index| skip_paragraph_gap(editor.content(), index, direction))
        .unwrap_or(0);

    editor.set_user_index(target);
    editor.selection = None;
}

/// True if `index` lies between a paragraph break and the following paragraph start
pub fn is_paragraph_gap(content: &[Item], index: usize) -> bool {
    index > 0
        && index < content.len()
        && content[index - 1].is_paragraph_break()
        && content[index].is_paragraph_start()
}

/// Step once more in `direction` if `index` is a zero-width paragraph gap
pub fn skip_paragraph_gap(content: &[Item], index: usize, direction: Direction) -> usize {
    if !is_paragraph_gap(content, index) {
        return index;
    }
    match direction {
        Direction::Left => index - 1,
        Direction::Right => index + 1,
    }
}
