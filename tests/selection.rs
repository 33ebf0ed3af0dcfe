//! Selection tests: directional extension, select all, mouse-drag growth, derived views

mod common;

use common::*;
use cutscript::messages::{Direction, SelectionMsg};
use cutscript::model::{Cursor, EditorState, Item, RenderItem, Selection};
use cutscript::update::update;

/// `[start, s, s, s, break, start, s, s, s, break]`, one second per silence
fn two_paragraphs() -> Vec<Item> {
    let mut content = vec![speaker("paragraph_01")];
    content.extend((0..3).map(|_| silence(1.0)));
    content.push(brk());
    content.push(speaker("paragraph_02"));
    content.extend((0..3).map(|_| silence(1.0)));
    content.push(brk());
    content
}

fn with_selection(index: usize, selection: Selection) -> EditorState {
    let mut editor = editor_at(two_paragraphs(), index);
    editor.selection = Some(selection);
    editor
}

fn extend(editor: &mut EditorState, direction: Direction) {
    update(editor, SelectionMsg::Extend(direction).into()).unwrap();
}

// ============================================================================
// Extend left
// ============================================================================

#[test]
fn test_extend_left_without_selection_selects_item_left_of_cursor() {
    let mut editor = editor_at(two_paragraphs(), 3);
    extend(&mut editor, Direction::Left);
    assert_eq!(editor.selection, Some(Selection::new(2, 1, Direction::Left)));
    assert_eq!(editor.cursor, Cursor::User(2));
}

#[test]
fn test_extend_left_grows_left_headed_selection() {
    let mut editor = with_selection(3, Selection::new(3, 1, Direction::Left));
    extend(&mut editor, Direction::Left);
    assert_eq!(editor.selection, Some(Selection::new(2, 2, Direction::Left)));
    assert_eq!(editor.cursor, Cursor::User(2));
}

#[test]
fn test_extend_left_shrinks_right_headed_selection() {
    let mut editor = with_selection(4, Selection::new(2, 2, Direction::Right));
    extend(&mut editor, Direction::Left);
    assert_eq!(editor.selection, Some(Selection::new(2, 1, Direction::Right)));
    assert_eq!(editor.cursor, Cursor::User(3));
}

#[test]
fn test_extend_left_collapses_single_right_headed_selection() {
    let mut editor = with_selection(3, Selection::new(2, 1, Direction::Right));
    extend(&mut editor, Direction::Left);
    assert_eq!(editor.selection, None);
    assert_eq!(editor.cursor, Cursor::User(2));
}

#[test]
fn test_extend_left_from_player_time() {
    for time in [1.1, 1.4, 1.5, 1.7, 2.0] {
        let mut editor = editor_at_time(two_paragraphs(), time);
        extend(&mut editor, Direction::Left);
        assert_eq!(
            editor.selection,
            Some(Selection::new(2, 1, Direction::Left)),
            "player time {time}"
        );
        assert_eq!(editor.cursor, Cursor::User(2));
    }
}

#[test]
fn test_extend_left_across_paragraph_gap_takes_both_sentinels() {
    let mut editor = with_selection(6, Selection::new(6, 1, Direction::Left));
    extend(&mut editor, Direction::Left);
    assert_eq!(editor.selection, Some(Selection::new(4, 3, Direction::Left)));
    assert_eq!(editor.cursor, Cursor::User(4));
}

#[test]
fn test_extend_left_at_document_start_is_noop() {
    let selection = Selection::new(0, 2, Direction::Left);
    let mut editor = with_selection(0, selection);
    extend(&mut editor, Direction::Left);
    assert_eq!(editor.selection, Some(selection));
}

// ============================================================================
// Extend right
// ============================================================================

#[test]
fn test_extend_right_without_selection_selects_item_under_cursor() {
    let mut editor = editor_at(two_paragraphs(), 2);
    extend(&mut editor, Direction::Right);
    assert_eq!(editor.selection, Some(Selection::new(2, 1, Direction::Right)));
    assert_eq!(editor.cursor, Cursor::User(3));
}

#[test]
fn test_extend_right_grows_right_headed_selection() {
    let mut editor = with_selection(2, Selection::new(1, 1, Direction::Right));
    extend(&mut editor, Direction::Right);
    assert_eq!(editor.selection, Some(Selection::new(1, 2, Direction::Right)));
    assert_eq!(editor.cursor, Cursor::User(3));
}

#[test]
fn test_extend_right_selects_paragraph_break_as_own_item() {
    let mut editor = editor_at(two_paragraphs(), 4);
    extend(&mut editor, Direction::Right);
    assert_eq!(editor.selection, Some(Selection::new(4, 1, Direction::Right)));
    assert_eq!(editor.cursor, Cursor::User(5));
}

#[test]
fn test_extend_right_across_paragraph_gap_takes_both_sentinels() {
    let mut editor = with_selection(4, Selection::new(3, 1, Direction::Right));
    extend(&mut editor, Direction::Right);
    assert_eq!(editor.selection, Some(Selection::new(3, 3, Direction::Right)));
    assert_eq!(editor.cursor, Cursor::User(6));
}

#[test]
fn test_extend_right_shrinks_left_headed_selection() {
    let mut editor = with_selection(2, Selection::new(2, 2, Direction::Left));
    extend(&mut editor, Direction::Right);
    assert_eq!(editor.selection, Some(Selection::new(3, 1, Direction::Left)));
    assert_eq!(editor.cursor, Cursor::User(3));
}

#[test]
fn test_extend_right_collapses_single_left_headed_selection() {
    let mut editor = with_selection(2, Selection::new(2, 1, Direction::Left));
    extend(&mut editor, Direction::Right);
    assert_eq!(editor.selection, None);
    assert_eq!(editor.cursor, Cursor::User(3));
}

#[test]
fn test_extend_right_from_player_time() {
    for time in [1.0, 1.1, 1.4, 1.5, 1.7] {
        let mut editor = editor_at_time(two_paragraphs(), time);
        extend(&mut editor, Direction::Right);
        assert_eq!(
            editor.selection,
            Some(Selection::new(2, 1, Direction::Right)),
            "player time {time}"
        );
        assert_eq!(editor.cursor, Cursor::User(3));
    }
}

#[test]
fn test_extend_right_at_document_end_is_noop() {
    let selection = Selection::new(8, 2, Direction::Right);
    let mut editor = with_selection(10, selection);
    extend(&mut editor, Direction::Right);
    assert_eq!(editor.selection, Some(selection));

    let mut editor = editor_at(two_paragraphs(), 10);
    extend(&mut editor, Direction::Right);
    assert_eq!(editor.selection, None);
}

#[test]
fn test_selection_changes_are_not_undoable() {
    let mut editor = editor_at(two_paragraphs(), 2);
    extend(&mut editor, Direction::Right);
    extend(&mut editor, Direction::Right);
    update(&mut editor, SelectionMsg::SelectAll.into()).unwrap();
    assert!(!editor.history.can_undo());
}

// ============================================================================
// Select all, set, clear
// ============================================================================

#[test]
fn test_select_all() {
    let mut editor = editor_at(two_paragraphs(), 3);
    update(&mut editor, SelectionMsg::SelectAll.into()).unwrap();
    assert_eq!(editor.selection, Some(Selection::new(0, 10, Direction::Left)));
}

#[test]
fn test_set_clamps_to_content() {
    let mut editor = editor_at(two_paragraphs(), 0);
    update(
        &mut editor,
        SelectionMsg::Set(Some(Selection::new(8, 5, Direction::Right))).into(),
    )
    .unwrap();
    assert_eq!(editor.selection, Some(Selection::new(8, 2, Direction::Right)));
    assert_eq!(editor.cursor, Cursor::User(10));

    update(
        &mut editor,
        SelectionMsg::Set(Some(Selection::new(20, 1, Direction::Right))).into(),
    )
    .unwrap();
    assert_eq!(editor.selection, None);
}

#[test]
fn test_clear() {
    let mut editor = with_selection(2, Selection::new(1, 2, Direction::Left));
    update(&mut editor, SelectionMsg::Clear.into()).unwrap();
    assert_eq!(editor.selection, None);
}

// ============================================================================
// Grow to include (mouse drag)
// ============================================================================

#[test]
fn test_grow_to_include_right() {
    let mut editor = with_selection(0, Selection::new(0, 2, Direction::Left));
    update(&mut editor, SelectionMsg::GrowToInclude(4).into()).unwrap();
    assert_eq!(editor.selection, Some(Selection::new(0, 5, Direction::Right)));
    assert_eq!(editor.cursor, Cursor::User(5));
}

#[test]
fn test_grow_to_include_left() {
    let mut editor = with_selection(4, Selection::new(4, 2, Direction::Left));
    update(&mut editor, SelectionMsg::GrowToInclude(0).into()).unwrap();
    assert_eq!(editor.selection, Some(Selection::new(0, 6, Direction::Left)));
    assert_eq!(editor.cursor, Cursor::User(0));
}

#[test]
fn test_grow_to_include_inside_selection_is_unchanged() {
    let selection = Selection::new(4, 2, Direction::Left);
    let mut editor = with_selection(4, selection);
    update(&mut editor, SelectionMsg::GrowToInclude(5).into()).unwrap();
    assert_eq!(editor.selection, Some(selection));
}

#[test]
fn test_grow_to_include_without_selection() {
    let mut editor = editor_at(two_paragraphs(), 0);
    update(&mut editor, SelectionMsg::GrowToInclude(2).into()).unwrap();
    assert_eq!(editor.selection, Some(Selection::new(2, 1, Direction::Right)));
}

#[test]
fn test_grow_to_include_is_idempotent() {
    let mut editor = with_selection(3, Selection::new(3, 1, Direction::Right));
    for _ in 0..3 {
        update(&mut editor, SelectionMsg::GrowToInclude(7).into()).unwrap();
    }
    assert_eq!(editor.selection, Some(Selection::new(3, 5, Direction::Right)));
}

#[test]
fn test_move_head_to_keeps_anchor() {
    let mut editor = with_selection(3, Selection::new(3, 2, Direction::Right));
    update(&mut editor, SelectionMsg::MoveHeadTo(1).into()).unwrap();
    assert_eq!(editor.selection, Some(Selection::new(1, 2, Direction::Left)));
    assert_eq!(editor.cursor, Cursor::User(1));
}

// ============================================================================
// Derived views over the selection
// ============================================================================

#[test]
fn test_selected_items_keep_document_timing() {
    let editor = with_selection(0, Selection::new(2, 2, Direction::Left));
    let items = editor.selected_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].absolute_index, 2);
    assert_eq!(items[0].absolute_start, 1.0);
}

#[test]
fn test_selection_render_items_coalesce() {
    let editor = with_selection(0, Selection::new(1, 2, Direction::Left));
    assert_eq!(
        editor.selection_render_items().unwrap(),
        vec![RenderItem::Silence {
            absolute_start: 0.0,
            length: 2.0
        }]
    );
}

#[test]
fn test_selection_render_items_mid_paragraph_uses_enclosing_speaker() {
    let content = vec![
        speaker("Ada"),
        word("one", 0.0),
        word("two", 1.0),
        brk(),
    ];
    let mut editor = editor_at(content, 0);
    editor.selection = Some(Selection::new(2, 1, Direction::Right));
    let items = editor.selection_render_items().unwrap();
    assert!(matches!(
        &items[..],
        [RenderItem::Media { speaker: Some(name), .. }] if name == "Ada"
    ));
}

#[test]
fn test_selected_paragraphs_span_boundary() {
    let editor = with_selection(0, Selection::new(2, 5, Direction::Left));
    let paragraphs = editor.selected_paragraphs().unwrap();
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].speaker.as_deref(), Some("paragraph_01"));
    assert_eq!(paragraphs[0].items.len(), 2);
    assert_eq!(paragraphs[1].speaker.as_deref(), Some("paragraph_02"));
    assert_eq!(paragraphs[1].items.len(), 1);
}
