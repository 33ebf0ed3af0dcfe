//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::BTreeMap;

use cutscript::model::{
    same_kinds, validate, Cursor, Document, EditorState, Item, ItemKind, Source,
};

pub fn speaker(name: &str) -> Item {
    Item::paragraph_start(Some(name))
}

pub fn unnamed() -> Item {
    Item::paragraph_start(None)
}

pub fn brk() -> Item {
    Item::paragraph_break()
}

/// `text` item on `source-1`, one second long
pub fn word(text: &str, source_start: f64) -> Item {
    Item::text(text, "source-1", source_start, 1.0)
}

pub fn silence(length: f64) -> Item {
    Item::silence(length)
}

/// Source map with a tiny payload per id
pub fn sources(ids: &[&str]) -> BTreeMap<String, Source> {
    ids.iter()
        .map(|id| (id.to_string(), Source::new(id.as_bytes().to_vec())))
        .collect()
}

/// Document over `content` with every referenced source present
pub fn document(content: Vec<Item>) -> Document {
    let ids: Vec<String> = content
        .iter()
        .filter_map(Item::source)
        .map(str::to_string)
        .collect();
    let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
    Document::from_content(content).with_sources(sources(&ids))
}

/// Editor over `content` with a user cursor at `index`
pub fn editor_at(content: Vec<Item>, index: usize) -> EditorState {
    let mut editor = EditorState::new(document(content));
    editor.cursor = Cursor::User(index);
    editor
}

/// Editor over `content` with a player cursor at `time`
pub fn editor_at_time(content: Vec<Item>, time: f64) -> EditorState {
    let mut editor = EditorState::new(document(content));
    editor.cursor = Cursor::Player(time);
    editor
}

/// `[speaker("Speaker One"), One, Two, Three, break]` with source starts 1, 2, 4
pub fn one_para_three_words() -> Vec<Item> {
    vec![
        speaker("Speaker One"),
        word("One", 1.0),
        word("Two", 2.0),
        word("Three", 4.0),
        brk(),
    ]
}

/// Assert two item sequences match, ignoring ids
#[track_caller]
pub fn assert_kinds(actual: &[Item], expected: &[Item]) {
    assert!(
        same_kinds(actual, expected),
        "content mismatch\n  actual:   {:?}\n  expected: {:?}",
        kinds(actual),
        kinds(expected)
    );
}

#[track_caller]
pub fn assert_valid(editor: &EditorState) {
    if let Err(e) = validate(editor.content()) {
        panic!("invalid content ({e}): {:?}", kinds(editor.content()));
    }
}

pub fn kinds(content: &[Item]) -> Vec<&ItemKind> {
    content.iter().map(|item| &item.kind).collect()
}

/// Speakers of every paragraph start, in order
pub fn speakers(content: &[Item]) -> Vec<Option<&str>> {
    content.iter().filter_map(Item::speaker).collect()
}
