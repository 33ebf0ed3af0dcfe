//! Benchmarks for the document engine hot paths
//!
//! - flattening content into timed items
//! - render item coalescing
//! - paste and selection delete on large documents
//! - archive serialization
//!
//! Run with: cargo bench document

use std::collections::BTreeMap;

use cutscript::messages::{Direction, EditMsg};
use cutscript::model::{flatten, render_items, Cursor, Document, EditorState, Item, Selection, Source};
use cutscript::update::update;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// `paragraphs` paragraphs of 50 words, alternating two speakers, words contiguous in source
fn make_content(paragraphs: usize) -> Vec<Item> {
    let mut content = Vec::with_capacity(paragraphs * 52);
    let mut source_start = 0.0;
    for p in 0..paragraphs {
        let speaker = if p % 2 == 0 { "Ada" } else { "Grace" };
        content.push(Item::paragraph_start(Some(speaker)));
        for w in 0..50 {
            // every tenth word skips ahead so coalescing has seeks to split on
            if w % 10 == 0 {
                source_start += 0.1;
            }
            content.push(Item::text("word", "interview.wav", source_start, 0.3));
            source_start += 0.3;
        }
        content.push(Item::paragraph_break());
    }
    content
}

fn make_document(paragraphs: usize) -> Document {
    let mut sources = BTreeMap::new();
    sources.insert(
        "interview.wav".to_string(),
        Source::new(vec![0u8; 64 * 1024]),
    );
    Document::from_content(make_content(paragraphs)).with_sources(sources)
}

// ============================================================================
// Derived views
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn flatten_content(bencher: divan::Bencher, paragraphs: usize) {
    let content = make_content(paragraphs);
    bencher.bench_local(|| flatten(divan::black_box(&content)));
}

#[divan::bench(args = [10, 100, 1000])]
fn coalesce_render_items(bencher: divan::Bencher, paragraphs: usize) {
    let timed = flatten(&make_content(paragraphs));
    bencher.bench_local(|| render_items(divan::black_box(&timed)));
}

#[divan::bench(args = [100, 1000])]
fn timed_items_cached(bencher: divan::Bencher, paragraphs: usize) {
    let editor = EditorState::new(make_document(paragraphs));
    editor.timed_items();
    bencher.bench_local(|| editor.timed_items().len());
}

#[divan::bench(args = [100, 1000])]
fn paragraphs_view(bencher: divan::Bencher, paragraphs: usize) {
    let editor = EditorState::new(make_document(paragraphs));
    bencher.bench_local(|| editor.paragraphs().map(|p| p.len()));
}

// ============================================================================
// Edits
// ============================================================================

#[divan::bench(args = [100, 1000])]
fn paste_middle(bencher: divan::Bencher, paragraphs: usize) {
    let clip = make_document(2);
    bencher
        .with_inputs(|| {
            let mut editor = EditorState::new(make_document(paragraphs));
            editor.cursor = Cursor::User(editor.content().len() / 2);
            editor
        })
        .bench_local_values(|mut editor| {
            update(&mut editor, EditMsg::Paste(clip.clone()).into()).map(|_| editor)
        });
}

#[divan::bench(args = [100, 1000])]
fn delete_selection_across_paragraphs(bencher: divan::Bencher, paragraphs: usize) {
    bencher
        .with_inputs(|| {
            let mut editor = EditorState::new(make_document(paragraphs));
            let start = editor.content().len() / 3;
            editor.selection = Some(Selection::new(start, 200, Direction::Right));
            editor
        })
        .bench_local_values(|mut editor| {
            update(&mut editor, EditMsg::DeleteSelection.into()).map(|_| editor)
        });
}

#[divan::bench(args = [100, 1000])]
fn insert_paragraph_break(bencher: divan::Bencher, paragraphs: usize) {
    bencher
        .with_inputs(|| {
            let mut editor = EditorState::new(make_document(paragraphs));
            editor.cursor = Cursor::Player(editor.duration() / 2.0);
            editor
        })
        .bench_local_values(|mut editor| {
            update(&mut editor, EditMsg::InsertParagraphBreak.into()).map(|_| editor)
        });
}

// ============================================================================
// Archives
// ============================================================================

#[divan::bench(args = [10, 100])]
fn serialize_archive(bencher: divan::Bencher, paragraphs: usize) {
    let document = make_document(paragraphs);
    bencher.bench_local(|| cutscript::io::serialize_document(divan::black_box(&document)));
}

#[divan::bench(args = [10, 100])]
fn deserialize_archive(bencher: divan::Bencher, paragraphs: usize) {
    let bytes = cutscript::io::serialize_document(&make_document(paragraphs)).unwrap();
    bencher.bench_local(|| cutscript::io::deserialize_document(divan::black_box(&bytes)));
}
