//! Document model - the complete state of an open transcript
//!
//! Leaves first: the grammar automaton, the timing layer, cursor primitives, the
//! render-item coalescer and paragraph grouping. [`EditorState`] ties them together.

pub mod cursor;
pub mod document;
pub mod editor;
pub mod grammar;
pub mod paragraphs;
pub mod render;
pub mod timing;

pub use cursor::{Cursor, Direction, Selection};
pub use document::{
    same_kinds, Content, Document, DocumentMetadata, Item, ItemId, ItemKind, Source, SourceId,
};
pub use editor::{normalize_insertion_index, voice_at, EditorState, ParagraphVoice};
pub use grammar::{validate, GrammarState, GrammarViolation};
pub use paragraphs::Paragraph;
pub use render::{clip_render_items, render_items, RenderItem};
pub use timing::{flatten, index_at_time, rough_eq, TimedItem, TimingCache, EPSILON};
