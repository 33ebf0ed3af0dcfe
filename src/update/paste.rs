//! Paste / merge of a clipboard sub-document into the open document
//!
//! The incoming block is fused with its neighbours at both ends. At the start:
//!
//! | content before the insertion point | incoming block                          |
//! |------------------------------------|-----------------------------------------|
//! | between paragraphs                 | kept as is                              |
//! | open paragraph, same speaker       | leading paragraph start dropped         |
//! | open paragraph, other speaker      | paragraph break inserted before it      |
//!
//! At the end, when the content after the insertion point is:
//!
//! | content after the insertion point  | incoming block                          |
//! |------------------------------------|-----------------------------------------|
//! | nothing, or a paragraph start      | kept as is                              |
//! | a paragraph break                  | trailing break dropped                  |
//! | a paragraph item, same speaker     | trailing break dropped                  |
//! | a paragraph item, other speaker    | start carrying that speaker appended    |
//!
//! A selection is replaced in place: the items before and after it decide the fusion, so
//! copying a selection and pasting it over itself gives back the same content. A caret
//! paste also joins the paragraph that follows when its speaker matches the incoming last
//! paragraph, both from between paragraphs and from a paragraph's final break.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::error::EditError;
use crate::model::grammar::{self, state_before};
use crate::model::{
    document::is_empty_placeholder, voice_at, Cursor, Document, EditorState, GrammarState, Item,
    ItemKind, ParagraphVoice, Source, SourceId,
};

/// Insert `incoming` at the cursor, replacing the selection
pub fn paste(editor: &mut EditorState, incoming: Document) -> Result<(), EditError> {
    if incoming.content.is_empty() {
        tracing::debug!(target: "paste", "empty clipboard document, nothing to paste");
        return Ok(());
    }
    grammar::validate(&incoming.content)?;

    let mut sources = editor.document.sources.clone();
    for (id, source) in &incoming.sources {
        sources
            .entry(id.clone())
            .or_insert_with(|| source.clone());
    }
    check_sources(&incoming.content, &sources)?;

    let block: Vec<Item> = incoming.content.iter().map(Item::with_fresh_id).collect();
    let content = editor.content();
    let selection = editor.selection.and_then(|sel| sel.clamped(content.len()));

    if selection.is_none() && is_empty_placeholder(content) {
        tracing::debug!(target: "paste", items = block.len(), "replacing empty document");
        let len = block.len();
        editor.commit(block);
        editor.document.sources = sources;
        editor.cursor = Cursor::User(len - 1);
        editor.selection = None;
        return Ok(());
    }

    let (range, block) = match selection {
        Some(sel) => {
            let range = sel.range();
            let block = fuse_over_range(content, range.clone(), block);
            (range, block)
        }
        None => fuse_at(content, paste_position(editor), block),
    };

    tracing::debug!(
        target: "paste",
        position = range.start,
        replaced = range.len(),
        items = block.len(),
        "splicing clipboard content"
    );
    let cursor = range.start + block.len();
    let mut content = content.to_vec();
    content.splice(range, block);

    editor.commit(content);
    editor.document.sources = sources;
    editor.cursor = Cursor::User(cursor);
    editor.selection = None;
    Ok(())
}

/// Where a caret paste lands
///
/// A user cursor keeps its slot, so one on a paragraph start or past the end inserts
/// between paragraphs. A player cursor splits the paragraph it plays in.
fn paste_position(editor: &EditorState) -> usize {
    match editor.cursor {
        Cursor::User(index) => index.min(editor.content().len()),
        Cursor::Player(_) => editor.insertion_index(),
    }
}

/// Every source id referenced by `content` must be present in `sources`
fn check_sources(content: &[Item], sources: &BTreeMap<SourceId, Source>) -> Result<(), EditError> {
    match content
        .iter()
        .filter_map(Item::source)
        .find(|id| !sources.contains_key(*id))
    {
        Some(missing) => Err(EditError::MissingSource(missing.to_string())),
        None => Ok(()),
    }
}

/// Speakers of the first and the last paragraph of a grammar-valid block
fn outer_speakers(block: &[Item]) -> (Option<String>, Option<String>) {
    let speaker = |index: usize| voice_at(block, index).unwrap_or_default().0;
    (speaker(0), speaker(block.len().saturating_sub(1)))
}

/// Open paragraph voice at `index`, `None` between paragraphs
fn open_voice(content: &[Item], index: usize) -> Option<ParagraphVoice> {
    match state_before(content, index) {
        GrammarState::InParagraph => Some(voice_at(content, index).unwrap_or_default()),
        GrammarState::Start | GrammarState::OutsideParagraph => None,
    }
}

/// Join the block's first paragraph to the open paragraph, or close that paragraph first
fn fuse_start(block: &mut Vec<Item>, first: &Option<String>, open: Option<&ParagraphVoice>) {
    let Some((speaker, _)) = open else {
        return;
    };
    if first == speaker {
        block.remove(0);
    } else {
        block.insert(0, Item::paragraph_break());
    }
}

/// Join the block's last paragraph to the paragraph item that follows, or reopen its owner
fn fuse_into_item(block: &mut Vec<Item>, last: &Option<String>, owner: ParagraphVoice) {
    let (speaker, language) = owner;
    if *last == speaker {
        block.pop();
    } else {
        block.push(Item::new(ItemKind::ParagraphStart { speaker, language }));
    }
}

/// Fuse `block` for replacing `range` of `content`
fn fuse_over_range(content: &[Item], range: Range<usize>, mut block: Vec<Item>) -> Vec<Item> {
    let (first, last) = outer_speakers(&block);
    fuse_start(&mut block, &first, open_voice(content, range.start).as_ref());

    match content.get(range.end) {
        None => {}
        Some(next) if next.is_paragraph_start() => {}
        Some(next) if next.is_paragraph_break() => {
            block.pop();
        }
        Some(_) => {
            let owner = voice_at(content, range.end).unwrap_or_default();
            fuse_into_item(&mut block, &last, owner);
        }
    }
    block
}

/// Fuse `block` for insertion at `position`
///
/// Returns the range of `content` the block replaces: empty, unless the block's last
/// paragraph takes over the paragraph start that follows it.
fn fuse_at(content: &[Item], position: usize, mut block: Vec<Item>) -> (Range<usize>, Vec<Item>) {
    let (first, last) = outer_speakers(&block);
    let follows_last = |index: usize| {
        content
            .get(index)
            .and_then(Item::speaker)
            .is_some_and(|speaker| speaker == last.as_deref())
    };

    let Some(voice) = open_voice(content, position) else {
        if follows_last(position) {
            block.pop();
            return (position..position + 1, block);
        }
        return (position..position, block);
    };

    fuse_start(&mut block, &first, Some(&voice));
    match content.get(position) {
        Some(next) if next.is_paragraph_break() => {
            block.pop();
            if block.iter().any(Item::is_paragraph_start) && follows_last(position + 1) {
                return (position..position + 2, block);
            }
        }
        _ => fuse_into_item(&mut block, &last, voice),
    }
    (position..position, block)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(name: &str, len: usize) -> Vec<Item> {
        let mut items = vec![Item::paragraph_start(Some(name))];
        items.extend((0..len).map(|_| Item::silence(1.0)));
        items.push(Item::paragraph_break());
        items
    }

    fn speakers(items: &[Item]) -> Vec<Option<&str>> {
        items.iter().filter_map(Item::speaker).collect()
    }

    /// `[A, s, s, break, B, s, break]`
    fn content() -> Vec<Item> {
        let mut content = paragraph("A", 2);
        content.extend(paragraph("B", 1));
        content
    }

    #[test]
    fn test_fuse_at_same_speaker_inside_paragraph() {
        let (range, fused) = fuse_at(&content(), 2, paragraph("A", 1));
        assert_eq!(range, 2..2);
        assert_eq!(fused.len(), 1);
        assert!(fused[0].is_paragraph_item());
    }

    #[test]
    fn test_fuse_at_other_speaker_inside_paragraph() {
        let (range, fused) = fuse_at(&content(), 2, paragraph("C", 1));
        assert_eq!(range, 2..2);
        assert!(fused[0].is_paragraph_break());
        assert_eq!(speakers(&fused), vec![Some("C"), Some("A")]);
        assert!(fused.last().is_some_and(Item::is_paragraph_start));
    }

    #[test]
    fn test_fuse_at_paragraph_end_keeps_following_paragraph() {
        let (range, fused) = fuse_at(&content(), 3, paragraph("C", 1));
        assert_eq!(range, 3..3);
        assert!(fused[0].is_paragraph_break());
        assert!(fused.last().is_some_and(Item::is_paragraph_item));
    }

    #[test]
    fn test_fuse_at_paragraph_end_joins_following_speaker() {
        let mut incoming = paragraph("A", 1);
        incoming.extend(paragraph("B", 1));
        let (range, fused) = fuse_at(&content(), 3, incoming);
        assert_eq!(range, 3..5);
        assert_eq!(speakers(&fused), vec![Some("B")]);
        assert!(fused.last().is_some_and(Item::is_paragraph_item));
    }

    #[test]
    fn test_fuse_at_paragraph_start_between_paragraphs() {
        let (range, fused) = fuse_at(&content(), 4, paragraph("C", 1));
        assert_eq!(range, 4..4);
        assert_eq!(fused.len(), 3);

        let (range, fused) = fuse_at(&content(), 4, paragraph("B", 1));
        assert_eq!(range, 4..5);
        assert_eq!(speakers(&fused), vec![Some("B")]);
        assert!(fused.last().is_some_and(Item::is_paragraph_item));
    }

    #[test]
    fn test_fuse_over_range_ending_inside_other_paragraph() {
        // replaces [s, break, B] with a block ending in a C paragraph
        let mut incoming = paragraph("A", 1);
        incoming.extend(paragraph("C", 1));
        let fused = fuse_over_range(&content(), 2..5, incoming);
        assert_eq!(speakers(&fused), vec![Some("C"), Some("B")]);
        assert!(fused[0].is_paragraph_item());
        assert!(fused.last().is_some_and(Item::is_paragraph_start));
    }

    #[test]
    fn test_fuse_over_range_before_paragraph_start_keeps_break() {
        let fused = fuse_over_range(&content(), 0..4, paragraph("C", 2));
        assert_eq!(fused.len(), 4);
        assert!(fused.last().is_some_and(Item::is_paragraph_break));
    }

    #[test]
    fn test_check_sources_names_missing_id() {
        let content = vec![
            Item::paragraph_start(None),
            Item::text("x", "gone", 0.0, 1.0),
            Item::paragraph_break(),
        ];
        let err = check_sources(&content, &BTreeMap::new()).unwrap_err();
        assert_eq!(err.to_string(), "missing source: gone");
    }
}
