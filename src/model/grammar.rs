//! Structural grammar of document content
//!
//! ```text
//! Start --paragraph_start--> InParagraph --paragraph item--> InParagraph
//! InParagraph --paragraph_break--> OutsideParagraph --paragraph_start--> InParagraph
//! ```
//!
//! Content is accepted only when it ends in `OutsideParagraph`.

use thiserror::Error;

use super::document::{Item, ItemKind};

/// The rule a content sequence failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GrammarViolation {
    #[error("every document needs to contain at least one item")]
    Empty,
    #[error("every document needs to start with a paragraph start")]
    MissingLeadingParagraphStart,
    #[error("every document needs to end with a paragraph break")]
    MissingTrailingParagraphBreak,
    #[error("paragraph start at index {0} occurs inside another paragraph")]
    NestedParagraphStart(usize),
    #[error("paragraph break at index {0} occurs outside of a paragraph")]
    StrayParagraphBreak(usize),
    #[error("paragraph item at index {0} occurs outside of a paragraph")]
    ItemOutsideParagraph(usize),
}

/// Automaton state while scanning content left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarState {
    Start,
    InParagraph,
    OutsideParagraph,
}

impl GrammarState {
    /// Advance over `item`, or report the rule it breaks
    pub fn step(self, item: &Item, index: usize) -> Result<GrammarState, GrammarViolation> {
        match (self, &item.kind) {
            (Self::Start | Self::OutsideParagraph, ItemKind::ParagraphStart { .. }) => {
                Ok(Self::InParagraph)
            }
            (Self::InParagraph, ItemKind::ParagraphStart { .. }) => {
                Err(GrammarViolation::NestedParagraphStart(index))
            }
            (Self::InParagraph, ItemKind::ParagraphBreak) => Ok(Self::OutsideParagraph),
            (_, ItemKind::ParagraphBreak) => Err(GrammarViolation::StrayParagraphBreak(index)),
            (Self::InParagraph, _) => Ok(Self::InParagraph),
            (_, _) => Err(GrammarViolation::ItemOutsideParagraph(index)),
        }
    }
}

/// Check `content` against the grammar, rules tested in a fixed order
pub fn validate(content: &[Item]) -> Result<(), GrammarViolation> {
    let (first, last) = match (content.first(), content.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(GrammarViolation::Empty),
    };
    if !first.is_paragraph_start() {
        return Err(GrammarViolation::MissingLeadingParagraphStart);
    }
    if !last.is_paragraph_break() {
        return Err(GrammarViolation::MissingTrailingParagraphBreak);
    }

    content
        .iter()
        .enumerate()
        .try_fold(GrammarState::Start, |state, (index, item)| {
            state.step(item, index)
        })
        .map(|_| ())
}

/// State reached after consuming `content[..end]`, assuming that prefix is well formed
pub fn state_before(content: &[Item], end: usize) -> GrammarState {
    content[..end.min(content.len())]
        .iter()
        .rev()
        .find_map(|item| match item.kind {
            ItemKind::ParagraphStart { .. } => Some(GrammarState::InParagraph),
            ItemKind::ParagraphBreak => Some(GrammarState::OutsideParagraph),
            _ => None,
        })
        .unwrap_or(GrammarState::Start)
}
