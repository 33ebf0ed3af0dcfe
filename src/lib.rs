//! cutscript - transcript-driven audio document engine
//!
//! The document is a flat, grammar-constrained item sequence bound to media sources.
//! All state changes flow through [`update::update`] in the Elm Architecture style;
//! playback consumes the derived [`model::RenderItem`] list.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod export;
pub mod history;
pub mod io;
pub mod messages;
pub mod model;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use error::{ArchiveError, EditError};
pub use messages::Msg;
pub use model::{Document, EditorState, Item, ItemKind, RenderItem};
pub use update::update;
