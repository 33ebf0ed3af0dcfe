//! Document archives
//!
//! An archive is a zip file holding `document.json` (the versioned manifest) and one
//! `sources/<id>` entry per media file referenced by the content.

mod archive;
mod migrate;

pub use archive::{
    deserialize_document, load_document, save_document, serialize_document, DOCUMENT_ENTRY,
    SOURCES_PREFIX,
};
pub use migrate::{upgrade_manifest, CURRENT_VERSION};
