//! Zip archive reading and writing

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use serde::Serialize;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::migrate::{upgrade_manifest, CURRENT_VERSION};
use crate::error::ArchiveError;
use crate::model::{grammar, Document, DocumentMetadata, Item, Source};

pub const DOCUMENT_ENTRY: &str = "document.json";
pub const SOURCES_PREFIX: &str = "sources/";

#[derive(Serialize)]
struct Manifest<'a> {
    version: u64,
    content: &'a [Item],
    metadata: &'a DocumentMetadata,
}

/// Write `document` as a zip archive into memory
///
/// Only sources the content references are written.
pub fn serialize_document(document: &Document) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    let manifest = Manifest {
        version: CURRENT_VERSION,
        content: &document.content,
        metadata: &document.metadata,
    };
    writer.start_file(
        DOCUMENT_ENTRY,
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
    )?;
    serde_json::to_writer(&mut writer, &manifest)?;

    // media is already compressed
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for id in document.referenced_sources() {
        let source = document
            .sources
            .get(id)
            .ok_or_else(|| ArchiveError::MissingSource(id.to_string()))?;
        writer.start_file(format!("{SOURCES_PREFIX}{id}"), stored)?;
        writer.write_all(&source.file_contents)?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Read a document from archive bytes, upgrading older manifest versions
pub fn deserialize_document(bytes: &[u8]) -> Result<Document, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let manifest: serde_json::Value = {
        let file = match archive.by_name(DOCUMENT_ENTRY) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Err(ArchiveError::MissingManifest),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_reader(file)?
    };

    let (content, metadata) = upgrade_manifest(manifest)?;
    grammar::validate(&content)?;

    let mut document = Document::from_content(content);
    document.metadata = metadata;

    let mut sources = BTreeMap::new();
    for id in document.referenced_sources() {
        let mut file = match archive.by_name(&format!("{SOURCES_PREFIX}{id}")) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => {
                return Err(ArchiveError::MissingSource(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        sources.insert(id.to_string(), Source::new(bytes));
    }
    document.sources = sources;

    Ok(document)
}

/// Load an archive from disk
pub fn load_document(path: &Path) -> Result<Document, ArchiveError> {
    let bytes = std::fs::read(path)?;
    let document = deserialize_document(&bytes)?;
    tracing::info!(
        path = %path.display(),
        items = document.content.len(),
        sources = document.sources.len(),
        "loaded document"
    );
    Ok(document)
}

/// Save an archive to disk
pub fn save_document(document: &Document, path: &Path) -> Result<(), ArchiveError> {
    let bytes = serialize_document(document)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "saved document");
    Ok(())
}
