pub mod document;
pub mod reader;
pub mod splitter;

pub use document::{generate_doc_id, Document, Sentence};
pub use reader::FileReader;
pub use splitter::SentenceSplitter;

use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Main ingestion pipeline: read the file and split it into sentences
pub async fn ingest_file(file_path: &Path) -> Result<Document> {
    let content = FileReader::read_file(file_path).await?;
    let path_str = file_path.to_string_lossy().to_string();

    let document = Document::new(path_str, content);

    info!(
        doc_id = %document.doc_id,
        sentences = document.sentences.len(),
        "Ingested document"
    );

    Ok(document)
}
