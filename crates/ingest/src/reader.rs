use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

const BOM: char = '\u{FEFF}';

pub struct FileReader;

impl FileReader {
    /// Read a UTF-8 text file, dropping a leading byte order mark
    pub async fn read_file(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .await
            .context(format!("Failed to read file: {:?}", path))?;

        Ok(match content.strip_prefix(BOM) {
            Some(stripped) => stripped.to_string(),
            None => content,
        })
    }
}
