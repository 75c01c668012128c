use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::splitter::SentenceSplitter;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
    pub offset: (usize, usize), // [start, end) byte positions in the document
}

impl Sentence {
    pub fn new(index: usize, text: String, offset: (usize, usize)) -> Self {
        Self {
            index,
            text,
            offset,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: String,
    pub source: String,
    pub text: String,
    pub sentences: Vec<Sentence>,
}

impl Document {
    pub fn new(source: String, text: String) -> Self {
        Self::with_splitter(source, text, &SentenceSplitter::new())
    }

    pub fn with_splitter(source: String, text: String, splitter: &SentenceSplitter) -> Self {
        let doc_id = generate_doc_id(&source);
        let sentences = splitter.split(&text);

        Self {
            doc_id,
            source,
            text,
            sentences,
        }
    }
}

/// Generate a stable document ID from file path
pub fn generate_doc_id(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..16]) // Use first 16 bytes (32 hex chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_id_is_stable() {
        let a = generate_doc_id("data/vatsnies.txt");
        let b = generate_doc_id("data/vatsnies.txt");
        let c = generate_doc_id("data/other.txt");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn test_document_splits_sentences() {
        let doc = Document::new(
            "test.txt".to_string(),
            "Οι Rotting Christ έπαιξαν στην Αθήνα. Ήταν το 1993.".to_string(),
        );

        assert_eq!(doc.sentences.len(), 2);
        assert_eq!(doc.sentences[0].index, 0);
        assert_eq!(doc.sentences[1].text, "Ήταν το 1993.");
    }
}
