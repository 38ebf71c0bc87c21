pub mod vocabulary;

use serde::{Deserialize, Serialize};

use crate::vectorizer::token::TermFrequency;

pub use vocabulary::Vocabulary;

/// Label of the document at a 0-based position (`D1`, `D2`, ...)
#[inline]
pub fn doc_label(index: usize) -> String {
    format!("D{}", index + 1)
}

/// One corpus document
/// Keeps the original text and its term counts. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    text: Box<str>,
    freq: TermFrequency,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            text: Box::from(text),
            freq: TermFrequency::from_text(text),
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn term_freq(&self) -> &TermFrequency {
        &self.freq
    }

    /// Occurrences of `term`, exact and case-sensitive
    #[inline]
    pub fn term_count(&self, term: &str) -> u32 {
        self.freq.term_count(term)
    }
}

/// Ordered document collection
/// Document identity is its position; labels are 1-based.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            documents: texts.into_iter().map(|t| Document::new(t.as_ref())).collect(),
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[inline]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// `D1..Dn` in document order
    pub fn labels(&self) -> Vec<String> {
        (0..self.documents.len()).map(doc_label).collect()
    }

    /// Sorted distinct terms of every document
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::from_documents(&self.documents)
    }
}
