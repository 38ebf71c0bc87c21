use serde::{Deserialize, Serialize};

use crate::vectorizer::token::TermFrequency;

/// Label of the query at a 0-based position (`Q1`, `Q2`, ...)
#[inline]
pub fn query_label(index: usize) -> String {
    format!("Q{}", index + 1)
}

/// Free-text query
/// Tokenized like a document, but never part of the corpus: it does not
/// touch the vocabulary or the IDF table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    text: Box<str>,
    term_freq: TermFrequency,
}

impl Query {
    pub fn new(text: &str) -> Self {
        Self {
            text: Box::from(text),
            term_freq: TermFrequency::from_text(text),
        }
    }

    /// Build several queries at once
    pub fn parse_all<I, S>(texts: I) -> Vec<Query>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts.into_iter().map(|t| Query::new(t.as_ref())).collect()
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Term counts, duplicates kept
    #[inline]
    pub fn term_freq(&self) -> &TermFrequency {
        &self.term_freq
    }

    /// No terms at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_freq.is_empty()
    }
}
