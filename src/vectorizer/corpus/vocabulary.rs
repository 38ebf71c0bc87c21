use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::vectorizer::corpus::Document;

/// Corpus vocabulary
/// Distinct terms sorted in byte order, which for UTF-8 is code point order.
/// The position of a term is its row in every term-indexed matrix.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
}

impl Vocabulary {
    pub fn from_documents(documents: &[Document]) -> Self {
        let capacity = documents.iter().map(|doc| doc.term_freq().term_num()).sum();
        let mut terms: Vec<&str> = Vec::with_capacity(capacity);
        for doc in documents {
            terms.extend(doc.term_freq().term_set_ref_str());
        }
        terms.sort_unstable();
        terms.dedup();
        Self {
            terms: terms.into_iter().map(Box::from).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Row of `term`, `None` for terms outside the corpus
    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|t| &**t)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| &**t)
    }

    /// Owned copy of the terms, used as table row labels
    pub fn to_labels(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}
