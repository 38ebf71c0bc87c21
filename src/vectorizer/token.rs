use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Split a text into terms
/// Only whitespace separates terms. Case and punctuation are kept as is.
#[inline]
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

///  TermFrequency 構造体
/// Counts how often each term occurs in one token sequence.
/// Terms keep their first-seen order.
///
/// # Examples
/// ```
/// use tf_idf_matrix::TermFrequency;
/// let mut freq = TermFrequency::new();
/// freq.add_term("term1");
/// freq.add_term("term2");
/// freq.add_term("term1");
///
/// assert_eq!(freq.term_count("term1"), 2);
/// assert_eq!(freq.term_total_count(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u32>,
    total_term_count: u64,
}

/// Termの追加
impl TermFrequency {
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Count every whitespace-delimited term of `text`
    pub fn from_text(text: &str) -> Self {
        let mut freq = Self::new();
        for term in tokenize(text) {
            freq.add_term(term);
        }
        freq
    }

    /// termを追加する
    ///
    /// # Arguments
    /// * `term` - 追加するterm
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        match self.term_count.get_mut(term) {
            Some(count) => *count += 1,
            None => {
                self.term_count.insert(term.to_string(), 1);
            }
        }
        self.total_term_count += 1;
        self
    }
}

/// TermFrequencyの情報を取得するための実装
impl TermFrequency {
    /// あるtermの出現回数を取得します
    /// Unknown terms count as 0
    #[inline]
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Total number of terms, duplicates included
    #[inline]
    pub fn term_total_count(&self) -> u64 {
        self.total_term_count
    }

    /// Number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// termのsetを取得します
    /// 文字列はこれの参照を返します
    #[inline]
    pub fn term_set_ref_str(&self) -> Vec<&str> {
        self.term_count.keys().map(|s| s.as_str()).collect()
    }

    /// Every distinct term of `self` also occurs in `other`
    /// Counts are ignored, so this is a plain set inclusion.
    #[inline]
    pub fn is_subset_of(&self, other: &TermFrequency) -> bool {
        self.term_count.keys().all(|term| other.contains_term(term))
    }

    /// (term, count) pairs in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.term_count.iter().map(|(term, &count)| (term.as_str(), count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_any_whitespace() {
        let terms: Vec<&str> = tokenize("  a\tb\n\nc  a ").collect();
        assert_eq!(terms, vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn counts_are_case_sensitive() {
        let freq = TermFrequency::from_text("Rust rust RUST rust");
        assert_eq!(freq.term_count("rust"), 2);
        assert_eq!(freq.term_count("Rust"), 1);
        assert_eq!(freq.term_count("RUST"), 1);
        assert_eq!(freq.term_num(), 3);
        assert_eq!(freq.term_total_count(), 4);
    }

    #[test]
    fn punctuation_stays_attached() {
        let freq = TermFrequency::from_text("prova, prova");
        assert_eq!(freq.term_count("prova"), 1);
        assert_eq!(freq.term_count("prova,"), 1);
    }

    #[test]
    fn subset_ignores_duplicates_and_order() {
        let doc = TermFrequency::from_text("b a c");
        assert!(TermFrequency::from_text("a a b").is_subset_of(&doc));
        assert!(TermFrequency::from_text("c b").is_subset_of(&doc));
        assert!(!TermFrequency::from_text("a d").is_subset_of(&doc));
        assert!(TermFrequency::new().is_subset_of(&doc));
    }
}
