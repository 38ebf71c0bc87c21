use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::vectorizer::{
    corpus::{doc_label, Corpus},
    evaluate::query::Query,
};

/// Printed in place of an empty match list
pub const NO_MATCHES: &str = "Nenhum";

/// Boolean model result of one query
/// `matches[d]` is true when document `d` contains every query term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanRow {
    pub query: Box<str>,
    pub matches: Vec<bool>,
}

impl BooleanRow {
    /// 0-based indices of the matching documents
    pub fn matched_docs(&self) -> Vec<usize> {
        self.matches
            .iter()
            .enumerate()
            .filter_map(|(idx, &hit)| hit.then_some(idx))
            .collect()
    }

    /// `D1`-style labels of the matching documents
    pub fn matched_labels(&self) -> Vec<String> {
        self.matched_docs().into_iter().map(doc_label).collect()
    }

    /// Matching labels joined with `, `, or [`NO_MATCHES`]
    pub fn summary(&self) -> String {
        let labels = self.matched_labels();
        if labels.is_empty() {
            NO_MATCHES.to_string()
        } else {
            labels.join(", ")
        }
    }
}

/// Conjunctive boolean retrieval
/// A document matches iff the query's term set is a subset of the
/// document's term set. Term order and duplicates are ignored, and an
/// empty query matches every document.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanMatcher;

impl BooleanMatcher {
    pub fn match_query(corpus: &Corpus, query: &Query) -> BooleanRow {
        if query.is_empty() {
            debug!(query = query.text(), "empty query matches every document");
        }
        let matches = corpus
            .documents()
            .iter()
            .map(|doc| query.term_freq().is_subset_of(doc.term_freq()))
            .collect();
        BooleanRow {
            query: Box::from(query.text()),
            matches,
        }
    }

    pub fn match_queries(corpus: &Corpus, queries: &[Query]) -> Vec<BooleanRow> {
        queries
            .iter()
            .map(|query| Self::match_query(corpus, query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Corpus {
        Corpus::new([
            "nota prova avaliação sala data prova",
            "aluno nota avaliação sala nota",
            "aluno prova avaliação",
        ])
    }

    #[test]
    fn and_semantics() {
        let row = BooleanMatcher::match_query(&corpus(), &Query::new("nota aluno"));
        assert_eq!(row.matches, vec![false, true, false]);
        assert_eq!(row.matched_labels(), vec!["D2"]);
        assert_eq!(row.summary(), "D2");

        let row = BooleanMatcher::match_query(&corpus(), &Query::new("data prova"));
        assert_eq!(row.matched_docs(), vec![0]);
    }

    #[test]
    fn order_and_duplicates_are_ignored() {
        let a = BooleanMatcher::match_query(&corpus(), &Query::new("avaliação aluno aluno"));
        let b = BooleanMatcher::match_query(&corpus(), &Query::new("aluno avaliação"));
        assert_eq!(a.matches, b.matches);
        assert_eq!(a.matches, vec![false, true, true]);
        assert_eq!(a.summary(), "D2, D3");
    }

    #[test]
    fn empty_query_matches_everything() {
        let row = BooleanMatcher::match_query(&corpus(), &Query::new("   "));
        assert_eq!(row.matches, vec![true, true, true]);
    }

    #[test]
    fn unknown_term_matches_nothing() {
        let queries = Query::parse_all(["nota xyz", "Nota"]);
        let rows = BooleanMatcher::match_queries(&corpus(), &queries);
        assert!(rows.iter().all(|r| r.matched_docs().is_empty()));
        assert_eq!(rows[0].summary(), "Nenhum");
    }
}
