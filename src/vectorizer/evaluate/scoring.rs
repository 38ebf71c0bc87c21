use std::{fmt, marker::PhantomData};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    utils::datastruct::{IDFVector, TermDocMatrix},
    vectorizer::{
        compute::compare::{Compare, DefaultCompare},
        corpus::{doc_label, Vocabulary},
        evaluate::query::Query,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    },
};

/// Cosine scores of one query against every document, in document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRow {
    pub query: Box<str>,
    pub scores: Vec<f64>,
}

impl SimilarityRow {
    /// Scores as a ranked hit list (best first)
    pub fn hits(&self) -> Hits {
        let list = self
            .scores
            .iter()
            .enumerate()
            .map(|(doc, &score)| HitEntry {
                doc,
                label: doc_label(doc),
                score,
            })
            .collect();
        let mut hits = Hits::new(list);
        hits.sort_by_score_desc();
        hits
    }
}

/// One search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitEntry {
    /// 0-based document position
    pub doc: usize,
    pub label: String,
    pub score: f64,
}

/// Structure to store search results
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort results by descending score
    /// NaN scores are dropped; ties keep document order.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        self.list.retain(|hit| !hit.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    pub fn top(&self) -> Option<&HitEntry> {
        self.list.first()
    }
}

impl fmt::Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        for (rank, hit) in self.list.iter().enumerate() {
            writeln!(f, "{:>3}. {}: {:.*}", rank + 1, hit.label, precision, hit.score)?;
        }
        Ok(())
    }
}

/// Vector space model ranker
///
/// Builds each query's TF-IDF vector with the corpus engine `E`, then scores
/// it against every document column with cosine similarity from `C`.
/// Document columns are extracted once when the ranker is created.
pub struct VectorSimilarityRanker<'a, E = DefaultTFIDFEngine, C = DefaultCompare>
where
    E: TFIDFEngine,
    C: Compare,
{
    vocabulary: &'a Vocabulary,
    idf: &'a IDFVector,
    doc_vecs: Vec<Vec<f64>>,
    _marker: PhantomData<fn() -> (E, C)>,
}

impl<'a, E, C> VectorSimilarityRanker<'a, E, C>
where
    E: TFIDFEngine,
    C: Compare,
{
    pub fn new(vocabulary: &'a Vocabulary, idf: &'a IDFVector, tfidf: &TermDocMatrix<f64>) -> Self {
        let doc_vecs = (0..tfidf.cols()).map(|doc| tfidf.column_vec(doc)).collect();
        Self {
            vocabulary,
            idf,
            doc_vecs,
            _marker: PhantomData,
        }
    }

    /// Query TF-IDF vector in vocabulary order
    pub fn query_vec(&self, query: &Query) -> Vec<f64> {
        E::query_vec(query.term_freq(), self.vocabulary, self.idf)
    }

    /// Cosine similarity of one query against every document
    pub fn score(&self, query: &Query) -> SimilarityRow {
        let query_vec = self.query_vec(query);
        let scores = self
            .doc_vecs
            .iter()
            .enumerate()
            .map(|(doc, doc_vec)| {
                let score = C::cosine_similarity(&query_vec, doc_vec);
                trace!(query = query.text(), doc = doc + 1, score, "cosine score");
                score
            })
            .collect();
        SimilarityRow {
            query: Box::from(query.text()),
            scores,
        }
    }

    /// Score every query; rows come back in query order
    #[cfg(not(feature = "parallel"))]
    pub fn score_all(&self, queries: &[Query]) -> Vec<SimilarityRow> {
        queries.iter().map(|query| self.score(query)).collect()
    }

    /// Score every query; rows come back in query order
    #[cfg(feature = "parallel")]
    pub fn score_all(&self, queries: &[Query]) -> Vec<SimilarityRow> {
        use rayon::prelude::*;

        queries.par_iter().map(|query| self.score(query)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::corpus::Corpus;

    struct Fixture {
        vocab: Vocabulary,
        idf: IDFVector,
        tfidf: TermDocMatrix<f64>,
    }

    fn fixture(docs: &[&str]) -> Fixture {
        type E = DefaultTFIDFEngine;
        let corpus = Corpus::new(docs);
        let vocab = corpus.vocabulary();
        let freq = E::frequency_matrix(&corpus, &vocab);
        let idf = E::idf_vec(&freq);
        let tfidf = E::tfidf_matrix(&E::tf_matrix(&freq), &idf);
        Fixture { vocab, idf, tfidf }
    }

    impl Fixture {
        fn ranker(&self) -> VectorSimilarityRanker<'_> {
            VectorSimilarityRanker::new(&self.vocab, &self.idf, &self.tfidf)
        }
    }

    const SAMPLE: [&str; 3] = [
        "nota prova avaliação sala data prova",
        "aluno nota avaliação sala nota",
        "aluno prova avaliação",
    ];

    #[test]
    fn query_matching_one_document() {
        let fx = fixture(&["a a b", "b c"]);
        let ranker = fx.ranker();
        let query = Query::new("a a");
        assert_eq!(ranker.query_vec(&query), vec![2.0, 0.0, 0.0]);

        let row = ranker.score(&query);
        assert!((row.scores[0] - 1.0).abs() < 1e-12);
        assert_eq!(row.scores[1], 0.0);
    }

    #[test]
    fn unknown_terms_give_zero_scores() {
        let fx = fixture(&["a a b", "b c"]);
        let ranker = fx.ranker();
        let row = ranker.score(&Query::new("zzz"));
        assert_eq!(row.scores, vec![0.0, 0.0]);
    }

    #[test]
    fn zero_idf_terms_do_not_count() {
        // b occurs everywhere, so its weight is 0 and the query vector is zero
        let fx = fixture(&["a a b", "b c"]);
        let ranker = fx.ranker();
        assert_eq!(ranker.score(&Query::new("b b")).scores, vec![0.0, 0.0]);
    }

    #[test]
    fn mixed_query_on_sample_corpus() {
        let fx = fixture(&SAMPLE);
        let ranker = fx.ranker();
        let rows = ranker.score_all(&Query::parse_all(["nota aluno", "data prova"]));
        assert_eq!(rows.len(), 2);
        assert_eq!(&*rows[0].query, "nota aluno");
        for row in &rows {
            assert_eq!(row.scores.len(), 3);
            assert!(row.scores.iter().all(|s| (0.0..=1.0 + 1e-12).contains(s)));
        }
        let hits = rows[1].hits();
        assert_eq!(hits.top().map(|h| h.label.as_str()), Some("D1"));
    }

    #[test]
    fn hits_sort_drops_nan_and_keeps_ties_in_order() {
        let row = SimilarityRow {
            query: Box::from("q"),
            scores: vec![0.5, f64::NAN, 0.9, 0.5],
        };
        let hits = row.hits();
        let order: Vec<usize> = hits.list.iter().map(|h| h.doc).collect();
        assert_eq!(order, vec![2, 0, 3]);
        assert_eq!(format!("{:.2}", hits), "  1. D3: 0.90\n  2. D1: 0.50\n  3. D4: 0.50\n");
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_scoring_matches_sequential_order() {
        let fx = fixture(&SAMPLE);
        let ranker = fx.ranker();
        let texts = ["nota aluno", "data prova", "sala", "", "prova prova zzz"];
        let queries: Vec<Query> = (0..64).map(|i| Query::new(texts[i % texts.len()])).collect();
        let sequential: Vec<SimilarityRow> = queries.iter().map(|q| ranker.score(q)).collect();
        let parallel = ranker.score_all(&queries);
        assert_eq!(parallel, sequential);
        assert_eq!(&*parallel[63].query, texts[63 % texts.len()]);
    }
}
