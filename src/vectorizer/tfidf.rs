use crate::{
    utils::datastruct::{IDFVector, TermDocMatrix},
    vectorizer::{
        corpus::{Corpus, Vocabulary},
        token::TermFrequency,
    },
};

/// TF-IDF calculation engine
///
/// `tf` and `idf` are the two formulas; the provided methods lift them to
/// whole matrices. The corpus matrices and the query vectors go through the
/// same engine type, so both live in one vector space.
pub trait TFIDFEngine {
    /// TF weight of a raw count
    fn tf(count: u32) -> f64;

    /// IDF weight of a term
    ///
    /// # Arguments
    /// * `doc_num` - 全ドキュメント数
    /// * `doc_freq` - termを含むドキュメント数
    fn idf(doc_num: usize, doc_freq: usize) -> f64;

    /// Raw count of every vocabulary term in every document
    fn frequency_matrix(corpus: &Corpus, vocabulary: &Vocabulary) -> TermDocMatrix<u32> {
        let documents = corpus.documents();
        TermDocMatrix::from_fn(vocabulary.len(), documents.len(), |term, doc| {
            vocabulary
                .get(term)
                .map_or(0, |t| documents[doc].term_count(t))
        })
    }

    fn tf_matrix(frequency: &TermDocMatrix<u32>) -> TermDocMatrix<f64> {
        frequency.map(|_, _, count| Self::tf(count))
    }

    /// One IDF per term row
    /// The document count is the column count of `frequency`.
    fn idf_vec(frequency: &TermDocMatrix<u32>) -> IDFVector {
        let doc_num = frequency.cols();
        let idf_vec = (0..frequency.rows())
            .map(|term| {
                let doc_freq = frequency.row(term).iter().filter(|&&c| c > 0).count();
                Self::idf(doc_num, doc_freq)
            })
            .collect();
        IDFVector {
            idf_vec,
            doc_num: doc_num as u64,
        }
    }

    fn tfidf_matrix(tf: &TermDocMatrix<f64>, idf: &IDFVector) -> TermDocMatrix<f64> {
        debug_assert_eq!(tf.rows(), idf.len(), "TF rows and IDF entries must match");
        tf.map(|term, _, w| w * idf.get(term).unwrap_or(0.0))
    }

    /// TF-IDF vector of a query, aligned on vocabulary order
    /// Terms outside the vocabulary cannot be represented and are dropped.
    fn query_vec(query: &TermFrequency, vocabulary: &Vocabulary, idf: &IDFVector) -> Vec<f64> {
        let mut vec = vec![0.0; vocabulary.len()];
        for (term, count) in query.iter() {
            if let Some(idx) = vocabulary.index_of(term) {
                vec[idx] = Self::tf(count) * idf.get(idx).unwrap_or(0.0);
            }
        }
        vec
    }
}

/// デフォルトのTF-IDFエンジン
/// Log-dampened TF `1 + log2(f)` and IDF `log2(N / ni)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn tf(count: u32) -> f64 {
        if count == 0 {
            return 0.0;
        }
        1.0 + (count as f64).log2()
    }

    #[inline]
    fn idf(doc_num: usize, doc_freq: usize) -> f64 {
        // vocabulary由来のtermでは起こらない
        if doc_freq == 0 {
            return 0.0;
        }
        (doc_num as f64 / doc_freq as f64).log2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type E = DefaultTFIDFEngine;

    fn corpus() -> (Corpus, Vocabulary) {
        let corpus = Corpus::new(["a a b", "b c"]);
        let vocab = corpus.vocabulary();
        (corpus, vocab)
    }

    #[test]
    fn tf_formula() {
        assert_eq!(E::tf(0), 0.0);
        assert_eq!(E::tf(1), 1.0);
        assert_eq!(E::tf(2), 2.0);
        assert_eq!(E::tf(8), 4.0);
        assert!((E::tf(3) - (1.0 + 3f64.log2())).abs() < 1e-12);
    }

    #[test]
    fn idf_formula() {
        assert_eq!(E::idf(4, 4), 0.0);
        assert_eq!(E::idf(4, 1), 2.0);
        assert_eq!(E::idf(4, 0), 0.0);
    }

    #[test]
    fn frequency_matrix_counts_per_document() {
        let (corpus, vocab) = corpus();
        let freq = E::frequency_matrix(&corpus, &vocab);
        assert_eq!(freq.column_vec(0), vec![2, 1, 0]);
        assert_eq!(freq.column_vec(1), vec![0, 1, 1]);
    }

    #[test]
    fn tf_idf_and_product() {
        let (corpus, vocab) = corpus();
        let freq = E::frequency_matrix(&corpus, &vocab);
        let tf = E::tf_matrix(&freq);
        assert_eq!(tf.column_vec(0), vec![2.0, 1.0, 0.0]);

        let idf = E::idf_vec(&freq);
        assert_eq!(idf.as_slice(), &[1.0, 0.0, 1.0]);
        assert_eq!(idf.doc_num, 2);

        let tfidf = E::tfidf_matrix(&tf, &idf);
        assert_eq!(tfidf.column_vec(0), vec![2.0, 0.0, 0.0]);
        assert_eq!(tfidf.column_vec(1), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn query_vec_ignores_unknown_terms() {
        let (corpus, vocab) = corpus();
        let idf = E::idf_vec(&E::frequency_matrix(&corpus, &vocab));
        let query = TermFrequency::from_text("a a zzz c");
        assert_eq!(E::query_vec(&query, &vocab, &idf), vec![2.0, 0.0, 1.0]);
        let unknown = TermFrequency::from_text("zzz");
        assert_eq!(E::query_vec(&unknown, &vocab, &idf), vec![0.0, 0.0, 0.0]);
    }
}
