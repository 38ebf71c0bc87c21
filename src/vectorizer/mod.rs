pub mod compute;
pub mod corpus;
pub mod evaluate;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    error::MatrixError,
    utils::{
        datastruct::{IDFVector, TermDocMatrix},
        table::{Table, TitledTable},
    },
    vectorizer::{
        compute::normalize::{column_sum_sqrt, NormalizationRow},
        corpus::{Corpus, Vocabulary},
        evaluate::{
            boolean::{BooleanMatcher, BooleanRow},
            query::{query_label, Query},
            scoring::{SimilarityRow, VectorSimilarityRanker},
        },
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    },
};

/// Row label of the normalization table
pub const NORMALIZATION_LABEL: &str = "NORMALIZAÇÃO";

fn not_ready(step: &'static str, requires: &'static str) -> MatrixError {
    warn!(step, requires, "pipeline step called before its prerequisite");
    MatrixError::NotReady { step, requires }
}

/// Staged TF-IDF session
///
/// Owns one corpus and its vocabulary and computes the derived matrices one
/// step at a time. Each step checks that the step it depends on already ran
/// and returns [`MatrixError::NotReady`] otherwise:
///
/// frequency → {tf, idf} → tfidf → {normalization, similarity}
///
/// Use [`CorpusMatrices::build`] to run every step in order and get an
/// immutable bundle instead.
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    corpus: Corpus,
    vocabulary: Vocabulary,
    frequency: Option<TermDocMatrix<u32>>,
    tf: Option<TermDocMatrix<f64>>,
    idf: Option<IDFVector>,
    tfidf: Option<TermDocMatrix<f64>>,
    normalization: Option<NormalizationRow>,
    _marker: PhantomData<E>,
}

impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine,
{
    /// Create a new session; the vocabulary is extracted immediately
    pub fn new(corpus: Corpus) -> Self {
        if corpus.is_empty() {
            warn!("corpus has no documents");
        }
        for (idx, doc) in corpus.documents().iter().enumerate() {
            trace!(doc = idx + 1, text = doc.text(), "document");
        }
        let vocabulary = corpus.vocabulary();
        debug!(
            documents = corpus.doc_num(),
            tokens = corpus
                .documents()
                .iter()
                .map(|doc| doc.term_freq().term_total_count())
                .sum::<u64>(),
            terms = vocabulary.len(),
            "vocabulary extracted"
        );
        Self {
            corpus,
            vocabulary,
            frequency: None,
            tf: None,
            idf: None,
            tfidf: None,
            normalization: None,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn frequency(&self) -> Option<&TermDocMatrix<u32>> {
        self.frequency.as_ref()
    }

    pub fn tf(&self) -> Option<&TermDocMatrix<f64>> {
        self.tf.as_ref()
    }

    pub fn idf(&self) -> Option<&IDFVector> {
        self.idf.as_ref()
    }

    pub fn tfidf(&self) -> Option<&TermDocMatrix<f64>> {
        self.tfidf.as_ref()
    }

    pub fn normalization(&self) -> Option<&NormalizationRow> {
        self.normalization.as_ref()
    }

    /// 頻度行列を計算する
    /// Has no prerequisite, so it cannot fail.
    pub fn calc_frequency(&mut self) -> &TermDocMatrix<u32> {
        let frequency = E::frequency_matrix(&self.corpus, &self.vocabulary);
        debug!(
            terms = frequency.rows(),
            documents = frequency.cols(),
            "frequency matrix built"
        );
        &*self.frequency.insert(frequency)
    }

    pub fn calc_tf(&mut self) -> Result<&TermDocMatrix<f64>, MatrixError> {
        let frequency = self
            .frequency
            .as_ref()
            .ok_or_else(|| not_ready("tf", "frequency matrix"))?;
        let tf = E::tf_matrix(frequency);
        debug!(terms = tf.rows(), documents = tf.cols(), "tf matrix built");
        Ok(&*self.tf.insert(tf))
    }

    pub fn calc_idf(&mut self) -> Result<&IDFVector, MatrixError> {
        let frequency = self
            .frequency
            .as_ref()
            .ok_or_else(|| not_ready("idf", "frequency matrix"))?;
        let idf = E::idf_vec(frequency);
        debug!(terms = idf.len(), documents = idf.doc_num, "idf table built");
        Ok(&*self.idf.insert(idf))
    }

    pub fn calc_tfidf(&mut self) -> Result<&TermDocMatrix<f64>, MatrixError> {
        let tf = self
            .tf
            .as_ref()
            .ok_or_else(|| not_ready("tf-idf", "tf matrix"))?;
        let idf = self
            .idf
            .as_ref()
            .ok_or_else(|| not_ready("tf-idf", "idf table"))?;
        let tfidf = E::tfidf_matrix(tf, idf);
        debug!(
            terms = tfidf.rows(),
            documents = tfidf.cols(),
            "tf-idf matrix built"
        );
        Ok(&*self.tfidf.insert(tfidf))
    }

    pub fn calc_normalization(&mut self) -> Result<&NormalizationRow, MatrixError> {
        let tfidf = self
            .tfidf
            .as_ref()
            .ok_or_else(|| not_ready("normalization", "tf-idf matrix"))?;
        let normalization = column_sum_sqrt(tfidf);
        debug!(documents = normalization.len(), "normalization row built");
        Ok(&*self.normalization.insert(normalization))
    }

    /// Boolean AND model; needs no weighted matrix
    pub fn boolean(&self, queries: &[Query]) -> Vec<BooleanRow> {
        BooleanMatcher::match_queries(&self.corpus, queries)
    }

    /// Cosine similarity of every query against every document
    pub fn similarity(&self, queries: &[Query]) -> Result<Vec<SimilarityRow>, MatrixError> {
        let tfidf = self
            .tfidf
            .as_ref()
            .ok_or_else(|| not_ready("similarity", "tf-idf matrix"))?;
        let idf = self
            .idf
            .as_ref()
            .ok_or_else(|| not_ready("similarity", "idf table"))?;
        let ranker: VectorSimilarityRanker<'_, E> =
            VectorSimilarityRanker::new(&self.vocabulary, idf, tfidf);
        let rows = ranker.score_all(queries);
        debug!(queries = rows.len(), "similarity rows scored");
        Ok(rows)
    }

    /// Freeze the session into an immutable bundle
    /// Fails with `NotReady` naming the first missing step.
    pub fn into_matrices(self) -> Result<CorpusMatrices<E>, MatrixError> {
        let frequency = self
            .frequency
            .ok_or_else(|| not_ready("corpus matrices", "frequency matrix"))?;
        let tf = self
            .tf
            .ok_or_else(|| not_ready("corpus matrices", "tf matrix"))?;
        let idf = self
            .idf
            .ok_or_else(|| not_ready("corpus matrices", "idf table"))?;
        let tfidf = self
            .tfidf
            .ok_or_else(|| not_ready("corpus matrices", "tf-idf matrix"))?;
        let normalization = self
            .normalization
            .ok_or_else(|| not_ready("corpus matrices", "normalization row"))?;
        Ok(CorpusMatrices {
            corpus: self.corpus,
            vocabulary: self.vocabulary,
            frequency,
            tf,
            idf,
            tfidf,
            normalization,
            _marker: PhantomData,
        })
    }
}

/// Every matrix derived from one corpus
///
/// Only obtainable fully populated, through [`CorpusMatrices::build`] or
/// [`TFIDFVectorizer::into_matrices`]. All matrices share the vocabulary
/// row order and the document column order.
///
/// # Serialization
/// Supported. The engine type is not stored. Deserializing checks that the
/// vocabulary belongs to the corpus and that every matrix has its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CorpusParts", bound(deserialize = "E: TFIDFEngine"))]
pub struct CorpusMatrices<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    corpus: Corpus,
    vocabulary: Vocabulary,
    frequency: TermDocMatrix<u32>,
    tf: TermDocMatrix<f64>,
    idf: IDFVector,
    tfidf: TermDocMatrix<f64>,
    normalization: NormalizationRow,
    #[serde(skip)]
    _marker: PhantomData<E>,
}

#[derive(Deserialize)]
struct CorpusParts {
    corpus: Corpus,
    vocabulary: Vocabulary,
    frequency: TermDocMatrix<u32>,
    tf: TermDocMatrix<f64>,
    idf: IDFVector,
    tfidf: TermDocMatrix<f64>,
    normalization: NormalizationRow,
}

fn check_shape<N>(
    part: &'static str,
    expected: (usize, usize),
    matrix: &TermDocMatrix<N>,
) -> Result<(), MatrixError>
where
    N: num::Num + Copy,
{
    let found = (matrix.rows(), matrix.cols());
    if found != expected {
        return Err(MatrixError::Shape {
            part,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_len(part: &'static str, expected: usize, found: usize) -> Result<(), MatrixError> {
    if found != expected {
        return Err(MatrixError::Length {
            part,
            expected,
            found,
        });
    }
    Ok(())
}

impl<E> TryFrom<CorpusParts> for CorpusMatrices<E>
where
    E: TFIDFEngine,
{
    type Error = MatrixError;

    fn try_from(parts: CorpusParts) -> Result<Self, Self::Error> {
        if parts.vocabulary != parts.corpus.vocabulary() {
            return Err(MatrixError::VocabularyMismatch);
        }
        let shape = (parts.vocabulary.len(), parts.corpus.doc_num());
        check_shape("frequency matrix", shape, &parts.frequency)?;
        check_shape("tf matrix", shape, &parts.tf)?;
        check_shape("tf-idf matrix", shape, &parts.tfidf)?;
        check_len("idf table", shape.0, parts.idf.len())?;
        check_len("normalization row", shape.1, parts.normalization.len())?;
        Ok(Self {
            corpus: parts.corpus,
            vocabulary: parts.vocabulary,
            frequency: parts.frequency,
            tf: parts.tf,
            idf: parts.idf,
            tfidf: parts.tfidf,
            normalization: parts.normalization,
            _marker: PhantomData,
        })
    }
}

impl CorpusMatrices {
    /// Build the bundle for `documents` with the default engine
    pub fn from_documents<I, S>(documents: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(Corpus::new(documents))
    }
}

impl<E> CorpusMatrices<E>
where
    E: TFIDFEngine,
{
    /// Run every pipeline step in dependency order
    pub fn build(corpus: Corpus) -> Result<Self, MatrixError> {
        let mut session: TFIDFVectorizer<E> = TFIDFVectorizer::new(corpus);
        session.calc_frequency();
        session.calc_tf()?;
        session.calc_idf()?;
        session.calc_tfidf()?;
        session.calc_normalization()?;
        session.into_matrices()
    }

    #[inline]
    pub fn doc_num(&self) -> usize {
        self.corpus.doc_num()
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn frequency(&self) -> &TermDocMatrix<u32> {
        &self.frequency
    }

    pub fn tf(&self) -> &TermDocMatrix<f64> {
        &self.tf
    }

    pub fn idf(&self) -> &IDFVector {
        &self.idf
    }

    pub fn tfidf(&self) -> &TermDocMatrix<f64> {
        &self.tfidf
    }

    /// Square root of each TF-IDF column sum, one per document
    pub fn normalization(&self) -> &NormalizationRow {
        &self.normalization
    }

    pub fn boolean(&self, queries: &[Query]) -> Vec<BooleanRow> {
        BooleanMatcher::match_queries(&self.corpus, queries)
    }

    pub fn ranker(&self) -> VectorSimilarityRanker<'_, E> {
        VectorSimilarityRanker::new(&self.vocabulary, &self.idf, &self.tfidf)
    }

    pub fn similarity(&self, queries: &[Query]) -> Vec<SimilarityRow> {
        self.ranker().score_all(queries)
    }
}

/// Table views of the bundle
impl<E> CorpusMatrices<E>
where
    E: TFIDFEngine,
{
    pub fn frequency_table(&self) -> Table {
        Table::from_matrix(
            "Term",
            self.vocabulary.to_labels(),
            self.corpus.labels(),
            &self.frequency,
        )
    }

    pub fn tf_table(&self) -> Table {
        Table::from_matrix("Term", self.vocabulary.to_labels(), self.corpus.labels(), &self.tf)
    }

    pub fn idf_table(&self) -> Table {
        Table::new(
            "Term",
            self.vocabulary.to_labels(),
            vec!["IDF".to_string()],
            self.idf.idf_vec.clone(),
        )
    }

    pub fn tfidf_table(&self) -> Table {
        Table::from_matrix(
            "Term",
            self.vocabulary.to_labels(),
            self.corpus.labels(),
            &self.tfidf,
        )
    }

    /// Single `NORMALIZAÇÃO` row, columns `DOC 1..DOC n`
    pub fn normalization_table(&self) -> Table {
        Table::new(
            "",
            vec![NORMALIZATION_LABEL.to_string()],
            (1..=self.doc_num()).map(|i| format!("DOC {}", i)).collect(),
            self.normalization.values.clone(),
        )
    }

    /// Corpus tables in presentation order
    pub fn tables(&self) -> Vec<TitledTable> {
        vec![
            TitledTable::new("Frequency Matrix", self.frequency_table()),
            TitledTable::new("TF Matrix", self.tf_table()),
            TitledTable::new("IDF", self.idf_table()),
            TitledTable::new("TF-IDF Matrix", self.tfidf_table()),
            TitledTable::new("Normalization", self.normalization_table()),
        ]
    }

    /// 0/1 table of boolean matches, one row per query
    pub fn boolean_table(&self, rows: &[BooleanRow]) -> Table {
        let cells = rows
            .iter()
            .flat_map(|row| row.matches.iter().map(|&hit| if hit { 1.0 } else { 0.0 }))
            .collect();
        Table::new(
            "Query",
            (0..rows.len()).map(query_label).collect(),
            self.corpus.labels(),
            cells,
        )
    }

    pub fn similarity_table(&self, rows: &[SimilarityRow]) -> Table {
        let cells = rows.iter().flat_map(|row| row.scores.iter().copied()).collect();
        Table::new(
            "Query",
            (0..rows.len()).map(query_label).collect(),
            self.corpus.labels(),
            cells,
        )
    }
}
