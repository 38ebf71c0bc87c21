/// This crate computes the classic Information Retrieval matrices of a small
/// document collection and matches free-text queries against it.
pub mod vectorizer;
pub mod utils;
pub mod error;
pub mod config;
pub mod logging;
pub mod workbook;

/// Corpus Matrices
/// The fully-populated, immutable result of the pipeline:
/// - The sorted vocabulary
/// - The raw frequency matrix
/// - The TF matrix (`1 + log2(f)`, 0 for absent terms)
/// - The IDF table (`log2(N / ni)`)
/// - The TF-IDF matrix
/// - The per-document normalization row (square root of the column sum)
///
/// Every matrix uses vocabulary order for rows and document order for columns.
///
/// # Serialization
/// Supported.
pub use vectorizer::CorpusMatrices;

/// Staged TF-IDF session
/// Computes the matrices one step at a time. A step called before the step
/// it depends on fails with `MatrixError::NotReady`.
///
/// `TFIDFVectorizer<E>` is generic over the calculation engine `E`
/// (default `DefaultTFIDFEngine`).
pub use vectorizer::TFIDFVectorizer;

/// Corpus, documents and vocabulary
/// Documents are identified by position and labeled `D1`, `D2`, ...
pub use vectorizer::corpus::{Corpus, Document, Vocabulary};

/// Term Frequency structure
/// Counts whitespace-delimited terms of one document or query.
pub use vectorizer::token::TermFrequency;

/// TF IDF Calculation Engine Trait
/// Defines the TF and IDF formulas; the matrix builders and the query vector
/// are provided on top of them, so corpus and queries always share a space.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Query models
/// - `BooleanMatcher`: conjunctive (AND) set matching
/// - `VectorSimilarityRanker`: cosine similarity over TF-IDF vectors
pub use vectorizer::evaluate::{
    boolean::{BooleanMatcher, BooleanRow},
    query::Query,
    scoring::{HitEntry, Hits, SimilarityRow, VectorSimilarityRanker},
};

/// Labeled table used for printing and export
pub use utils::table::{Table, TitledTable};

/// Errors
pub use error::{ConfigError, MatrixError, WorkbookError};
