use serde::{Deserialize, Serialize};

use crate::utils::datastruct::TermDocMatrix;

/// One normalization scalar per document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizationRow {
    pub values: Vec<f64>,
}

impl NormalizationRow {
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Square root of each column sum of a TF-IDF matrix.
///
/// This is `sqrt(Σ w)`, not the Euclidean norm `sqrt(Σ w²)` that cosine
/// scoring uses. The two are separate operations and must stay that way.
pub fn column_sum_sqrt(tfidf: &TermDocMatrix<f64>) -> NormalizationRow {
    let values = (0..tfidf.cols())
        .map(|doc| tfidf.column(doc).sum::<f64>().sqrt())
        .collect();
    NormalizationRow { values }
}
