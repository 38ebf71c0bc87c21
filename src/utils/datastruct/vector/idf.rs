use serde::{Deserialize, Serialize};

/// IDF table
/// One weight per vocabulary term, in vocabulary order.
/// It is computed once per corpus and reused unchanged for every query.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct IDFVector {
    /// IDF Vector it is not sparse because it is mostly filled
    pub idf_vec: Vec<f64>,
    /// document count the weights were computed from
    pub doc_num: u64,
}

impl IDFVector {
    /// IDF of the term at `term` row
    #[inline]
    pub fn get(&self, term: usize) -> Option<f64> {
        self.idf_vec.get(term).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.idf_vec.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idf_vec.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.idf_vec
    }
}
