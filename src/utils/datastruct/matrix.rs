use num::Num;
use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// Dense term-by-document matrix
/// Rows follow vocabulary order, columns follow document order.
/// Cells are stored row-major, so a term row is a contiguous slice.
///
/// `N` is the cell type (`u32` for raw counts, `f64` for weights).
///
/// # Serialization
/// Supported. Deserializing rejects a cell count other than `rows * cols`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawMatrix<N>",
    bound(deserialize = "N: Num + Copy + Deserialize<'de>")
)]
pub struct TermDocMatrix<N>
where
    N: Num + Copy,
{
    rows: usize,
    cols: usize,
    cells: Vec<N>,
}

#[derive(Deserialize)]
struct RawMatrix<N> {
    rows: usize,
    cols: usize,
    cells: Vec<N>,
}

impl<N> TryFrom<RawMatrix<N>> for TermDocMatrix<N>
where
    N: Num + Copy,
{
    type Error = MatrixError;

    fn try_from(raw: RawMatrix<N>) -> Result<Self, Self::Error> {
        let RawMatrix { rows, cols, cells } = raw;
        if rows.checked_mul(cols) != Some(cells.len()) {
            return Err(MatrixError::CellCount {
                rows,
                cols,
                found: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }
}

impl<N> TermDocMatrix<N>
where
    N: Num + Copy,
{
    /// Build every cell from its (term, doc) position
    ///
    /// # Arguments
    /// * `rows` - term数
    /// * `cols` - document数
    /// * `f` - `(term_idx, doc_idx) -> value`
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> N,
    {
        let mut cells = Vec::with_capacity(rows * cols);
        for term in 0..rows {
            for doc in 0..cols {
                cells.push(f(term, doc));
            }
        }
        Self { rows, cols, cells }
    }

    /// Number of term rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of document columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, term: usize, doc: usize) -> Option<N> {
        if term < self.rows && doc < self.cols {
            Some(self.cells[term * self.cols + doc])
        } else {
            None
        }
    }

    /// Values of one term across all documents
    /// Out of range yields an empty slice
    #[inline]
    pub fn row(&self, term: usize) -> &[N] {
        if term < self.rows {
            &self.cells[term * self.cols..(term + 1) * self.cols]
        } else {
            &[]
        }
    }

    /// Values of one document across all terms, in vocabulary order
    #[inline]
    pub fn column(&self, doc: usize) -> impl Iterator<Item = N> + '_ {
        let cols = self.cols;
        let rows = if doc < cols { self.rows } else { 0 };
        (0..rows).map(move |term| self.cells[term * cols + doc])
    }

    pub fn column_vec(&self, doc: usize) -> Vec<N> {
        self.column(doc).collect()
    }

    /// Row-major view of all cells
    #[inline]
    pub fn as_slice(&self) -> &[N] {
        &self.cells
    }

    /// Cell-wise transform keeping the shape
    pub fn map<M, F>(&self, mut f: F) -> TermDocMatrix<M>
    where
        M: Num + Copy,
        F: FnMut(usize, usize, N) -> M,
    {
        let cols = self.cols;
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, &v)| f(i / cols, i % cols, v))
            .collect();
        TermDocMatrix {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }
}
