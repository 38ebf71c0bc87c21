use std::fmt;

use num::Num;
use serde::{Deserialize, Serialize};

use crate::utils::datastruct::TermDocMatrix;

/// Labeled numeric table
/// This is the exchange format between the matrices and the printing /
/// export collaborators. Cells are row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// top-left header cell
    pub corner: String,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub cells: Vec<f64>,
}

/// `{title, table}` pair in presentation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitledTable {
    pub title: String,
    pub table: Table,
}

impl TitledTable {
    pub fn new(title: impl Into<String>, table: Table) -> Self {
        Self {
            title: title.into(),
            table,
        }
    }
}

impl Table {
    pub fn new(
        corner: impl Into<String>,
        row_labels: Vec<String>,
        column_labels: Vec<String>,
        cells: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(
            row_labels.len() * column_labels.len(),
            cells.len(),
            "cell count must match the label grid"
        );
        Self {
            corner: corner.into(),
            row_labels,
            column_labels,
            cells,
        }
    }

    /// Table of a term-document matrix
    pub fn from_matrix<N>(
        corner: impl Into<String>,
        row_labels: Vec<String>,
        column_labels: Vec<String>,
        matrix: &TermDocMatrix<N>,
    ) -> Self
    where
        N: Num + Copy + Into<f64>,
    {
        let cells = matrix.as_slice().iter().map(|&v| v.into()).collect();
        Self::new(corner, row_labels, column_labels, cells)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.row_labels.len()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.column_labels.len()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows() && col < self.cols() {
            self.cells.get(row * self.cols() + col).copied()
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let cols = self.cols();
        self.cells.get(row * cols..(row + 1) * cols).unwrap_or(&[])
    }

    /// Look a cell up by its labels
    pub fn value(&self, row_label: &str, column_label: &str) -> Option<f64> {
        let row = self.row_labels.iter().position(|l| l == row_label)?;
        let col = self.column_labels.iter().position(|l| l == column_label)?;
        self.get(row, col)
    }

    /// Aligned plain-text rendering
    /// Labels are left aligned, numbers right aligned with `precision` decimals.
    pub fn render(&self, precision: usize) -> String {
        let formatted: Vec<String> = self
            .cells
            .iter()
            .map(|v| format!("{:.*}", precision, v))
            .collect();

        let label_width = self
            .row_labels
            .iter()
            .map(|l| l.chars().count())
            .chain(std::iter::once(self.corner.chars().count()))
            .max()
            .unwrap_or(0);
        let cols = self.cols();
        let col_widths: Vec<usize> = self
            .column_labels
            .iter()
            .enumerate()
            .map(|(c, label)| {
                (0..self.rows())
                    .filter_map(|r| formatted.get(r * cols + c))
                    .map(|s| s.chars().count())
                    .chain(std::iter::once(label.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&format!("{:<width$}", self.corner, width = label_width));
        for (label, width) in self.column_labels.iter().zip(&col_widths) {
            out.push_str(&format!("  {:>width$}", label, width = *width));
        }
        for (r, row_label) in self.row_labels.iter().enumerate() {
            out.push('\n');
            out.push_str(&format!("{:<width$}", row_label, width = label_width));
            for (c, width) in col_widths.iter().enumerate() {
                let cell = formatted.get(r * cols + c).map_or("", String::as_str);
                out.push_str(&format!("  {:>width$}", cell, width = *width));
            }
        }
        out
    }
}

/// `{:.N}` picks the precision, default 4
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(f.precision().unwrap_or(4)))
    }
}

impl fmt::Display for TitledTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.title)?;
        f.write_str(&self.table.render(f.precision().unwrap_or(4)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Table {
        Table::new(
            "Term",
            labels(&["a", "bb"]),
            labels(&["D1", "D2"]),
            vec![2.0, 0.0, 1.0, 10.5],
        )
    }

    #[test]
    fn lookup_by_position_and_label() {
        let t = sample();
        assert_eq!(t.get(1, 1), Some(10.5));
        assert_eq!(t.get(2, 0), None);
        assert_eq!(t.value("bb", "D1"), Some(1.0));
        assert_eq!(t.value("c", "D1"), None);
        assert_eq!(t.row(0), &[2.0, 0.0]);
        assert!(t.row(9).is_empty());
    }

    #[test]
    fn render_aligns_columns() {
        let expected = "Term    D1     D2\n\
                        a     2.00   0.00\n\
                        bb    1.00  10.50";
        assert_eq!(sample().render(2), expected);
        assert_eq!(format!("{:.2}", sample()), expected);
    }

    #[test]
    fn render_without_columns() {
        let t = Table::new("Term", labels(&["a"]), Vec::new(), Vec::new());
        assert_eq!(t.render(4), "Term\na   ");
    }

    #[test]
    fn from_matrix_converts_counts() {
        let m = TermDocMatrix::from_fn(1, 2, |_, d| d as u32 + 1);
        let t = Table::from_matrix("Term", labels(&["x"]), labels(&["D1", "D2"]), &m);
        assert_eq!(t.cells, vec![1.0, 2.0]);
    }
}
