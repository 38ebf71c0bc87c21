//! Workbook export
//!
//! Tables are laid out side by side on one sheet. Every block has a title
//! row, then a header row (corner label + column labels), then one row per
//! table row (row label + values). Blocks are separated by `gutter` empty
//! columns, which is also what lets [`Sheet::read_tables`] find them again.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::WorkbookError,
    utils::table::{Table, TitledTable},
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

static EMPTY_CELL: Cell = Cell::Empty;

/// Grid of cells, `rows[r][c]`
/// Rows may be ragged; missing cells read as [`Cell::Empty`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Write a cell, growing the grid as needed
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let line = &mut self.rows[row];
        if line.len() <= col {
            line.resize_with(col + 1, Cell::default);
        }
        line[col] = cell;
    }

    /// Widest row length
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    fn text_at(&self, row: usize, col: usize, what: &str) -> Result<&str, WorkbookError> {
        match self.get(row, col) {
            Cell::Text(s) => Ok(s.as_str()),
            other => Err(WorkbookError::Layout {
                row,
                col,
                reason: format!("expected {} text, found {:?}", what, other),
            }),
        }
    }

    /// Recover every titled table placed by [`SheetLayout::place`]
    pub fn read_tables(&self) -> Result<Vec<TitledTable>, WorkbookError> {
        let width = self.width();
        let mut tables = Vec::new();
        let mut col = 0;
        while col < width {
            let title = match self.get(0, col) {
                Cell::Empty => {
                    col += 1;
                    continue;
                }
                Cell::Text(title) => title.clone(),
                Cell::Number(_) => {
                    return Err(WorkbookError::Layout {
                        row: 0,
                        col,
                        reason: "title row holds a number".to_string(),
                    })
                }
            };
            let corner = self.text_at(1, col, "corner label")?.to_string();

            let mut column_labels = Vec::new();
            let mut c = col + 1;
            while !matches!(self.get(1, c), Cell::Empty) {
                column_labels.push(self.text_at(1, c, "column label")?.to_string());
                c += 1;
            }

            let mut row_labels = Vec::new();
            let mut cells = Vec::new();
            let mut r = 2;
            while !matches!(self.get(r, col), Cell::Empty) {
                row_labels.push(self.text_at(r, col, "row label")?.to_string());
                for j in 0..column_labels.len() {
                    match self.get(r, col + 1 + j) {
                        Cell::Number(v) => cells.push(*v),
                        other => {
                            return Err(WorkbookError::Layout {
                                row: r,
                                col: col + 1 + j,
                                reason: format!("expected a number, found {:?}", other),
                            })
                        }
                    }
                }
                r += 1;
            }

            col += 1 + column_labels.len();
            tables.push(TitledTable::new(
                title,
                Table::new(corner, row_labels, column_labels, cells),
            ));
        }
        Ok(tables)
    }
}

/// Side-by-side placement of titled tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    gutter: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self { gutter: 2 }
    }
}

impl SheetLayout {
    /// `gutter` empty columns between blocks, at least 1
    pub fn new(gutter: usize) -> Result<Self, WorkbookError> {
        if gutter == 0 {
            return Err(WorkbookError::InvalidGutter(gutter));
        }
        Ok(Self { gutter })
    }

    #[inline]
    pub fn gutter(&self) -> usize {
        self.gutter
    }

    /// Lay `tables` out left to right in the given order
    /// The tables are only read.
    pub fn place(&self, name: &str, tables: &[TitledTable]) -> Sheet {
        let mut sheet = Sheet::new(name);
        let mut col = 0;
        for TitledTable { title, table } in tables {
            sheet.set(0, col, Cell::Text(title.clone()));
            sheet.set(1, col, Cell::Text(table.corner.clone()));
            for (j, label) in table.column_labels.iter().enumerate() {
                sheet.set(1, col + 1 + j, Cell::Text(label.clone()));
            }
            for (i, label) in table.row_labels.iter().enumerate() {
                sheet.set(2 + i, col, Cell::Text(label.clone()));
                for (j, &value) in table.row(i).iter().enumerate() {
                    sheet.set(2 + i, col + 1 + j, Cell::Number(value));
                }
            }
            debug!(title = title.as_str(), col, "table placed");
            col += 1 + table.cols() + self.gutter;
        }
        sheet
    }
}

/// Collection of sheets persisted as one file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Workbook with a single sheet holding `tables`
    pub fn from_tables(sheet: &str, layout: SheetLayout, tables: &[TitledTable]) -> Self {
        Self {
            sheets: vec![layout.place(sheet, tables)],
        }
    }

    pub fn sheet(&self, name: &str) -> Result<&Sheet, WorkbookError> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| WorkbookError::MissingSheet(name.to_string()))
    }

    pub fn write_cbor<W: Write>(&self, writer: W) -> Result<(), WorkbookError> {
        serde_cbor::to_writer(writer, self)?;
        Ok(())
    }

    pub fn read_cbor<R: Read>(reader: R) -> Result<Self, WorkbookError> {
        Ok(serde_cbor::from_reader(reader)?)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), WorkbookError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn read_json<R: Read>(reader: R) -> Result<Self, WorkbookError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// `.json` files are written as JSON, everything else as CBOR
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WorkbookError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        if is_json(path) {
            self.write_json(&mut writer)?;
        } else {
            self.write_cbor(&mut writer)?;
        }
        writer.flush()?;
        debug!(path = %path.display(), sheets = self.sheets.len(), "workbook saved");
        Ok(())
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, WorkbookError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        if is_json(path) {
            Self::read_json(reader)
        } else {
            Self::read_cbor(reader)
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn tables() -> Vec<TitledTable> {
        vec![
            TitledTable::new(
                "Frequency",
                Table::new(
                    "Term",
                    labels(&["a", "b"]),
                    labels(&["D1", "D2"]),
                    vec![2.0, 0.0, 1.0, 1.0],
                ),
            ),
            TitledTable::new(
                "IDF",
                Table::new("Term", labels(&["a", "b"]), labels(&["IDF"]), vec![1.0, 0.0]),
            ),
            TitledTable::new(
                "Normalization",
                Table::new(
                    "",
                    labels(&["NORMALIZAÇÃO"]),
                    labels(&["DOC 1", "DOC 2"]),
                    vec![1.5, 0.25],
                ),
            ),
        ]
    }

    #[test]
    fn gutter_must_be_positive() {
        assert!(matches!(SheetLayout::new(0), Err(WorkbookError::InvalidGutter(0))));
        assert_eq!(SheetLayout::new(3).unwrap().gutter(), 3);
    }

    #[test]
    fn blocks_are_placed_side_by_side() {
        let sheet = SheetLayout::default().place("Report", &tables());
        assert_eq!(sheet.get(0, 0), &Cell::Text("Frequency".into()));
        assert_eq!(sheet.get(1, 2), &Cell::Text("D2".into()));
        assert_eq!(sheet.get(2, 1), &Cell::Number(2.0));
        // 1 label column + 2 values + gutter 2
        assert_eq!(sheet.get(0, 5), &Cell::Text("IDF".into()));
        assert_eq!(sheet.get(0, 3), &Cell::Empty);
        assert_eq!(sheet.get(0, 9), &Cell::Text("Normalization".into()));
        assert_eq!(sheet.get(1, 9), &Cell::Text(String::new()));
        assert_eq!(sheet.width(), 12);
    }

    #[test]
    fn read_back_reproduces_tables() {
        let tables = tables();
        for gutter in [1, 2, 5] {
            let sheet = SheetLayout::new(gutter).unwrap().place("Report", &tables);
            assert_eq!(sheet.read_tables().unwrap(), tables);
        }
    }

    #[test]
    fn empty_tables_survive() {
        let tables = vec![
            TitledTable::new(
                "Nothing",
                Table::new("Term", Vec::new(), labels(&["D1"]), Vec::new()),
            ),
            TitledTable::new(
                "No docs",
                Table::new("Term", labels(&["a"]), Vec::new(), Vec::new()),
            ),
        ];
        let sheet = SheetLayout::new(1).unwrap().place("Report", &tables);
        assert_eq!(sheet.read_tables().unwrap(), tables);
    }

    #[test]
    fn malformed_grid_is_reported() {
        let mut sheet = Sheet::new("bad");
        sheet.set(0, 0, Cell::Text("T".into()));
        sheet.set(1, 0, Cell::Text("Term".into()));
        sheet.set(1, 1, Cell::Text("D1".into()));
        sheet.set(2, 0, Cell::Text("a".into()));
        sheet.set(2, 1, Cell::Text("oops".into()));
        assert!(matches!(
            sheet.read_tables(),
            Err(WorkbookError::Layout { row: 2, col: 1, .. })
        ));
    }

    #[test]
    fn cbor_and_json_round_trip() {
        let wb = Workbook::from_tables("Report", SheetLayout::default(), &tables());

        let mut cbor = Vec::new();
        wb.write_cbor(&mut cbor).unwrap();
        assert_eq!(Workbook::read_cbor(cbor.as_slice()).unwrap(), wb);

        let mut json = Vec::new();
        wb.write_json(&mut json).unwrap();
        let back = Workbook::read_json(json.as_slice()).unwrap();
        assert_eq!(back.sheet("Report").unwrap().read_tables().unwrap(), tables());
        assert!(matches!(back.sheet("Other"), Err(WorkbookError::MissingSheet(_))));
    }
}
