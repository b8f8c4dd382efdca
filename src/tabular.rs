use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::error::DiaryError;

/// Opaque locator for one sheet within a workspace. For the sqlite
/// backend this is the sheet's name; a remote backend would carry a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetId(String);

impl SheetId {
    pub fn new(id: impl Into<String>) -> Self {
        SheetId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SheetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tabular storage contract. All indices are 1-based, spreadsheet style.
/// Implementations surface every backend failure as
/// `DiaryError::StoreUnavailable`; retry/backoff belongs to the backend,
/// not to callers of this trait.
pub trait TabularStore {
    /// Every physical row of the sheet, in order. Rows may be ragged.
    fn read_all_rows(&self, sheet: &SheetId) -> Result<Vec<Vec<String>>, DiaryError>;

    /// A single cell's text; empty string when the cell is absent.
    fn read_cell(&self, sheet: &SheetId, row: usize, col: usize) -> Result<String, DiaryError>;

    fn write_cell(
        &self,
        sheet: &SheetId,
        row: usize,
        col: usize,
        value: &str,
    ) -> Result<(), DiaryError>;

    /// Overwrite columns 1..=values.len() of one row. Cells beyond the
    /// range are left as they are.
    fn write_row(&self, sheet: &SheetId, row: usize, values: &[String])
        -> Result<(), DiaryError>;

    /// Always lands after the current last physical row.
    fn append_row(&self, sheet: &SheetId, values: &[String]) -> Result<(), DiaryError>;

    /// Physical deletion; rows after `row` shift up by one.
    fn delete_row(&self, sheet: &SheetId, row: usize) -> Result<(), DiaryError>;
}

/// In-process backend over a plain map of sheets. Used by tests and by
/// embedders that want a scratch workspace. Counts trait-level reads and
/// writes so callers can observe how many storage operations a higher
/// layer actually performed.
#[derive(Default)]
pub struct MemoryStore {
    sheets: RefCell<BTreeMap<SheetId, Vec<Vec<String>>>>,
    reads: Cell<usize>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_count(&self) -> usize {
        self.reads.get()
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Fixture helper: replace a sheet's rows wholesale without touching
    /// the operation counters.
    pub fn seed_rows(&self, sheet: &SheetId, rows: &[&[&str]]) {
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        self.sheets.borrow_mut().insert(sheet.clone(), rows);
    }

    /// Fixture helper: current rows of a sheet, uncounted.
    pub fn rows(&self, sheet: &SheetId) -> Vec<Vec<String>> {
        self.sheets.borrow().get(sheet).cloned().unwrap_or_default()
    }
}

impl TabularStore for MemoryStore {
    fn read_all_rows(&self, sheet: &SheetId) -> Result<Vec<Vec<String>>, DiaryError> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.sheets.borrow().get(sheet).cloned().unwrap_or_default())
    }

    fn read_cell(&self, sheet: &SheetId, row: usize, col: usize) -> Result<String, DiaryError> {
        self.reads.set(self.reads.get() + 1);
        let sheets = self.sheets.borrow();
        let value = sheets
            .get(sheet)
            .and_then(|rows| rows.get(row.saturating_sub(1)))
            .and_then(|cells| cells.get(col.saturating_sub(1)))
            .cloned()
            .unwrap_or_default();
        Ok(value)
    }

    fn write_cell(
        &self,
        sheet: &SheetId,
        row: usize,
        col: usize,
        value: &str,
    ) -> Result<(), DiaryError> {
        if row == 0 || col == 0 {
            return Err(DiaryError::StoreUnavailable(format!(
                "cell ({row}, {col}) is out of range"
            )));
        }
        self.writes.set(self.writes.get() + 1);
        let mut sheets = self.sheets.borrow_mut();
        let rows = sheets.entry(sheet.clone()).or_default();
        if rows.len() < row {
            rows.resize(row, Vec::new());
        }
        let cells = &mut rows[row - 1];
        if cells.len() < col {
            cells.resize(col, String::new());
        }
        cells[col - 1] = value.to_string();
        Ok(())
    }

    fn write_row(
        &self,
        sheet: &SheetId,
        row: usize,
        values: &[String],
    ) -> Result<(), DiaryError> {
        if row == 0 {
            return Err(DiaryError::StoreUnavailable(format!(
                "row {row} is out of range"
            )));
        }
        self.writes.set(self.writes.get() + 1);
        let mut sheets = self.sheets.borrow_mut();
        let rows = sheets.entry(sheet.clone()).or_default();
        if rows.len() < row {
            rows.resize(row, Vec::new());
        }
        let cells = &mut rows[row - 1];
        if cells.len() < values.len() {
            cells.resize(values.len(), String::new());
        }
        for (i, v) in values.iter().enumerate() {
            cells[i] = v.clone();
        }
        Ok(())
    }

    fn append_row(&self, sheet: &SheetId, values: &[String]) -> Result<(), DiaryError> {
        self.writes.set(self.writes.get() + 1);
        self.sheets
            .borrow_mut()
            .entry(sheet.clone())
            .or_default()
            .push(values.to_vec());
        Ok(())
    }

    fn delete_row(&self, sheet: &SheetId, row: usize) -> Result<(), DiaryError> {
        let mut sheets = self.sheets.borrow_mut();
        let rows = sheets.entry(sheet.clone()).or_default();
        if row == 0 || row > rows.len() {
            return Err(DiaryError::StoreUnavailable(format!(
                "row {row} is out of range"
            )));
        }
        self.writes.set(self.writes.get() + 1);
        rows.remove(row - 1);
        Ok(())
    }
}
