use chrono::NaiveDate;

use crate::error::{DiaryError, Warning};
use crate::tabular::{SheetId, TabularStore};

/// Row 1 of every diary sheet: the settings tag and the last acknowledged
/// note date.
pub const SETTINGS_TAG: &str = "설정";
pub const DEFAULT_WATERMARK: &str = "2000-01-01";

/// Row 2: the fixed header. Field order is date, emotion, gratitude,
/// message, teacher note; everything below maps cells to fields by this
/// position.
pub const HEADER: [&str; 5] = ["날짜", "감정", "감사한 일", "하고 싶은 말", "선생님 쪽지"];

/// Rows 1-2 are reserved; entries start at physical row 3.
const FIRST_DATA_ROW: usize = 3;

const NOTE_COL: usize = 5;
const WATERMARK_COL: usize = 2;

/// One diary record, keyed by its calendar date. Cells a short physical
/// row does not carry read back as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryEntry {
    pub date: String,
    pub emotion: String,
    pub gratitude: String,
    pub message: String,
    pub teacher_note: String,
}

/// The student-authored side of a write. `teacher_note: None` keeps
/// whatever note is already stored for the date; the student write path
/// never clears teacher-authored content implicitly.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub date: String,
    pub emotion: String,
    pub gratitude: String,
    pub message: String,
    pub teacher_note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Strict `YYYY-MM-DD`: zero-padded, ten characters, and a real calendar
/// date. String ordering of well-formed dates happens to agree with
/// chronology, but nothing here relies on that.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

fn entry_from_row(row: &[String]) -> DiaryEntry {
    DiaryEntry {
        date: cell(row, 0).to_string(),
        emotion: cell(row, 1).to_string(),
        gratitude: cell(row, 2).to_string(),
        message: cell(row, 3).to_string(),
        teacher_note: cell(row, 4).to_string(),
    }
}

fn header_matches(row: &[String]) -> bool {
    row.len() >= HEADER.len()
        && row.iter().zip(HEADER.iter()).all(|(a, b)| a == b)
        && row.iter().skip(HEADER.len()).all(|c| c.is_empty())
}

fn repair_failed(e: DiaryError) -> DiaryError {
    match e {
        DiaryError::StoreUnavailable(m) => DiaryError::StructureRepair(m),
        other => other,
    }
}

/// Translates between the logical entry list and the physical rows of one
/// student's sheet. Row numbers are recomputed on every operation; a
/// delete shifts everything after it, so they must never be cached.
pub struct SheetStore<'a, T: TabularStore> {
    store: &'a T,
    sheet: &'a SheetId,
}

impl<'a, T: TabularStore> SheetStore<'a, T> {
    pub fn new(store: &'a T, sheet: &'a SheetId) -> Self {
        SheetStore { store, sheet }
    }

    /// Bring rows 1-2 into the expected shape before touching data rows.
    /// An empty sheet gets the settings row then the header appended; an
    /// existing sheet is repaired cell-by-cell (row 1) or rewritten
    /// wholesale (row 2) only where it actually differs, so a correct
    /// sheet sees zero writes.
    pub fn ensure_structure(&self) -> Result<(), DiaryError> {
        let rows = self.store.read_all_rows(self.sheet)?;
        if rows.is_empty() {
            let settings = [SETTINGS_TAG.to_string(), DEFAULT_WATERMARK.to_string()];
            self.store
                .append_row(self.sheet, &settings)
                .map_err(repair_failed)?;
            self.store
                .append_row(self.sheet, &header_values())
                .map_err(repair_failed)?;
            return Ok(());
        }

        let settings = &rows[0];
        if cell(settings, 0) != SETTINGS_TAG {
            self.store
                .write_cell(self.sheet, 1, 1, SETTINGS_TAG)
                .map_err(repair_failed)?;
        }
        // A readable watermark is user state and is left alone; anything
        // else resets to the epoch default.
        if parse_iso_date(cell(settings, 1).trim()).is_none() {
            self.store
                .write_cell(self.sheet, 1, WATERMARK_COL, DEFAULT_WATERMARK)
                .map_err(repair_failed)?;
        }

        match rows.get(1) {
            None => self
                .store
                .append_row(self.sheet, &header_values())
                .map_err(repair_failed)?,
            Some(header) if !header_matches(header) => {
                // Pad to the observed width so stray cells past the header
                // are blanked, not left behind.
                let mut values = header_values();
                if header.len() > values.len() {
                    values.resize(header.len(), String::new());
                }
                self.store
                    .write_row(self.sheet, 2, &values)
                    .map_err(repair_failed)?
            }
            Some(_) => {}
        }
        Ok(())
    }

    /// Every readable entry, in physical row order. Rows whose date cell
    /// is not a calendar date are skipped and reported as warnings. Each
    /// call re-reads the sheet in full.
    pub fn list_entries(&self) -> Result<(Vec<DiaryEntry>, Vec<Warning>), DiaryError> {
        self.ensure_structure()?;
        let rows = self.store.read_all_rows(self.sheet)?;
        let mut entries = Vec::new();
        let mut warnings = Vec::new();
        for (i, row) in rows.iter().enumerate().skip(FIRST_DATA_ROW - 1) {
            let date = cell(row, 0);
            if parse_iso_date(date.trim()).is_none() {
                warnings.push(Warning::MalformedRow {
                    row: i + 1,
                    date: date.to_string(),
                });
                continue;
            }
            entries.push(entry_from_row(row));
        }
        Ok((entries, warnings))
    }

    /// 1-based physical row holding `date`, by exact string comparison.
    /// A row the scan could not date-parse never matches.
    pub fn find_entry_row(&self, date: &str) -> Result<Option<usize>, DiaryError> {
        self.ensure_structure()?;
        let rows = self.store.read_all_rows(self.sheet)?;
        for (i, row) in rows.iter().enumerate().skip(FIRST_DATA_ROW - 1) {
            let stored = cell(row, 0);
            if parse_iso_date(stored.trim()).is_none() {
                continue;
            }
            if stored == date {
                return Ok(Some(i + 1));
            }
        }
        Ok(None)
    }

    /// The only mutating write besides delete: overwrite the date's row in
    /// place, or append a new row for a first write. `draft.date` must be
    /// a well-formed `YYYY-MM-DD`; a malformed date would be appended but
    /// never found again by the scan.
    pub fn upsert_entry(&self, draft: &EntryDraft) -> Result<UpsertOutcome, DiaryError> {
        self.ensure_structure()?;
        match self.find_entry_row(&draft.date)? {
            Some(row) => {
                let note = match &draft.teacher_note {
                    Some(n) => n.clone(),
                    None => self.store.read_cell(self.sheet, row, NOTE_COL)?,
                };
                self.store
                    .write_row(self.sheet, row, &draft_values(draft, note))?;
                Ok(UpsertOutcome::Updated)
            }
            None => {
                let note = draft.teacher_note.clone().unwrap_or_default();
                self.store
                    .append_row(self.sheet, &draft_values(draft, note))?;
                Ok(UpsertOutcome::Created)
            }
        }
    }

    /// Physical row deletion; rows below shift up by one.
    pub fn delete_entry(&self, date: &str) -> Result<(), DiaryError> {
        match self.find_entry_row(date)? {
            Some(row) => self.store.delete_row(self.sheet, row),
            None => Err(DiaryError::NotFound {
                date: date.to_string(),
            }),
        }
    }

    pub fn get_watermark(&self) -> Result<String, DiaryError> {
        self.ensure_structure()?;
        self.store.read_cell(self.sheet, 1, WATERMARK_COL)
    }

    pub fn set_watermark(&self, date: &str) -> Result<(), DiaryError> {
        self.ensure_structure()?;
        self.store.write_cell(self.sheet, 1, WATERMARK_COL, date)
    }
}

fn header_values() -> Vec<String> {
    HEADER.iter().map(|h| h.to_string()).collect()
}

fn draft_values(draft: &EntryDraft, note: String) -> Vec<String> {
    vec![
        draft.date.clone(),
        draft.emotion.clone(),
        draft.gratitude.clone(),
        draft.message.clone(),
        note,
    ]
}
