use chrono::NaiveDate;

use crate::error::{DiaryError, Warning};
use crate::sheet::{parse_iso_date, SheetStore};
use crate::tabular::TabularStore;

/// A teacher note surfaced by a watermark check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherNote {
    pub date: String,
    pub note: String,
}

/// Notes with a calendar date strictly after the acknowledged watermark,
/// oldest first. Surfacing any advances the watermark to the newest
/// surfaced date; an empty result leaves it untouched, so a note that
/// lands later the same day is still caught on the next check. A note
/// dated exactly on the watermark is considered already seen.
pub fn check_for_new_notes<T: TabularStore>(
    sheet: &SheetStore<'_, T>,
) -> Result<(Vec<TeacherNote>, Vec<Warning>), DiaryError> {
    let stored = sheet.get_watermark()?;
    // Unreadable stored values fall back to the epoch default, which
    // surfaces everything.
    let watermark = parse_iso_date(stored.trim()).or_else(|| NaiveDate::from_ymd_opt(2000, 1, 1));

    let (entries, warnings) = sheet.list_entries()?;
    let mut dated: Vec<(NaiveDate, TeacherNote)> = Vec::new();
    for entry in &entries {
        let note = entry.teacher_note.trim();
        if note.is_empty() {
            continue;
        }
        let Some(date) = parse_iso_date(entry.date.trim()) else {
            continue;
        };
        if watermark.map_or(true, |w| date > w) {
            dated.push((
                date,
                TeacherNote {
                    date: entry.date.clone(),
                    note: note.to_string(),
                },
            ));
        }
    }
    // Stable sort keeps scan order for equal dates, though dates are the
    // uniqueness key and should not repeat.
    dated.sort_by_key(|(date, _)| *date);

    if let Some((_, latest)) = dated.last() {
        let latest_date = latest.date.clone();
        sheet.set_watermark(&latest_date)?;
    }

    Ok((dated.into_iter().map(|(_, n)| n).collect(), warnings))
}
