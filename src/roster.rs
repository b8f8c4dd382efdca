use crate::error::DiaryError;
use crate::tabular::{SheetId, TabularStore};

/// Default name of the roster sheet. Unlike diary sheets it uses the
/// ordinary single-header-row convention and is read-only to this crate.
pub const ROSTER_SHEET: &str = "학생목록";

pub const ROSTER_HEADER: [&str; 3] = ["이름", "비밀번호", "시트URL"];

/// One roster row: who the student is and where their diary sheet lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentAccount {
    pub name: String,
    pub password: String,
    pub sheet: SheetId,
}

/// Scan the roster for a student by trimmed name. The first matching row
/// wins; names are expected to be unique.
pub fn lookup_student<T: TabularStore>(
    store: &T,
    roster: &SheetId,
    name: &str,
) -> Result<Option<StudentAccount>, DiaryError> {
    let rows = store.read_all_rows(roster)?;
    let wanted = name.trim();
    if wanted.is_empty() {
        return Ok(None);
    }
    for row in rows.iter().skip(1) {
        let row_name = row.first().map(|s| s.trim()).unwrap_or("");
        if row_name == wanted {
            return Ok(Some(StudentAccount {
                name: row_name.to_string(),
                password: row.get(1).map(|s| s.trim().to_string()).unwrap_or_default(),
                sheet: SheetId::new(row.get(2).map(|s| s.trim()).unwrap_or("")),
            }));
        }
    }
    Ok(None)
}
