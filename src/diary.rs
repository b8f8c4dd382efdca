use crate::error::{DiaryError, Warning};
use crate::notes::{self, TeacherNote};
use crate::roster::{self, StudentAccount};
use crate::sheet::{DiaryEntry, EntryDraft, SheetStore, UpsertOutcome};
use crate::tabular::{SheetId, TabularStore};

/// Trimmed exact-match login against the roster. An unknown name and a
/// wrong password fail identically so accounts cannot be enumerated.
pub fn login<T: TabularStore>(
    store: &T,
    roster: &SheetId,
    name: &str,
    password: &str,
) -> Result<StudentAccount, DiaryError> {
    match roster::lookup_student(store, roster, name)? {
        Some(account) if account.password == password.trim() => Ok(account),
        _ => Err(DiaryError::AuthFailure),
    }
}

/// The caller-facing surface for one logged-in student. One facade per
/// login session; it owns that session's listing cache and nothing else.
/// Every successful mutation drops the cache, so a read that follows a
/// write always reflects it.
///
/// Nothing stops two facades (two browser tabs) from racing on the same
/// sheet; the second write for a date wins. Accepted limitation.
pub struct DiaryFacade {
    sheet: SheetId,
    cache: Option<Vec<DiaryEntry>>,
}

impl DiaryFacade {
    pub fn new(sheet: SheetId) -> Self {
        DiaryFacade { sheet, cache: None }
    }

    pub fn for_account(account: &StudentAccount) -> Self {
        Self::new(account.sheet.clone())
    }

    pub fn sheet(&self) -> &SheetId {
        &self.sheet
    }

    /// Cached listing; `force_refresh` (or an empty cache) re-reads the
    /// sheet. A cache hit reports no warnings — they were already
    /// surfaced by the read that filled the cache.
    pub fn load_entries<T: TabularStore>(
        &mut self,
        store: &T,
        force_refresh: bool,
    ) -> Result<(Vec<DiaryEntry>, Vec<Warning>), DiaryError> {
        if !force_refresh {
            if let Some(cached) = &self.cache {
                return Ok((cached.clone(), Vec::new()));
            }
        }
        let sheet = SheetStore::new(store, &self.sheet);
        let (entries, warnings) = sheet.list_entries()?;
        self.cache = Some(entries.clone());
        Ok((entries, warnings))
    }

    pub fn submit_entry<T: TabularStore>(
        &mut self,
        store: &T,
        date: &str,
        emotion: &str,
        gratitude: &str,
        message: &str,
    ) -> Result<UpsertOutcome, DiaryError> {
        let sheet = SheetStore::new(store, &self.sheet);
        let draft = EntryDraft {
            date: date.to_string(),
            emotion: emotion.to_string(),
            gratitude: gratitude.to_string(),
            message: message.to_string(),
            teacher_note: None,
        };
        let outcome = sheet.upsert_entry(&draft)?;
        self.cache = None;
        Ok(outcome)
    }

    pub fn delete_entry<T: TabularStore>(
        &mut self,
        store: &T,
        date: &str,
    ) -> Result<(), DiaryError> {
        let sheet = SheetStore::new(store, &self.sheet);
        sheet.delete_entry(date)?;
        self.cache = None;
        Ok(())
    }

    /// Notes arrive out-of-band from the teacher, so this path never
    /// trusts the session cache: it drops it and re-reads.
    pub fn check_notes<T: TabularStore>(
        &mut self,
        store: &T,
    ) -> Result<(Vec<TeacherNote>, Vec<Warning>), DiaryError> {
        self.cache = None;
        let sheet = SheetStore::new(store, &self.sheet);
        notes::check_for_new_notes(&sheet)
    }
}
