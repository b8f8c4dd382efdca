use std::path::PathBuf;

use serde::Deserialize;

use crate::db::SqliteStore;
use crate::diary::DiaryFacade;
use crate::roster::{StudentAccount, ROSTER_SHEET};
use crate::tabular::SheetId;

#[derive(Debug, Deserialize)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// One logged-in student. The facade carries the session's listing cache,
/// so dropping the session drops the cache with it.
pub struct Session {
    pub session_id: String,
    pub account: StudentAccount,
    pub facade: DiaryFacade,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<SqliteStore>,
    pub roster: SheetId,
    pub session: Option<Session>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            workspace: None,
            db: None,
            roster: SheetId::new(ROSTER_SHEET),
            session: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
