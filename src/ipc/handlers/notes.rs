use serde_json::json;

use crate::ipc::error::{diary_err, err, ok, warnings_json};
use crate::ipc::types::{AppState, Request};

fn handle_check(state: &mut AppState, req: &Request) -> serde_json::Value {
    let AppState { db, session, .. } = state;
    let (Some(db), Some(session)) = (db.as_ref(), session.as_mut()) else {
        return err(&req.id, "not_logged_in", "log in first", None);
    };

    match session.facade.check_notes(db) {
        Ok((notes, warnings)) => ok(
            &req.id,
            json!({
                "notes": notes
                    .iter()
                    .map(|n| json!({ "date": n.date, "note": n.note }))
                    .collect::<Vec<_>>(),
                "count": notes.len(),
                "warnings": warnings_json(&warnings),
            }),
        ),
        Err(e) => diary_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "notes.check" => Some(handle_check(state, req)),
        _ => None,
    }
}
