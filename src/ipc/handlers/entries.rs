use serde_json::json;

use crate::ipc::error::{diary_err, err, ok, warnings_json};
use crate::ipc::types::{AppState, Request};
use crate::sheet::{parse_iso_date, DiaryEntry, UpsertOutcome};

fn entries_json(entries: &[DiaryEntry]) -> serde_json::Value {
    json!(entries
        .iter()
        .map(|e| json!({
            "date": e.date,
            "emotion": e.emotion,
            "gratitude": e.gratitude,
            "message": e.message,
            "teacherNote": e.teacher_note,
        }))
        .collect::<Vec<_>>())
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let AppState { db, session, .. } = state;
    let (Some(db), Some(session)) = (db.as_ref(), session.as_mut()) else {
        return err(&req.id, "not_logged_in", "log in first", None);
    };
    let force = req
        .params
        .get("forceRefresh")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    match session.facade.load_entries(db, force) {
        Ok((entries, warnings)) => ok(
            &req.id,
            json!({
                "entries": entries_json(&entries),
                "warnings": warnings_json(&warnings),
            }),
        ),
        Err(e) => diary_err(&req.id, &e),
    }
}

fn handle_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let AppState { db, session, .. } = state;
    let (Some(db), Some(session)) = (db.as_ref(), session.as_mut()) else {
        return err(&req.id, "not_logged_in", "log in first", None);
    };
    let emotion = match req.params.get("emotion").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing emotion", None),
    };
    let gratitude = req
        .params
        .get("gratitude")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let message = req
        .params
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    // The original flow always wrote "today"; an explicit date is allowed
    // for editing past days.
    let date = match req.params.get("date").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
    };
    if parse_iso_date(&date).is_none() {
        return err(
            &req.id,
            "bad_params",
            format!("date must be YYYY-MM-DD, got {:?}", date),
            None,
        );
    }

    match session.facade.submit_entry(db, &date, emotion, gratitude, message) {
        Ok(outcome) => {
            let outcome = match outcome {
                UpsertOutcome::Created => "created",
                UpsertOutcome::Updated => "updated",
            };
            ok(&req.id, json!({ "date": date, "outcome": outcome }))
        }
        Err(e) => diary_err(&req.id, &e),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let AppState { db, session, .. } = state;
    let (Some(db), Some(session)) = (db.as_ref(), session.as_mut()) else {
        return err(&req.id, "not_logged_in", "log in first", None);
    };
    let date = match req.params.get("date").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing date", None),
    };

    match session.facade.delete_entry(db, date) {
        Ok(()) => ok(&req.id, json!({ "date": date, "deleted": true })),
        Err(e) => diary_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "entries.list" => Some(handle_list(state, req)),
        "entries.submit" => Some(handle_submit(state, req)),
        "entries.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
