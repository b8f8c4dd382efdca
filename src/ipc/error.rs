use serde_json::json;

use crate::error::{DiaryError, Warning};

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

/// Stable code per failure variant so the UI can branch without parsing
/// messages.
pub fn code_for(e: &DiaryError) -> &'static str {
    match e {
        DiaryError::StoreUnavailable(_) => "store_unavailable",
        DiaryError::StructureRepair(_) => "repair_failed",
        DiaryError::NotFound { .. } => "not_found",
        DiaryError::AuthFailure => "auth_failed",
    }
}

pub fn diary_err(id: &str, e: &DiaryError) -> serde_json::Value {
    err(id, code_for(e), e.to_string(), None)
}

pub fn warnings_json(warnings: &[Warning]) -> serde_json::Value {
    json!(warnings
        .iter()
        .map(|w| match w {
            Warning::MalformedRow { row, date } => json!({
                "kind": "malformed_row",
                "row": row,
                "date": date,
                "message": w.to_string(),
            }),
        })
        .collect::<Vec<_>>())
}
