use serde_json::json;

use crate::emotions::EMOTION_GROUPS;
use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};

fn handle_list(req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "groups": EMOTION_GROUPS
                .iter()
                .map(|g| json!({ "group": g.group, "details": g.details }))
                .collect::<Vec<_>>(),
        }),
    )
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "emotions.list" => Some(handle_list(req)),
        _ => None,
    }
}
