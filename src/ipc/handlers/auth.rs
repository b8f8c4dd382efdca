use serde_json::json;
use uuid::Uuid;

use crate::diary::{self, DiaryFacade};
use crate::ipc::error::{diary_err, err, ok};
use crate::ipc::types::{AppState, Request, Session};

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(db) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let name = match req.params.get("name").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing name", None),
    };
    let password = match req.params.get("password").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing password", None),
    };

    match diary::login(db, &state.roster, name, password) {
        Ok(account) => {
            let session = Session {
                session_id: Uuid::new_v4().to_string(),
                facade: DiaryFacade::for_account(&account),
                account,
            };
            let result = json!({
                "sessionId": session.session_id,
                "name": session.account.name,
            });
            state.session = Some(session);
            ok(&req.id, result)
        }
        Err(e) => diary_err(&req.id, &e),
    }
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    let was_logged_in = state.session.take().is_some();
    ok(&req.id, json!({ "loggedOut": was_logged_in }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.login" => Some(handle_login(state, req)),
        "auth.logout" => Some(handle_logout(state, req)),
        _ => None,
    }
}
