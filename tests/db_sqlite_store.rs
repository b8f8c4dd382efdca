use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use moodlogd::db::open_db;
use moodlogd::error::DiaryError;
use moodlogd::notes::check_for_new_notes;
use moodlogd::sheet::{EntryDraft, SheetStore};
use moodlogd::tabular::{SheetId, TabularStore};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn appended_rows_read_back_in_order() {
    let ws = temp_dir("moodlog-sqlite-append");
    let store = open_db(&ws).expect("open workspace");
    let sheet = SheetId::new("sheet-test");

    store.append_row(&sheet, &row(&["a", "b"])).expect("row 1");
    store.append_row(&sheet, &row(&["c", "d", "e"])).expect("row 2");

    let rows = store.read_all_rows(&sheet).expect("read");
    assert_eq!(rows, vec![row(&["a", "b"]), row(&["c", "d", "e"])]);

    let _ = std::fs::remove_dir_all(ws);
}

#[test]
fn sparse_cells_pad_with_empty_strings() {
    let ws = temp_dir("moodlog-sqlite-sparse");
    let store = open_db(&ws).expect("open workspace");
    let sheet = SheetId::new("sheet-test");

    store.write_cell(&sheet, 2, 3, "x").expect("lone cell");

    let rows = store.read_all_rows(&sheet).expect("read");
    assert_eq!(rows, vec![Vec::<String>::new(), row(&["", "", "x"])]);
    assert_eq!(store.read_cell(&sheet, 1, 1).expect("absent cell"), "");

    let _ = std::fs::remove_dir_all(ws);
}

#[test]
fn write_row_overwrites_the_exact_range() {
    let ws = temp_dir("moodlog-sqlite-writerow");
    let store = open_db(&ws).expect("open workspace");
    let sheet = SheetId::new("sheet-test");

    store
        .append_row(&sheet, &row(&["1", "2", "3", "4", "5"]))
        .expect("append");
    store
        .write_row(&sheet, 1, &row(&["a", "b", "c", "d", "e"]))
        .expect("overwrite");

    let rows = store.read_all_rows(&sheet).expect("read");
    assert_eq!(rows, vec![row(&["a", "b", "c", "d", "e"])]);

    let _ = std::fs::remove_dir_all(ws);
}

#[test]
fn delete_row_shifts_later_rows_up() {
    let ws = temp_dir("moodlog-sqlite-delete");
    let store = open_db(&ws).expect("open workspace");
    let sheet = SheetId::new("sheet-test");

    store.append_row(&sheet, &row(&["one"])).expect("row 1");
    store.append_row(&sheet, &row(&["two"])).expect("row 2");
    store.append_row(&sheet, &row(&["three"])).expect("row 3");

    store.delete_row(&sheet, 2).expect("delete middle");

    let rows = store.read_all_rows(&sheet).expect("read");
    assert_eq!(rows, vec![row(&["one"]), row(&["three"])]);

    let err = store.delete_row(&sheet, 9).expect_err("out of range");
    assert!(matches!(err, DiaryError::StoreUnavailable(_)));

    let _ = std::fs::remove_dir_all(ws);
}

#[test]
fn a_reopened_workspace_keeps_its_rows() {
    let ws = temp_dir("moodlog-sqlite-reopen");
    let sheet = SheetId::new("sheet-test");
    {
        let store = open_db(&ws).expect("open workspace");
        store.append_row(&sheet, &row(&["persists"])).expect("append");
    }

    let store = open_db(&ws).expect("reopen workspace");
    let rows = store.read_all_rows(&sheet).expect("read");
    assert_eq!(rows, vec![row(&["persists"])]);

    let _ = std::fs::remove_dir_all(ws);
}

#[test]
fn the_diary_layer_runs_unchanged_on_sqlite() {
    let ws = temp_dir("moodlog-sqlite-diary");
    let store = open_db(&ws).expect("open workspace");
    let sheet = SheetId::new("sheet-하늘");
    let shop = SheetStore::new(&store, &sheet);

    shop.upsert_entry(&EntryDraft {
        date: "2024-01-10".to_string(),
        emotion: "😀 긍정 - 기쁨".to_string(),
        gratitude: "맑음".to_string(),
        message: "안녕".to_string(),
        teacher_note: None,
    })
    .expect("upsert");
    store.write_cell(&sheet, 3, 5, "수고했어요").expect("note");

    let (entries, warnings) = shop.list_entries().expect("list");
    assert!(warnings.is_empty());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].teacher_note, "수고했어요");

    let (notes, _) = check_for_new_notes(&shop).expect("check notes");
    assert_eq!(notes.len(), 1);
    assert_eq!(shop.get_watermark().expect("watermark"), "2024-01-10");

    let _ = std::fs::remove_dir_all(ws);
}
