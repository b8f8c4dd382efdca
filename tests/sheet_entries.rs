use moodlogd::error::{DiaryError, Warning};
use moodlogd::sheet::{EntryDraft, SheetStore, UpsertOutcome};
use moodlogd::tabular::{MemoryStore, SheetId, TabularStore};

fn draft(date: &str, emotion: &str, gratitude: &str, message: &str) -> EntryDraft {
    EntryDraft {
        date: date.to_string(),
        emotion: emotion.to_string(),
        gratitude: gratitude.to_string(),
        message: message.to_string(),
        teacher_note: None,
    }
}

#[test]
fn first_entry_on_empty_sheet() {
    let store = MemoryStore::new();
    let sheet = SheetId::new("sheet-하늘");
    let shop = SheetStore::new(&store, &sheet);

    let outcome = shop
        .upsert_entry(&draft("2024-01-10", "😀 긍정 - 기쁨", "sunny day", "hi"))
        .expect("first upsert");
    assert_eq!(outcome, UpsertOutcome::Created);

    let (entries, warnings) = shop.list_entries().expect("list");
    assert!(warnings.is_empty());
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.date, "2024-01-10");
    assert_eq!(entry.emotion, "😀 긍정 - 기쁨");
    assert_eq!(entry.gratitude, "sunny day");
    assert_eq!(entry.message, "hi");
    assert_eq!(entry.teacher_note, "");
}

#[test]
fn repeated_writes_for_one_date_keep_exactly_one_entry_with_last_content() {
    let store = MemoryStore::new();
    let sheet = SheetId::new("sheet-하늘");
    let shop = SheetStore::new(&store, &sheet);

    let first = shop
        .upsert_entry(&draft("2024-01-10", "😀 긍정 - 기쁨", "sunny day", "hi"))
        .expect("create");
    assert_eq!(first, UpsertOutcome::Created);
    let second = shop
        .upsert_entry(&draft("2024-01-10", "😢 부정 - 슬픔", "nothing", "bye"))
        .expect("update");
    assert_eq!(second, UpsertOutcome::Updated);
    let third = shop
        .upsert_entry(&draft("2024-01-10", "😐 보통 - 지루함", "", "again"))
        .expect("update again");
    assert_eq!(third, UpsertOutcome::Updated);

    let (entries, _) = shop.list_entries().expect("list");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].emotion, "😐 보통 - 지루함");
    assert_eq!(entries[0].message, "again");
    assert_eq!(entries[0].teacher_note, "");
}

#[test]
fn student_update_carries_existing_teacher_note_forward() {
    let store = MemoryStore::new();
    let sheet = SheetId::new("sheet-하늘");
    let shop = SheetStore::new(&store, &sheet);

    shop.upsert_entry(&draft("2024-01-10", "😀 긍정 - 기쁨", "sunny day", "hi"))
        .expect("create");
    // The teacher writes the note column out-of-band.
    store
        .write_cell(&sheet, 3, 5, "참 잘했어요")
        .expect("teacher note");

    shop.upsert_entry(&draft("2024-01-10", "😢 부정 - 슬픔", "nothing", "bye"))
        .expect("student update");

    let (entries, _) = shop.list_entries().expect("list");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].teacher_note, "참 잘했어요");
    assert_eq!(entries[0].emotion, "😢 부정 - 슬픔");
}

#[test]
fn explicitly_supplied_note_wins_over_the_stored_one() {
    let store = MemoryStore::new();
    let sheet = SheetId::new("sheet-하늘");
    let shop = SheetStore::new(&store, &sheet);

    shop.upsert_entry(&draft("2024-01-10", "😀 긍정 - 기쁨", "", ""))
        .expect("create");
    store.write_cell(&sheet, 3, 5, "이전 쪽지").expect("old note");

    let mut with_note = draft("2024-01-10", "😀 긍정 - 기쁨", "", "");
    with_note.teacher_note = Some("새 쪽지".to_string());
    shop.upsert_entry(&with_note).expect("note overwrite");

    let (entries, _) = shop.list_entries().expect("list");
    assert_eq!(entries[0].teacher_note, "새 쪽지");
}

#[test]
fn delete_then_recreate_starts_with_an_empty_note() {
    let store = MemoryStore::new();
    let sheet = SheetId::new("sheet-하늘");
    let shop = SheetStore::new(&store, &sheet);

    shop.upsert_entry(&draft("2024-01-10", "😀 긍정 - 기쁨", "A", "A"))
        .expect("create");
    store.write_cell(&sheet, 3, 5, "쪽지").expect("note");
    shop.delete_entry("2024-01-10").expect("delete");
    shop.upsert_entry(&draft("2024-01-10", "😢 부정 - 슬픔", "B", "B"))
        .expect("recreate");

    let (entries, _) = shop.list_entries().expect("list");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].gratitude, "B");
    assert_eq!(entries[0].teacher_note, "");
}

#[test]
fn delete_of_a_missing_date_is_not_found() {
    let store = MemoryStore::new();
    let sheet = SheetId::new("sheet-하늘");
    let shop = SheetStore::new(&store, &sheet);

    let err = shop.delete_entry("2024-05-05").expect_err("nothing to delete");
    assert!(matches!(err, DiaryError::NotFound { .. }));
}

#[test]
fn short_rows_read_back_with_empty_trailing_fields() {
    let store = MemoryStore::new();
    let sheet = SheetId::new("sheet-하늘");
    store.seed_rows(
        &sheet,
        &[
            &["설정", "2000-01-01"],
            &["날짜", "감정", "감사한 일", "하고 싶은 말", "선생님 쪽지"],
            &["2024-01-02", "😀 긍정 - 평온"],
        ],
    );

    let (entries, warnings) = SheetStore::new(&store, &sheet).list_entries().expect("list");
    assert!(warnings.is_empty());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].emotion, "😀 긍정 - 평온");
    assert_eq!(entries[0].gratitude, "");
    assert_eq!(entries[0].message, "");
    assert_eq!(entries[0].teacher_note, "");
}

#[test]
fn malformed_date_rows_are_skipped_with_a_warning() {
    let store = MemoryStore::new();
    let sheet = SheetId::new("sheet-하늘");
    store.seed_rows(
        &sheet,
        &[
            &["설정", "2000-01-01"],
            &["날짜", "감정", "감사한 일", "하고 싶은 말", "선생님 쪽지"],
            &["2024-01-02", "😀 긍정 - 기쁨", "", "", ""],
            &["not-a-date", "😐 보통 - 지루함", "", "", "쪽지"],
        ],
    );

    let (entries, warnings) = SheetStore::new(&store, &sheet).list_entries().expect("list");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date, "2024-01-02");
    assert_eq!(
        warnings,
        vec![Warning::MalformedRow {
            row: 4,
            date: "not-a-date".to_string()
        }]
    );
}

#[test]
fn row_numbers_are_recomputed_after_a_delete() {
    let store = MemoryStore::new();
    let sheet = SheetId::new("sheet-하늘");
    let shop = SheetStore::new(&store, &sheet);

    shop.upsert_entry(&draft("2024-01-01", "😀 긍정 - 기쁨", "", ""))
        .expect("first");
    shop.upsert_entry(&draft("2024-01-02", "😐 보통 - 지루함", "", ""))
        .expect("second");
    assert_eq!(shop.find_entry_row("2024-01-02").expect("find"), Some(4));

    shop.delete_entry("2024-01-01").expect("delete first");
    assert_eq!(shop.find_entry_row("2024-01-02").expect("find again"), Some(3));
}
