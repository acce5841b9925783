use noteblock::markup::render_page;
use noteblock::{
    Clock, ControllerError, IdStrategy, KeyValueStore, NoteController, NoteDraft, Refresh,
    SqliteStore, StoreKeys,
};
use std::cell::Cell;
use tempfile::TempDir;

const FORMAT: &str = "%Y-%m-%d %H:%M";

/// Fixed clock the test can move forward by hand
struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    fn at(millis: i64) -> Self {
        Self {
            now: Cell::new(millis),
        }
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        let now = self.now.get();
        self.now.set(now + 1);
        now
    }
}

fn open_store(dir: &TempDir) -> SqliteStore {
    let path = dir.path().join("data").join("notes.db");
    SqliteStore::open(path.to_str().unwrap()).unwrap()
}

#[test]
fn full_lifecycle_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let (first_id, second_id) = {
        let mut controller =
            NoteController::with_clock(open_store(&dir), ManualClock::at(1_700_000_000_000));
        let first = controller.add(NoteDraft::new("Groceries", "milk\neggs")).unwrap();
        let second = controller.add(NoteDraft::new("", "call back")).unwrap();
        assert_ne!(first.id, second.id);

        let refresh = controller.move_to_trash(&first.id).unwrap();
        assert_eq!(refresh, Refresh::BOTH);
        (first.id, second.id)
    };

    let mut controller =
        NoteController::with_clock(open_store(&dir), ManualClock::at(1_700_000_100_000));
    let notes = controller.notes();
    let trash = controller.trash();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, second_id);
    assert_eq!(notes[0].display_title(), "Untitled");
    assert_eq!(trash.len(), 1);
    assert_eq!(trash[0].id(), first_id);
    assert!(trash[0].deleted_at >= trash[0].note.created_at);

    controller.restore_from_trash(&first_id).unwrap();
    let notes = controller.notes();
    assert_eq!(notes[0].id, first_id);
    assert_eq!(notes[0].text, "milk\neggs");
    assert!(controller.trash().is_empty());

    controller.move_to_trash(&first_id).unwrap();
    controller.move_to_trash(&second_id).unwrap();
    assert_eq!(controller.delete_forever(&first_id).unwrap(), Refresh::TRASH);
    assert_eq!(controller.trash().len(), 1);

    controller.empty_trash().unwrap();
    assert!(controller.trash().is_empty());
    assert!(controller.notes().is_empty());
}

#[test]
fn empty_text_is_rejected_without_writing() {
    let dir = TempDir::new().unwrap();
    let mut controller = NoteController::new(open_store(&dir));

    let err = controller.add(NoteDraft::new("Title only", "  \n ")).unwrap_err();
    assert!(err.is_empty_text());
    assert!(matches!(err, ControllerError::InvalidNote(_)));
    assert_eq!(err.to_string(), "Please enter a note.");
    assert_eq!(controller.store().get_item("noteblock_notes").unwrap(), None);
}

#[test]
fn corrupt_stored_list_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.set_item("noteblock_notes", "{not json").unwrap();
    store.set_item("noteblock_trash", "42").unwrap();

    let mut controller = NoteController::new(store);
    assert!(controller.notes().is_empty());
    assert!(controller.trash().is_empty());

    controller.add(NoteDraft::new("", "fresh start")).unwrap();
    assert_eq!(controller.notes().len(), 1);
}

#[test]
fn malformed_record_does_not_wipe_list_on_next_save() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store
        .set_item(
            "noteblock_notes",
            r#"[{"id":"a","title":"t","text":"keep me","createdAt":1},{"id":"b","title":"t"}]"#,
        )
        .unwrap();

    let mut controller = NoteController::new(store);
    controller.add(NoteDraft::new("", "new")).unwrap();

    let texts: Vec<String> = controller.notes().into_iter().map(|n| n.text).collect();
    assert_eq!(texts, ["new", "keep me"]);
}

#[test]
fn stored_records_use_browser_field_names() {
    let dir = TempDir::new().unwrap();
    let mut controller =
        NoteController::with_clock(open_store(&dir), ManualClock::at(1_700_000_000_000))
            .id_strategy(IdStrategy::Timestamp);
    let note = controller.add(NoteDraft::new(" Plan ", " ship it ")).unwrap();
    assert_eq!(note.id, "1700000000000");
    controller.move_to_trash(&note.id).unwrap();

    let raw = controller.store().get_item("noteblock_trash").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &value[0];
    assert_eq!(record["id"], "1700000000000");
    assert_eq!(record["title"], "Plan");
    assert_eq!(record["text"], "ship it");
    assert_eq!(record["createdAt"], 1_700_000_000_000i64);
    assert_eq!(record["deletedAt"], 1_700_000_000_001i64);
}

#[test]
fn custom_keys_keep_lists_apart() {
    let dir = TempDir::new().unwrap();
    let keys = StoreKeys {
        notes: "work_notes".to_string(),
        trash: "work_trash".to_string(),
    };
    let mut controller = NoteController::new(open_store(&dir)).keys(keys);
    controller.add(NoteDraft::new("", "standup")).unwrap();

    let store = controller.store();
    assert!(store.get_item("work_notes").unwrap().is_some());
    assert_eq!(store.get_item("noteblock_notes").unwrap(), None);
}

#[test]
fn exported_page_escapes_user_text() {
    let dir = TempDir::new().unwrap();
    let mut controller = NoteController::new(open_store(&dir));
    controller
        .add(NoteDraft::new("<b>bold</b>", "a & b\n\"quoted\" 'single'"))
        .unwrap();
    let doomed = controller.add(NoteDraft::new("", "<script>x</script>")).unwrap();
    controller.move_to_trash(&doomed.id).unwrap();

    let page = render_page(&controller.notes(), &controller.trash(), FORMAT);
    assert!(page.contains("&lt;b&gt;bold&lt;/b&gt;"));
    assert!(page.contains("a &amp; b<br>&quot;quoted&quot; &#039;single&#039;"));
    assert!(page.contains("&lt;script&gt;x&lt;/script&gt;"));
    assert!(!page.contains("<script>"));
    assert!(!page.contains("<b>bold"));
}
