use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use todo_core::{
    AppConfig, DecodeReport, FileTodoStorage, StorageError, StorageOp, StorageResult, StoreError,
    TodoApp, TodoItem, TodoStorage, TodoValidationError,
};

/// In-memory storage that can be switched into a failing state.
#[derive(Default)]
struct ScriptedStorage {
    initial: Vec<TodoItem>,
    saved: RefCell<Vec<Vec<TodoItem>>>,
    fail_saves: Cell<bool>,
    fail_load: bool,
}

impl TodoStorage for ScriptedStorage {
    fn load(&self) -> StorageResult<DecodeReport> {
        if self.fail_load {
            return Err(StorageError::Io {
                op: StorageOp::Read,
                path: "scripted".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        Ok(DecodeReport {
            items: self.initial.clone(),
            skipped: Vec::new(),
        })
    }

    fn save(&self, items: &[TodoItem]) -> StorageResult<()> {
        if self.fail_saves.get() {
            return Err(StorageError::Io {
                op: StorageOp::Write,
                path: "scripted".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "locked"),
            });
        }
        self.saved.borrow_mut().push(items.to_vec());
        Ok(())
    }
}

#[test]
fn fresh_app_is_clean_and_does_not_save() {
    let storage = ScriptedStorage::default();
    let (mut app, report) = TodoApp::load(&storage);

    assert_eq!(report.loaded, 0);
    assert!(report.load_error.is_none());
    assert!(!app.is_dirty());
    assert!(!app.maybe_save().unwrap());
    assert!(storage.saved.borrow().is_empty());
}

#[test]
fn mutation_marks_dirty_and_frame_flush_clears_it() {
    let storage = ScriptedStorage::default();
    let (mut app, _) = TodoApp::load(&storage);

    assert_eq!(app.add("buy milk").unwrap(), Some(0));
    assert!(app.is_dirty());

    assert!(app.maybe_save().unwrap());
    assert!(!app.is_dirty());
    assert!(!app.maybe_save().unwrap());

    let saved = storage.saved.borrow();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].len(), 1);
    assert_eq!(saved[0][0].text, "buy milk");
}

#[test]
fn add_trims_trailing_control_characters_and_ignores_empty_input() {
    let storage = ScriptedStorage::default();
    let (mut app, _) = TodoApp::load(&storage);

    assert_eq!(app.add("").unwrap(), None);
    assert_eq!(app.add("\r\n\t").unwrap(), None);
    assert!(!app.is_dirty());

    assert_eq!(app.add("call mom\r\n").unwrap(), Some(0));
    assert_eq!(app.list().items()[0].text, "call mom");
}

#[test]
fn add_rejects_embedded_line_break() {
    let storage = ScriptedStorage::default();
    let (mut app, _) = TodoApp::load(&storage);

    assert_eq!(
        app.add("first\nsecond").unwrap_err(),
        TodoValidationError::MultilineText
    );
    assert_eq!(app.list().count(), 0);
    assert!(!app.is_dirty());
}

#[test]
fn stale_index_is_reported_and_does_not_mark_dirty() {
    let storage = ScriptedStorage {
        initial: vec![TodoItem::with_created_at("only", false, 1)],
        ..ScriptedStorage::default()
    };
    let (mut app, _) = TodoApp::load(&storage);

    assert_eq!(
        app.toggle(5).unwrap_err(),
        StoreError::IndexOutOfRange { index: 5, len: 1 }
    );
    assert!(app.remove(1).is_err());
    assert!(!app.is_dirty());

    assert!(app.toggle(0).unwrap());
    assert!(app.is_dirty());
}

#[test]
fn clear_operations_mark_dirty_only_when_something_changed() {
    let storage = ScriptedStorage {
        initial: vec![
            TodoItem::with_created_at("a", false, 1),
            TodoItem::with_created_at("b", false, 2),
        ],
        ..ScriptedStorage::default()
    };
    let (mut app, _) = TodoApp::load(&storage);

    assert_eq!(app.clear_completed(), 0);
    assert!(!app.is_dirty());

    assert_eq!(app.clear_all(), 2);
    assert!(app.is_dirty());
    app.maybe_save().unwrap();

    assert_eq!(app.clear_all(), 0);
    assert!(!app.is_dirty());
}

#[test]
fn failed_save_keeps_dirty_until_a_later_save_succeeds() {
    let storage = ScriptedStorage::default();
    let (mut app, _) = TodoApp::load(&storage);
    app.add("survive the lock").unwrap();

    storage.fail_saves.set(true);
    let err = app.maybe_save().unwrap_err();
    assert!(err.to_string().contains("locked"));
    assert!(app.is_dirty());

    storage.fail_saves.set(false);
    assert!(app.maybe_save().unwrap());
    assert!(!app.is_dirty());
    assert_eq!(storage.saved.borrow()[0][0].text, "survive the lock");
}

#[test]
fn unreadable_storage_starts_empty_and_reports_error() {
    let storage = ScriptedStorage {
        initial: vec![TodoItem::with_created_at("hidden", false, 1)],
        fail_load: true,
        ..ScriptedStorage::default()
    };

    let (app, report) = TodoApp::load(&storage);

    assert_eq!(app.list().count(), 0);
    assert_eq!(report.loaded, 0);
    assert!(matches!(
        report.load_error,
        Some(StorageError::Io {
            op: StorageOp::Read,
            ..
        })
    ));
}

#[test]
fn show_completed_toggle_filters_view_without_dirtying() {
    let storage = ScriptedStorage {
        initial: vec![
            TodoItem::with_created_at("done", true, 1),
            TodoItem::with_created_at("open", false, 2),
        ],
        ..ScriptedStorage::default()
    };
    let (mut app, _) = TodoApp::load(&storage);
    assert!(app.show_completed());
    assert_eq!(app.visible().count(), 2);

    app.set_show_completed(false);
    let visible = app.visible().map(|(index, _)| index).collect::<Vec<_>>();
    assert_eq!(visible, vec![1]);
    assert!(!app.is_dirty());
    assert_eq!(app.summary().to_string(), "Tasks: 2 total | 1 completed");
}

#[test]
fn file_backed_session_persists_across_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        storage_path: dir.path().join("todos.dat"),
        show_completed: false,
    };

    let (mut app, report) = TodoApp::from_config(&config);
    assert_eq!(report.loaded, 0);
    assert!(!app.show_completed());

    app.add("A").unwrap();
    app.add("B").unwrap();
    app.add("C").unwrap();
    app.toggle(0).unwrap();
    app.toggle(2).unwrap();
    app.clear_completed();
    app.maybe_save().unwrap();

    assert_eq!(
        fs::read_to_string(&config.storage_path)
            .unwrap()
            .lines()
            .map(|line| line.splitn(3, '|').nth(2).unwrap_or_default())
            .collect::<Vec<_>>(),
        vec!["B"]
    );

    let (reloaded, report) = TodoApp::load(FileTodoStorage::new(&config.storage_path));
    assert_eq!(report.loaded, 1);
    assert_eq!(reloaded.list().items(), app.list().items());
}
