//! Tests for Engine
//!
//! These tests verify:
//! - Opening with and without a data file
//! - Command execution
//! - Save / close persistence
//! - Load fallbacks (missing, partial, unreadable)
//! - Save failures surface distinctly

use std::fs;

use rollbook::config::{Config, KeyPolicy};
use rollbook::engine::Engine;
use rollbook::record::{Book, FieldValue, Student, Task};
use rollbook::store::{LoadStop, Predicate};
use rollbook::{Command, Outcome, RollbookError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn student_config(temp: &TempDir) -> Config {
    Config::builder()
        .data_file(temp.path().join("students.txt"))
        .capacity(100)
        .key_policy(KeyPolicy::CallerSupplied)
        .build()
}

fn setup_student_engine() -> (TempDir, Engine<Student>) {
    let temp = TempDir::new().unwrap();
    let engine = Engine::open(student_config(&temp)).unwrap();
    (temp, engine)
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_missing_file_starts_empty() {
    let (temp, engine) = setup_student_engine();

    assert!(engine.store().is_empty());
    assert!(engine.load_report().is_none());
    assert!(!temp.path().join("students.txt").exists());
}

#[test]
fn test_open_loads_existing_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("students.txt"), "1,Alice,20,75.00\n2,Bob,22,80.00\n").unwrap();

    let engine: Engine<Student> = Engine::open(student_config(&temp)).unwrap();

    assert_eq!(engine.store().len(), 2);
    assert!(engine.load_report().unwrap().is_complete());
    assert!(!engine.has_unsaved_changes());
}

#[test]
fn test_open_partial_file_keeps_valid_prefix() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("students.txt"),
        "1,Alice,20,75.00\n2,Bob,22,80.00\n3,Cara\n",
    )
    .unwrap();

    let engine: Engine<Student> = Engine::open(student_config(&temp)).unwrap();

    assert_eq!(engine.store().len(), 2);
    let report = engine.load_report().unwrap();
    assert!(matches!(report.stop, Some(LoadStop::Malformed { line: 3, .. })));
}

#[test]
fn test_open_unreadable_path_starts_empty() {
    let temp = TempDir::new().unwrap();
    // A directory cannot be read as a data file
    let config = Config::builder().data_file(temp.path()).build();

    let engine: Engine<Student> = Engine::open(config).unwrap();

    assert!(engine.store().is_empty());
}

#[test]
fn test_open_rejects_zero_capacity() {
    let config = Config::builder().capacity(0).build();
    let result: Result<Engine<Student>, _> = Engine::in_memory(config);
    assert!(matches!(result, Err(RollbookError::Config(_))));
}

#[test]
fn test_in_memory_ignores_data_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("students.txt");
    fs::write(&path, "1,Alice,20,75.00\n").unwrap();

    let config = Config::builder().data_file(&path).build();
    let mut engine: Engine<Student> = Engine::in_memory(config).unwrap();

    assert!(engine.store().is_empty());
    assert!(engine.data_file().is_none());
    engine.save().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "1,Alice,20,75.00\n");
}

// =============================================================================
// Command Tests
// =============================================================================

#[test]
fn test_execute_add_find_delete() {
    let (_temp, mut engine) = setup_student_engine();

    let added = engine
        .execute(Command::Add(Student::new(5, "Eve", 19, 91.0)))
        .unwrap();
    assert_eq!(added, Outcome::Added(5));
    assert!(engine.has_unsaved_changes());

    let found = engine.execute(Command::Find { key: 5 }).unwrap();
    assert_eq!(found, Outcome::Found(Student::new(5, "Eve", 19, 91.0)));

    let deleted = engine.execute(Command::Delete { key: 5 }).unwrap();
    assert_eq!(deleted, Outcome::Deleted(Student::new(5, "Eve", 19, 91.0)));

    let missing = engine.execute(Command::Find { key: 5 });
    assert!(matches!(missing, Err(RollbookError::NotFound { key: 5 })));
}

#[test]
fn test_execute_update() {
    let (_temp, mut engine) = setup_student_engine();
    engine
        .execute(Command::Add(Student::new(1, "Alice", 20, 75.0)))
        .unwrap();

    let outcome = engine
        .execute(Command::Update {
            key: 1,
            changes: vec![("name".to_string(), FieldValue::from("Alicia"))],
        })
        .unwrap();

    assert_eq!(outcome, Outcome::Updated);
    assert_eq!(engine.store().find(1).unwrap().name, "Alicia");
}

#[test]
fn test_execute_list_and_search() {
    let mut engine: Engine<Book> = Engine::in_memory(
        Config::builder().key_policy(KeyPolicy::Assigned).build(),
    )
    .unwrap();
    engine.execute(Command::Add(Book::new("Rust in Action", "McNamara"))).unwrap();
    engine.execute(Command::Add(Book::new("Dune", "Herbert"))).unwrap();

    match engine.execute(Command::List).unwrap() {
        Outcome::Records(books) => assert_eq!(books.len(), 2),
        other => panic!("unexpected outcome: {:?}", other),
    }

    let search = Command::Search {
        field: "title".to_string(),
        predicate: Predicate::contains("Rust"),
    };
    match engine.execute(search).unwrap() {
        Outcome::Records(books) => {
            assert_eq!(books.len(), 1);
            assert_eq!(books[0].id, 1);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_execute_list_empty() {
    let (_temp, mut engine) = setup_student_engine();
    assert_eq!(engine.execute(Command::List).unwrap(), Outcome::Records(vec![]));
}

#[test]
fn test_execute_failed_add_is_not_a_change() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder()
        .data_file(temp.path().join("students.txt"))
        .capacity(1)
        .build();
    let mut engine: Engine<Student> = Engine::open(config).unwrap();
    engine.execute(Command::Add(Student::new(1, "A", 20, 1.0))).unwrap();
    engine.save().unwrap();

    let result = engine.execute(Command::Add(Student::new(2, "B", 20, 1.0)));

    assert!(matches!(result, Err(RollbookError::CapacityExceeded { capacity: 1 })));
    assert!(!engine.has_unsaved_changes());
}

#[test]
fn test_modify_marks_unsaved() {
    let mut engine: Engine<Task> = Engine::in_memory(
        Config::builder().key_policy(KeyPolicy::Assigned).build(),
    )
    .unwrap();
    let id = match engine.execute(Command::Add(Task::new("write tests"))).unwrap() {
        Outcome::Added(id) => id,
        other => panic!("unexpected outcome: {:?}", other),
    };

    engine
        .modify(id, |task| {
            task.complete();
            Ok(())
        })
        .unwrap();

    assert!(engine.store().find(id).unwrap().completed);
    assert!(engine.has_unsaved_changes());
}

#[test]
fn test_reads_do_not_mark_unsaved() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("students.txt"), "1,Alice,20,75.00\n").unwrap();
    let mut engine: Engine<Student> = Engine::open(student_config(&temp)).unwrap();

    engine.execute(Command::List).unwrap();
    engine.execute(Command::Find { key: 1 }).unwrap();
    engine
        .execute(Command::Search {
            field: "name".to_string(),
            predicate: Predicate::contains("Ali"),
        })
        .unwrap();
    assert_eq!(engine.store().len(), 1);

    assert!(!engine.has_unsaved_changes());
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_save_command_writes_file() {
    let (temp, mut engine) = setup_student_engine();
    engine.execute(Command::Add(Student::new(1, "Alice", 20, 75.0))).unwrap();

    assert_eq!(engine.execute(Command::Save).unwrap(), Outcome::Saved);

    let contents = fs::read_to_string(temp.path().join("students.txt")).unwrap();
    assert_eq!(contents, "1,Alice,20,75.00\n");
    assert!(!engine.has_unsaved_changes());
}

#[test]
fn test_close_persists_and_reopen_restores() {
    let temp = TempDir::new().unwrap();

    {
        let mut engine: Engine<Student> = Engine::open(student_config(&temp)).unwrap();
        engine.execute(Command::Add(Student::new(1, "Alice", 20, 75.0))).unwrap();
        engine.execute(Command::Add(Student::new(2, "Bob", 22, 80.0))).unwrap();
        engine.execute(Command::Delete { key: 1 }).unwrap();
        engine.close().unwrap();
    }

    let engine: Engine<Student> = Engine::open(student_config(&temp)).unwrap();
    assert_eq!(engine.store().list(), &[Student::new(2, "Bob", 22, 80.0)]);
}

#[test]
fn test_save_overwrites_previous_contents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("students.txt");
    fs::write(&path, "1,Alice,20,75.00\n2,Bob,22,80.00\n").unwrap();

    let mut engine: Engine<Student> = Engine::open(student_config(&temp)).unwrap();
    engine.execute(Command::Delete { key: 2 }).unwrap();
    engine.save().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "1,Alice,20,75.00\n");
}

#[test]
fn test_save_failure_is_reported_as_save_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing_dir").join("students.txt");
    let config = Config::builder().data_file(&path).build();

    let mut engine: Engine<Student> = Engine::open(config).unwrap();
    engine.execute(Command::Add(Student::new(1, "Alice", 20, 75.0))).unwrap();

    let result = engine.save();

    match result {
        Err(RollbookError::Save { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected save error, got {:?}", other),
    }
    assert!(engine.has_unsaved_changes());
}

#[test]
fn test_open_path_uses_default_capacity() {
    let temp = TempDir::new().unwrap();
    let engine: Engine<Student> = Engine::open_path(&temp.path().join("s.txt")).unwrap();

    assert_eq!(engine.store().capacity(), Some(100));
    assert_eq!(engine.config().key_policy, KeyPolicy::CallerSupplied);
}
