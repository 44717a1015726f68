//! Record Schema Tests
//!
//! Tests verify:
//! - Field vectors follow schema order
//! - Field access by name
//! - set_field type checks and key immutability
//! - Text validation (delimiters, byte limits)
//! - Domain helpers (issue/return, complete)

use rollbook::record::{Book, Enrollment, FieldKind, FieldValue, Record, Student, Task, MAX_NAME_BYTES};
use rollbook::RollbookError;

// =============================================================================
// Schema Tests
// =============================================================================

#[test]
fn test_key_is_first_field_of_every_schema() {
    assert_eq!(Student::key_field().name, "roll");
    assert_eq!(Enrollment::key_field().name, "roll");
    assert_eq!(Book::key_field().name, "id");
    assert_eq!(Task::key_field().name, "id");

    assert_eq!(Student::key_field().kind, FieldKind::Int);
    assert_eq!(Task::key_field().kind, FieldKind::Int);
}

#[test]
fn test_to_fields_follows_schema_order() {
    let student = Student::new(3, "Jane Doe", 21, 88.5);

    assert_eq!(
        student.to_fields(),
        vec![
            FieldValue::Int(3),
            FieldValue::Text("Jane Doe".to_string()),
            FieldValue::Int(21),
            FieldValue::Float(88.5),
        ]
    );
}

#[test]
fn test_from_fields_rebuilds_record() {
    let enrollment = Enrollment::new(12, "Ravi", "Physics", 2);
    let rebuilt = Enrollment::from_fields(enrollment.to_fields()).unwrap();
    assert_eq!(rebuilt, enrollment);
}

#[test]
fn test_from_fields_rejects_wrong_arity() {
    let result = Task::from_fields(vec![FieldValue::Int(1)]);
    assert!(matches!(result, Err(RollbookError::Parse(_))));
}

#[test]
fn test_from_fields_rejects_wrong_type() {
    let result = Task::from_fields(vec![
        FieldValue::Int(1),
        FieldValue::Bool(true),
        FieldValue::Bool(false),
    ]);
    assert!(matches!(result, Err(RollbookError::InvalidField { .. })));
}

// =============================================================================
// Field Access Tests
// =============================================================================

#[test]
fn test_field_by_name() {
    let book = Book::new("Dune", "Frank Herbert");
    assert_eq!(book.field("author").unwrap(), FieldValue::from("Frank Herbert"));
    assert_eq!(book.field("issued").unwrap(), FieldValue::Bool(false));
}

#[test]
fn test_field_unknown_name() {
    let book = Book::new("Dune", "Frank Herbert");
    assert!(matches!(
        book.field("isbn"),
        Err(RollbookError::UnknownField { field }) if field == "isbn"
    ));
}

#[test]
fn test_set_field_changes_only_that_field() {
    let mut student = Student::new(1, "Alice", 20, 75.0);
    student.set_field("age", FieldValue::Int(21)).unwrap();

    assert_eq!(student, Student::new(1, "Alice", 21, 75.0));
}

#[test]
fn test_set_field_rejects_key() {
    let mut student = Student::new(1, "Alice", 20, 75.0);
    let result = student.set_field("roll", FieldValue::Int(9));

    assert!(matches!(result, Err(RollbookError::ImmutableField { .. })));
    assert_eq!(student.roll, 1);
}

#[test]
fn test_set_field_rejects_wrong_kind() {
    let mut student = Student::new(1, "Alice", 20, 75.0);
    let result = student.set_field("marks", FieldValue::Int(80));

    assert!(matches!(result, Err(RollbookError::InvalidField { .. })));
    assert_eq!(student.marks, 75.0);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_validate_accepts_name_at_limit() {
    let student = Student::new(1, "a".repeat(49), 20, 75.0);
    assert!(student.validate().is_ok());
}

#[test]
fn test_validate_rejects_name_over_limit() {
    let student = Student::new(1, "a".repeat(50), 20, 75.0);
    assert!(matches!(
        student.validate(),
        Err(RollbookError::InvalidField { field, .. }) if field == "name"
    ));
}

#[test]
fn test_name_limit_counts_bytes() {
    // 25 characters, 50 bytes
    let wide = Student::new(1, "é".repeat(25), 20, 75.0);
    assert!(wide.validate().is_err());

    let narrow = Student::new(1, "é".repeat(24), 20, 75.0);
    assert!(narrow.validate().is_ok());
    assert_eq!(MAX_NAME_BYTES, 49);
}

#[test]
fn test_validate_rejects_delimiter_in_text() {
    let book = Book::new("Eats, Shoots & Leaves", "Lynne Truss");
    assert!(matches!(
        book.validate(),
        Err(RollbookError::InvalidField { field, .. }) if field == "title"
    ));

    let task = Task::new("line one\nline two");
    assert!(task.validate().is_err());
}

#[test]
fn test_validate_rejects_non_finite_marks() {
    let student = Student::new(1, "Alice", 20, f64::NAN);
    assert!(student.validate().is_err());
}

// =============================================================================
// Domain Helper Tests
// =============================================================================

#[test]
fn test_book_issue_and_return() {
    let mut book = Book::new("Dune", "Frank Herbert");

    book.issue().unwrap();
    assert!(book.issued);
    assert!(matches!(book.issue(), Err(RollbookError::AlreadyIssued { .. })));

    book.return_book().unwrap();
    assert!(!book.issued);
    assert!(matches!(book.return_book(), Err(RollbookError::NotIssued { .. })));
}

#[test]
fn test_task_complete_is_idempotent() {
    let mut task = Task::new("water plants");
    assert!(!task.completed);

    task.complete();
    task.complete();
    assert!(task.completed);
}
