//! Tests for domain models.

use std::str::FromStr;

use crate::db::{Category, Priority, Status, Todo, TodoQuery};

#[test]
fn status_parses_wire_names_with_spaces() {
    assert_eq!(Status::from_str("TO DO"), Ok(Status::ToDo));
    assert_eq!(Status::from_str("IN PROGRESS"), Ok(Status::InProgress));
    assert_eq!(Status::from_str("DONE"), Ok(Status::Done));
}

#[test]
fn status_rejects_other_spellings() {
    assert!(Status::from_str("TODO").is_err());
    assert!(Status::from_str("done").is_err());
    assert!(Status::from_str("").is_err());
}

#[test]
fn priority_display_matches_stored_text() {
    assert_eq!(Priority::High.to_string(), "HIGH");
    assert_eq!(Priority::Medium.to_string(), "MEDIUM");
    assert_eq!(Priority::Low.to_string(), "LOW");
}

#[test]
fn category_rejects_lowercase() {
    assert_eq!(Category::from_str("LEARNING"), Ok(Category::Learning));
    assert!(Category::from_str("work").is_err());
}

#[test]
fn todo_serializes_enums_with_wire_names() {
    let todo = Todo {
        id: 3,
        todo: "Water plants".to_string(),
        priority: Priority::Low,
        status: Status::InProgress,
        category: Category::Home,
        due_date: "2023-02-14".to_string(),
    };

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["status"], "IN PROGRESS");
    assert_eq!(json["priority"], "LOW");
    assert_eq!(json["category"], "HOME");
}

#[test]
fn due_on_sets_only_the_date_filter() {
    let query = TodoQuery::due_on("2023-01-05");
    assert_eq!(query.due_date.as_deref(), Some("2023-01-05"));
    assert!(query.status.is_none());
    assert!(query.priority.is_none());
    assert!(query.category.is_none());
    assert!(query.search.is_none());
}
