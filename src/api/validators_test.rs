//! Tests for request field validators.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use super::validators::{
    DateField, EnumField, FieldSource, FieldValidator, FieldValue, ValidationError,
    ValidatorChain,
};
use crate::db::Status;

struct Fields(HashMap<&'static str, &'static str>);

impl Fields {
    fn of(pairs: &[(&'static str, &'static str)]) -> Self {
        Self(pairs.iter().copied().collect())
    }
}

impl FieldSource for Fields {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.0.get(name).copied().map(FieldValue::Text)
    }
}

/// Holds one non-text field, as a JSON body with `"status": 5` would.
struct NotText(&'static str);

impl FieldSource for NotText {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (name == self.0).then_some(FieldValue::NotText)
    }
}

/// Counts how often it runs; always passes.
struct Probe(Arc<AtomicUsize>);

impl FieldValidator for Probe {
    fn validate(&self, _source: &dyn FieldSource) -> Result<(), ValidationError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn every_valid_enumerated_value_passes() {
    let chain = ValidatorChain::query();
    for status in ["TO DO", "IN PROGRESS", "DONE"] {
        assert_eq!(chain.validate(&Fields::of(&[("status", status)])), Ok(()));
    }
    for priority in ["HIGH", "MEDIUM", "LOW"] {
        assert_eq!(
            chain.validate(&Fields::of(&[("priority", priority)])),
            Ok(())
        );
    }
    for category in ["WORK", "HOME", "LEARNING"] {
        assert_eq!(
            chain.validate(&Fields::of(&[("category", category)])),
            Ok(())
        );
    }
}

#[test]
fn absent_fields_pass() {
    assert_eq!(ValidatorChain::query().validate(&Fields::of(&[])), Ok(()));
    assert_eq!(ValidatorChain::body().validate(&Fields::of(&[])), Ok(()));
    assert_eq!(ValidatorChain::agenda().validate(&Fields::of(&[])), Ok(()));
}

#[test]
fn invalid_values_report_their_field() {
    let chain = ValidatorChain::body();
    assert_eq!(
        chain.validate(&Fields::of(&[("status", "DONEISH")])),
        Err(ValidationError::InvalidStatus)
    );
    assert_eq!(
        chain.validate(&Fields::of(&[("priority", "high")])),
        Err(ValidationError::InvalidPriority)
    );
    assert_eq!(
        chain.validate(&Fields::of(&[("category", "GARDEN")])),
        Err(ValidationError::InvalidCategory)
    );
    assert_eq!(
        chain.validate(&Fields::of(&[("dueDate", "2021-02-30")])),
        Err(ValidationError::InvalidDueDate)
    );
}

#[test]
fn non_text_values_report_their_field() {
    let chain = ValidatorChain::body();
    let cases = [
        ("status", ValidationError::InvalidStatus),
        ("priority", ValidationError::InvalidPriority),
        ("category", ValidationError::InvalidCategory),
        ("dueDate", ValidationError::InvalidDueDate),
    ];
    for (field, expected) in cases {
        assert_eq!(chain.validate(&NotText(field)), Err(expected), "{}", field);
    }
}

#[test]
fn json_values_classify_as_fields() {
    let text = json!("DONE");
    let number = json!(5);
    let null = json!(null);
    assert_eq!(
        FieldValue::from_json(Some(&text)),
        Some(FieldValue::Text("DONE"))
    );
    assert_eq!(
        FieldValue::from_json(Some(&number)),
        Some(FieldValue::NotText)
    );
    assert_eq!(FieldValue::from_json(Some(&null)), None);
    assert_eq!(FieldValue::from_json(None), None);
}

#[test]
fn empty_enumerated_value_is_invalid() {
    assert_eq!(
        ValidatorChain::query().validate(&Fields::of(&[("status", "")])),
        Err(ValidationError::InvalidStatus)
    );
}

#[test]
fn empty_date_passes() {
    assert_eq!(
        ValidatorChain::agenda().validate(&Fields::of(&[("date", "")])),
        Ok(())
    );
}

#[test]
fn query_chain_reads_date_and_body_chain_reads_due_date() {
    let wrong_for_query = Fields::of(&[("dueDate", "not a date")]);
    assert_eq!(ValidatorChain::query().validate(&wrong_for_query), Ok(()));
    assert_eq!(
        ValidatorChain::body().validate(&wrong_for_query),
        Err(ValidationError::InvalidDueDate)
    );

    let wrong_for_body = Fields::of(&[("date", "not a date")]);
    assert_eq!(ValidatorChain::body().validate(&wrong_for_body), Ok(()));
    assert_eq!(
        ValidatorChain::query().validate(&wrong_for_body),
        Err(ValidationError::InvalidDueDate)
    );
}

#[test]
fn agenda_chain_ignores_enumerated_fields() {
    let fields = Fields::of(&[("status", "NOPE"), ("date", "2023-01-05")]);
    assert_eq!(ValidatorChain::agenda().validate(&fields), Ok(()));
}

#[test]
fn first_failure_wins_in_chain_order() {
    let fields = Fields::of(&[
        ("category", "GARDEN"),
        ("priority", "SOMEDAY"),
        ("date", "nope"),
    ]);
    assert_eq!(
        ValidatorChain::query().validate(&fields),
        Err(ValidationError::InvalidPriority)
    );
}

#[test]
fn chain_stops_after_first_failure() {
    let runs = Arc::new(AtomicUsize::new(0));
    let chain = ValidatorChain::new()
        .with(EnumField::<Status>::new(
            "status",
            ValidationError::InvalidStatus,
        ))
        .with(Probe(Arc::clone(&runs)));

    let result = chain.validate(&Fields::of(&[("status", "LATER")]));
    assert_eq!(result, Err(ValidationError::InvalidStatus));
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    chain.validate(&Fields::of(&[])).unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn date_field_accepts_lenient_spellings() {
    let validator = DateField::new("date");
    for date in ["2021-1-5", "2021/12/02", "12/02/2021", "2021-12-02T10:00:00Z"] {
        assert_eq!(
            validator.validate(&Fields::of(&[("date", date)])),
            Ok(()),
            "{} should be accepted",
            date
        );
    }
}

#[test]
fn validation_messages_match_response_text() {
    assert_eq!(
        ValidationError::InvalidStatus.to_string(),
        "Invalid Todo Status"
    );
    assert_eq!(
        ValidationError::InvalidPriority.to_string(),
        "Invalid Todo Priority"
    );
    assert_eq!(
        ValidationError::InvalidCategory.to_string(),
        "Invalid Todo Category"
    );
    assert_eq!(ValidationError::InvalidDueDate.to_string(), "Invalid Due Date");
    assert_eq!(
        ValidationError::MissingField { field: "priority" }.to_string(),
        "Missing Todo Field: priority"
    );
}

#[test]
fn predefined_chains_have_expected_length() {
    assert_eq!(ValidatorChain::query().len(), 4);
    assert_eq!(ValidatorChain::body().len(), 4);
    assert_eq!(ValidatorChain::agenda().len(), 1);
    assert!(ValidatorChain::new().is_empty());
}
