//! Request field validators.
//!
//! Each validator checks one field of a request and either passes or
//! reports the matching [`ValidationError`]. Validators are grouped into an
//! ordered [`ValidatorChain`] that stops at the first failure, so a request
//! is rejected before any statement reaches the store.

use std::marker::PhantomData;
use std::str::FromStr;

use thiserror::Error;

use crate::db::utils::parse_calendar_date;
use crate::db::{Category, Priority, Status};

/// Client input errors, rendered verbatim as the 400 response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid Todo Status")]
    InvalidStatus,

    #[error("Invalid Todo Priority")]
    InvalidPriority,

    #[error("Invalid Todo Category")]
    InvalidCategory,

    #[error("Invalid Due Date")]
    InvalidDueDate,

    #[error("Missing Todo Field: {field}")]
    MissingField { field: &'static str },
}

/// A present request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    /// A JSON number, boolean, array or object where text was expected.
    NotText,
}

impl<'a> FieldValue<'a> {
    /// Classify an optional JSON value; `null` counts as absent.
    pub fn from_json(value: Option<&'a serde_json::Value>) -> Option<Self> {
        match value? {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some(Self::Text(text)),
            _ => Some(Self::NotText),
        }
    }
}

/// Anything a request field can be looked up in by name.
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// A single field check.
pub trait FieldValidator: Send + Sync {
    fn validate(&self, source: &dyn FieldSource) -> Result<(), ValidationError>;
}

/// Passes when the field is absent or parses as `T`.
pub struct EnumField<T> {
    key: &'static str,
    error: ValidationError,
    _kind: PhantomData<fn() -> T>,
}

impl<T> EnumField<T> {
    pub fn new(key: &'static str, error: ValidationError) -> Self {
        Self {
            key,
            error,
            _kind: PhantomData,
        }
    }
}

impl<T: FromStr> FieldValidator for EnumField<T> {
    fn validate(&self, source: &dyn FieldSource) -> Result<(), ValidationError> {
        match source.field(self.key) {
            None => Ok(()),
            Some(FieldValue::Text(value)) if value.parse::<T>().is_ok() => Ok(()),
            Some(_) => Err(self.error.clone()),
        }
    }
}

/// Passes when the field is absent, empty, or a calendar date.
pub struct DateField {
    key: &'static str,
}

impl DateField {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl FieldValidator for DateField {
    fn validate(&self, source: &dyn FieldSource) -> Result<(), ValidationError> {
        match source.field(self.key) {
            None | Some(FieldValue::Text("")) => Ok(()),
            Some(FieldValue::Text(value)) if parse_calendar_date(value).is_some() => Ok(()),
            Some(_) => Err(ValidationError::InvalidDueDate),
        }
    }
}

/// Ordered validators, short-circuiting on the first failure.
#[derive(Default)]
pub struct ValidatorChain {
    validators: Vec<Box<dyn FieldValidator>>,
}

impl ValidatorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator to the end of the chain.
    pub fn with(mut self, validator: impl FieldValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Status, priority and category followed by a date field named `date_key`.
    fn enumerated_then_date(date_key: &'static str) -> Self {
        Self::new()
            .with(EnumField::<Status>::new(
                "status",
                ValidationError::InvalidStatus,
            ))
            .with(EnumField::<Priority>::new(
                "priority",
                ValidationError::InvalidPriority,
            ))
            .with(EnumField::<Category>::new(
                "category",
                ValidationError::InvalidCategory,
            ))
            .with(DateField::new(date_key))
    }

    /// Chain for query parameters of read endpoints.
    pub fn query() -> Self {
        Self::enumerated_then_date("date")
    }

    /// Chain for JSON bodies of write endpoints.
    pub fn body() -> Self {
        Self::enumerated_then_date("dueDate")
    }

    /// Chain for the agenda, which only takes a date.
    pub fn agenda() -> Self {
        Self::new().with(DateField::new("date"))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.validators.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn validate(&self, source: &dyn FieldSource) -> Result<(), ValidationError> {
        self.validators
            .iter()
            .try_for_each(|validator| validator.validate(source))
    }
}

/// The chains shared by every handler.
pub struct RequestValidators {
    pub query: ValidatorChain,
    pub agenda: ValidatorChain,
    pub body: ValidatorChain,
}

impl Default for RequestValidators {
    fn default() -> Self {
        Self {
            query: ValidatorChain::query(),
            agenda: ValidatorChain::agenda(),
            body: ValidatorChain::body(),
        }
    }
}
