//! Todo management handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::{ApiError, ErrorResponse};
use crate::api::state::AppState;
use crate::api::validators::{FieldSource, FieldValue, ValidationError};
use crate::db::utils::normalize_due_date;
use crate::db::{Category, Database, Priority, Status, Todo, TodoId, TodoQuery, TodoRepository};

// =============================================================================
// DTOs
// =============================================================================

/// Todo response DTO (`due_date` is exposed as `dueDate`)
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    #[schema(example = 1)]
    pub id: TodoId,
    #[schema(example = "Buy milk")]
    pub todo: String,
    #[schema(example = "HIGH")]
    pub priority: String,
    #[schema(example = "TO DO")]
    pub status: String,
    #[schema(example = "HOME")]
    pub category: String,
    #[schema(example = "2023-01-05")]
    pub due_date: String,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            todo: t.todo,
            priority: t.priority.to_string(),
            status: t.status.to_string(),
            category: t.category.to_string(),
            due_date: t.due_date,
        }
    }
}

/// Create todo request DTO
///
/// Every field is required; they are optional here so that an invalid
/// value is reported before a missing one. Validated fields stay raw JSON
/// so that a non-string value fails with that field's error.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    #[schema(example = 1)]
    pub id: Option<TodoId>,
    #[schema(example = "Buy milk")]
    pub todo: Option<String>,
    #[schema(value_type = Option<String>, example = "HIGH")]
    pub priority: Option<Value>,
    #[schema(value_type = Option<String>, example = "TO DO")]
    pub status: Option<Value>,
    #[schema(value_type = Option<String>, example = "HOME")]
    pub category: Option<Value>,
    #[schema(value_type = Option<String>, example = "2023-01-05")]
    pub due_date: Option<Value>,
}

impl FieldSource for CreateTodoRequest {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "todo" => self.todo.as_deref().map(FieldValue::Text),
            "priority" => FieldValue::from_json(self.priority.as_ref()),
            "status" => FieldValue::from_json(self.status.as_ref()),
            "category" => FieldValue::from_json(self.category.as_ref()),
            "dueDate" => FieldValue::from_json(self.due_date.as_ref()),
            _ => None,
        }
    }
}

impl CreateTodoRequest {
    fn into_todo(self) -> Result<Todo, ValidationError> {
        Ok(Todo {
            id: required(self.id, "id")?,
            todo: required(self.todo, "todo")?,
            priority: parse_json_field(&required(self.priority, "priority")?)?,
            status: parse_json_field(&required(self.status, "status")?)?,
            category: parse_json_field(&required(self.category, "category")?)?,
            due_date: json_due_date(&required(self.due_date, "dueDate")?)?,
        })
    }
}

/// Update todo request DTO (partial update)
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    /// Todo description
    #[schema(example = "Buy oat milk")]
    pub todo: Option<String>,
    #[schema(value_type = Option<String>, example = "LOW")]
    pub priority: Option<Value>,
    #[schema(value_type = Option<String>, example = "DONE")]
    pub status: Option<Value>,
    #[schema(value_type = Option<String>, example = "WORK")]
    pub category: Option<Value>,
    #[schema(value_type = Option<String>, example = "2023-01-12")]
    pub due_date: Option<Value>,
}

impl FieldSource for UpdateTodoRequest {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "todo" => self.todo.as_deref().map(FieldValue::Text),
            "priority" => FieldValue::from_json(self.priority.as_ref()),
            "status" => FieldValue::from_json(self.status.as_ref()),
            "category" => FieldValue::from_json(self.category.as_ref()),
            "dueDate" => FieldValue::from_json(self.due_date.as_ref()),
            _ => None,
        }
    }
}

impl UpdateTodoRequest {
    /// Name of the field reported as updated.
    ///
    /// Only the first present field counts, in the order todo, priority,
    /// status, category, due date.
    pub fn updated_field(&self) -> Option<&'static str> {
        if self.todo.is_some() {
            Some("Todo")
        } else if self.priority.is_some() {
            Some("Priority")
        } else if self.status.is_some() {
            Some("Status")
        } else if self.category.is_some() {
            Some("Category")
        } else if self.due_date.is_some() {
            Some("Due Date")
        } else {
            None
        }
    }

    fn merge_into(self, target: &mut Todo) -> Result<(), ValidationError> {
        if let Some(todo) = self.todo {
            target.todo = todo;
        }
        if let Some(priority) = self.priority {
            target.priority = parse_json_field(&priority)?;
        }
        if let Some(status) = self.status {
            target.status = parse_json_field(&status)?;
        }
        if let Some(category) = self.category {
            target.category = parse_json_field(&category)?;
        }
        target.due_date = match self.due_date {
            Some(due_date) => json_due_date(&due_date)?,
            None => {
                normalize_due_date(&target.due_date).ok_or(ValidationError::InvalidDueDate)?
            }
        };
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListTodosQuery {
    /// Filter by status (TO DO, IN PROGRESS, DONE)
    #[param(example = "TO DO")]
    pub status: Option<String>,
    /// Filter by priority (HIGH, MEDIUM, LOW)
    #[param(example = "HIGH")]
    pub priority: Option<String>,
    /// Filter by category (WORK, HOME, LEARNING)
    #[param(example = "HOME")]
    pub category: Option<String>,
    /// Filter by due date
    #[param(example = "2023-01-05")]
    pub date: Option<String>,
    /// Substring of the todo text
    #[param(example = "milk")]
    pub search_q: Option<String>,
}

impl FieldSource for ListTodosQuery {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "status" => self.status.as_deref(),
            "priority" => self.priority.as_deref(),
            "category" => self.category.as_deref(),
            "date" => self.date.as_deref(),
            "search_q" => self.search_q.as_deref(),
            _ => None,
        };
        value.map(FieldValue::Text)
    }
}

impl ListTodosQuery {
    fn into_filter(self) -> Result<TodoQuery, ValidationError> {
        Ok(TodoQuery {
            status: self.status.as_deref().map(parse_field).transpose()?,
            priority: self.priority.as_deref().map(parse_field).transpose()?,
            category: self.category.as_deref().map(parse_field).transpose()?,
            due_date: self
                .date
                .as_deref()
                .map(|date| normalize_due_date(date).ok_or(ValidationError::InvalidDueDate))
                .transpose()?,
            search: self.search_q,
        })
    }
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    params(ListTodosQuery),
    responses(
        (status = 200, description = "Todos matching every filter", body = Vec<TodoResponse>),
        (status = 400, description = "Invalid filter value", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_todos<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<ListTodosQuery>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    state.validators().query.validate(&query)?;
    let filter = query.into_filter()?;

    let todos = state.db().todos().list(Some(&filter)).await?;
    debug!(count = todos.len(), "listed todos");

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/todos/{todoId}",
    tag = "todos",
    params(("todoId" = i64, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo found", body = TodoResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<TodoId>,
) -> Result<Json<TodoResponse>, ApiError> {
    let todo = state.db().todos().get(id).await?;
    Ok(Json(TodoResponse::from(todo)))
}

#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 200, description = "Todo created", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid or missing field", body = String, content_type = "text/plain"),
        (status = 409, description = "Todo id already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_todo<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<&'static str, ApiError> {
    state.validators().body.validate(&req)?;
    let todo = req.into_todo()?;

    state.db().todos().create(&todo).await?;

    Ok("Todo Successfully Added")
}

#[utoipa::path(
    put,
    path = "/todos/{todoId}",
    tag = "todos",
    params(("todoId" = i64, Path, description = "Todo ID")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Names the first updated field", body = String,
            content_type = "text/plain"),
        (status = 400, description = "Invalid field", body = String, content_type = "text/plain"),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<TodoId>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<String, ApiError> {
    state.validators().body.validate(&req)?;

    let mut todo = state.db().todos().get(id).await?;

    let message = match req.updated_field() {
        Some(field) => format!("{} Updated", field),
        None => "Nothing Updated".to_string(),
    };

    req.merge_into(&mut todo)?;
    state.db().todos().update(&todo).await?;

    Ok(message)
}

#[utoipa::path(
    delete,
    path = "/todos/{todoId}",
    tag = "todos",
    params(("todoId" = i64, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo deleted, or never existed", body = String,
            content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<TodoId>,
) -> Result<&'static str, ApiError> {
    let removed = state.db().todos().delete(id).await?;
    if !removed {
        debug!(id, "delete matched no todo");
    }

    Ok("Todo Deleted")
}

// =============================================================================
// Helpers
// =============================================================================

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField { field })
}

/// Parse an enumerated field, mapping failure to that field's error.
fn parse_field<T: EnumeratedField>(value: &str) -> Result<T, ValidationError> {
    value.parse().map_err(|_| T::INVALID)
}

fn parse_json_field<T: EnumeratedField>(value: &Value) -> Result<T, ValidationError> {
    value.as_str().ok_or(T::INVALID).and_then(parse_field)
}

fn json_due_date(value: &Value) -> Result<String, ValidationError> {
    value
        .as_str()
        .and_then(normalize_due_date)
        .ok_or(ValidationError::InvalidDueDate)
}

trait EnumeratedField: std::str::FromStr {
    const INVALID: ValidationError;
}

impl EnumeratedField for Status {
    const INVALID: ValidationError = ValidationError::InvalidStatus;
}

impl EnumeratedField for Priority {
    const INVALID: ValidationError = ValidationError::InvalidPriority;
}

impl EnumeratedField for Category {
    const INVALID: ValidationError = ValidationError::InvalidCategory;
}
