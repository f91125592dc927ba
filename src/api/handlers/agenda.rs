//! Agenda handler: todos due on a given date.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::{debug, instrument};
use utoipa::IntoParams;

use super::todos::TodoResponse;
use crate::api::error::{ApiError, ErrorResponse};
use crate::api::state::AppState;
use crate::api::validators::{FieldSource, FieldValue, ValidationError};
use crate::db::utils::normalize_due_date;
use crate::db::{Database, TodoQuery, TodoRepository};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AgendaQuery {
    /// Day to list; any date spelling is accepted and normalized
    #[param(example = "2023-01-05")]
    pub date: Option<String>,
}

impl FieldSource for AgendaQuery {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "date" => self.date.as_deref().map(FieldValue::Text),
            _ => None,
        }
    }
}

/// List the agenda for a day
///
/// Without a date every todo is returned.
#[utoipa::path(
    get,
    path = "/agenda",
    tag = "agenda",
    params(AgendaQuery),
    responses(
        (status = 200, description = "Todos due on the date", body = Vec<TodoResponse>),
        (status = 400, description = "Invalid date", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_agenda<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<AgendaQuery>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    state.validators().agenda.validate(&query)?;

    let date = normalize_due_date(query.date.as_deref().unwrap_or_default())
        .ok_or(ValidationError::InvalidDueDate)?;
    debug!(%date, "agenda lookup");

    let todos = state
        .db()
        .todos()
        .list(Some(&TodoQuery::due_on(date)))
        .await?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}
