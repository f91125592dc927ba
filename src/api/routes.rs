//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::error::ErrorResponse;
use super::handlers::{self, CreateTodoRequest, HealthResponse, TodoResponse, UpdateTodoRequest};
use super::state::AppState;
use crate::db::Database;

/// Build routes with generic database type.
///
/// Applies the turbofish to handlers that are generic over `Database`.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo Agenda API",
        version = "0.1.0",
        description = "Personal to-do list with a daily agenda",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::list_todos,
        handlers::get_todo,
        handlers::create_todo,
        handlers::update_todo,
        handlers::delete_todo,
        handlers::get_agenda,
    ),
    components(
        schemas(
            HealthResponse,
            TodoResponse,
            CreateTodoRequest,
            UpdateTodoRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "todos", description = "Todo management endpoints"),
        (name = "agenda", description = "Todos due on a given day")
    )
)]
pub struct ApiDoc;

/// Create the API router.
///
/// Every resource path is also served with a trailing slash.
pub fn create_router<D: Database + 'static>(state: AppState<D>, enable_docs: bool) -> Router {
    let system_routes = Router::new().route("/health", get(handlers::health));

    let todo_routes = routes!(D => {
        get "/todos" => handlers::list_todos,
        get "/todos/" => handlers::list_todos,
        post "/todos" => handlers::create_todo,
        post "/todos/" => handlers::create_todo,
        get "/todos/{todoId}" => handlers::get_todo,
        get "/todos/{todoId}/" => handlers::get_todo,
        put "/todos/{todoId}" => handlers::update_todo,
        put "/todos/{todoId}/" => handlers::update_todo,
        delete "/todos/{todoId}" => handlers::delete_todo,
        delete "/todos/{todoId}/" => handlers::delete_todo,
    });

    let agenda_routes = routes!(D => {
        get "/agenda" => handlers::get_agenda,
        get "/agenda/" => handlers::get_agenda,
    });

    let router = system_routes.merge(todo_routes).merge(agenda_routes);

    let router = if enable_docs {
        router.merge(Scalar::with_url("/docs", ApiDoc::openapi()))
    } else {
        router
    };

    router.with_state(state)
}
