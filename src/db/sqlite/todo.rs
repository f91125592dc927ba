//! SQLite TodoRepository implementation.

use std::str::FromStr;

use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::db::{
    Category, DbError, DbResult, Priority, Status, Todo, TodoId, TodoQuery, TodoRepository,
};

/// SQLx-backed todo repository.
pub struct SqliteTodoRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> TodoRepository for SqliteTodoRepository<'a> {
    async fn create(&self, todo: &Todo) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO todo (id, todo, priority, status, category, due_date) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(todo.id)
        .bind(&todo.todo)
        .bind(todo.priority.to_string())
        .bind(todo.status.to_string())
        .bind(todo.category.to_string())
        .bind(&todo.due_date)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DbError::AlreadyExists {
                    entity_type: "Todo".to_string(),
                    id: todo.id.to_string(),
                }
            } else {
                DbError::from(e)
            }
        })?;

        debug!(id = todo.id, "inserted todo");
        Ok(())
    }

    async fn get(&self, id: TodoId) -> DbResult<Todo> {
        let row = sqlx::query(
            "SELECT id, todo, priority, status, category, due_date FROM todo WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let row = row.ok_or(DbError::NotFound {
            entity_type: "Todo".to_string(),
            id: id.to_string(),
        })?;

        row_to_todo(&row)
    }

    async fn list(&self, query: Option<&TodoQuery>) -> DbResult<Vec<Todo>> {
        let default_query = TodoQuery::default();
        let query = query.unwrap_or(&default_query);

        // Every filter is a substring match; absent filters are left out,
        // which is the same as matching against '%%'.
        let mut conditions: Vec<&str> = Vec::new();
        let mut bind_values: Vec<String> = Vec::new();

        if let Some(status) = &query.status {
            conditions.push("status LIKE '%' || ? || '%'");
            bind_values.push(status.to_string());
        }

        if let Some(priority) = &query.priority {
            conditions.push("priority LIKE '%' || ? || '%'");
            bind_values.push(priority.to_string());
        }

        if let Some(category) = &query.category {
            conditions.push("category LIKE '%' || ? || '%'");
            bind_values.push(category.to_string());
        }

        if let Some(due_date) = &query.due_date {
            conditions.push("due_date LIKE '%' || ? || '%'");
            bind_values.push(due_date.clone());
        }

        if let Some(search) = &query.search {
            conditions.push("todo LIKE '%' || ? || '%'");
            bind_values.push(search.clone());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT id, todo, priority, status, category, due_date FROM todo {} ORDER BY id",
            where_clause
        );

        let mut query_builder = sqlx::query(&sql);
        for value in &bind_values {
            query_builder = query_builder.bind(value);
        }

        let rows = query_builder.fetch_all(self.pool).await?;

        rows.iter().map(row_to_todo).collect()
    }

    async fn update(&self, todo: &Todo) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE todo
            SET todo = ?, priority = ?, status = ?, category = ?, due_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&todo.todo)
        .bind(todo.priority.to_string())
        .bind(todo.status.to_string())
        .bind(todo.category.to_string())
        .bind(&todo.due_date)
        .bind(todo.id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity_type: "Todo".to_string(),
                id: todo.id.to_string(),
            });
        }

        Ok(())
    }

    async fn delete(&self, id: TodoId) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// SQLite reports primary key clashes as "UNIQUE constraint failed".
fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error().is_some_and(|db| {
        db.is_unique_violation() || db.message().contains("UNIQUE constraint failed")
    })
}

/// Convert a database row to a Todo model.
fn row_to_todo(row: &sqlx::sqlite::SqliteRow) -> DbResult<Todo> {
    let id: TodoId = row.try_get("id")?;
    let priority: String = row.try_get("priority")?;
    let status: String = row.try_get("status")?;
    let category: String = row.try_get("category")?;

    Ok(Todo {
        id,
        todo: row.try_get("todo")?,
        priority: Priority::from_str(&priority).map_err(|message| invalid_row(id, message))?,
        status: Status::from_str(&status).map_err(|message| invalid_row(id, message))?,
        category: Category::from_str(&category).map_err(|message| invalid_row(id, message))?,
        due_date: row.try_get("due_date")?,
    })
}

fn invalid_row(id: TodoId, message: String) -> DbError {
    DbError::InvalidData {
        message: format!("{} in todo {}", message, id),
        help: "Rows in the todo table must use the upper-case enum names".to_string(),
    }
}
