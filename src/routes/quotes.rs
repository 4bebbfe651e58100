use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rand::seq::SliceRandom;

use crate::models::quotes::{timestamp_now, Quote};
use crate::routes::error_response;
use crate::AppState;

#[tracing::instrument(skip_all)]
pub async fn list_quotes(State(state): State<AppState>) -> Response {
    let quotes = sqlx::query_as::<_, Quote>(
        r#"
            SELECT
                id, text, author, created_at
            FROM quotes
            ORDER BY created_at DESC;
        "#,
    )
    .fetch_all(&state.db)
    .await
    .inspect_err(
        |e| tracing::error!(err = ?e, "an error occurred when fetching quotes from database"),
    );

    match quotes {
        Ok(quotes) => Json(quotes).into_response(),
        Err(_) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
    }
}

/// Uniform pick over every stored quote. The table is small enough that
/// fetching it whole and choosing in-process is fine.
#[tracing::instrument(skip_all)]
pub async fn random_quote(State(state): State<AppState>) -> Response {
    let quotes = sqlx::query_as::<_, Quote>(
        r#"
            SELECT
                id, text, author, created_at
            FROM quotes;
        "#,
    )
    .fetch_all(&state.db)
    .await
    .inspect_err(
        |e| tracing::error!(err = ?e, "an error occurred when fetching quotes from database"),
    );

    let Ok(quotes) = quotes else {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error");
    };

    match quotes.choose(&mut rand::thread_rng()) {
        Some(quote) => Json(quote).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "No quotes available"),
    }
}

// The body is taken as raw JSON rather than a typed extractor: a missing or
// non-string field has to produce the "Missing text or author" message, not a
// deserialization rejection.
#[tracing::instrument(skip_all)]
pub async fn add_quote(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let (Some(text), Some(author)) = (
        body.get("text").and_then(serde_json::Value::as_str),
        body.get("author").and_then(serde_json::Value::as_str),
    ) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing text or author");
    };

    let text = text.trim();
    let author = author.trim();

    if text.is_empty() || author.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Text and author cannot be empty");
    }

    let result = sqlx::query(
        r#"
            INSERT INTO
                quotes (text, author, created_at)
            VALUES
                ($1, $2, $3);
        "#,
    )
    .bind(text)
    .bind(author)
    .bind(timestamp_now())
    .execute(&state.db)
    .await
    .inspect_err(|e| {
        tracing::error!(err = ?e, author = %author, "an error occurred when adding quote");
    });

    match result {
        Ok(result) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "id": result.last_insert_rowid(),
                "text": text,
                "author": author,
            })),
        )
            .into_response(),
        Err(_) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
    }
}

// Deleting an id that was never assigned reports success all the same; the
// endpoint promises the row is gone, not that it existed.
#[tracing::instrument(skip_all)]
pub async fn delete_quote(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let result = sqlx::query(
        r#"
            DELETE FROM quotes
            WHERE id = $1;
        "#,
    )
    .bind(id)
    .execute(&state.db)
    .await
    .inspect_err(|e| tracing::error!(err = ?e, id, "an error occurred when deleting quote"));

    match result {
        Ok(_) => {
            Json(serde_json::json!({ "message": "Quote deleted successfully" })).into_response()
        }
        Err(_) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
    }
}
