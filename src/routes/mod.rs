use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub mod health;
pub mod pages;
pub mod quotes;

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

#[cfg(test)]
pub(crate) mod testutil {
    use axum::Router;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::{Pool, Sqlite};

    use crate::init::{router, seed_default_quotes};
    use crate::AppState;

    /// Router over a fresh in-memory database. A single pooled connection
    /// keeps the `:memory:` database alive for the whole test.
    pub(crate) async fn test_app(seed: bool) -> (Router, Pool<Sqlite>) {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::migrate!("./migrations").run(&db).await.unwrap();

        if seed {
            seed_default_quotes(&db).await.unwrap();
        }

        (router(AppState { db: db.clone() }), db)
    }
}
