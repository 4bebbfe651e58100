use std::str::FromStr;

use axum::routing::{delete, get};
use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::models::quotes::timestamp_now;
use crate::routes;
use crate::AppState;

pub(crate) const DEFAULT_QUOTES: [(&str, &str); 5] = [
    (
        "The only way to do great qwork is to love what you do.",
        "Steve Jobs",
    ),
    (
        "Believe you can and you're halfway there.",
        "Theodore Roosevelt",
    ),
    (
        "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        "Winston Churchill",
    ),
    (
        "The future belongs to those who believe in the beauty of their dreams.",
        "Eleanor Roosevelt",
    ),
    (
        "It does not matter how slowly you go as long as you do not stop.",
        "Confucius",
    ),
];

async fn init_database() -> anyhow::Result<Pool<Sqlite>> {
    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://inspirational_board.db".to_string());

    tracing::info!("initializing database connection...");
    let opts = SqliteConnectOptions::from_str(&db_url)
        .expect("invalid DATABASE_URL")
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);
    let db = SqlitePoolOptions::new()
        .max_connections(20)
        .connect_with(opts)
        .await?;

    tracing::info!("running migrations...");
    sqlx::migrate!("./migrations").run(&db).await?;
    tracing::info!("finished running migrations!");

    seed_default_quotes(&db).await?;

    Ok(db)
}

/// One-time bootstrap: inserts the default quotes only when the table holds
/// no rows at all, so restarting against an existing database never re-seeds.
pub(crate) async fn seed_default_quotes(db: &Pool<Sqlite>) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes;")
        .fetch_one(db)
        .await?;

    if count > 0 {
        return Ok(());
    }

    tracing::info!("quote table is empty, seeding default quotes...");

    let mut tx = db.begin().await?;

    for (text, author) in DEFAULT_QUOTES {
        sqlx::query(
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
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(())
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::pages::index))
        .route(
            "/api/quotes",
            get(routes::quotes::list_quotes).post(routes::quotes::add_quote),
        )
        .route("/api/quotes/random", get(routes::quotes::random_quote))
        .route("/api/quotes/:id", delete(routes::quotes::delete_quote))
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn init() -> anyhow::Result<(TcpListener, Router)> {
    tracing::info!("initializing... please wait warmly.");

    let db = init_database().await?;

    let port = std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(5000);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    tracing::info!("finished initializing!");
    Ok((listener, router(AppState { db })))
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::{seed_default_quotes, DEFAULT_QUOTES};

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&db).await.unwrap();

        seed_default_quotes(&db).await.unwrap();
        seed_default_quotes(&db).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes;")
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(count, DEFAULT_QUOTES.len() as i64);
    }

    #[tokio::test]
    async fn seeding_skips_non_empty_table() {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&db).await.unwrap();

        sqlx::query("INSERT INTO quotes (text, author) VALUES ('already here', 'somebody');")
            .execute(&db)
            .await
            .unwrap();

        seed_default_quotes(&db).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes;")
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
