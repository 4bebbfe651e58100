use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use rand::seq::SliceRandom;

use crate::models::quotes::Quote;
use crate::routes::error_response;
use crate::AppState;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Inspirational Quote Board</title>
<style>
body { font-family: Georgia, serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; color: #222; }
blockquote { margin: 0; padding: 0.5rem 1rem; border-left: 4px solid #8a2be2; }
blockquote footer { color: #666; font-style: italic; }
.featured { background: #f6f0ff; padding: 1rem; }
ul.quotes { list-style: none; padding: 0; }
ul.quotes li { display: flex; align-items: center; gap: 1rem; margin: 1rem 0; }
form { margin: 2rem 0; display: flex; flex-direction: column; gap: 0.5rem; }
button { cursor: pointer; }
</style>
</head>
<body>
<h1>Inspirational Quote Board</h1>
"#;

const ADD_FORM: &str = r#"<form onsubmit="addQuote(event)">
<input name="text" placeholder="a quote worth keeping" required>
<input name="author" placeholder="who said it" required>
<button type="submit">add quote</button>
</form>
"#;

const PAGE_FOOT: &str = r#"<script>
async function addQuote(event) {
  event.preventDefault();
  const form = event.target;
  await fetch('/api/quotes', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ text: form.text.value, author: form.author.value }),
  });
  window.location.reload();
}

async function deleteQuote(id) {
  await fetch('/api/quotes/' + id, { method: 'DELETE' });
  window.location.reload();
}
</script>
</body>
</html>
"#;

#[tracing::instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Response {
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

    let Ok(quotes) = quotes else {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error");
    };

    let random_quote = quotes.choose(&mut rand::thread_rng());

    Html(render_index(&quotes, random_quote)).into_response()
}

fn render_index(quotes: &[Quote], random_quote: Option<&Quote>) -> String {
    let featured = match random_quote {
        Some(quote) => format!(
            "<blockquote class=\"featured\"><p>{}</p><footer>&mdash; {}</footer></blockquote>\n",
            escape_html(&quote.text),
            escape_html(&quote.author),
        ),
        None => String::from("<p class=\"featured\">No quotes yet. Add the first one below!</p>\n"),
    };

    let entries: String = quotes
        .iter()
        .map(|quote| {
            format!(
                "<li><blockquote><p>{}</p><footer>&mdash; {}</footer></blockquote>\
                 <button onclick=\"deleteQuote({})\">delete</button></li>\n",
                escape_html(&quote.text),
                escape_html(&quote.author),
                quote.id,
            )
        })
        .collect();

    format!(
        "{}{}{}<ul class=\"quotes\">\n{}</ul>\n{}",
        PAGE_HEAD, featured, ADD_FORM, entries, PAGE_FOOT
    )
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
