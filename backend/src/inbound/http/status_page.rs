//! Human-readable landing page.
//!
//! ```text
//! GET /
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, web};

use crate::inbound::http::state::HttpState;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const CONNECTED_LABEL: &str = "Connected";
const NOT_CONNECTED_LABEL: &str = "Not connected";

/// Render the landing page with instance details, navigation links and a
/// registration form.
#[get("/")]
pub async fn status_page(state: web::Data<HttpState>) -> HttpResponse {
    let now = state.clock.local().format(TIME_FORMAT).to_string();
    let body = render_status_page(&state.health.hostname, &now, state.store.is_connected());
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn render_status_page(hostname: &str, time: &str, connected: bool) -> String {
    let database = if connected {
        CONNECTED_LABEL
    } else {
        NOT_CONNECTED_LABEL
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>ms-app</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; }}
        .info {{ background: #f5f5f5; padding: 20px; border-radius: 5px; }}
        .links a {{ display: inline-block; margin: 10px; padding: 10px 20px; background: #007bff; color: white; text-decoration: none; border-radius: 5px; }}
    </style>
</head>
<body>
    <h1>ms-app</h1>
    <div class="info">
        <h3>Instance</h3>
        <p><strong>Hostname:</strong> {hostname}</p>
        <p><strong>Time:</strong> {time}</p>
        <p><strong>Database:</strong> {database}</p>
    </div>
    <div class="links">
        <a href="/health">Health Check</a>
        <a href="/users">List Users</a>
        <a href="/users/create">Create User</a>
    </div>
    <div style="margin-top: 20px;">
        <h3>Create a user</h3>
        <form action="/users/create" method="POST">
            <input type="text" name="name" placeholder="Name" required>
            <input type="email" name="email" placeholder="Email" required>
            <button type="submit">Create User</button>
        </form>
    </div>
</body>
</html>
"#,
        hostname = escape_html(hostname),
        time = escape_html(time),
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
