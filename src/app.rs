use axum::{
    Json, Router,
    extract::Request,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use log::info;
use serde::Serialize;
use std::time::Instant;
use tokio::net::TcpListener;

use crate::loader;
use crate::saving;
use crate::table::Table;

#[derive(Serialize)]
struct SaveResponse {
    status: String,
    message: Option<String>,
}

/// Start the web front end.
///
/// There is deliberately no shared application state: every request loads
/// the inventory fresh from the remote sheet, and every save rewrites it
/// wholesale. The remote spreadsheet itself is the only store.
pub async fn run(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Build router
    let app = Router::new()
        .route("/", get(serve_editor))
        .route("/api/inventory", get(get_inventory).post(save_inventory))
        .layer(middleware::from_fn(log_requests));

    // Start server
    let listener = TcpListener::bind(addr).await?;
    println!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Request log line: method, path, status, elapsed time.
async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    info!(
        "{} {} - {} - {}ms",
        method,
        uri,
        response.status(),
        start.elapsed().as_millis()
    );
    response
}

async fn serve_editor() -> Html<&'static str> {
    Html(include_str!("./static/inventory.html"))
}

/// The current inventory as JSON. Per the load contract this never fails:
/// a broken credential or an unreachable service both come back as the
/// canonical empty table.
async fn get_inventory() -> Json<Table> {
    Json(loader::load_inventory().await)
}

/// Accept an edited table and push it to the remote sheet. Cells go out
/// exactly as the editor sent them; coercion happens on the next load.
/// Write failures surface here; the silent no-save-without-session case
/// reports "ok" just like a completed write.
async fn save_inventory(Json(table): Json<Table>) -> impl IntoResponse {
    match saving::save_inventory(&table).await {
        Ok(_) => Json(SaveResponse {
            status: "ok".to_string(),
            message: None,
        })
        .into_response(),
        Err(e) => Json(SaveResponse {
            status: "error".to_string(),
            message: Some(e.to_string()),
        })
        .into_response(),
    }
}
