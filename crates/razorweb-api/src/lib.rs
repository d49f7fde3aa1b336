//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: Fetch form, table, filter, export
//! - routes::settings: Configuration display

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use log::info;
use razorweb_config::Config;
use razorweb_core::TransactionStore;
use razorweb_utils::escape_html;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TransactionStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<TransactionStore>) -> Self {
        let config = store.config().clone();
        Self { store, config }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::settings::{api_settings, page_settings};
    use routes::transactions::{
        api_transactions, api_transactions_export, api_transactions_fetch, download_transactions_csv,
        htmx_transactions_fetch, htmx_transactions_filter, htmx_transactions_list, page_transactions,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions/fetch", post(api_transactions_fetch))
        .route("/api/transactions/export", get(api_transactions_export))
        .route("/api/settings", get(api_settings))
        // HTMX page routes
        .route("/", get(page_transactions))
        .route("/transactions", get(page_transactions))
        .route("/settings", get(page_settings))
        // HTMX partial routes
        .route("/transactions/fetch", post(htmx_transactions_fetch))
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/filter", get(htmx_transactions_filter))
        .route("/transactions/export", get(download_transactions_csv))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(app_title: &str, title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - {}</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        escape_html(app_title),
        content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(app_title: &str, current_path: &str) -> String {
    let links = [
        ("/transactions", "Transactions", "📋"),
        ("/settings", "Settings", "⚙️"),
    ];

    let mut nav = format!(
        "<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>{}</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>",
        escape_html(app_title)
    );

    for (path, label, icon) in &links {
        let is_active = current_path.starts_with(path) || (current_path == "/" && *path == "/transactions");
        let active_class = if is_active { "bg-indigo-50 text-indigo-600" } else { "text-gray-600 hover:bg-gray-50" };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(
    headers: &axum::http::HeaderMap,
    config: &Config,
    title: &str,
    current_path: &str,
    inner_content: &str,
) -> String {
    if is_htmx_request(headers) {
        format!(
            r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>"#,
            inner_content
        )
    } else {
        let app_title = &config.display.title;
        base_html(
            app_title,
            title,
            &format!(
                r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
                nav_sidebar(app_title, current_path),
                inner_content
            ),
        )
    }
}

/// Start the HTTP server and serve until Ctrl-C
pub async fn start_server(store: Arc<TransactionStore>) -> std::io::Result<()> {
    let state = AppState::new(store);
    let addr = state.config.bind_address();
    let endpoint = state.config.gateway.endpoint.clone();

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Starting razorweb server on http://{}", addr);
    info!("Transactions are fetched from {}", endpoint);
    info!("Available routes:");
    info!("  - /transactions (Query form and table)");
    info!("  - /transactions/export (CSV download)");
    info!("  - /settings (Configuration)");
    info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
