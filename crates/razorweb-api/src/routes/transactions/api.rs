//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Current table page (JSON)
//! - api_transactions_fetch: Fetch a date range (JSON)
//! - api_transactions_export: Export as a data URI (JSON)
//! - htmx_transactions_fetch: Fetch a date range (HTML fragment)
//! - htmx_transactions_list: Page, size and sort (HTML fragment)
//! - htmx_transactions_filter: Name filter (HTML fragment)
//! - download_transactions_csv: CSV attachment

use super::page::{render_error_banner, render_table};
use crate::{ApiError, AppState};
use axum::extract::{Form, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use razorweb_core::{Column, CoreError, FetchOutcome, FetchRequest, SortDirection, TablePage, TableQuery};
use serde_json::json;
use std::collections::HashMap;

/// Read `page`, `limit`, `sort` and `dir` from query parameters
fn table_query(state: &AppState, params: &HashMap<String, String>) -> Result<TableQuery, ApiError> {
    let page = params.get("page").and_then(|s| s.parse().ok()).unwrap_or(1);
    let limit = params.get("limit").and_then(|s| s.parse().ok());

    let sort = match params.get("sort").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(name) => {
            let column: Column = name
                .parse()
                .map_err(|_| CoreError::InvalidColumn { name: name.to_string() })?;
            let direction = match params.get("dir").map(|s| s.trim()).filter(|s| !s.is_empty()) {
                Some(dir) => dir
                    .parse::<SortDirection>()
                    .map_err(|message| ApiError::BadRequest { message })?,
                None => SortDirection::default(),
            };
            Some((column, direction))
        }
        None => None,
    };

    Ok(TableQuery {
        page,
        per_page: state.store.page_size(limit),
        sort,
    })
}

fn table_fragment(state: &AppState, query: &TableQuery) -> String {
    let page = state.store.table(query);
    render_table(&page, &state.config.table.page_size_options, state.store.has_fetched())
}

/// Get the current table page (JSON API)
pub async fn api_transactions(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<TablePage>, ApiError> {
    let query = table_query(&state, &params)?;
    Ok(Json(state.store.table(&query)))
}

/// Fetch a date range (JSON API)
pub async fn api_transactions_fetch(
    state: State<AppState>,
    Json(request): Json<FetchRequest>,
) -> Json<serde_json::Value> {
    let response = match state.store.fetch_transactions(&request.from, &request.to).await {
        Ok(FetchOutcome::Applied { count }) => json!({ "success": true, "count": count }),
        Ok(FetchOutcome::Stale) => json!({ "success": true, "stale": true }),
        Err(e) => json!({ "success": false, "message": e.to_string(), "error": e.to_details() }),
    };
    Json(response)
}

/// Export the displayed records as a `data:` URI (JSON API)
pub async fn api_transactions_export(state: State<AppState>) -> Result<Response, ApiError> {
    match state.store.export_csv()? {
        Some(export) => Ok(Json(json!({
            "filename": export.filename,
            "data_uri": export.data_uri(),
        }))
        .into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// HTMX: Fetch a date range and render the first page.
/// A failed fetch renders an error banner above the unchanged table.
pub async fn htmx_transactions_fetch(
    state: State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Html<String> {
    let from = form.get("from").map(String::as_str).unwrap_or("");
    let to = form.get("to").map(String::as_str).unwrap_or("");

    let banner = match state.store.fetch_transactions(from, to).await {
        Ok(_) => String::new(),
        Err(e) => {
            let details = e.to_details();
            render_error_banner(&details.message, &details.suggestions)
        }
    };

    let query = TableQuery {
        page: 1,
        per_page: state.store.page_size(None),
        sort: None,
    };
    Html(format!("{}{}", banner, table_fragment(&state, &query)))
}

/// HTMX: Table page with the requested size and sort
pub async fn htmx_transactions_list(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let query = table_query(&state, &params)?;
    Ok(Html(table_fragment(&state, &query)))
}

/// HTMX: Apply the name filter and render the first page
pub async fn htmx_transactions_filter(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let mut query = table_query(&state, &params)?;
    query.page = 1;

    state.store.filter(params.get("q").map(String::as_str).unwrap_or(""));
    Ok(Html(table_fragment(&state, &query)))
}

/// Download the displayed records as a delimited file; 204 when empty
pub async fn download_transactions_csv(state: State<AppState>) -> Result<Response, ApiError> {
    let export = match state.store.export_csv()? {
        Some(export) => export,
        None => return Ok(StatusCode::NO_CONTENT.into_response()),
    };

    let disposition = format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(&export.filename)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use razorweb_config::Config;
    use razorweb_core::{CoreResult, TransactionRecord, TransactionSource, TransactionStore};
    use std::sync::Arc;

    struct EmptySource;

    #[async_trait::async_trait]
    impl TransactionSource for EmptySource {
        async fn fetch(&self, _request: &FetchRequest) -> CoreResult<Vec<TransactionRecord>> {
            Ok(vec![])
        }
    }

    fn state() -> AppState {
        AppState::new(Arc::new(TransactionStore::new(Config::default(), Arc::new(EmptySource))))
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_table_query_defaults() {
        let query = table_query(&state(), &params(&[])).unwrap();
        assert_eq!(query, TableQuery { page: 1, per_page: 10, sort: None });
    }

    #[test]
    fn test_table_query_parses_sort() {
        let query = table_query(
            &state(),
            &params(&[("page", "3"), ("limit", "50"), ("sort", "captured_at"), ("dir", "desc")]),
        )
        .unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(query.per_page, 50);
        assert_eq!(query.sort, Some((Column::CapturedAt, SortDirection::Desc)));

        let blank = table_query(&state(), &params(&[("sort", ""), ("limit", "7")])).unwrap();
        assert_eq!(blank.sort, None);
        assert_eq!(blank.per_page, 10);
    }

    #[test]
    fn test_table_query_rejects_unknown_column() {
        let err = table_query(&state(), &params(&[("sort", "notes")])).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = table_query(&state(), &params(&[("sort", "id"), ("dir", "sideways")])).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
