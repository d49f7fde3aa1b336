//! Transaction routes - fetch form, sortable table, name filter, CSV export
//!
//! Structure:
//! - api.rs: JSON API, HTMX partials and the CSV download
//! - page.rs: Full page and table fragment rendering

pub mod api;
pub mod page;

pub use api::{
    api_transactions,
    api_transactions_export,
    api_transactions_fetch,
    download_transactions_csv,
    htmx_transactions_fetch,
    htmx_transactions_filter,
    htmx_transactions_list,
};

pub use page::page_transactions;
