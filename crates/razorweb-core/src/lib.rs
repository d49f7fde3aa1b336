//! Transaction view state, table projection, filtering and export
//!
//! `TransactionStore` owns the single view shared by every request handler:
//! it fetches from a `TransactionSource`, keeps the fetched list and the name
//! filter, and produces table pages and delimited exports from them.

pub mod columns;
pub mod error;
pub mod export;
pub mod filter;
pub mod gateway;
pub mod models;
pub mod time;
pub mod view;

use chrono::Utc;
use log::{debug, info, warn};
use razorweb_config::Config;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use columns::{Column, DisplayOptions, SortDirection};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity};
pub use export::{CsvExport, ExportOptions};
pub use gateway::{GatewayClient, TransactionSource};
pub use models::{FetchRequest, RecordSummary, TransactionRecord};
pub use view::{FetchTicket, TablePage, TableQuery, TransactionView};

/// Source reference type
pub type SourceRef = Arc<dyn TransactionSource>;

/// Result of a fetch that reached the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the fetched list
    Applied { count: usize },
    /// A newer fetch was issued meanwhile; the response was dropped
    Stale,
}

/// Shared transaction view plus the source it is fetched from
pub struct TransactionStore {
    config: Config,
    source: SourceRef,
    view: RwLock<TransactionView>,
}

impl TransactionStore {
    /// Create a store with an empty view
    pub fn new(config: Config, source: SourceRef) -> Self {
        Self {
            config,
            source,
            view: RwLock::new(TransactionView::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions::from_config(&self.config)
    }

    fn read_view(&self) -> RwLockReadGuard<'_, TransactionView> {
        self.view.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_view(&self) -> RwLockWriteGuard<'_, TransactionView> {
        self.view.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ==================== Fetch ====================

    /// Send one request for the date range and replace the fetched list.
    ///
    /// On failure the view is left unchanged and the error is logged and
    /// returned. A response is only applied if no newer fetch was issued.
    pub async fn fetch_transactions(&self, from: &str, to: &str) -> CoreResult<FetchOutcome> {
        let ticket = self.write_view().begin_fetch(from, to);
        let request = FetchRequest {
            from: from.to_string(),
            to: to.to_string(),
        };
        info!("Fetching transactions from '{}' to '{}' (request #{})", from, to, ticket.sequence());

        let items = match self.source.fetch(&request).await {
            Ok(items) => items,
            Err(e) => {
                let level = match e.severity() {
                    ErrorSeverity::Warning => log::Level::Warn,
                    _ => log::Level::Error,
                };
                log::log!(level, "Fetch #{} failed: {}", ticket.sequence(), e.to_details());
                return Err(e);
            }
        };

        let count = items.len();
        if self.write_view().apply_fetch(ticket, items) {
            info!("Loaded {} transactions (request #{})", count, ticket.sequence());
            Ok(FetchOutcome::Applied { count })
        } else {
            warn!("Dropped response for request #{}: a newer fetch was issued", ticket.sequence());
            Ok(FetchOutcome::Stale)
        }
    }

    // ==================== Filter ====================

    /// Set the name filter; an empty query shows everything fetched
    pub fn filter(&self, query: &str) {
        debug!("Filter set to '{}'", query);
        self.write_view().filter(query);
    }

    pub fn query(&self) -> String {
        self.read_view().query().to_string()
    }

    /// Last submitted from/to dates
    pub fn dates(&self) -> (String, String) {
        let view = self.read_view();
        (view.from_date().to_string(), view.to_date().to_string())
    }

    pub fn has_fetched(&self) -> bool {
        self.read_view().has_fetched()
    }

    pub fn fetched_count(&self) -> usize {
        self.read_view().fetched().len()
    }

    /// Records currently shown
    pub fn displayed(&self) -> Vec<TransactionRecord> {
        self.read_view().displayed()
    }

    // ==================== Table ====================

    /// Requested page size if it is one of the offered sizes, else the default
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        let table = &self.config.table;
        requested
            .filter(|size| table.page_size_options.contains(size))
            .unwrap_or(table.records_per_page)
    }

    /// Sorted, paginated projection of the displayed records
    pub fn table(&self, query: &TableQuery) -> TablePage {
        view::build_table_page(self.displayed(), query, &self.display_options())
    }

    // ==================== Export ====================

    /// Export the displayed records, or `None` when there are none
    pub fn export_csv(&self) -> CoreResult<Option<CsvExport>> {
        let records = self.displayed();
        let options = ExportOptions::from_config(&self.config.export);
        let export = export::build_export(&records, &options, &self.display_options(), Utc::now())?;

        match &export {
            Some(export) => debug!("Exported {} rows to '{}'", records.len(), export.filename),
            None => debug!("Nothing to export"),
        }
        Ok(export)
    }
}

// ==================== Tests ====================
