//! Per-process view state and table paging

use crate::columns::{sort_records, Column, DisplayOptions, SortDirection};
use crate::filter::filter_records;
use crate::models::{RecordSummary, TransactionRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Sequence number taken before a fetch is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// What the user has asked for and what was last fetched.
///
/// `fetched` is never narrowed in place; the displayed list is always
/// recomputed from it and the current query.
#[derive(Debug, Default, Clone)]
pub struct TransactionView {
    from_date: String,
    to_date: String,
    fetched: Arc<Vec<TransactionRecord>>,
    query: String,
    issued: u64,
    applied: u64,
}

impl TransactionView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the submitted dates and take a ticket for the request
    pub fn begin_fetch(&mut self, from: &str, to: &str) -> FetchTicket {
        self.from_date = from.to_string();
        self.to_date = to.to_string();
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Whether `ticket` belongs to the most recently issued fetch
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Replace the fetched list if `ticket` is still current. Returns whether
    /// the items were applied.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, items: Vec<TransactionRecord>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.fetched = Arc::new(items);
        self.applied = ticket.0;
        true
    }

    /// Set the name filter
    pub fn filter(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn from_date(&self) -> &str {
        &self.from_date
    }

    pub fn to_date(&self) -> &str {
        &self.to_date
    }

    /// Everything the last applied fetch returned
    pub fn fetched(&self) -> &[TransactionRecord] {
        &self.fetched
    }

    /// Whether any fetch has completed
    pub fn has_fetched(&self) -> bool {
        self.applied > 0
    }

    /// Fetched records narrowed by the current query
    pub fn displayed(&self) -> Vec<TransactionRecord> {
        filter_records(&self.fetched, &self.query)
    }
}

/// Requested page of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableQuery {
    /// 1-based page number
    pub page: usize,
    pub per_page: usize,
    pub sort: Option<(Column, SortDirection)>,
}

/// One rendered row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub key: String,
    pub cells: Vec<String>,
}

/// A rendered page of the table plus the summary list of every displayed
/// record, in fetched order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePage {
    pub columns: Vec<Column>,
    pub rows: Vec<TableRow>,
    pub summaries: Vec<RecordSummary>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub sort: Option<(Column, SortDirection)>,
}

impl TablePage {
    /// 1-based index of the first row on this page (0 when empty)
    pub fn first_row(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    /// 1-based index of the last row on this page
    pub fn last_row(&self) -> usize {
        (self.page * self.per_page).min(self.total)
    }
}

/// Sort, paginate and project records into a table page
pub fn build_table_page(
    mut records: Vec<TransactionRecord>,
    query: &TableQuery,
    options: &DisplayOptions,
) -> TablePage {
    let summaries = records.iter().map(RecordSummary::from).collect();

    if let Some((column, direction)) = query.sort {
        sort_records(&mut records, column, direction, options);
    }

    let per_page = query.per_page.max(1);
    let total = records.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let page = query.page.clamp(1, total_pages);

    let rows = records
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .enumerate()
        .map(|(index, record)| TableRow {
            key: record.id().unwrap_or_else(|| format!("row-{}", (page - 1) * per_page + index)),
            cells: Column::ALL.iter().map(|c| c.project(record, options)).collect(),
        })
        .collect();

    TablePage {
        columns: Column::ALL.to_vec(),
        rows,
        summaries,
        total,
        page,
        per_page,
        total_pages,
        sort: query.sort,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person(id: usize, first: &str, last: &str) -> TransactionRecord {
        TransactionRecord::from_value(json!({
            "id": format!("pay_{}", id),
            "amount": id * 100,
            "notes": { "first_name": first, "last_name": last }
        }))
        .unwrap()
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![person(1, "Ana", "Doe"), person(2, "Juan", "Santana"), person(3, "Peter", "Doe")]
    }

    #[test]
    fn test_apply_fetch_replaces_list_verbatim() {
        let mut view = TransactionView::new();
        assert!(!view.has_fetched());

        let ticket = view.begin_fetch("2024-01-01", "2024-01-31");
        assert!(view.apply_fetch(ticket, sample()));

        assert!(view.has_fetched());
        assert_eq!(view.fetched(), sample().as_slice());
        assert_eq!(view.from_date(), "2024-01-01");
        assert_eq!(view.to_date(), "2024-01-31");
    }

    #[test]
    fn test_stale_fetch_is_dropped() {
        let mut view = TransactionView::new();
        let first = view.begin_fetch("2024-01-01", "2024-01-31");
        let second = view.begin_fetch("2024-02-01", "2024-02-29");

        assert!(view.apply_fetch(second, vec![person(2, "Juan", "Santana")]));
        assert!(!view.apply_fetch(first, sample()));
        assert_eq!(view.fetched().len(), 1);
        assert_eq!(second.sequence(), first.sequence() + 1);
    }

    #[test]
    fn test_filter_is_reversible() {
        let mut view = TransactionView::new();
        let ticket = view.begin_fetch("", "");
        view.apply_fetch(ticket, sample());

        view.filter("ana");
        let narrowed: Vec<String> = view.displayed().iter().filter_map(|r| r.id()).collect();
        assert_eq!(narrowed, vec!["pay_1", "pay_2"]);

        view.filter("");
        assert_eq!(view.displayed(), sample());
    }

    #[test]
    fn test_filter_survives_refetch() {
        let mut view = TransactionView::new();
        view.filter("peter");
        let ticket = view.begin_fetch("", "");
        view.apply_fetch(ticket, sample());

        assert_eq!(view.displayed().len(), 1);
        assert_eq!(view.query(), "peter");
    }

    #[test]
    fn test_pagination() {
        let records: Vec<_> = (1..=23).map(|i| person(i, "Ana", "Doe")).collect();
        let query = TableQuery { page: 3, per_page: 10, sort: None };
        let page = build_table_page(records, &query, &DisplayOptions::default());

        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.rows.len(), 3);
        assert_eq!(page.rows[0].key, "pay_21");
        assert_eq!(page.first_row(), 21);
        assert_eq!(page.last_row(), 23);
        assert_eq!(page.summaries.len(), 23);
        assert_eq!(page.rows[0].cells.len(), Column::ALL.len());
    }

    #[test]
    fn test_page_is_clamped() {
        let query = TableQuery { page: 99, per_page: 10, sort: None };
        let page = build_table_page(sample(), &query, &DisplayOptions::default());
        assert_eq!(page.page, 1);

        let empty = build_table_page(vec![], &TableQuery { page: 0, per_page: 10, sort: None }, &DisplayOptions::default());
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 1);
        assert_eq!(empty.first_row(), 0);
        assert_eq!(empty.last_row(), 0);
    }

    #[test]
    fn test_sorted_page() {
        let query = TableQuery { page: 1, per_page: 10, sort: Some((Column::Name, SortDirection::Desc)) };
        let page = build_table_page(sample(), &query, &DisplayOptions::default());
        let keys: Vec<&str> = page.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["pay_3", "pay_2", "pay_1"]);
    }
}
