//! Name filter over the fetched records

use crate::models::TransactionRecord;

/// Case-insensitive substring match against the first and last name notes.
/// Records without notes or names never match.
pub fn matches_name(record: &TransactionRecord, query_lower: &str) -> bool {
    [record.first_name(), record.last_name()]
        .into_iter()
        .flatten()
        .any(|name| name.to_lowercase().contains(query_lower))
}

/// Records matching `query`; an empty query keeps everything
pub fn filter_records(records: &[TransactionRecord], query: &str) -> Vec<TransactionRecord> {
    if query.is_empty() {
        return records.to_vec();
    }

    let query_lower = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches_name(record, &query_lower))
        .cloned()
        .collect()
}
