//! The unsaved transaction that the form edits.

use crate::{timezone::now_millis, transaction::TransactionType};

/// The in-progress, unsaved transaction being edited in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    /// The raw amount as typed by the user. Not validated until submission.
    pub amount: String,
    /// The selected category name, empty if none has been selected.
    pub category: String,
    /// The selected transaction type.
    pub transaction_type: TransactionType,
    /// When the transaction happened in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl Draft {
    /// An empty income draft dated at `timestamp`.
    pub fn new(timestamp: i64) -> Self {
        Self {
            amount: String::new(),
            category: String::new(),
            transaction_type: TransactionType::Income,
            timestamp,
        }
    }
}

impl Default for Draft {
    /// An empty income draft dated now.
    fn default() -> Self {
        Self::new(now_millis())
    }
}
