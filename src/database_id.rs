//! Database ID type definitions.

/// Alias for the integer type used for the ledger's row IDs.
pub type TransactionId = i64;
