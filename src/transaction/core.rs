//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money coming in, e.g. a salary payment.
    #[default]
    Income,
    /// Money going out, e.g. paying a bill.
    Expense,
}

impl TransactionType {
    /// The name used in URLs, the database and the JSON representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when a string is neither "Income" nor "Expense".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("\"{0}\" is not a valid transaction type")]
pub struct ParseTransactionTypeError(String);

impl FromStr for TransactionType {
    type Err = ParseTransactionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(TransactionType::Income),
            "Expense" => Ok(TransactionType::Expense),
            other => Err(ParseTransactionTypeError(other.to_owned())),
        }
    }
}

/// A finalized income or expense, ready to be stored and sent to the finance API.
///
/// The JSON representation is `{"amount", "category", "type", "timestamp"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The amount of money earned or spent. Never negative.
    pub amount: f64,
    /// The name of the category the transaction was filed under.
    pub category: String,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction happened in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// A [Transaction] that has been stored in the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    /// The ID of the row in the ledger.
    pub id: TransactionId,
    /// The stored transaction.
    pub transaction: Transaction,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the table that holds the ledger of created transactions.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            type TEXT NOT NULL,
            timestamp INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_timestamp ON \"transaction\"(timestamp);",
    )?;

    Ok(())
}

/// Append `transaction` to the ledger.
///
/// # Errors
/// Returns [Error::SqlError] if the row could not be inserted.
pub fn insert_transaction(
    transaction: &Transaction,
    connection: &Connection,
) -> Result<LedgerEntry, Error> {
    let entry = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, category, type, timestamp)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, amount, category, type, timestamp",
        )?
        .query_row(
            (
                transaction.amount,
                &transaction.category,
                transaction.transaction_type.as_str(),
                transaction.timestamp,
            ),
            map_transaction_row,
        )?;

    Ok(entry)
}

/// Get up to `limit` transactions, newest first.
///
/// Transactions with the same timestamp are ordered by most recently inserted.
pub fn get_recent_transactions(
    limit: u32,
    connection: &Connection,
) -> Result<Vec<LedgerEntry>, Error> {
    connection
        .prepare(
            "SELECT id, amount, category, type, timestamp FROM \"transaction\"
             ORDER BY timestamp DESC, id DESC
             LIMIT ?1",
        )?
        .query_map([limit], map_transaction_row)?
        .map(|row| row.map_err(Error::from))
        .collect()
}

/// The total income minus the total expenses in the ledger.
pub fn get_balance(connection: &Connection) -> Result<f64, Error> {
    let balance = connection.query_row(
        "SELECT COALESCE(SUM(CASE type WHEN 'Expense' THEN -amount ELSE amount END), 0.0)
         FROM \"transaction\"",
        [],
        |row| row.get(0),
    )?;

    Ok(balance)
}

/// Count the transactions in the ledger.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<usize, Error> {
    let count: i64 =
        connection.query_row("SELECT COUNT(id) FROM \"transaction\"", [], |row| row.get(0))?;

    Ok(count as usize)
}

/// Map a database row to a [LedgerEntry].
///
/// Expects the columns in the order: id, amount, category, type, timestamp.
pub fn map_transaction_row(row: &Row) -> Result<LedgerEntry, rusqlite::Error> {
    let raw_type: String = row.get(3)?;
    let transaction_type = raw_type
        .parse()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(error)))?;

    Ok(LedgerEntry {
        id: row.get(0)?,
        transaction: Transaction {
            amount: row.get(1)?,
            category: row.get(2)?,
            transaction_type,
            timestamp: row.get(4)?,
        },
    })
}
