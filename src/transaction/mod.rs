//! Recording transactions.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the ledger it is stored in
//! - The `TransactionForm` that drafts are edited and submitted through
//! - View handlers and endpoints for the transaction form

mod core;
mod create_transaction_endpoint;
mod draft;
mod form;
mod new_transaction_page;
mod transaction_form;
mod view;

pub use self::core::{
    LedgerEntry, ParseTransactionTypeError, Transaction, TransactionType,
    create_transaction_table, get_balance, get_recent_transactions,
};
pub use create_transaction_endpoint::{create_transaction_endpoint, refresh_transaction_form};
pub use draft::Draft;
pub use new_transaction_page::get_new_transaction_page;
pub use transaction_form::{SubmitOutcome, TransactionForm, ValidationError};
