//! Renders the ledger of created transactions and the overall balance.

use std::sync::Mutex;

use maud::{Markup, html};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    Error,
    category::category_color,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    timezone::format_date,
    transaction::{LedgerEntry, TransactionType, get_balance, get_recent_transactions},
};

/// The ID of the element holding the transaction list, used for out-of-band swaps.
pub const TRANSACTION_LIST_ID: &str = "transaction-list";

/// How many of the most recent transactions to display.
pub const RECENT_TRANSACTION_LIMIT: u32 = 20;

/// The most recent transactions and the balance of the whole ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    pub recent: Vec<LedgerEntry>,
    pub balance: f64,
}

/// Load the [LedgerSummary] for display.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock is poisoned, or an SQL error.
pub fn load_ledger_summary(db_connection: &Mutex<Connection>) -> Result<LedgerSummary, Error> {
    let connection = db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    Ok(LedgerSummary {
        recent: get_recent_transactions(RECENT_TRANSACTION_LIMIT, &connection)?,
        balance: get_balance(&connection)?,
    })
}

/// Render the ledger summary.
///
/// Set `swap_out_of_band` when the list is sent alongside another fragment so
/// htmx replaces the list already on the page.
pub fn transaction_list_view(
    summary: &LedgerSummary,
    local_offset: UtcOffset,
    swap_out_of_band: bool,
) -> Markup {
    html! {
        section
            id=(TRANSACTION_LIST_ID)
            hx-swap-oob=[swap_out_of_band.then_some("true")]
            class="w-full max-w-md mt-8"
        {
            h3 class="text-lg font-semibold mb-4"
            {
                "Total Balance: "
                span data-balance=(summary.balance) { (format_currency(summary.balance)) }
            }

            @if summary.recent.is_empty() {
                p class="text-gray-500 dark:text-gray-400" { "No transactions yet." }
            } @else {
                table class="w-full text-sm text-left"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for entry in &summary.recent {
                            (transaction_row(entry, local_offset))
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(entry: &LedgerEntry, local_offset: UtcOffset) -> Markup {
    let transaction = &entry.transaction;
    let signed_amount = match transaction.transaction_type {
        TransactionType::Income => transaction.amount,
        TransactionType::Expense => -transaction.amount,
    };
    let color = category_color(&transaction.category).unwrap_or("#9ca3af");

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(entry.id)
        {
            td class=(TABLE_CELL_STYLE) { (format_date(transaction.timestamp, local_offset)) }
            td class=(TABLE_CELL_STYLE)
            {
                span
                    class="inline-block w-2 h-2 mr-2 rounded-full"
                    style={"background-color: " (color)}
                {}
                (transaction.category)
            }
            td class=(TABLE_CELL_STYLE) title=(transaction.transaction_type)
            {
                (format_currency(signed_amount))
            }
        }
    }
}
