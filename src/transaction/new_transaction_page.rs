//! Defines the route handler for the page for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    html::{FORM_CONTAINER_STYLE, PAGE_CONTAINER_STYLE, base},
    timezone::get_local_offset,
    transaction::{
        TransactionForm, form::transaction_form_view,
        view::{load_ledger_summary, transaction_list_view},
    },
};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The database connection for the ledger.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page with an empty transaction form and the ledger.
pub async fn get_new_transaction_page(
    State(state): State<NewTransactionPageState>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let summary = load_ledger_summary(&state.db_connection)
        .inspect_err(|error| tracing::error!("Failed to load ledger for new transaction page: {error}"))?;

    let form = TransactionForm::default();

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class=(FORM_CONTAINER_STYLE)
            {
                h2 class="text-xl font-bold mb-4" { "New Transaction" }

                (transaction_form_view(&form, local_offset))
            }

            (transaction_list_view(&summary, local_offset, false))
        }
    };

    Ok(base("New Transaction", &content).into_response())
}
