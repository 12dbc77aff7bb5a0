//! Defines the endpoints that the transaction form posts its draft to.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HX_TRIGGER;
use maud::html;
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    AppState, Error,
    finance_api::FinanceClient,
    timezone::get_local_offset,
    transaction::{
        SubmitOutcome, Transaction,
        core::insert_transaction,
        form::{DraftFields, transaction_form_view},
        view::{load_ledger_summary, transaction_list_view},
    },
};

/// The htmx event triggered on the client after a transaction is created.
pub const TRANSACTION_CREATED_EVENT: &str = "transaction-created";

/// The state needed to edit and submit the transaction form.
#[derive(Debug, Clone)]
pub struct TransactionFormState {
    /// The database connection for the ledger that created transactions are appended to.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The client for persisting created transactions to the finance API.
    pub finance_client: FinanceClient,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionFormState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            finance_client: state.finance_client.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl TransactionFormState {
    fn local_offset(&self) -> Result<UtcOffset, Error> {
        get_local_offset(&self.local_timezone).ok_or_else(|| {
            tracing::error!("Invalid timezone {}", self.local_timezone);
            Error::InvalidTimezoneError(self.local_timezone.clone())
        })
    }

    /// Append `transaction` to the ledger, logging any failure.
    fn add_transaction(&self, transaction: Transaction) {
        let connection = match self.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return;
            }
        };

        if let Err(error) = insert_transaction(&transaction, &connection) {
            tracing::error!("could not add transaction to the ledger: {error}");
        }
    }
}

/// A route handler that applies the posted field edits and re-renders the form.
pub async fn refresh_transaction_form(
    State(state): State<TransactionFormState>,
    Form(fields): Form<DraftFields>,
) -> Response {
    let local_offset = match state.local_offset() {
        Ok(local_offset) => local_offset,
        Err(error) => return error.into_alert_response(),
    };

    let form = fields.into_form(local_offset);

    transaction_form_view(&form, local_offset).into_response()
}

/// A route handler for submitting the transaction form.
///
/// Responds with the re-rendered form: with a warning if the draft was
/// rejected, or with a confirmation and an empty draft if the transaction was
/// created. A created transaction also refreshes the transaction list.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionFormState>,
    Form(fields): Form<DraftFields>,
) -> Response {
    let local_offset = match state.local_offset() {
        Ok(local_offset) => local_offset,
        Err(error) => return error.into_alert_response(),
    };

    let mut form = fields.into_form(local_offset);
    let outcome = form.submit(
        &|transaction| state.add_transaction(transaction),
        &state.finance_client,
    );
    let form_view = transaction_form_view(&form, local_offset);

    match outcome {
        SubmitOutcome::Created(_) => {
            let transaction_list = load_ledger_summary(&state.db_connection)
                .inspect_err(|error| tracing::error!("could not load ledger: {error}"))
                .ok()
                .map(|summary| transaction_list_view(&summary, local_offset, true));

            let content = html! {
                (form_view)
                @if let Some(transaction_list) = transaction_list {
                    (transaction_list)
                }
            };

            ([(HX_TRIGGER, TRANSACTION_CREATED_EVENT)], content).into_response()
        }
        SubmitOutcome::Rejected(error) => {
            tracing::debug!("Rejected transaction draft: {error}");
            form_view.into_response()
        }
        SubmitOutcome::Incomplete => form_view.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use axum::{Router, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use scraper::Html;
    use tokio::sync::mpsc;

    use crate::{
        db::initialize,
        endpoints,
        finance_api::FinanceClient,
        test_utils::{
            ReceivedTransaction, assert_form_input_with_value, assert_valid_html,
            get_selected_option, must_get_form, spawn_finance_api, text_of,
        },
        transaction::{
            Transaction, TransactionType, core::count_transactions, get_recent_transactions,
        },
    };

    use super::{
        TRANSACTION_CREATED_EVENT, TransactionFormState, create_transaction_endpoint,
        refresh_transaction_form,
    };

    const TIMESTAMP: &str = "1704412800000";

    async fn get_test_server() -> (
        TestServer,
        TransactionFormState,
        mpsc::UnboundedReceiver<ReceivedTransaction>,
    ) {
        let (address, receiver) = spawn_finance_api().await;
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let state = TransactionFormState {
            db_connection: Arc::new(Mutex::new(conn)),
            finance_client: FinanceClient::new(&format!("http://{address}")).unwrap(),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let app = Router::new()
            .route(endpoints::TRANSACTIONS_API, post(create_transaction_endpoint))
            .route(endpoints::TRANSACTION_FORM, post(refresh_transaction_form))
            .with_state(state.clone());

        (
            TestServer::try_new(app).expect("Could not create test server."),
            state,
            receiver,
        )
    }

    fn draft_fields<'a>(
        amount: &'a str,
        category: &'a str,
        transaction_type: &'a str,
    ) -> [(&'static str, &'a str); 5] {
        [
            ("amount", amount),
            ("category", category),
            ("type", transaction_type),
            ("date", "2024-01-05"),
            ("timestamp", TIMESTAMP),
        ]
    }

    fn ledger_size(state: &TransactionFormState) -> usize {
        count_transactions(&state.db_connection.lock().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn creates_transaction_with_derived_type() {
        let (server, state, mut receiver) = get_test_server().await;

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&draft_fields("50", "Salary", "Expense"))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header("hx-trigger").to_str().unwrap(),
            TRANSACTION_CREATED_EVENT
        );

        let want = Transaction {
            amount: 50.0,
            category: "Salary".to_owned(),
            transaction_type: TransactionType::Income,
            timestamp: 1_704_412_800_000,
        };
        let ledger = get_recent_transactions(10, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].transaction, want);

        let (path_type, sent) = tokio::time::timeout(Duration::from_secs(5), receiver.recv())
            .await
            .expect("timed out waiting for the finance API request")
            .unwrap();
        assert_eq!(path_type, "Income");
        assert_eq!(sent, want);
    }

    #[tokio::test]
    async fn created_response_resets_form_and_refreshes_list() {
        let (server, _state, _receiver) = get_test_server().await;

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&draft_fields("12.5", "Food", "Expense"))
            .await;

        let html = Html::parse_fragment(&response.text());
        assert_valid_html(&html);
        assert_eq!(
            text_of(&html, "div[role=status]").as_deref(),
            Some("Transaction successfully created")
        );
        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "amount", "number", "");
        assert_eq!(get_selected_option(&form, "type").as_deref(), Some("Income"));
        assert_eq!(get_selected_option(&form, "category").as_deref(), Some(""));

        let list_text = text_of(&html, "#transaction-list").unwrap();
        assert!(list_text.contains("Food"), "got {list_text:?}");
        assert!(list_text.contains("-$12.50"), "got {list_text:?}");
    }

    #[tokio::test]
    async fn negative_amount_is_rejected() {
        let (server, state, mut receiver) = get_test_server().await;

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&draft_fields("-5", "Rent", "Expense"))
            .await;

        response.assert_status_ok();
        let html = Html::parse_fragment(&response.text());
        assert_eq!(
            text_of(&html, "div[role=alert]").as_deref(),
            Some("Input cannot be negative")
        );
        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "amount", "number", "-5");
        assert_eq!(get_selected_option(&form, "category").as_deref(), Some("Rent"));
        assert_eq!(ledger_size(&state), 0);
        assert!(receiver.try_recv().is_err(), "no network call should be made");
    }

    #[tokio::test]
    async fn non_numeric_amount_is_rejected() {
        let (server, state, _receiver) = get_test_server().await;

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&draft_fields("abc", "Salary", "Income"))
            .await;

        let html = Html::parse_fragment(&response.text());
        assert_eq!(
            text_of(&html, "div[role=alert]").as_deref(),
            Some("Input must be number")
        );
        assert_eq!(ledger_size(&state), 0);
    }

    #[tokio::test]
    async fn incomplete_draft_is_ignored() {
        let (server, state, _receiver) = get_test_server().await;

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&draft_fields("50", "", "Income"))
            .await;

        response.assert_status_ok();
        let html = Html::parse_fragment(&response.text());
        assert_eq!(text_of(&html, "div[role=alert]"), None);
        assert_eq!(text_of(&html, "div[role=status]"), None);
        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "amount", "number", "50");
        assert_eq!(ledger_size(&state), 0);
    }

    #[tokio::test]
    async fn refresh_switches_category_options() {
        let (server, state, _receiver) = get_test_server().await;

        let response = server
            .post(endpoints::TRANSACTION_FORM)
            .form(&draft_fields("7", "", "Expense"))
            .await;

        response.assert_status_ok();
        let html = Html::parse_fragment(&response.text());
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_eq!(get_selected_option(&form, "type").as_deref(), Some("Expense"));
        assert_form_input_with_value(&form, "amount", "number", "7");
        assert_form_input_with_value(&form, "timestamp", "hidden", TIMESTAMP);
        assert!(response.text().contains("value=\"Bills\""));
        assert!(!response.text().contains("value=\"Investments\""));
        assert_eq!(ledger_size(&state), 0);
    }

    #[tokio::test]
    async fn warning_survives_incomplete_submit_and_type_change() {
        let (server, _state, _receiver) = get_test_server().await;

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&draft_fields("-5", "Rent", "Expense"))
            .await;
        let html = Html::parse_fragment(&response.text());
        let warning = text_of(&html, "div[role=alert]");
        assert_eq!(warning.as_deref(), Some("Input cannot be negative"));

        let mut fields = draft_fields("-5", "", "Expense").to_vec();
        fields.push(("warning", "Input cannot be negative"));
        let response = server.post(endpoints::TRANSACTIONS_API).form(&fields).await;
        let html = Html::parse_fragment(&response.text());
        assert_eq!(text_of(&html, "div[role=alert]"), warning);

        let mut fields = draft_fields("-5", "Rent", "Income").to_vec();
        fields.push(("warning", "Input cannot be negative"));
        let response = server.post(endpoints::TRANSACTION_FORM).form(&fields).await;
        let html = Html::parse_fragment(&response.text());
        assert_eq!(text_of(&html, "div[role=alert]"), warning);
        let form = must_get_form(&html);
        assert_eq!(get_selected_option(&form, "type").as_deref(), Some("Income"));
    }

    #[tokio::test]
    async fn valid_submission_clears_carried_warning() {
        let (server, _state, _receiver) = get_test_server().await;

        let mut fields = draft_fields("5", "Food", "Expense").to_vec();
        fields.push(("warning", "Input cannot be negative"));
        let response = server.post(endpoints::TRANSACTIONS_API).form(&fields).await;

        let html = Html::parse_fragment(&response.text());
        assert_eq!(text_of(&html, "div[role=alert]"), None);
    }

    #[tokio::test]
    async fn dismissing_confirmation_hides_it() {
        let (server, _state, _receiver) = get_test_server().await;

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&draft_fields("12.5", "Food", "Expense"))
            .await;
        let html = Html::parse_fragment(&response.text());
        assert!(text_of(&html, "div[role=status]").is_some());

        let response = server
            .post(endpoints::TRANSACTION_FORM)
            .form(&[("type", "Income"), ("confirmation", "true"), ("dismiss", "true")])
            .await;

        response.assert_status_ok();
        let html = Html::parse_fragment(&response.text());
        assert_eq!(text_of(&html, "div[role=status]"), None);
        assert_eq!(text_of(&html, "#dismiss-confirmation"), None);
    }

    #[tokio::test]
    async fn confirmation_survives_type_change() {
        let (server, _state, _receiver) = get_test_server().await;

        let response = server
            .post(endpoints::TRANSACTION_FORM)
            .form(&[("type", "Expense"), ("confirmation", "true")])
            .await;

        let html = Html::parse_fragment(&response.text());
        assert_eq!(
            text_of(&html, "div[role=status]").as_deref(),
            Some("Transaction successfully created")
        );
    }
}
