//! The state machine behind the form for creating a transaction.
//!
//! The form owns a [Draft] that the user edits one field at a time. Submitting
//! the form validates the draft and, if it is valid, hands the finalized
//! [Transaction] to the shared ledger and the finance API before resetting the
//! draft.

use time::UtcOffset;

use crate::{
    category::derive_type,
    finance_api::FinanceApi,
    timezone::{now_millis, parse_date},
    transaction::{Draft, Transaction, TransactionType},
};

/// The reasons a submitted draft can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The amount could not be parsed as a finite number.
    #[error("Input must be number")]
    NotANumber,
    /// The amount parsed as a number below zero.
    #[error("Input cannot be negative")]
    Negative,
}

impl ValidationError {
    /// The validation error that displays as `message`, if any.
    pub fn from_message(message: &str) -> Option<Self> {
        [Self::NotANumber, Self::Negative]
            .into_iter()
            .find(|error| error.to_string() == message)
    }
}

/// What happened when the form was submitted.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The amount or category was empty so nothing happened.
    Incomplete,
    /// The draft failed validation and was kept for correction.
    Rejected(ValidationError),
    /// The draft was finalized into this transaction and the form was reset.
    Created(Transaction),
}

/// A form for recording a single income or expense.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    draft: Draft,
    error_message: String,
    alert_visible: bool,
    confirmation_visible: bool,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self::from_draft(Draft::default())
    }
}

impl TransactionForm {
    /// Create a form that starts editing `draft`.
    pub fn from_draft(draft: Draft) -> Self {
        Self {
            draft,
            error_message: String::new(),
            alert_visible: false,
            confirmation_visible: false,
        }
    }

    /// The draft being edited.
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The warning to display inline, if any.
    pub fn alert(&self) -> Option<&str> {
        self.alert_visible.then_some(self.error_message.as_str())
    }

    /// Whether the confirmation for a created transaction should be shown.
    pub fn is_confirmation_visible(&self) -> bool {
        self.confirmation_visible
    }

    /// Reveal the inline warning for `error`.
    pub fn show_warning(&mut self, error: ValidationError) {
        self.error_message = error.to_string();
        self.alert_visible = true;
    }

    /// Show the confirmation for a created transaction.
    pub fn show_confirmation(&mut self) {
        self.confirmation_visible = true;
    }

    /// Hide the confirmation for a created transaction.
    pub fn dismiss_confirmation(&mut self) {
        self.confirmation_visible = false;
    }

    /// Select the transaction type.
    ///
    /// The category is left as is, even if it does not belong to the new
    /// type. Submitting the form corrects the type from the category.
    pub fn set_type(&mut self, transaction_type: TransactionType) {
        self.draft.transaction_type = transaction_type;
    }

    /// Select the category.
    pub fn set_category(&mut self, category: &str) {
        category.clone_into(&mut self.draft.category);
    }

    /// Set the raw amount. The amount is only validated on submission.
    pub fn set_amount(&mut self, amount: &str) {
        amount.clone_into(&mut self.draft.amount);
    }

    /// Set the date from a `YYYY-MM-DD` string, interpreted as midnight at `local_offset`.
    ///
    /// Dates that cannot be parsed leave the current timestamp untouched.
    pub fn set_date(&mut self, date: &str, local_offset: UtcOffset) {
        match parse_date(date, local_offset) {
            Some(timestamp) => self.draft.timestamp = timestamp,
            None => tracing::debug!("Ignoring unparseable date {date:?}"),
        }
    }

    /// Validate the draft and, if valid, create the transaction.
    ///
    /// On success the finalized transaction is passed to `add_transaction`,
    /// dispatched to `finance_api` without waiting for a response, and the
    /// draft is reset to its defaults. On a validation failure the warning is
    /// revealed and the draft is kept so the user can correct it.
    pub fn submit(
        &mut self,
        add_transaction: &dyn Fn(Transaction),
        finance_api: &dyn FinanceApi,
    ) -> SubmitOutcome {
        if self.draft.amount.trim().is_empty() || self.draft.category.is_empty() {
            return SubmitOutcome::Incomplete;
        }

        let amount = match parse_amount(&self.draft.amount) {
            Ok(amount) => amount,
            Err(error) => {
                self.show_warning(error);
                return SubmitOutcome::Rejected(error);
            }
        };

        self.alert_visible = false;

        if let Some(transaction_type) = derive_type(&self.draft.category) {
            self.draft.transaction_type = transaction_type;
        }

        self.show_confirmation();

        let transaction = Transaction {
            amount,
            category: self.draft.category.clone(),
            transaction_type: self.draft.transaction_type,
            timestamp: self.draft.timestamp,
        };

        tracing::info!(
            "Creating {} transaction of {} for {}",
            transaction.transaction_type,
            transaction.amount,
            transaction.category
        );

        add_transaction(transaction.clone());
        finance_api.dispatch(transaction.clone());
        self.draft = Draft::new(now_millis());

        SubmitOutcome::Created(transaction)
    }
}

/// Parse a raw amount, ignoring surrounding whitespace.
///
/// Infinite and NaN values are treated as not being numbers.
fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let amount = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or(ValidationError::NotANumber)?;

    if amount < 0.0 {
        return Err(ValidationError::Negative);
    }

    Ok(amount)
}
