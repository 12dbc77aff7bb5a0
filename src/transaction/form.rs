//! Renders the transaction form and reads its fields back from a request.

use maud::{Markup, html};
use serde::Deserialize;
use time::UtcOffset;

use crate::{
    alert::Alert,
    category::{categories_for, derive_type},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    timezone::{format_date, now_millis},
    transaction::{Draft, TransactionForm, TransactionType, ValidationError},
};

/// The ID of the form element, used as the target for htmx swaps.
pub const TRANSACTION_FORM_ID: &str = "transaction-form";

/// The confirmation shown after a transaction has been created.
pub const CONFIRMATION_MESSAGE: &str = "Transaction successfully created";

/// The values the confirmation's close button posts along with the form.
const DISMISS_VALUES: &str = r#"{"dismiss": "true"}"#;

/// The draft fields posted by the transaction form.
///
/// The warning and the confirmation are carried in hidden fields so that they
/// survive requests that do not change them, such as a type change.
#[derive(Debug, Default, Deserialize)]
pub struct DraftFields {
    /// The raw amount typed by the user.
    #[serde(default)]
    pub amount: String,
    /// The selected category, empty if none was selected.
    #[serde(default)]
    pub category: String,
    /// The selected transaction type.
    #[serde(rename = "type", default)]
    pub transaction_type: TransactionType,
    /// The date input as `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    /// The draft's timestamp before the date input was edited.
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// The warning shown when the form was rendered, empty if there was none.
    #[serde(default)]
    pub warning: String,
    /// Whether the confirmation was shown when the form was rendered.
    #[serde(default)]
    pub confirmation: bool,
    /// Set by the close button on the confirmation.
    #[serde(default)]
    pub dismiss: bool,
}

impl DraftFields {
    /// Replay the posted fields onto a form as the user's edits.
    ///
    /// The hidden timestamp keeps the time of day of the original draft. It is
    /// only replaced when the date input no longer shows the same day.
    pub fn into_form(self, local_offset: UtcOffset) -> TransactionForm {
        let timestamp = self.timestamp.unwrap_or_else(now_millis);
        let mut form = TransactionForm::from_draft(Draft::new(timestamp));

        form.set_type(self.transaction_type);
        form.set_category(&self.category);
        form.set_amount(&self.amount);

        if format_date(timestamp, local_offset) != self.date.trim() {
            form.set_date(&self.date, local_offset);
        }

        if let Some(error) = ValidationError::from_message(&self.warning) {
            form.show_warning(error);
        }

        if self.confirmation {
            form.show_confirmation();
        }

        if self.dismiss {
            form.dismiss_confirmation();
        }

        form
    }
}

/// Render `form` so that it replaces itself when submitted.
pub fn transaction_form_view(form: &TransactionForm, local_offset: UtcOffset) -> Markup {
    let spinner = loading_spinner();

    html! {
        form
            id=(TRANSACTION_FORM_ID)
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            class="w-full space-y-4 md:space-y-6"
        {
            @if form.is_confirmation_visible() {
                div class="flex items-start gap-2"
                {
                    div class="grow" {
                        (Alert::Success { message: CONFIRMATION_MESSAGE, details: "" }.into_html())
                    }

                    button
                        type="button"
                        id="dismiss-confirmation"
                        aria-label="Dismiss"
                        hx-post=(endpoints::TRANSACTION_FORM)
                        hx-vals=(DISMISS_VALUES)
                        hx-target={"#" (TRANSACTION_FORM_ID)}
                        hx-swap="outerHTML"
                        class="p-2 text-sm text-gray-500 hover:text-gray-900 dark:hover:text-white"
                    {
                        "✕"
                    }
                }

                input type="hidden" name="confirmation" value="true";
            }

            (transaction_form_fields(form.draft(), local_offset))

            @if let Some(message) = form.alert() {
                (Alert::Warning { message }.into_html())
                input type="hidden" name="warning" value=(message);
            }

            button type="submit" id="indicator" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" { (spinner) }
                "Create"
            }
        }
    }
}

fn transaction_form_fields(draft: &Draft, local_offset: UtcOffset) -> Markup {
    let categories = categories_for(draft.transaction_type);
    // Keep a category from the other set so that changing the type does not discard it.
    let foreign_category = (!draft.category.is_empty()
        && derive_type(&draft.category) != Some(draft.transaction_type))
    .then_some(draft.category.as_str());

    html! {
        div class="grid grid-cols-2 gap-4"
        {
            div
            {
                label for="type" class=(FORM_LABEL_STYLE) { "Type" }

                select
                    name="type"
                    id="type"
                    hx-post=(endpoints::TRANSACTION_FORM)
                    hx-trigger="change"
                    hx-target={"#" (TRANSACTION_FORM_ID)}
                    hx-swap="outerHTML"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for transaction_type in [TransactionType::Income, TransactionType::Expense] {
                        option
                            value=(transaction_type)
                            selected[transaction_type == draft.transaction_type]
                        {
                            (transaction_type)
                        }
                    }
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[draft.category.is_empty()] { "Select a category" }

                    @if let Some(category) = foreign_category {
                        option value=(category) selected { (category) }
                    }

                    @for category in categories {
                        option
                            value=(category.name)
                            selected[category.name == draft.category]
                        {
                            (category.name)
                        }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="any"
                    placeholder="0.00"
                    value=(draft.amount)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=(format_date(draft.timestamp, local_offset))
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        input type="hidden" name="timestamp" value=(draft.timestamp);
    }
}
