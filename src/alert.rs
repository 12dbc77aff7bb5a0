//! Alert system for displaying success, warning and error messages to users.

use maud::{Markup, html};

use crate::html::{ALERT_ERROR_STYLE, ALERT_SUCCESS_STYLE, ALERT_WARNING_STYLE};

/// A message to show the user, styled by its severity.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert<'a> {
    /// Something the user asked for was done.
    Success { message: &'a str, details: &'a str },
    /// The user's input needs correcting.
    Warning { message: &'a str },
    /// Something went wrong on the server.
    Error { message: &'a str, details: &'a str },
}

impl Alert<'_> {
    pub fn into_html(self) -> Markup {
        match self {
            Alert::Success { message, details } => html! {
                div role="status" class=(ALERT_SUCCESS_STYLE)
                {
                    span class="font-medium" { (message) }
                    @if !details.is_empty() {
                        " " (details)
                    }
                }
            },
            Alert::Warning { message } => html! {
                div role="alert" class=(ALERT_WARNING_STYLE)
                {
                    (message)
                }
            },
            Alert::Error { message, details } => html! {
                div role="alert" class=(ALERT_ERROR_STYLE)
                {
                    span class="font-medium" { (message) }
                    @if !details.is_empty() {
                        " " (details)
                    }
                }
            },
        }
    }
}
