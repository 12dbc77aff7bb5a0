//! Full-page responses for requests that could not be served.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A full HTML page explaining why a request failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPage<'a> {
    status: StatusCode,
    title: &'a str,
    description: &'a str,
    fix: &'a str,
}

impl<'a> ErrorPage<'a> {
    /// The page for routes that do not exist.
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            title: "Not Found",
            description: "Something's missing.",
            fix: "Sorry, we can't find that page. Head back to the home page to record a transaction.",
        }
    }

    /// The page for unexpected failures on the server.
    pub fn internal_server_error(description: &'a str, fix: &'a str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            title: "Internal Server Error",
            description,
            fix,
        }
    }
}

impl Default for ErrorPage<'_> {
    fn default() -> Self {
        Self::internal_server_error(
            "Sorry, something went wrong.",
            "Try again later or check the server logs",
        )
    }
}

impl IntoResponse for ErrorPage<'_> {
    fn into_response(self) -> Response {
        let header = self.status.as_u16().to_string();
        let page = error_view(self.title, &header, self.description, self.fix);

        (self.status, Html(page.into_string())).into_response()
    }
}

pub async fn get_404_not_found() -> Response {
    ErrorPage::not_found().into_response()
}

pub async fn get_internal_server_error_page() -> Response {
    ErrorPage::default().into_response()
}
