//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/finance/{type}', use [format_endpoint].

/// The root route which redirects to the new transaction page.
pub const ROOT: &str = "/";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The route for re-rendering the transaction form after a field changes.
pub const TRANSACTION_FORM: &str = "/transactions/form";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for submitting the transaction form.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The finance API route that created transactions are persisted to.
pub const FINANCE_API: &str = "/api/finance/{type}";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/finance/{type}', '{type}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, value: impl std::fmt::Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}
