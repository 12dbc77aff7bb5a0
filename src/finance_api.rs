//! Client for the remote finance API that transactions are persisted to.

use reqwest::{StatusCode, Url};

use crate::{
    endpoints::{self, format_endpoint},
    transaction::Transaction,
};

/// Somewhere finalized transactions are sent for persistence.
pub trait FinanceApi {
    /// Send `transaction` without waiting for the outcome.
    fn dispatch(&self, transaction: Transaction);
}

/// The errors that may occur when talking to the finance API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured base URL could not be parsed.
    #[error("invalid base URL \"{0}\": {1}")]
    InvalidBaseUrl(String, String),

    /// The request could not be sent or the connection failed.
    #[error("could not reach the finance API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The finance API responded with a non-success status code.
    #[error("the finance API responded with {0}")]
    Status(StatusCode),
}

/// An HTTP client for the finance API.
#[derive(Debug, Clone)]
pub struct FinanceClient {
    base_url: Url,
    http: reqwest::Client,
}

impl FinanceClient {
    /// Create a client for the finance API hosted at `base_url`, e.g. "http://localhost:5000".
    ///
    /// # Errors
    /// Returns [ClientError::InvalidBaseUrl] if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut parsed = Url::parse(base_url)
            .map_err(|error| ClientError::InvalidBaseUrl(base_url.to_owned(), error.to_string()))?;

        // Without a trailing slash `Url::join` would replace the last path segment.
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        Ok(Self {
            base_url: parsed,
            http: reqwest::Client::new(),
        })
    }

    /// The URL that `transaction` is posted to.
    pub fn transaction_url(&self, transaction: &Transaction) -> Result<Url, ClientError> {
        let path = format_endpoint(endpoints::FINANCE_API, transaction.transaction_type);

        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| ClientError::InvalidBaseUrl(self.base_url.to_string(), error.to_string()))
    }

    /// Post `transaction` as JSON to `/api/finance/{type}` and wait for the response.
    ///
    /// # Errors
    /// Returns [ClientError::Transport] if the request fails and
    /// [ClientError::Status] if the API does not respond with a success status.
    pub async fn post_transaction(&self, transaction: &Transaction) -> Result<(), ClientError> {
        let url = self.transaction_url(transaction)?;

        let response = self.http.post(url).json(transaction).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        tracing::debug!("Finance API accepted transaction with status {status}");

        Ok(())
    }
}

impl FinanceApi for FinanceClient {
    /// Spawn a task that posts `transaction` and logs any failure.
    ///
    /// Must be called from within a tokio runtime. Nothing is retried and
    /// there is no ordering between dispatched transactions.
    fn dispatch(&self, transaction: Transaction) {
        let client = self.clone();

        tokio::spawn(async move {
            if let Err(error) = client.post_transaction(&transaction).await {
                tracing::error!(
                    "Could not persist {} transaction to the finance API: {error}",
                    transaction.transaction_type
                );
            }
        });
    }
}
