use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use tokio::{net::TcpListener, sync::mpsc};

use crate::{endpoints, transaction::Transaction};

/// The `{type}` path parameter and the JSON body of a request to the finance API.
pub(crate) type ReceivedTransaction = (String, Transaction);

async fn record_transaction(
    State(sender): State<mpsc::UnboundedSender<ReceivedTransaction>>,
    Path(transaction_type): Path<String>,
    Json(transaction): Json<Transaction>,
) -> StatusCode {
    let _ = sender.send((transaction_type, transaction));
    StatusCode::CREATED
}

/// Serve `router` on a random local port in the background.
pub(crate) async fn serve_router(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    address
}

/// Start a finance API that accepts every transaction and forwards it to the returned receiver.
pub(crate) async fn spawn_finance_api() -> (SocketAddr, mpsc::UnboundedReceiver<ReceivedTransaction>)
{
    let (sender, receiver) = mpsc::unbounded_channel();
    let router = Router::new()
        .route(endpoints::FINANCE_API, post(record_transaction))
        .with_state(sender);

    (serve_router(router).await, receiver)
}
