/*
[INPUT]:  Query filters and transaction ids
[OUTPUT]: Transaction history and transaction status
[POS]:    API layer - transaction lookup endpoints (GET only)
[UPDATE]: When adding transaction queries
*/

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::apis::to_query;
use crate::http::endpoints::{self, Operation};
use crate::http::{ApiClient, Result};
use crate::types::RequestEnvelope;

#[derive(Debug, Clone)]
pub struct Transactions {
    client: Arc<ApiClient>,
}

impl Transactions {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Card and APM transaction history.
    ///
    /// `query` is any value serializing to a flat object (a map, a struct of filters,
    /// or `json!`); numbers and booleans are stringified and `None` fields omitted.
    ///
    /// GET /api/v1/{env}-transactions?{query}
    pub async fn transactions<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Value> {
        self.list(Operation::Transactions, query).await
    }

    /// Wallet transaction history
    ///
    /// GET /api/v1/{env}-wallet-transactions?{query}
    pub async fn wallet_transactions<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Value> {
        self.list(Operation::WalletTransactions, query).await
    }

    /// GET /api/{env}/status/{id}
    pub async fn status(&self, transaction_id: &str) -> Result<Value> {
        let path = endpoints::resolve(
            Operation::TransactionStatus,
            self.client.environment(),
            Some(transaction_id),
        )?;
        self.client
            .send(RequestEnvelope::get(Operation::TransactionStatus, path))
            .await
    }

    async fn list<Q: Serialize + ?Sized>(&self, operation: Operation, query: &Q) -> Result<Value> {
        let params = to_query(query)?;
        let path = endpoints::resolve(operation, self.client.environment(), None)?;
        let envelope = RequestEnvelope::get(operation, path).with_query(params);
        self.client.send(envelope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::test_support::{LIVE_SECRET, TEST_SECRET, client};
    use crate::http::PayAgencyError;
    use serde_json::json;
    use std::collections::BTreeMap;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_transactions_forward_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/test-transactions"))
            .and(query_param("currency", "USD"))
            .and(query_param("page", "2"))
            .and(query_param("include_refunds", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": { "transactions": [] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transactions = Transactions::new(client(&server, TEST_SECRET));
        let query = json!({ "currency": "USD", "page": 2, "include_refunds": true, "to_date": null });
        let response = transactions.transactions(&query).await.expect("transactions");
        assert_eq!(response["status"], "success");

        let requests = server.received_requests().await.expect("recorded requests");
        assert!(requests[0].body.is_empty());
        assert!(!requests[0].url.query().unwrap_or_default().contains("to_date"));
    }

    #[tokio::test]
    async fn test_string_map_query_still_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/test-transactions"))
            .and(query_param("currency", "EUR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let transactions = Transactions::new(client(&server, TEST_SECRET));
        let query = BTreeMap::from([("currency", "EUR")]);
        transactions.transactions(&query).await.expect("transactions");
    }

    #[tokio::test]
    async fn test_nested_filter_rejected_before_dispatch() {
        let server = MockServer::start().await;
        let transactions = Transactions::new(client(&server, TEST_SECRET));

        let err = transactions
            .transactions(&json!({ "status": ["pending", "failed"] }))
            .await
            .unwrap_err();
        assert!(matches!(err, PayAgencyError::InvalidPayload(_)));

        let requests = server.received_requests().await.expect("recorded requests");
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn test_wallet_transactions_live_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/live-wallet-transactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let transactions = Transactions::new(client(&server, LIVE_SECRET));
        transactions
            .wallet_transactions(&BTreeMap::<String, String>::new())
            .await
            .expect("wallet_transactions");
    }

    #[tokio::test]
    async fn test_status_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/test/status/PA_TXN_42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "transaction_id": "PA_TXN_42", "status": "completed" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transactions = Transactions::new(client(&server, TEST_SECRET));
        let response = transactions.status("PA_TXN_42").await.expect("status");
        assert_eq!(response["data"]["status"], "completed");
    }
}
