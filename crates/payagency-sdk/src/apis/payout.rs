/*
[INPUT]:  Payout payloads, fee estimate payloads, payout reference ids
[OUTPUT]: Payout, wallet and payout status responses
[POS]:    API layer - payout endpoints
[UPDATE]: When adding payout operations
*/

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::apis::to_body;
use crate::http::endpoints::{self, Operation};
use crate::http::{ApiClient, Result};
use crate::types::RequestEnvelope;

#[derive(Debug, Clone)]
pub struct Payout {
    client: Arc<ApiClient>,
}

impl Payout {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Create a payout
    ///
    /// POST /api/v1/{env}/payout
    pub async fn payout<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        let path = self.path(Operation::Payout, None)?;
        let envelope = RequestEnvelope::post(Operation::Payout, path, to_body(data)?);
        self.client.send(envelope).await
    }

    /// Wallets available as payout funding sources
    ///
    /// GET /api/v1/wallet
    pub async fn wallets(&self) -> Result<Value> {
        let path = self.path(Operation::Wallets, None)?;
        self.client
            .send(RequestEnvelope::get(Operation::Wallets, path))
            .await
    }

    /// Estimate the fee of a payout before creating it
    ///
    /// POST /api/v1/wallet/estimate-payout
    pub async fn estimate_fee<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        let path = self.path(Operation::EstimatePayoutFee, None)?;
        let envelope = RequestEnvelope::post(Operation::EstimatePayoutFee, path, to_body(data)?);
        self.client.send(envelope).await
    }

    /// GET /api/v1/{env}/payout/{reference_id}/status
    pub async fn payout_status(&self, reference_id: &str) -> Result<Value> {
        let path = self.path(Operation::PayoutStatus, Some(reference_id))?;
        self.client
            .send(RequestEnvelope::get(Operation::PayoutStatus, path))
            .await
    }

    fn path(&self, operation: Operation, id: Option<&str>) -> Result<String> {
        endpoints::resolve(operation, self.client.environment(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::test_support::{LIVE_SECRET, TEST_SECRET, client, decrypt_payload, sent_json};
    use crate::http::PayAgencyError;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_payout_status_percent_encodes_reference() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/test/payout/TX%20123/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "PENDING" })))
            .expect(1)
            .mount(&server)
            .await;

        let payout = Payout::new(client(&server, TEST_SECRET));
        let response = payout.payout_status("TX 123").await.expect("payout_status");
        assert_eq!(response["status"], "PENDING");
    }

    #[tokio::test]
    async fn test_payout_status_requires_reference() {
        let server = MockServer::start().await;
        let payout = Payout::new(client(&server, TEST_SECRET));

        let err = payout.payout_status("").await.unwrap_err();
        assert!(matches!(err, PayAgencyError::Config(_)));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_payout_is_encrypted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/live/payout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "SUCCESS" })))
            .expect(1)
            .mount(&server)
            .await;

        let payout = Payout::new(client(&server, LIVE_SECRET));
        let request = json!({ "wallet_id": "WAL1", "amount": 50 });
        payout.payout(&request).await.expect("payout");

        assert_eq!(decrypt_payload(&sent_json(&server).await), request);
    }

    #[tokio::test]
    async fn test_wallets_and_fee_estimate_share_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/wallet"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "wallet_id": "WAL1" }])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/wallet/estimate-payout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "total_fee": 11.5 } })))
            .expect(1)
            .mount(&server)
            .await;

        let payout = Payout::new(client(&server, TEST_SECRET));
        let wallets = payout.wallets().await.expect("wallets");
        assert_eq!(wallets[0]["wallet_id"], "WAL1");

        let estimate = payout
            .estimate_fee(&json!({ "wallet_id": "WAL1", "amount": 200 }))
            .await
            .expect("estimate_fee");
        assert_eq!(estimate["data"]["total_fee"], 11.5);
    }
}
