/*
[INPUT]:  Refund payloads
[OUTPUT]: Refund responses
[POS]:    API layer - refund endpoint (plaintext body)
[UPDATE]: When refund handling changes
*/

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::apis::to_body;
use crate::http::endpoints::{self, Operation};
use crate::http::{ApiClient, Result};
use crate::types::RequestEnvelope;

#[derive(Debug, Clone)]
pub struct Refund {
    client: Arc<ApiClient>,
}

impl Refund {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Refund a transaction. Sent unencrypted.
    ///
    /// POST /api/v1/{env}/refund?Skip-Encryption=true
    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        let path = endpoints::resolve(Operation::Refund, self.client.environment(), None)?;
        let envelope = RequestEnvelope::post(Operation::Refund, path, to_body(data)?).skip_encryption();
        self.client.send(envelope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::test_support::{TEST_SECRET, client};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_refund_is_plaintext() {
        let server = MockServer::start().await;
        let request = json!({ "transaction_id": "PA123", "reason": "duplicate" });
        Mock::given(method("POST"))
            .and(path("/api/v1/test/refund"))
            .and(query_param("Skip-Encryption", "true"))
            .and(body_json(request.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "REFUNDED" })))
            .expect(1)
            .mount(&server)
            .await;

        let refund = Refund::new(client(&server, TEST_SECRET));
        let response = refund.create(&request).await.expect("refund");
        assert_eq!(response["status"], "REFUNDED");
    }

    #[tokio::test]
    async fn test_refund_rejection_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/test/refund"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let refund = Refund::new(client(&server, TEST_SECRET));
        let err = refund.create(&json!({ "transaction_id": "missing" })).await.unwrap_err();
        assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
        assert_eq!(err.response_body(), Some("not found"));
        assert_eq!(err.operation(), Some("Create refund"));
    }
}
