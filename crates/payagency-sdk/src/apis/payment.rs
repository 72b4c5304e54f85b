/*
[INPUT]:  Card and alternative-payment-method payloads
[OUTPUT]: Payment responses from the remote API
[POS]:    API layer - card payment endpoints (encrypted)
[UPDATE]: When adding payment flows
*/

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::apis::to_body;
use crate::http::endpoints::{self, Operation};
use crate::http::{ApiClient, Result};
use crate::types::RequestEnvelope;

#[derive(Debug, Clone)]
pub struct Payment {
    client: Arc<ApiClient>,
}

impl Payment {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Server-to-server card payment
    ///
    /// POST /api/v1/{env}/card
    pub async fn s2s<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.charge(Operation::S2sCard, data).await
    }

    /// Card payment through the hosted payment page
    ///
    /// POST /api/v1/{env}/hosted/card
    pub async fn hosted<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.charge(Operation::HostedCard, data).await
    }

    /// Alternative payment method
    ///
    /// POST /api/v1/{env}/apm
    pub async fn apm<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.charge(Operation::Apm, data).await
    }

    async fn charge<T: Serialize + ?Sized>(&self, operation: Operation, data: &T) -> Result<Value> {
        let path = endpoints::resolve(operation, self.client.environment(), None)?;
        let envelope = RequestEnvelope::post(operation, path, to_body(data)?);
        self.client.send(envelope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::test_support::{LIVE_SECRET, TEST_SECRET, client, decrypt_payload, sent_json};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_s2s_encrypts_body_on_test_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/test/card"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "SUCCESS",
                "data": { "transaction_id": "PA123" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let payment = Payment::new(client(&server, TEST_SECRET));
        let request = json!({ "first_name": "Jane", "amount": 100, "currency": "USD" });
        let response = payment.s2s(&request).await.expect("s2s");
        assert_eq!(response["data"]["transaction_id"], "PA123");

        let sent = sent_json(&server).await;
        assert_eq!(sent.as_object().map(|o| o.len()), Some(1));
        assert_eq!(decrypt_payload(&sent), request);
    }

    #[tokio::test]
    async fn test_hosted_uses_live_path_for_live_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/live/hosted/card"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "redirect_url": "https://pay" })))
            .expect(1)
            .mount(&server)
            .await;

        let payment = Payment::new(client(&server, LIVE_SECRET));
        let response = payment.hosted(&json!({ "amount": 5 })).await.expect("hosted");
        assert_eq!(response["redirect_url"], "https://pay");
    }

    #[tokio::test]
    async fn test_apm_accepts_typed_payloads() {
        #[derive(Serialize)]
        struct ApmRequest<'a> {
            payment_brand: &'a str,
            amount: u32,
        }

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/test/apm"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "PENDING" })))
            .expect(1)
            .mount(&server)
            .await;

        let payment = Payment::new(client(&server, TEST_SECRET));
        payment
            .apm(&ApmRequest { payment_brand: "skrill", amount: 20 })
            .await
            .expect("apm");

        let sent = sent_json(&server).await;
        assert_eq!(decrypt_payload(&sent), json!({ "payment_brand": "skrill", "amount": 20 }));
    }
}
