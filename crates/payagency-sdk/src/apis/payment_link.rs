/*
[INPUT]:  Payment link payloads
[OUTPUT]: Created payment links and payment templates
[POS]:    API layer - payment link endpoints (plaintext bodies)
[UPDATE]: When adding payment link operations
*/

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::apis::to_body;
use crate::http::endpoints::{self, Operation};
use crate::http::{ApiClient, Result};
use crate::types::RequestEnvelope;

#[derive(Debug, Clone)]
pub struct PaymentLink {
    client: Arc<ApiClient>,
}

impl PaymentLink {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Create a payment link. The API expects this body unencrypted.
    ///
    /// POST /api/v1/payment-link?Skip-Encryption=true
    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        let path = endpoints::resolve(Operation::PaymentLinkCreate, self.client.environment(), None)?;
        let envelope =
            RequestEnvelope::post(Operation::PaymentLinkCreate, path, to_body(data)?).skip_encryption();
        self.client.send(envelope).await
    }

    /// GET /api/v1/payment-templates
    pub async fn templates(&self) -> Result<Value> {
        let path = endpoints::resolve(Operation::PaymentTemplates, self.client.environment(), None)?;
        self.client
            .send(RequestEnvelope::get(Operation::PaymentTemplates, path))
            .await
    }
}
