/*
[INPUT]:  Crypto payment, payment link, payin and currency lookup payloads
[OUTPUT]: Crypto on-ramp / off-ramp / payin responses
[POS]:    API layer - crypto endpoints and transaction_type convenience wrappers
[UPDATE]: When adding crypto flows or transaction types
*/

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::apis::to_body;
use crate::http::endpoints::{self, Operation};
use crate::http::{ApiClient, PayAgencyError, Result};
use crate::types::{CryptoTransactionType, RequestEnvelope};

const TRANSACTION_TYPE_FIELD: &str = "transaction_type";

#[derive(Debug, Clone)]
pub struct Crypto {
    client: Arc<ApiClient>,
}

impl Crypto {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fiat to crypto payment link
    pub async fn on_ramp_link<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.payment_link(&with_transaction_type(data, CryptoTransactionType::Onramp)?)
            .await
    }

    /// Crypto to fiat payment link
    pub async fn off_ramp_link<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.payment_link(&with_transaction_type(data, CryptoTransactionType::Offramp)?)
            .await
    }

    /// Crypto deposit payment link
    pub async fn payin_link<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.payment_link(&with_transaction_type(data, CryptoTransactionType::Payin)?)
            .await
    }

    /// Fiat to crypto payment
    pub async fn on_ramp<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.payment(&with_transaction_type(data, CryptoTransactionType::Onramp)?)
            .await
    }

    /// Crypto to fiat payment
    pub async fn off_ramp<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.payment(&with_transaction_type(data, CryptoTransactionType::Offramp)?)
            .await
    }

    /// Supported crypto currencies. Sent unencrypted.
    ///
    /// POST /api/v1/{env}/crypto/currencies?Skip-Encryption=true
    pub async fn currencies<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post(Operation::CryptoCurrencies, data, true).await
    }

    /// POST /api/v1/{env}/crypto/payin
    pub async fn payin<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post(Operation::CryptoPayin, data, false).await
    }

    /// Crypto payment link. Sent unencrypted.
    ///
    /// POST /api/v1/crypto/payment-link?Skip-Encryption=true
    pub async fn payment_link<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post(Operation::CryptoPaymentLink, data, true).await
    }

    /// Crypto payment (on-ramp / off-ramp)
    ///
    /// POST /api/v1/{env}/crypto
    pub async fn payment<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post(Operation::CryptoPayment, data, false).await
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        operation: Operation,
        data: &T,
        skip_encryption: bool,
    ) -> Result<Value> {
        let path = endpoints::resolve(operation, self.client.environment(), None)?;
        let mut envelope = RequestEnvelope::post(operation, path, to_body(data)?);
        if skip_encryption {
            envelope = envelope.skip_encryption();
        }
        self.client.send(envelope).await
    }
}

/// Merge the discriminator into the caller payload, overriding any caller value
fn with_transaction_type<T: Serialize + ?Sized>(
    data: &T,
    kind: CryptoTransactionType,
) -> Result<Value> {
    let mut body = to_body(data)?;
    let object = body.as_object_mut().ok_or_else(|| {
        PayAgencyError::InvalidPayload("crypto payload must be a JSON object".to_string())
    })?;
    object.insert(
        TRANSACTION_TYPE_FIELD.to_string(),
        Value::String(kind.as_str().to_string()),
    );
    Ok(body)
}
