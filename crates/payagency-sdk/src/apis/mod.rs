/*
[INPUT]:  Client configuration
[OUTPUT]: PayAgency facade owning one instance of every API module
[POS]:    API layer - composition root and shared module helpers
[UPDATE]: When adding an API module
*/

pub mod crypto;
pub mod payment;
pub mod payment_link;
pub mod payout;
pub mod refund;
pub mod transactions;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::http::{ApiClient, ClientConfig, PayAgencyError, Result};
use crate::types::Environment;

pub use crypto::Crypto;
pub use payment::Payment;
pub use payment_link::PaymentLink;
pub use payout::Payout;
pub use refund::Refund;
pub use transactions::Transactions;

/// Entry point of the SDK.
///
/// ```no_run
/// # async fn run() -> payagency_sdk::Result<()> {
/// use payagency_sdk::{ClientConfig, PayAgency};
///
/// let sdk = PayAgency::new(ClientConfig::new("encryption-key", "PA_TEST_secret"))?;
/// let response = sdk
///     .payment()
///     .s2s(&serde_json::json!({ "amount": "10.00", "currency": "USD" }))
///     .await?;
/// println!("{response}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PayAgency {
    client: Arc<ApiClient>,
    payment: Payment,
    payout: Payout,
    payment_link: PaymentLink,
    transactions: Transactions,
    refund: Refund,
    crypto: Crypto,
}

impl PayAgency {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(ApiClient::new(config)?))
    }

    /// Build on an existing transport client
    pub fn from_client(client: ApiClient) -> Self {
        let client = Arc::new(client);
        Self {
            payment: Payment::new(client.clone()),
            payout: Payout::new(client.clone()),
            payment_link: PaymentLink::new(client.clone()),
            transactions: Transactions::new(client.clone()),
            refund: Refund::new(client.clone()),
            crypto: Crypto::new(client.clone()),
            client,
        }
    }

    pub fn environment(&self) -> Environment {
        self.client.environment()
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn payment(&self) -> &Payment {
        &self.payment
    }

    pub fn payout(&self) -> &Payout {
        &self.payout
    }

    pub fn payment_link(&self) -> &PaymentLink {
        &self.payment_link
    }

    pub fn transactions(&self) -> &Transactions {
        &self.transactions
    }

    pub fn refund(&self) -> &Refund {
        &self.refund
    }

    pub fn crypto(&self) -> &Crypto {
        &self.crypto
    }
}

pub(crate) fn to_body<T: Serialize + ?Sized>(data: &T) -> Result<Value> {
    Ok(serde_json::to_value(data)?)
}

/// Flatten a serializable filter set into query parameters.
///
/// Scalars are stringified and `null` entries dropped; nested values are rejected.
pub(crate) fn to_query<T: Serialize + ?Sized>(query: &T) -> Result<BTreeMap<String, String>> {
    let map = match to_body(query)? {
        Value::Object(map) => map,
        Value::Null => return Ok(BTreeMap::new()),
        other => {
            return Err(PayAgencyError::InvalidPayload(format!(
                "query must serialize to an object, got {other}"
            )));
        }
    };

    let mut params = BTreeMap::new();
    for (key, value) in map {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            nested => {
                return Err(PayAgencyError::InvalidPayload(format!(
                    "query parameter '{key}' must be a scalar, got {nested}"
                )));
            }
        };
        params.insert(key, value);
    }
    Ok(params)
}
