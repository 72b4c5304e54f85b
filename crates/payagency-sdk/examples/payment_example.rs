/*
[INPUT]:  PAYAGENCY_ENCRYPTION_KEY / PAYAGENCY_SECRET_KEY environment variables
[OUTPUT]: Results of an S2S card payment and a payment link creation
[POS]:    Examples - card payment and payment link flows
[UPDATE]: When the payment or payment link API changes
*/

use payagency_sdk::{ClientConfig, PayAgency};
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Example: S2S card payment followed by a payment link.
///
/// Use a `PA_TEST_` secret key to run against the sandbox endpoints.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            return;
        }
    };

    let sdk = match PayAgency::new(config) {
        Ok(sdk) => sdk,
        Err(e) => {
            error!(error = %e, "failed to create client");
            return;
        }
    };
    info!(env = %sdk.environment(), "payagency client ready");

    let s2s = json!({
        "first_name": "James",
        "last_name": "Dean",
        "email": "james@gmail.com",
        "address": "64 Hertingfordbury Rd",
        "country": "GB",
        "city": "Newport",
        "state": "GB",
        "zip": "TF10 8DF",
        "ip_address": "127.0.0.1",
        "phone_number": "7654233212",
        "amount": 100,
        "currency": "GBP",
        "card_number": "4111111111111111",
        "card_expiry_month": "12",
        "card_expiry_year": "2027",
        "card_cvv": "029",
        "redirect_url": "https://pay.agency",
        "webhook_url": "https://pay.agency/webhook",
        "terminal_id": "T12345"
    });

    match sdk.payment().s2s(&s2s).await {
        Ok(result) => info!(%result, "S2S payment complete"),
        Err(e) => error!(error = %e, status = ?e.status(), body = ?e.response_body(), "S2S payment failed"),
    }

    let link = json!({
        "amount": 100,
        "currency": "GBP",
        "country": "GB",
        "order_id": "ORDER_123",
        "redirect_url": "https://pay.agency",
        "webhook_url": "https://pay.agency/webhook"
    });

    match sdk.payment_link().create(&link).await {
        Ok(result) => info!(%result, "payment link created"),
        Err(e) => error!(error = %e, status = ?e.status(), "payment link creation failed"),
    }
}
