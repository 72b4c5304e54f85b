/*
[INPUT]:  Operation identifiers, client environment, optional path identifiers
[OUTPUT]: Resolved request paths
[POS]:    HTTP layer - per-operation, per-environment endpoint table
[UPDATE]: When the remote API adds, moves or renames endpoints
*/

use std::fmt;
use std::str::FromStr;

use crate::http::{PayAgencyError, Result};
use crate::types::Environment;

const ID_PLACEHOLDER: &str = "{id}";

/// Every API operation the SDK can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    S2sCard,
    HostedCard,
    Apm,
    Payout,
    PayoutStatus,
    Wallets,
    EstimatePayoutFee,
    PaymentLinkCreate,
    PaymentTemplates,
    Transactions,
    WalletTransactions,
    TransactionStatus,
    Refund,
    CryptoCurrencies,
    CryptoPayment,
    CryptoPaymentLink,
    CryptoPayin,
}

impl Operation {
    pub const ALL: [Operation; 17] = [
        Operation::S2sCard,
        Operation::HostedCard,
        Operation::Apm,
        Operation::Payout,
        Operation::PayoutStatus,
        Operation::Wallets,
        Operation::EstimatePayoutFee,
        Operation::PaymentLinkCreate,
        Operation::PaymentTemplates,
        Operation::Transactions,
        Operation::WalletTransactions,
        Operation::TransactionStatus,
        Operation::Refund,
        Operation::CryptoCurrencies,
        Operation::CryptoPayment,
        Operation::CryptoPaymentLink,
        Operation::CryptoPayin,
    ];

    /// Path template for this operation in `env`.
    ///
    /// Payment links, templates, wallets, fee estimates and crypto payment links
    /// share one path across environments.
    pub fn path_template(&self, env: Environment) -> &'static str {
        use Environment::{Live, Test};

        match (self, env) {
            (Operation::S2sCard, Test) => "/api/v1/test/card",
            (Operation::S2sCard, Live) => "/api/v1/live/card",
            (Operation::HostedCard, Test) => "/api/v1/test/hosted/card",
            (Operation::HostedCard, Live) => "/api/v1/live/hosted/card",
            (Operation::Apm, Test) => "/api/v1/test/apm",
            (Operation::Apm, Live) => "/api/v1/live/apm",
            (Operation::Payout, Test) => "/api/v1/test/payout",
            (Operation::Payout, Live) => "/api/v1/live/payout",
            (Operation::PayoutStatus, Test) => "/api/v1/test/payout/{id}/status",
            (Operation::PayoutStatus, Live) => "/api/v1/live/payout/{id}/status",
            (Operation::Wallets, _) => "/api/v1/wallet",
            (Operation::EstimatePayoutFee, _) => "/api/v1/wallet/estimate-payout",
            (Operation::PaymentLinkCreate, _) => "/api/v1/payment-link",
            (Operation::PaymentTemplates, _) => "/api/v1/payment-templates",
            (Operation::Transactions, Test) => "/api/v1/test-transactions",
            (Operation::Transactions, Live) => "/api/v1/live-transactions",
            (Operation::WalletTransactions, Test) => "/api/v1/test-wallet-transactions",
            (Operation::WalletTransactions, Live) => "/api/v1/live-wallet-transactions",
            (Operation::TransactionStatus, Test) => "/api/test/status/{id}",
            (Operation::TransactionStatus, Live) => "/api/live/status/{id}",
            (Operation::Refund, Test) => "/api/v1/test/refund",
            (Operation::Refund, Live) => "/api/v1/live/refund",
            (Operation::CryptoCurrencies, Test) => "/api/v1/test/crypto/currencies",
            (Operation::CryptoCurrencies, Live) => "/api/v1/live/crypto/currencies",
            (Operation::CryptoPayment, Test) => "/api/v1/test/crypto",
            (Operation::CryptoPayment, Live) => "/api/v1/live/crypto",
            (Operation::CryptoPaymentLink, _) => "/api/v1/crypto/payment-link",
            (Operation::CryptoPayin, Test) => "/api/v1/test/crypto/payin",
            (Operation::CryptoPayin, Live) => "/api/v1/live/crypto/payin",
        }
    }

    /// Stable identifier accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            Operation::S2sCard => "s2s",
            Operation::HostedCard => "hosted",
            Operation::Apm => "apm",
            Operation::Payout => "payout",
            Operation::PayoutStatus => "payout_status",
            Operation::Wallets => "wallets",
            Operation::EstimatePayoutFee => "estimate_fee",
            Operation::PaymentLinkCreate => "payment_link_create",
            Operation::PaymentTemplates => "payment_templates",
            Operation::Transactions => "transactions",
            Operation::WalletTransactions => "wallet_transactions",
            Operation::TransactionStatus => "transaction_status",
            Operation::Refund => "refund",
            Operation::CryptoCurrencies => "crypto_currencies",
            Operation::CryptoPayment => "crypto_payment",
            Operation::CryptoPaymentLink => "crypto_payment_link",
            Operation::CryptoPayin => "crypto_payin",
        }
    }

    /// Label used in logs and error messages
    pub fn label(&self) -> &'static str {
        match self {
            Operation::S2sCard => "S2S payment",
            Operation::HostedCard => "Hosted payment",
            Operation::Apm => "APM payment",
            Operation::Payout => "Create payout",
            Operation::PayoutStatus => "Fetch payout status",
            Operation::Wallets => "Fetch wallets",
            Operation::EstimatePayoutFee => "Estimate payout fee",
            Operation::PaymentLinkCreate => "Create payment link",
            Operation::PaymentTemplates => "Fetch payment link templates",
            Operation::Transactions => "Fetch transactions",
            Operation::WalletTransactions => "Fetch wallet transactions",
            Operation::TransactionStatus => "Fetch transaction status",
            Operation::Refund => "Create refund",
            Operation::CryptoCurrencies => "Fetch crypto currencies",
            Operation::CryptoPayment => "Create crypto payment",
            Operation::CryptoPaymentLink => "Create crypto payment link",
            Operation::CryptoPayin => "Crypto payin",
        }
    }

    pub fn requires_id(&self) -> bool {
        matches!(self, Operation::PayoutStatus | Operation::TransactionStatus)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = PayAgencyError;

    fn from_str(name: &str) -> Result<Self> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == name)
            .ok_or_else(|| PayAgencyError::Config(format!("unknown operation '{name}'")))
    }
}

/// Resolve the request path for `operation` in `env`.
///
/// `id` fills the `{id}` placeholder of templated operations and is percent-encoded.
/// Supplying an id to an untemplated operation, or omitting it for a templated one,
/// is a configuration error.
pub fn resolve(operation: Operation, env: Environment, id: Option<&str>) -> Result<String> {
    let template = operation.path_template(env);
    match (template.contains(ID_PLACEHOLDER), id) {
        (true, Some(id)) if !id.is_empty() => {
            Ok(template.replace(ID_PLACEHOLDER, &urlencoding::encode(id)))
        }
        (true, _) => Err(PayAgencyError::Config(format!(
            "operation '{operation}' requires a non-empty identifier"
        ))),
        (false, Some(_)) => Err(PayAgencyError::Config(format!(
            "operation '{operation}' does not take an identifier"
        ))),
        (false, None) => Ok(template.to_string()),
    }
}

/// Resolve by operation name, for callers that select operations dynamically
pub fn resolve_named(name: &str, env: Environment, id: Option<&str>) -> Result<String> {
    resolve(name.parse()?, env, id)
}
