/*
[INPUT]:  Secret key prefixes and API discriminator values
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Secret keys issued for production traffic carry this prefix.
pub const LIVE_KEY_PREFIX: &str = "PA_LIVE_";

/// Target environment of a client, derived from its secret key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Test,
    Live,
}

impl Environment {
    /// Resolve the environment a secret key belongs to.
    ///
    /// Keys starting with [`LIVE_KEY_PREFIX`] are live, everything else is test.
    pub fn from_secret_key(secret_key: &str) -> Self {
        if secret_key.starts_with(LIVE_KEY_PREFIX) {
            Environment::Live
        } else {
            Environment::Test
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Test => "test",
            Environment::Live => "live",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `transaction_type` discriminator for crypto payments and payment links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CryptoTransactionType {
    Onramp,
    Offramp,
    Payin,
}

impl CryptoTransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CryptoTransactionType::Onramp => "ONRAMP",
            CryptoTransactionType::Offramp => "OFFRAMP",
            CryptoTransactionType::Payin => "PAYIN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("PA_LIVE_abc123", Environment::Live)]
    #[case("PA_LIVE_", Environment::Live)]
    #[case("PA_TEST_x", Environment::Test)]
    #[case("pa_live_lowercase", Environment::Test)]
    #[case("sk_PA_LIVE_", Environment::Test)]
    #[case("", Environment::Test)]
    fn test_environment_from_secret_key(#[case] key: &str, #[case] expected: Environment) {
        assert_eq!(Environment::from_secret_key(key), expected);
        assert_eq!(Environment::from_secret_key(key), expected);
    }

    #[test]
    fn test_environment_serialization() {
        assert_eq!(serde_json::to_string(&Environment::Live).unwrap(), r#""live""#);
        assert_eq!(Environment::Test.to_string(), "test");
    }

    #[test]
    fn test_crypto_transaction_type_serialization() {
        let value = serde_json::to_value(CryptoTransactionType::Offramp).unwrap();
        assert_eq!(value, serde_json::json!("OFFRAMP"));
        assert_eq!(CryptoTransactionType::Payin.as_str(), "PAYIN");
    }
}
