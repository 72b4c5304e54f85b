/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public PayAgency SDK crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod apis;
pub mod config;
pub mod http;
pub mod types;

// Re-export the SDK facade and its modules
pub use apis::{Crypto, PayAgency, Payment, PaymentLink, Payout, Refund, Transactions};

// Re-export commonly used types from http
pub use http::{
    ApiClient,
    ClientConfig,
    EncryptedPayload,
    Operation,
    PayAgencyError,
    PayloadEncryptor,
    RequestFailure,
    Result,
};

// Re-export all types
pub use types::*;
