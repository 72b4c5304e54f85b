/*
[INPUT]:  Client configuration, endpoint table and per-call envelopes
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod encryption;
pub mod endpoints;
pub mod error;

pub use error::{PayAgencyError, RequestFailure, Result};
pub use encryption::{EncryptedPayload, PayloadEncryptor};
pub use endpoints::Operation;

pub use client::{ApiClient, ClientConfig};
