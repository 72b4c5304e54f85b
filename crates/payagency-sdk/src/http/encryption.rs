/*
[INPUT]:  Serialized JSON request bodies and the account encryption key
[OUTPUT]: AES-256-CBC envelopes rendered as "<iv hex>:<ciphertext hex>"
[POS]:    HTTP layer - payload encryption for encrypted endpoints
[UPDATE]: When changing cipher, key handling or envelope format
*/

use std::fmt;
use std::str::FromStr;

use aes::Aes256;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use rand::RngCore;
use rand::rngs::OsRng;
use serde_json::{Value, json};

use crate::http::{PayAgencyError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

pub const KEY_LEN: usize = 32;
pub const IV_LEN: usize = 16;

/// Ciphertext plus the IV it was produced with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    /// Request body sent in place of the plaintext JSON
    pub fn to_request_body(&self) -> Value {
        json!({ "payload": self.to_string() })
    }
}

impl fmt::Display for EncryptedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", hex::encode(self.iv), hex::encode(&self.ciphertext))
    }
}

impl FromStr for EncryptedPayload {
    type Err = PayAgencyError;

    fn from_str(value: &str) -> Result<Self> {
        let (iv_hex, ciphertext_hex) = value
            .split_once(':')
            .ok_or_else(|| PayAgencyError::Encryption("missing ':' separator".to_string()))?;

        let iv_bytes = hex::decode(iv_hex)
            .map_err(|e| PayAgencyError::Encryption(format!("invalid iv hex: {e}")))?;
        let iv: [u8; IV_LEN] = iv_bytes.try_into().map_err(|bytes: Vec<u8>| {
            PayAgencyError::Encryption(format!("iv must be {IV_LEN} bytes, got {}", bytes.len()))
        })?;
        let ciphertext = hex::decode(ciphertext_hex)
            .map_err(|e| PayAgencyError::Encryption(format!("invalid ciphertext hex: {e}")))?;

        Ok(Self { iv, ciphertext })
    }
}

/// Encrypts request bodies with the account encryption key.
///
/// The key is the raw UTF-8 key material, zero-padded or truncated to 32 bytes.
/// The server derives its key the same way, so this must not be swapped for a real KDF
/// unless the remote protocol changes with it.
#[derive(Clone)]
pub struct PayloadEncryptor {
    key: [u8; KEY_LEN],
}

impl PayloadEncryptor {
    pub fn new(encryption_key: &str) -> Self {
        Self {
            key: derive_key(encryption_key),
        }
    }

    /// Encrypt with a fresh random IV
    pub fn encrypt(&self, plaintext: &str) -> Result<EncryptedPayload> {
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);
        self.encrypt_with_iv(plaintext, iv)
    }

    fn encrypt_with_iv(&self, plaintext: &str, iv: [u8; IV_LEN]) -> Result<EncryptedPayload> {
        let cipher = Aes256CbcEnc::new_from_slices(&self.key, &iv)
            .map_err(|e| PayAgencyError::Encryption(format!("init aes-256-cbc: {e}")))?;
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        Ok(EncryptedPayload { iv, ciphertext })
    }

    /// Inverse of [`encrypt`](Self::encrypt). Responses are never encrypted; this exists
    /// for verifying envelopes.
    pub fn decrypt(&self, payload: &EncryptedPayload) -> Result<String> {
        let cipher = Aes256CbcDec::new_from_slices(&self.key, &payload.iv)
            .map_err(|e| PayAgencyError::Encryption(format!("init aes-256-cbc: {e}")))?;
        let plaintext = cipher
            .decrypt_padded_vec_mut::<Pkcs7>(&payload.ciphertext)
            .map_err(|_| PayAgencyError::Encryption("invalid padding".to_string()))?;
        String::from_utf8(plaintext)
            .map_err(|e| PayAgencyError::Encryption(format!("decrypted payload is not utf-8: {e}")))
    }
}

impl fmt::Debug for PayloadEncryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadEncryptor")
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Encrypt `plaintext` under `key`, returning the wire string `"<iv hex>:<ciphertext hex>"`.
pub fn encrypt(plaintext: &str, key: &str) -> Result<String> {
    PayloadEncryptor::new(key)
        .encrypt(plaintext)
        .map(|payload| payload.to_string())
}

/// Decrypt a wire string produced by [`encrypt`].
pub fn decrypt(envelope: &str, key: &str) -> Result<String> {
    let payload: EncryptedPayload = envelope.parse()?;
    PayloadEncryptor::new(key).decrypt(&payload)
}

fn derive_key(material: &str) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    let bytes = material.as_bytes();
    let len = bytes.len().min(KEY_LEN);
    key[..len].copy_from_slice(&bytes[..len]);
    key
}
