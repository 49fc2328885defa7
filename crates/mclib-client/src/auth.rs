//! The online-mode login handshake (§4.6 step 3): encrypting the shared
//! secret and verify token with the server's RSA public key, computing the
//! "server hash" and joining the Mojang session server before the client
//! is allowed to answer with `EncryptionResponse`.

use num_bigint::BigInt;
use rand::RngCore;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};
use sha1::{Digest, Sha1};
use uuid::Uuid;

use crate::error::ClientError;

const SESSION_JOIN_URL: &str = "https://sessionserver.mojang.com/session/minecraft/join";

/// The digest Mojang's session server expects as `serverId`: SHA-1 over
/// `serverId || sharedSecret || publicKey`, interpreted as a signed
/// big-endian integer and printed in hex. This naturally produces the
/// leading `-` the Notchian client is notorious for when the digest's high
/// bit is set; it is not an encoding bug, just what `BigInteger(byte[])`
/// does in Java.
pub fn server_hash(server_id: &str, shared_secret: &[u8], public_key_der: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(server_id.as_bytes());
    hasher.update(shared_secret);
    hasher.update(public_key_der);
    let digest = hasher.finalize();
    BigInt::from_signed_bytes_be(&digest).to_str_radix(16)
}

/// RSA-PKCS1v15-encrypt `plaintext` (the shared secret or verify token)
/// against the server's DER-encoded public key.
pub fn encrypt_for_server(public_key_der: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, ClientError> {
    let public_key = RsaPublicKey::from_public_key_der(public_key_der)
        .map_err(|e| ClientError::AuthenticationFailed(format!("invalid server public key: {e}")))?;
    public_key
        .encrypt(&mut rand::thread_rng(), Pkcs1v15Encrypt, plaintext)
        .map_err(|e| ClientError::AuthenticationFailed(format!("rsa encryption failed: {e}")))
}

/// A fresh 16-byte AES key, chosen by the client per §4.6 step 2.
pub fn random_shared_secret() -> [u8; 16] {
    let mut secret = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

/// `POST` to the Mojang session server so it will vouch for this client
/// when the game server asks `hasJoined`. Success is an empty HTTP 204.
pub async fn join_session(access_token: &str, profile_uuid: Uuid, server_hash: &str) -> Result<(), ClientError> {
    let body = serde_json::json!({
        "accessToken": access_token,
        "selectedProfile": profile_uuid.simple().to_string(),
        "serverId": server_hash,
    });
    let response = reqwest::Client::new()
        .post(SESSION_JOIN_URL)
        .json(&body)
        .send()
        .await
        .map_err(|e| ClientError::AuthenticationFailed(format!("session join request failed: {e}")))?;
    if response.status().as_u16() == 204 {
        Ok(())
    } else {
        Err(ClientError::AuthenticationFailed(format!(
            "session join rejected: HTTP {}",
            response.status()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_hash_matches_known_notch_vector() {
        // The canonical wiki.vg test vector: hash("Notch", [], []).
        let hash = server_hash("Notch", &[], &[]);
        assert_eq!(hash, "4ed1f46bbe04bc756bcb17c0c7ce3e4632f06404");
    }

    #[test]
    fn test_server_hash_negative_vector_has_leading_minus() {
        let hash = server_hash("simon", &[], &[]);
        assert_eq!(hash, "-153f56a3100fdb3188d3ea7a2c9c246d867b2fd4");
    }

    #[test]
    fn test_random_shared_secret_is_not_all_zero() {
        let secret = random_shared_secret();
        assert!(secret.iter().any(|&b| b != 0));
    }
}
