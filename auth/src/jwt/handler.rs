use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type so the service defines its own token payload.
/// Uses HS256 (HMAC with SHA-256).
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// The signature is checked first, then the payload is decoded into `T`,
    /// then `exp` is compared against the current time with no leeway.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `InvalidFormat` - Token is not a JWT, or its claims do not fit `T`, or `exp` is missing
    /// * `Expired` - `exp` lies in the past
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let token_data = decode::<T>(token, &self.decoding_key, &self.validation())?;

        Ok(token_data.claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        role: String,
        exp: i64,
    }

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct OtherClaims {
        email: String,
        exp: i64,
    }

    fn claims_expiring_at(exp: i64) -> TestClaims {
        TestClaims {
            sub: "user123".to_string(),
            role: "ADMIN".to_string(),
            exp,
        }
    }

    fn in_one_hour() -> i64 {
        Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let claims = claims_expiring_at(in_one_hour());

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded: TestClaims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_garbage_is_invalid_format() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let result = handler.decode::<TestClaims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::InvalidFormat(_))));

        let result = handler.decode::<TestClaims>("not-a-jwt");
        assert!(matches!(result, Err(JwtError::InvalidFormat(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .encode(&claims_expiring_at(in_one_hour()))
            .expect("Failed to encode token");

        let result = handler2.decode::<TestClaims>(&token);
        assert_eq!(result.unwrap_err(), JwtError::InvalidSignature);
    }

    #[test]
    fn test_tampered_signature_fails() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let token = handler
            .encode(&claims_expiring_at(in_one_hour()))
            .expect("Failed to encode token");

        let signature_start = token.rfind('.').unwrap() + 1;
        let signature_len = token.len() - signature_start;

        for offset in 0..signature_len {
            let mut bytes = token.clone().into_bytes();
            let position = signature_start + offset;
            bytes[position] = if bytes[position] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            let result = handler.decode::<TestClaims>(&tampered);
            assert_eq!(
                result.unwrap_err(),
                JwtError::InvalidSignature,
                "signature byte {} flipped",
                offset
            );
        }
    }

    #[test]
    fn test_expired_token_with_valid_signature() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let expired = claims_expiring_at(Utc::now().timestamp() - 60);

        let token = handler.encode(&expired).expect("Failed to encode token");

        let result = handler.decode::<TestClaims>(&token);
        assert_eq!(result.unwrap_err(), JwtError::Expired);
    }

    #[test]
    fn test_missing_exp_is_invalid_format() {
        #[derive(Serialize)]
        struct NoExpiry {
            sub: String,
        }

        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let token = handler
            .encode(&NoExpiry {
                sub: "user123".to_string(),
            })
            .expect("Failed to encode token");

        let result = handler.decode::<TestClaims>(&token);
        assert!(matches!(result, Err(JwtError::InvalidFormat(_))));
    }

    #[test]
    fn test_claims_of_wrong_shape_are_invalid_format() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let token = handler
            .encode(&claims_expiring_at(in_one_hour()))
            .expect("Failed to encode token");

        let result = handler.decode::<OtherClaims>(&token);
        assert!(matches!(result, Err(JwtError::InvalidFormat(_))));
    }
}
