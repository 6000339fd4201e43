use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Minimum secret length for HS256 (256 bits).
const MIN_SECRET_BYTES: usize = 32;

/// Issues and verifies signed, expiring bearer tokens.
///
/// Keyed by a single symmetric secret shared across the process. Both
/// operations are pure functions of their input and the secret, so a codec
/// can be shared freely between request handlers.
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtCodec {
    /// Create a codec from the configured signing secret.
    ///
    /// # Errors
    /// * `WeakSecret` - Secret is shorter than 32 bytes; callers are
    ///   expected to treat this as a startup failure.
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(JwtError::WeakSecret {
                min: MIN_SECRET_BYTES,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Issue a signed token for `subject` expiring `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token serialization or signing failed
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        let claims = Claims::new(subject, ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its subject.
    ///
    /// A token is valid only if its signature verifies against the secret
    /// and the current time is before its expiry. Every failure mode -
    /// bad signature, malformed structure, expiry - surfaces as
    /// `InvalidToken`; callers cannot distinguish them and are not meant to.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, structure, or expiry check failed
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked by hand below: the library applies a default
        // leeway window and an exclusive comparison, while tokens here are
        // expired from the exact second of `exp` onwards.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::InvalidToken("token is expired".to_string()));
        }

        Ok(claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_issue_and_verify() {
        let codec = JwtCodec::new(SECRET).expect("Failed to create codec");

        let token = codec
            .issue("alice", Duration::minutes(15))
            .expect("Failed to issue token");
        assert!(!token.is_empty());

        let subject = codec.verify(&token).expect("Failed to verify token");
        assert_eq!(subject, "alice");
    }

    #[test]
    fn test_rejects_weak_secret() {
        let result = JwtCodec::new(b"too_short");
        assert!(matches!(
            result,
            Err(JwtError::WeakSecret { min: 32, actual: 9 })
        ));
    }

    #[test]
    fn test_verify_garbage_input() {
        let codec = JwtCodec::new(SECRET).expect("Failed to create codec");

        for input in ["", "not-a-token", "a.b.c", "invalid.token.here"] {
            let result = codec.verify(input);
            assert!(matches!(result, Err(JwtError::InvalidToken(_))));
        }
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let codec1 = JwtCodec::new(b"secret1_at_least_32_bytes_long_key!").unwrap();
        let codec2 = JwtCodec::new(b"secret2_at_least_32_bytes_long_key!").unwrap();

        let token = codec1
            .issue("alice", Duration::minutes(15))
            .expect("Failed to issue token");

        let result = codec2.verify(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_verify_tampered_token() {
        let codec = JwtCodec::new(SECRET).expect("Failed to create codec");

        let token = codec
            .issue("alice", Duration::minutes(15))
            .expect("Failed to issue token");

        // Flip a character in the payload segment
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1] = parts[1].replace('a', "b");
        let tampered = parts.join(".");

        let result = codec.verify(&tampered);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let codec = JwtCodec::new(SECRET).expect("Failed to create codec");

        // exp == iat, and expiry is inclusive, so the token is dead on arrival
        let token = codec
            .issue("alice", Duration::zero())
            .expect("Failed to issue token");

        let result = codec.verify(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_expired_token_gets_no_leeway() {
        let codec = JwtCodec::new(SECRET).expect("Failed to create codec");

        // Expired one second ago; a default-leeway validator would accept it
        let token = codec
            .issue("alice", Duration::seconds(-1))
            .expect("Failed to issue token");

        let result = codec.verify(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }
}
