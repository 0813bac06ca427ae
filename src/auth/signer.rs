//! HMAC-SHA512 request signing.
//!
//! Authenticated requests carry two headers:
//! 1. `Rest-Key`: the raw API key string
//! 2. `Rest-Sign`: base64(HMAC-SHA512(base64-decoded secret, message))
//!
//! The signed message is the form-encoded payload itself (basic scheme) or
//! the endpoint route, a NUL separator and the payload (extended scheme).

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha512;

use super::SigningScheme;
use crate::config::Credentials;
use crate::error::{ClientError, ClientResult};

type HmacSha512 = Hmac<Sha512>;

/// HMAC-SHA512 request signer.
///
/// # Example
///
/// ```ignore
/// let credentials = Credentials::new("api_key", "base64_encoded_secret");
/// let signer = HmacSigner::new(&credentials);
///
/// let signature = signer.sign(SigningScheme::Extended, "2/money/info", payload)?;
/// // signature goes in the Rest-Sign header, the key in Rest-Key
/// ```
pub struct HmacSigner<'a> {
    credentials: &'a Credentials,
}

impl<'a> HmacSigner<'a> {
    /// Create a signer over a set of credentials.
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.credentials.key
    }

    /// Get the API key header name.
    pub fn api_key_header(&self) -> &str {
        "Rest-Key"
    }

    /// Get the signature header name.
    pub fn signature_header(&self) -> &str {
        "Rest-Sign"
    }

    /// Sign a request payload.
    ///
    /// # Arguments
    ///
    /// * `scheme` - The signing scheme selected by the API version
    /// * `path` - The call path including its leading version digit
    /// * `payload` - The form-encoded request body bytes
    ///
    /// # Returns
    ///
    /// The base64-encoded signature for the `Rest-Sign` header.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential secret is not valid base64.
    pub fn sign(
        &self,
        scheme: SigningScheme,
        path: &str,
        payload: &[u8],
    ) -> ClientResult<String> {
        let secret = BASE64
            .decode(self.credentials.secret.as_bytes())
            .map_err(|e| {
                ClientError::Configuration(format!("invalid base64 API secret: {}", e))
            })?;

        let digest = match scheme {
            SigningScheme::Basic => hmac_sha512(&secret, payload),
            SigningScheme::Extended => {
                // route = path minus its leading version digit
                let route = path.get(1..).unwrap_or_default();
                let mut message = Vec::with_capacity(route.len() + 1 + payload.len());
                message.extend_from_slice(route.as_bytes());
                message.push(0);
                message.extend_from_slice(payload);
                hmac_sha512(&secret, &message)
            }
        };

        Ok(BASE64.encode(digest))
    }
}

fn hmac_sha512(secret: &[u8], message: &[u8]) -> Vec<u8> {
    let mut hmac = HmacSha512::new_from_slice(secret).expect("HMAC can take key of any size");
    hmac.update(message);
    hmac.finalize().into_bytes().to_vec()
}

/// Serialize an argument list into an `application/x-www-form-urlencoded`
/// string.
///
/// The result is used both as the request body and as the signed message.
pub fn encode_form(args: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(args)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "test_api_key";
    // Base64 encoded "test_secret_key_12345"
    const TEST_SECRET_B64: &str = "dGVzdF9zZWNyZXRfa2V5XzEyMzQ1";

    fn test_credentials() -> Credentials {
        Credentials::new(TEST_KEY, TEST_SECRET_B64)
    }

    #[test]
    fn test_headers() {
        let credentials = test_credentials();
        let signer = HmacSigner::new(&credentials);

        assert_eq!(signer.api_key(), TEST_KEY);
        assert_eq!(signer.api_key_header(), "Rest-Key");
        assert_eq!(signer.signature_header(), "Rest-Sign");
    }

    #[test]
    fn test_invalid_base64_secret_fails_at_signing() {
        let credentials = Credentials::new(TEST_KEY, "not-valid-base64!!!");
        let signer = HmacSigner::new(&credentials);

        let result = signer.sign(SigningScheme::Basic, "2/money/info", b"nonce=123");
        assert!(matches!(result, Err(ClientError::Configuration(_))));
    }

    #[test]
    fn test_signature_determinism() {
        let credentials = test_credentials();
        let signer = HmacSigner::new(&credentials);

        let sig1 = signer
            .sign(SigningScheme::Basic, "1/generic/info", b"nonce=123")
            .unwrap();
        let sig2 = signer
            .sign(SigningScheme::Basic, "1/generic/info", b"nonce=123")
            .unwrap();

        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_basic_signature_is_path_independent() {
        let credentials = test_credentials();
        let signer = HmacSigner::new(&credentials);

        let sig1 = signer
            .sign(SigningScheme::Basic, "1/generic/info", b"nonce=123")
            .unwrap();
        let sig2 = signer
            .sign(SigningScheme::Basic, "1/generic/orders", b"nonce=123")
            .unwrap();

        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_extended_signature_binds_path() {
        let credentials = test_credentials();
        let signer = HmacSigner::new(&credentials);

        let sig1 = signer
            .sign(SigningScheme::Extended, "2/money/info", b"nonce=123")
            .unwrap();
        let sig2 = signer
            .sign(SigningScheme::Extended, "2/money/orders", b"nonce=123")
            .unwrap();

        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_basic_signature_matches_raw_hmac() {
        let credentials = test_credentials();
        let signer = HmacSigner::new(&credentials);

        let payload = b"nonce=123&type=bid";
        let signature = signer.sign(SigningScheme::Basic, "1/generic/info", payload).unwrap();

        let secret = BASE64.decode(TEST_SECRET_B64).unwrap();
        let expected = BASE64.encode(hmac_sha512(&secret, payload));
        assert_eq!(signature, expected);
    }

    #[test]
    fn test_extended_signature_matches_route_nul_payload() {
        let credentials = test_credentials();
        let signer = HmacSigner::new(&credentials);

        let path = "2/BTCUSD/money/ticker";
        let payload = b"nonce=123";
        let signature = signer.sign(SigningScheme::Extended, path, payload).unwrap();

        let mut message = Vec::new();
        message.extend_from_slice(path[1..].as_bytes());
        message.push(0);
        message.extend_from_slice(payload);

        let secret = BASE64.decode(TEST_SECRET_B64).unwrap();
        let expected = BASE64.encode(hmac_sha512(&secret, &message));
        assert_eq!(signature, expected);
    }

    #[test]
    fn test_signature_is_base64_of_sha512_digest() {
        let credentials = test_credentials();
        let signer = HmacSigner::new(&credentials);

        let signature = signer
            .sign(SigningScheme::Basic, "1/generic/info", b"nonce=123")
            .unwrap();

        let decoded = BASE64.decode(&signature).unwrap();
        assert_eq!(decoded.len(), 64);
    }

    #[test]
    fn test_encode_form() {
        let args = vec![
            ("type".to_string(), "bid".to_string()),
            ("amount_int".to_string(), "100".to_string()),
        ];
        assert_eq!(encode_form(&args), "type=bid&amount_int=100");
        assert_eq!(encode_form(&[]), "");
    }

    #[test]
    fn test_encode_form_escapes_reserved_characters() {
        let args = vec![
            ("note".to_string(), "a b".to_string()),
            ("pair".to_string(), "x&y=z".to_string()),
        ];
        assert_eq!(encode_form(&args), "note=a+b&pair=x%26y%3Dz");
    }

    #[test]
    fn test_encode_form_round_trip() {
        let args = vec![
            ("type".to_string(), "bid".to_string()),
            ("note".to_string(), "spent £5 & more".to_string()),
        ];

        let encoded = encode_form(&args);
        let decoded: Vec<(String, String)> = url::form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect();

        assert_eq!(decoded, args);
    }
}
