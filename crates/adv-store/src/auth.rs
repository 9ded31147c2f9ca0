//! Cosmos DB master-key request signing.
//!
//! Each request carries an `authorization` header built from an HMAC-SHA256
//! over the verb, resource type, resource link and `x-ms-date`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::StoreError;

type HmacSha256 = Hmac<Sha256>;

/// Decoded account master key.
pub(crate) struct MasterKey(Vec<u8>);

impl MasterKey {
    pub fn from_base64(key: &str) -> Result<Self, StoreError> {
        STANDARD
            .decode(key.trim())
            .map(Self)
            .map_err(|e| StoreError::InvalidKey(e.to_string()))
    }

    /// URL-encoded `type=master&ver=1.0&sig=...` token.
    pub fn authorization(
        &self,
        verb: &str,
        resource_type: &str,
        resource_link: &str,
        date: &str,
    ) -> Result<String, StoreError> {
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            verb.to_lowercase(),
            resource_type.to_lowercase(),
            resource_link,
            date.to_lowercase()
        );

        let mut mac = HmacSha256::new_from_slice(&self.0)
            .map_err(|e| StoreError::InvalidKey(e.to_string()))?;
        mac.update(payload.as_bytes());
        let sig = STANDARD.encode(mac.finalize().into_bytes());

        Ok(urlencoding::encode(&format!("type=master&ver=1.0&sig={sig}")).into_owned())
    }
}

/// RFC 1123 date as Cosmos expects in `x-ms-date`.
pub(crate) fn rfc1123(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn signs_known_vector() {
        let key = MasterKey::from_base64("c2VjcmV0LWtleQ==").unwrap();
        let token = key
            .authorization(
                "POST",
                "docs",
                "dbs/lt-game/colls/verdicts",
                "Tue, 01 Jan 2030 00:00:00 GMT",
            )
            .unwrap();
        assert_eq!(
            token,
            "type%3Dmaster%26ver%3D1.0%26sig%3Dw4gw8AvIvVVaIT0WjrO8IeKAh0QmsbeVSIbgLGP6NO4%3D"
        );
    }

    #[test]
    fn rejects_non_base64_key() {
        assert!(matches!(
            MasterKey::from_base64("not base64!"),
            Err(StoreError::InvalidKey(_))
        ));
    }

    #[test]
    fn rfc1123_format() {
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(rfc1123(at), "Tue, 01 Jan 2030 00:00:00 GMT");
    }
}
