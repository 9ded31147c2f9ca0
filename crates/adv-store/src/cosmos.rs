//! Cosmos DB SQL API document upserts over REST.

use std::time::Duration;

use adv_config::CosmosConfig;
use adv_core::entities::Verdict;
use chrono::Utc;

use crate::DocumentStore;
use crate::auth::{MasterKey, rfc1123};
use crate::error::StoreError;

/// REST API version sent in `x-ms-version`.
const COSMOS_API_VERSION: &str = "2018-12-31";

/// Upserts verdict documents into one Cosmos DB container.
pub struct CosmosStore {
    http: reqwest::Client,
    key: MasterKey,
    docs_url: String,
    container_link: String,
    partition_key_path: String,
}

impl CosmosStore {
    /// Build a store bound to the configured container.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] if the master key is not base64, or
    /// [`StoreError::Client`] if the HTTP client fails to build.
    pub fn new(config: &CosmosConfig) -> Result<Self, StoreError> {
        let key = MasterKey::from_base64(&config.key)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("adversary/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Client(e.to_string()))?;

        let container_link = config.container_link();
        let docs_url = format!(
            "{}/{container_link}/docs",
            config.endpoint.trim_end_matches('/')
        );

        Ok(Self {
            http,
            key,
            docs_url,
            container_link,
            partition_key_path: config.partition_key_path.clone(),
        })
    }

    /// The documents feed URL this store posts to.
    #[must_use]
    pub fn docs_url(&self) -> &str {
        &self.docs_url
    }
}

impl DocumentStore for CosmosStore {
    async fn upsert(&self, verdict: &Verdict) -> Result<(), StoreError> {
        let document = serde_json::to_value(verdict)?;
        let partition_key = partition_key_header(&document, &self.partition_key_path)?;

        let date = rfc1123(Utc::now());
        let authorization = self
            .key
            .authorization("POST", "docs", &self.container_link, &date)?;

        let resp = self
            .http
            .post(&self.docs_url)
            .header("authorization", authorization)
            .header("x-ms-date", &date)
            .header("x-ms-version", COSMOS_API_VERSION)
            .header("x-ms-documentdb-is-upsert", "True")
            .header("x-ms-documentdb-partitionkey", partition_key)
            .json(&document)
            .send()
            .await?;
        check_response(resp).await?;

        tracing::debug!(id = %verdict.id, "document upserted");
        Ok(())
    }
}

/// Cosmos DB error body, e.g. `{"code": "Forbidden", "message": "..."}`.
#[derive(serde::Deserialize)]
struct CosmosErrorBody {
    code: String,
    message: String,
}

/// Map 429 to [`StoreError::Throttled`] and other failures to
/// [`StoreError::Api`].
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(StoreError::Throttled {
            retry_after_ms: parse_retry_after_ms(&resp),
        });
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<CosmosErrorBody>(&body)
        .map_or_else(|_| body.trim().to_string(), |e| format!("{}: {}", e.code, e.message));
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Parse `x-ms-retry-after-ms`, falling back to one second.
fn parse_retry_after_ms(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get("x-ms-retry-after-ms")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1000)
}

/// JSON array header value holding the document's partition key,
/// e.g. `["V007-0a1b2c3d"]` for path `/id`.
fn partition_key_header(document: &serde_json::Value, path: &str) -> Result<String, StoreError> {
    let missing = || StoreError::PartitionKey {
        path: path.to_string(),
    };

    let value = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .try_fold(document, |node, segment| node.get(segment))
        .ok_or_else(missing)?;

    if value.is_object() || value.is_array() {
        return Err(missing());
    }
    Ok(serde_json::to_string(&[value])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("/id", r#"["V007-0a1b2c3d"]"#)]
    #[case("/status", r#"["CONSEQUENCE"]"#)]
    #[case("/meta/shard", "[3]")]
    fn partition_key_from_path(#[case] path: &str, #[case] expected: &str) {
        let document = json!({
            "id": "V007-0a1b2c3d",
            "status": "CONSEQUENCE",
            "meta": { "shard": 3 },
        });
        assert_eq!(partition_key_header(&document, path).unwrap(), expected);
    }

    #[rstest]
    #[case("/missing")]
    #[case("/truth_history")]
    #[case("")]
    fn partition_key_must_be_scalar(#[case] path: &str) {
        let document = json!({ "id": "V1-00000000", "truth_history": ["a"] });
        assert!(matches!(
            partition_key_header(&document, path),
            Err(StoreError::PartitionKey { .. })
        ));
    }

    #[test]
    fn docs_url_from_config() {
        let store = CosmosStore::new(&CosmosConfig {
            endpoint: "https://acct.documents.azure.com:443/".into(),
            key: "c2VjcmV0LWtleQ==".into(),
            database_id: "lt-game".into(),
            container_id: "verdicts".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            store.docs_url(),
            "https://acct.documents.azure.com:443/dbs/lt-game/colls/verdicts/docs"
        );
    }

    #[tokio::test]
    async fn throttle_reads_retry_after_ms() {
        let resp = reqwest::Response::from(
            ::http::Response::builder()
                .status(429)
                .header("x-ms-retry-after-ms", "250")
                .body("")
                .unwrap(),
        );
        assert!(matches!(
            check_response(resp).await,
            Err(StoreError::Throttled { retry_after_ms: 250 })
        ));
    }

    #[tokio::test]
    async fn error_body_code_and_message_are_reported() {
        let resp = reqwest::Response::from(
            ::http::Response::builder()
                .status(409)
                .body(r#"{"code":"Conflict","message":"Entity with the specified id already exists in the system."}"#)
                .unwrap(),
        );
        match check_response(resp).await {
            Err(StoreError::Api { status, message }) => {
                assert_eq!(status, 409);
                assert_eq!(
                    message,
                    "Conflict: Entity with the specified id already exists in the system."
                );
            }
            other => panic!("expected API error, got {:?}", other.map(|_| ())),
        }
    }
}
