//! Vercel REST client
//!
//! Issues the two authenticated GET requests lookout needs and decodes
//! their responses. Timeouts, transport failures, non-2xx statuses, and
//! undecodable bodies each map to their own [`ApiError`] variant, so
//! callers never have to guess why a call came back empty.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;

/// Maximum characters of an error-response body kept in [`ApiError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 2000;

/// Failure modes of a single API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request exceeded the configured timeout.
    #[error("Request to {url} timed out")]
    Timeout {
        /// URL of the request that timed out
        url: String,
    },

    /// Connection or protocol failure before a usable response arrived.
    #[error("Request to {url} failed")]
    Transport {
        /// URL of the failed request
        url: String,
        /// Underlying client error
        source: reqwest::Error,
    },

    /// The API answered with a non-2xx status.
    #[error("Vercel API returned {status} for {url}: {body}")]
    Status {
        /// URL of the rejected request
        url: String,
        /// HTTP status the API returned
        status: StatusCode,
        /// Response body, capped at [`MAX_ERROR_BODY_CHARS`] characters
        body: String,
    },

    /// The response body was not the expected shape.
    #[error("Failed to decode response from {url}")]
    Decode {
        /// URL of the undecodable response
        url: String,
        /// Underlying decode error
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Classify a `reqwest` error for the given URL.
    fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if source.is_decode() {
            Self::Decode {
                url: url.to_string(),
                source,
            }
        } else {
            Self::Transport {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// One deployment as returned by the list endpoint.
///
/// Only the fields lookout reads are modeled; everything else in the
/// response is ignored. The v6 endpoint spells the identifier `uid`, so
/// that name is accepted as an alias.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Deployment {
    /// Opaque deployment identifier
    #[serde(alias = "uid")]
    pub id: String,
    /// Project name, used only for verbose display
    pub name: Option<String>,
    /// Deployment state reported by the platform, e.g. `READY` or `ERROR`
    pub state: Option<String>,
    /// Creation time, sent by the platform as a millisecond epoch
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub created: Option<DateTime<Utc>>,
}

/// Response shape of the list endpoint. A missing `deployments` key
/// decodes as an empty list.
#[derive(Debug, Default, Deserialize)]
struct DeploymentsResponse {
    #[serde(default)]
    deployments: Vec<Deployment>,
}

/// HTTP client for the Vercel API.
pub struct VercelClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl VercelClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Fetch the most recent deployment, or `None` when the account has
    /// no deployments at all.
    pub async fn latest_deployment(&self) -> Result<Option<Deployment>, ApiError> {
        let url = format!("{}/v6/deployments?limit=1", self.base_url);
        let response = self.get(&url).await?;
        let body: DeploymentsResponse = response
            .json()
            .await
            .map_err(|source| ApiError::from_reqwest(&url, source))?;

        Ok(body.deployments.into_iter().next())
    }

    /// Fetch the raw event log for a deployment.
    ///
    /// The endpoint returns newline-delimited text rather than a single
    /// JSON document, so the body is handed back untouched.
    pub async fn deployment_events(&self, id: &str) -> Result<String, ApiError> {
        let url = format!("{}/v2/deployments/{id}/events", self.base_url);
        let response = self.get(&url).await?;
        response
            .text()
            .await
            .map_err(|source| ApiError::from_reqwest(&url, source))
    }

    /// Issue an authenticated GET, rejecting non-2xx responses.
    async fn get(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        let response = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await
            .map_err(|source| ApiError::from_reqwest(url, source))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_requires_only_id() {
        let dep: Deployment = serde_json::from_str(r#"{"id": "dep_123"}"#).unwrap();
        assert_eq!(dep.id, "dep_123");
        assert_eq!(dep.name, None);
        assert_eq!(dep.state, None);
        assert_eq!(dep.created, None);
    }

    #[test]
    fn test_deployment_accepts_uid_spelling() {
        let dep: Deployment = serde_json::from_str(r#"{"uid": "dep_456"}"#).unwrap();
        assert_eq!(dep.id, "dep_456");
    }

    #[test]
    fn test_deployment_missing_id_is_an_error() {
        assert!(serde_json::from_str::<Deployment>(r#"{"name": "my-app"}"#).is_err());
    }

    #[test]
    fn test_deployment_parses_context_fields() {
        let dep: Deployment = serde_json::from_str(
            r#"{"id": "dep_123", "name": "my-app", "state": "ERROR", "created": 1700000000000}"#,
        )
        .unwrap();

        assert_eq!(dep.name.as_deref(), Some("my-app"));
        assert_eq!(dep.state.as_deref(), Some("ERROR"));
        assert_eq!(dep.created.unwrap().timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_deployment_ignores_unknown_fields() {
        let dep: Deployment = serde_json::from_str(
            r#"{"id": "dep_123", "url": "my-app.vercel.app", "creator": {"uid": "u1"}}"#,
        )
        .unwrap();
        assert_eq!(dep.id, "dep_123");
    }

    #[test]
    fn test_deployments_response_missing_key_is_empty() {
        let resp: DeploymentsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.deployments.is_empty());
    }

    #[test]
    fn test_deployments_response_empty_list() {
        let resp: DeploymentsResponse = serde_json::from_str(r#"{"deployments": []}"#).unwrap();
        assert!(resp.deployments.is_empty());
    }

    #[test]
    fn test_deployments_response_preserves_order() {
        let resp: DeploymentsResponse =
            serde_json::from_str(r#"{"deployments": [{"id": "dep_1"}, {"id": "dep_2"}]}"#).unwrap();
        assert_eq!(resp.deployments.first().unwrap().id, "dep_1");
    }

    #[test]
    fn test_client_builds_from_config() {
        let config = crate::testutil::test_config("http://127.0.0.1:9");
        assert!(VercelClient::new(&config).is_ok());
    }

    #[test]
    fn test_timeout_error_names_url() {
        let err = ApiError::Timeout {
            url: "http://api.test/v6/deployments?limit=1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request to http://api.test/v6/deployments?limit=1 timed out"
        );
    }

    #[test]
    fn test_status_error_includes_status_and_body() {
        let err = ApiError::Status {
            url: "http://api.test/v6/deployments?limit=1".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "upstream exploded".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("500"), "missing status in: {message}");
        assert!(
            message.contains("upstream exploded"),
            "missing body in: {message}"
        );
    }
}
