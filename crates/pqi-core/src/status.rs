//! HTTP client for the commit status API (GitHub `POST /repos/{repo}/statuses/{sha}`).

use crate::config::StatusTarget;
use crate::error::StatusError;
use crate::gate::StatusNotification;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

/// User agent for status requests. GitHub rejects requests without one.
const USER_AGENT_VALUE: &str = concat!("pqi/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Response from a successful status post.
#[derive(Debug, Clone)]
pub struct StatusResponse {
    pub status: u16,
    pub body: String,
}

/// Client for posting commit statuses. One request per call, no retry.
#[derive(Debug, Clone)]
pub struct StatusClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl StatusClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self, StatusError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        default_headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|e| StatusError::Client {
                message: e.to_string(),
            })?;

        // Normalize base URL (remove trailing slash)
        let api_url: String = api_url.into();
        let api_url = api_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            api_url,
            token: token.into(),
        })
    }

    pub fn for_target(target: &StatusTarget) -> Result<Self, StatusError> {
        Self::new(target.api_url.as_str(), target.token.as_str())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Publish a status for `sha` in `repo` (`owner/name`).
    ///
    /// Transport failures and non-2xx responses are errors.
    pub async fn post_status(
        &self,
        repo: &str,
        sha: &str,
        notification: &StatusNotification,
    ) -> Result<StatusResponse, StatusError> {
        let url = format!("{}/repos/{}/statuses/{}", self.api_url, repo, sha);
        tracing::debug!(url = %url, state = ?notification.state, "posting commit status");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .json(notification)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.map_err(|e| StatusError::Network {
            message: format!("failed to read response body: {}", e),
        })?;

        if !status.is_success() {
            return Err(StatusError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(StatusResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{GateDecision, StatusState};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn notification(state: StatusState) -> StatusNotification {
        StatusNotification {
            state,
            context: "performance-check".to_string(),
            description: "Performance score OK (115)".to_string(),
        }
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = StatusClient::new("https://ghe.example.com/api/v3/", "t").unwrap();
        assert_eq!(client.api_url(), "https://ghe.example.com/api/v3");
    }

    #[tokio::test]
    async fn test_post_status_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/octo/app/statuses/abc123"))
            .and(header("authorization", "token test-token"))
            .and(header("accept", GITHUB_JSON))
            .and(body_json(serde_json::json!({
                "state": "success",
                "context": "performance-check",
                "description": "Performance score OK (115)"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id": 1}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = StatusClient::new(mock_server.uri(), "test-token").unwrap();
        let response = client
            .post_status("octo/app", "abc123", &notification(StatusState::Success))
            .await
            .expect("post failed");

        assert_eq!(response.status, 201);
        assert_eq!(response.body, r#"{"id": 1}"#);
    }

    #[tokio::test]
    async fn test_failure_decision_is_posted() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/octo/app/statuses/abc123"))
            .and(body_json(serde_json::json!({
                "state": "failure",
                "context": "perf",
                "description": "Performance score too low (100)"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        let decision = GateDecision::evaluate(100.0, 110.0);
        let client = StatusClient::new(mock_server.uri(), "t").unwrap();
        client
            .post_status("octo/app", "abc123", &decision.notification("perf"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_2xx_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("Validation Failed"))
            .mount(&mock_server)
            .await;

        let client = StatusClient::new(mock_server.uri(), "t").unwrap();
        let err = client
            .post_status("octo/app", "abc123", &notification(StatusState::Failure))
            .await
            .unwrap_err();

        match err {
            StatusError::Rejected { status, body } => {
                assert_eq!(status, 422);
                assert_eq!(body, "Validation Failed");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let client = StatusClient::new("http://127.0.0.1:9", "t").unwrap();
        let err = client
            .post_status("octo/app", "abc123", &notification(StatusState::Success))
            .await
            .unwrap_err();
        assert!(matches!(err, StatusError::Network { .. }), "{err}");
    }
}
