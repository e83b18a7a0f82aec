//! Jira REST integration for the worklog poster.
//!
//! One capability: creating a worklog against an issue via
//! `POST /rest/api/2/issue/{ticket}/worklog`.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use tlp_core::TicketId;

/// Default request timeout for worklog calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const WORKLOG_API_PATH: &str = "/rest/api/2/issue";

/// Worklog client errors.
#[derive(Debug, Error)]
pub enum WorklogError {
    /// The provided authorization token was invalid.
    #[error("invalid authorization token: {reason}")]
    InvalidToken { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The tracker returned a non-success status.
    #[error("tracker rejected worklog: {status}\n{body}")]
    Rejected { status: u16, body: String },
}

/// Jira worklog client.
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client for the given tracker base URL and token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or whitespace-only, or if the
    /// HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, WorklogError> {
        let token = token.into();

        if token.is_empty() {
            return Err(WorklogError::InvalidToken {
                reason: "token cannot be empty",
            });
        }
        if token.trim().is_empty() {
            return Err(WorklogError::InvalidToken {
                reason: "token cannot be whitespace-only",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(WorklogError::ClientBuild)?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Creates one worklog against a ticket.
    ///
    /// `time_spent` is the workload string (e.g. `"1h 30m"`) and `started`
    /// the tracker-formatted start timestamp. A response status of 300 or
    /// above is a rejection; its body is captured for diagnostics.
    pub async fn post_worklog(
        &self,
        ticket: &TicketId,
        time_spent: &str,
        started: &str,
    ) -> Result<(), WorklogError> {
        let request = WorklogRequest {
            time_spent,
            started,
        };

        let response = self
            .http
            .post(self.worklog_url(ticket))
            .header("authorization", &self.token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() >= 300 {
            let body = response.text().await.unwrap_or_default();
            return Err(WorklogError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    fn worklog_url(&self, ticket: &TicketId) -> String {
        format!("{}{WORKLOG_API_PATH}/{ticket}/worklog", self.base_url)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WorklogRequest<'a> {
    time_spent: &'a str,
    started: &'a str,
}
