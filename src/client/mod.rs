//! HTTP client for the portal's notices endpoint.

mod endpoint;
mod request;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::{debug, info, warn};

use crate::error::{NoticeError, Result};
use crate::model::NoticeCollection;
use crate::parse::parse_notices;

pub use endpoint::{API_PATH, endpoint_url};
pub use request::{
    AUTH_KEY, FORM_CONTENT_TYPE, KAMAR_USER_AGENT, NOTICES_COMMAND, NoticeDate, NoticeRequest,
    REQUEST_DATE_FORMAT,
};

/// What: Client bound to one portal's notices endpoint.
///
/// Details:
/// - Holds only the resolved endpoint URL and a shareable `reqwest::Client`; cloning is cheap
///   and concurrent calls do not interact.
/// - No timeout or retry is applied here. Pass a configured client to
///   [`NoticeClient::with_http_client`] to bound request time.
#[derive(Clone, Debug)]
pub struct NoticeClient {
    /// Full endpoint URL, fixed at construction.
    url: String,
    /// HTTP client used for every request.
    http: reqwest::Client,
}

impl NoticeClient {
    /// What: Create a client for `host` with a default HTTP client.
    ///
    /// Inputs:
    /// - `host`: Portal host or URL (see [`endpoint_url`]).
    /// - `use_https`: Scheme to use when `host` has none.
    #[must_use]
    pub fn new(host: &str, use_https: bool) -> Self {
        Self::with_http_client(host, use_https, reqwest::Client::new())
    }

    /// Create a client that sends requests through `http`.
    #[must_use]
    pub fn with_http_client(host: &str, use_https: bool, http: reqwest::Client) -> Self {
        let url = endpoint_url(host, use_https);
        debug!(url = %url, "notice client created");
        Self { url, http }
    }

    /// The endpoint every request is posted to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// What: Fetch and normalize the notices for one day.
    ///
    /// Inputs:
    /// - `date`: `NoticeDate::Today`, a `dd/MM/yyyy` string, or a `NaiveDate`.
    ///
    /// Output:
    /// - `Ok(NoticeCollection)` on success.
    ///
    /// # Errors
    /// - `NoticeError::Transport` when the request or body read fails
    /// - `NoticeError::HttpStatus` for any status other than `200 OK`
    /// - `NoticeError::MalformedXml`, `MissingRoot` or `Upstream` from [`parse_notices`]
    ///
    /// Details:
    /// - Sends exactly one POST; failures are returned as-is and never retried.
    pub async fn retrieve(&self, date: impl Into<NoticeDate>) -> Result<NoticeCollection> {
        let request = NoticeRequest::new(&date.into());
        debug!(url = %self.url, date = request.date(), "requesting notices");

        let response = self
            .http
            .post(&self.url)
            .header(USER_AGENT, KAMAR_USER_AGENT)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(request.encode())
            .send()
            .await
            .map_err(|e| {
                warn!(url = %self.url, error = %e, "notices request failed");
                NoticeError::from(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(url = %self.url, status = status.as_u16(), "portal returned an unexpected status");
            return Err(NoticeError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.text().await?;
        info!(bytes = body.len(), date = request.date(), "fetched notices response");
        parse_notices(&body)
    }

    /// Fetch today's notices; shorthand for `retrieve(NoticeDate::Today)`.
    ///
    /// # Errors
    /// - Same as [`NoticeClient::retrieve`]
    pub async fn retrieve_today(&self) -> Result<NoticeCollection> {
        self.retrieve(NoticeDate::Today).await
    }
}
