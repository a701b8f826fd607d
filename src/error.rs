//! Error taxonomy for notice retrieval.

use thiserror::Error;

/// Result type alias for notice retrieval operations.
pub type Result<T> = std::result::Result<T, NoticeError>;

/// What: Every way a single retrieval can fail.
///
/// Details:
/// - Missing fields on individual notices are not errors; those records are dropped instead.
/// - Nothing here is retried; each variant is a terminal outcome of one call.
#[derive(Debug, Error)]
pub enum NoticeError {
    /// Network, timeout or body-read failure. Displays the underlying message unmodified.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The portal answered with something other than `200 OK`.
    #[error("Unable to connect to KAMAR, responded with: {status} {reason}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: u16,
        /// Canonical reason phrase, empty when unknown.
        reason: String,
    },

    /// The response body is not well-formed XML.
    #[error("Invalid xml response from server: {0}")]
    MalformedXml(String),

    /// The document has no top-level `NoticesResults` element.
    #[error("Invalid response from KAMAR: missing NoticesResults")]
    MissingRoot,

    /// The portal reported an error of its own; the message is passed through verbatim.
    #[error("{0}")]
    Upstream(String),
}

impl NoticeError {
    /// What: Short, stable label for the failure kind.
    ///
    /// Output:
    /// - One of `transport`, `http_status`, `malformed_xml`, `missing_root`, `upstream`.
    ///
    /// Details:
    /// - Used as a structured `tracing` field so log filters do not depend on message text.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::HttpStatus { .. } => "http_status",
            Self::MalformedXml(_) => "malformed_xml",
            Self::MissingRoot => "missing_root",
            Self::Upstream(_) => "upstream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NoticeError;

    #[test]
    /// What: Status errors carry the numeric code and reason in their message.
    ///
    /// Inputs:
    /// - `HttpStatus` with 500 / "Internal Server Error".
    ///
    /// Output:
    /// - Display text contains both parts; kind is `http_status`.
    fn http_status_message_includes_code_and_reason() {
        let err = NoticeError::HttpStatus {
            status: 500,
            reason: "Internal Server Error".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("Internal Server Error"));
        assert_eq!(err.kind(), "http_status");
    }

    #[test]
    fn upstream_message_is_verbatim() {
        let err = NoticeError::Upstream("Invalid Key".to_string());
        assert_eq!(err.to_string(), "Invalid Key");
        assert_eq!(err.kind(), "upstream");
    }
}
