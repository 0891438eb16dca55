//! Video link value object for online sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{SessionId, ValidationError};

/// Join URL for an online session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoLink(String);

impl VideoLink {
    /// Creates a video link from an existing URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ValidationError> {
        let url = url.into();
        if url.is_empty() {
            return Err(ValidationError::empty_field("video_link"));
        }
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(ValidationError::invalid_format(
                "video_link",
                "expected an http(s) URL",
            ));
        }
        Ok(Self(url))
    }

    /// Synthesizes the meeting room URL for a session.
    pub fn for_session(id: &SessionId) -> Self {
        Self(format!("https://meet.jit.si/session-{}", id))
    }

    /// Returns the URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_session_embeds_the_session_id() {
        let id = SessionId::new();
        let link = VideoLink::for_session(&id);
        assert!(link.as_str().contains(&id.to_string()));
        assert!(link.as_str().starts_with("https://meet.jit.si/session-"));
    }

    #[test]
    fn rejects_empty_url() {
        assert!(VideoLink::new("").is_err());
    }

    #[test]
    fn rejects_non_http_url() {
        assert!(VideoLink::new("ftp://example.com/room").is_err());
    }

    #[test]
    fn accepts_https_url() {
        let link = VideoLink::new("https://example.com/room").unwrap();
        assert_eq!(link.as_str(), "https://example.com/room");
    }
}
