//! Session modality.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the session is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    Online,
    InPerson,
}

impl Modality {
    /// Online sessions carry a video link, in-person ones never do.
    pub fn requires_video_link(&self) -> bool {
        matches!(self, Modality::Online)
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modality::Online => "ONLINE",
            Modality::InPerson => "IN_PERSON",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_online_requires_video_link() {
        assert!(Modality::Online.requires_video_link());
        assert!(!Modality::InPerson.requires_video_link());
    }

    #[test]
    fn round_trips_through_json() {
        assert_eq!(serde_json::to_string(&Modality::Online).unwrap(), "\"ONLINE\"");
        let m: Modality = serde_json::from_str("\"IN_PERSON\"").unwrap();
        assert_eq!(m, Modality::InPerson);
    }
}
