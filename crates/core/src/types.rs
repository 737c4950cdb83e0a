use std::fmt;

use serde::{Deserialize, Serialize};

/// An 11-character YouTube video identifier.
///
/// Constructed by [`crate::video_id::extract_video_id`]; the token itself is
/// opaque and carries no further structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One timed unit of transcript text as returned by the source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    /// Offset from the start of the video, in seconds.
    pub start: f64,
    /// How long the segment stays on screen, in seconds.
    pub duration: f64,
}
