//! YouTube transcript retrieval core.
//!
//! Turns heterogeneous video references (watch URLs, youtu.be short URLs,
//! bare ids) into a canonical [`VideoId`], fetches the video's caption track
//! in a requested language, and flattens the timed segments into plain text.

pub mod error;
pub mod format;
pub mod source;
pub mod types;
pub mod video_id;
pub mod youtube;

// Re-export commonly used items at crate root
pub use error::{Result, TranscriptError};
pub use format::format_transcript;
pub use source::TranscriptSource;
pub use types::{TranscriptSegment, VideoId};
pub use video_id::extract_video_id;
pub use youtube::YoutubeTranscriptClient;
