use async_trait::async_trait;

use crate::{
    error::Result,
    types::{TranscriptSegment, VideoId},
};

/// A transcript lookup backend.
///
/// `languages` is an ordered preference list of language codes; the first one
/// the backend can satisfy wins. Implementations fail when the video, the
/// transcript, or the requested language is not available.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch(
        &self,
        video_id: &VideoId,
        languages: &[String],
    ) -> Result<Vec<TranscriptSegment>>;
}
