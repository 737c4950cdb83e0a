use url::Url;

use crate::{
    error::{Result, TranscriptError},
    types::VideoId,
};

/// Extract a YouTube video id from a full watch URL, a youtu.be short URL,
/// or a bare 11-character id.
pub fn extract_video_id(input: &str) -> Result<VideoId> {
    if input.is_empty() {
        return Err(TranscriptError::MissingInput);
    }

    if let Ok(parsed) = Url::parse(input) {
        match parsed.host_str() {
            Some("youtu.be") => {
                return Ok(VideoId::new(parsed.path().trim_start_matches('/')));
            }
            Some(host) if host.contains("youtube.com") => {
                return parsed
                    .query_pairs()
                    .find(|(key, value)| key == "v" && !value.is_empty())
                    .map(|(_, value)| VideoId::new(value.into_owned()))
                    .ok_or_else(|| TranscriptError::InvalidInput {
                        input: input.to_string(),
                    });
            }
            _ => {}
        }
    }

    // Not a recognized URL; accept the input itself when it has the id shape.
    if is_id_shaped(input) {
        return Ok(VideoId::new(input));
    }

    Err(TranscriptError::InvalidInput {
        input: input.to_string(),
    })
}

/// Eleven characters of `[a-zA-Z0-9_-]`, checked without a regex dependency.
fn is_id_shaped(input: &str) -> bool {
    input.len() == 11
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
