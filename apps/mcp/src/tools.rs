//! The `get_transcript` tool: definition and handler.

use serde::Deserialize;
use serde_json::json;
use tracing::warn;
use yt_transcript_core::{Result, TranscriptSource, extract_video_id, format_transcript};

use crate::protocol::Tool;

pub const GET_TRANSCRIPT: &str = "get_transcript";

fn default_lang() -> String {
    "en".to_string()
}

/// Arguments accepted by `tools/call` for `get_transcript`.
#[derive(Debug, Deserialize)]
pub struct GetTranscriptArgs {
    /// YouTube video URL or bare id.
    pub url: String,
    /// Transcript language code (e.g. "ko", "en").
    #[serde(default = "default_lang")]
    pub lang: String,
}

/// All tools this server exposes.
pub fn definitions() -> Vec<Tool> {
    vec![Tool {
        name: GET_TRANSCRIPT.to_string(),
        description: "Extract the transcript of a YouTube video as plain text. \
                      Accepts a full watch URL, a youtu.be short URL, or a bare video id."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "YouTube video URL or ID"
                },
                "lang": {
                    "type": "string",
                    "description": "Language code for the transcript (e.g. 'ko', 'en')",
                    "default": "en"
                }
            },
            "required": ["url"]
        }),
    }]
}

/// Run the tool. Never fails: every error is rendered into the returned
/// string, so at the transport level a failed lookup is indistinguishable
/// from a successful call.
pub async fn get_transcript<S: TranscriptSource>(source: &S, args: &GetTranscriptArgs) -> String {
    match retrieve(source, args).await {
        Ok(text) => text,
        Err(e) => {
            warn!(url = %args.url, lang = %args.lang, error = %e, "transcript retrieval failed");
            format!("Failed to retrieve transcript: {e}")
        }
    }
}

async fn retrieve<S: TranscriptSource>(source: &S, args: &GetTranscriptArgs) -> Result<String> {
    let video_id = extract_video_id(&args.url)?;
    let segments = source
        .fetch(&video_id, std::slice::from_ref(&args.lang))
        .await?;
    Ok(format_transcript(&segments))
}
