use thiserror::Error;

/// Errors raised while resolving a reference or retrieving a transcript.
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("no video reference was provided")]
    MissingInput,

    #[error("could not parse a video id from {input:?}")]
    InvalidInput { input: String },

    #[error("video {video_id} is unavailable")]
    VideoUnavailable { video_id: String },

    #[error("transcripts are disabled for video {video_id}")]
    TranscriptsDisabled { video_id: String },

    #[error(
        "no transcript for video {video_id} in {requested}; available: {available}"
    )]
    LanguageUnavailable {
        video_id: String,
        requested: String,
        available: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TranscriptError>;
