//! Transcript retrieval against YouTube's public watch pages.
//!
//! YouTube embeds the player response, including the available caption
//! tracks, as JSON inside the watch page HTML. Fetching a track's `baseUrl`
//! with `fmt=json3` returns the transcript as timed events.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{Result, TranscriptError},
    source::TranscriptSource,
    types::{TranscriptSegment, VideoId},
};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const CAPTION_TRACKS_MARKER: &str = "\"captionTracks\":";

// YouTube serves a stripped-down page without the player response to
// unrecognized clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// One caption track entry from the player response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    /// `"asr"` marks auto-generated tracks; manually created ones carry no kind.
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

#[derive(Debug, Deserialize)]
struct TimedTextBody {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimedTextEvent {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    /// Text runs; absent on window-styling events.
    segs: Option<Vec<TimedTextSeg>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

/// Transcript source backed by youtube.com.
pub struct YoutubeTranscriptClient {
    http: reqwest::Client,
}

impl YoutubeTranscriptClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http })
    }

    async fn fetch_watch_page(&self, video_id: &VideoId) -> Result<String> {
        let url = format!("{WATCH_URL}{video_id}");
        let body = self
            .http
            .get(&url)
            .header("Accept-Language", "en-US")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }

    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<TranscriptSegment>> {
        let url = format!("{}&fmt=json3", track.base_url);
        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_timed_text(&body)
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptClient {
    async fn fetch(
        &self,
        video_id: &VideoId,
        languages: &[String],
    ) -> Result<Vec<TranscriptSegment>> {
        let page = self.fetch_watch_page(video_id).await?;
        let tracks = extract_caption_tracks(&page, video_id)?;
        let track = select_track(&tracks, languages, video_id)?;
        debug!(
            video_id = %video_id,
            language = %track.language_code,
            generated = track.is_generated(),
            "fetching caption track"
        );
        self.fetch_track(track).await
    }
}

/// Pull the `"captionTracks"` array out of the watch page HTML.
fn extract_caption_tracks(page: &str, video_id: &VideoId) -> Result<Vec<CaptionTrack>> {
    let Some(marker) = page.find(CAPTION_TRACKS_MARKER) else {
        if page.contains("Video unavailable") {
            return Err(TranscriptError::VideoUnavailable {
                video_id: video_id.to_string(),
            });
        }
        return Err(TranscriptError::TranscriptsDisabled {
            video_id: video_id.to_string(),
        });
    };
    let rest = &page[marker + CAPTION_TRACKS_MARKER.len()..];
    let array = json_array_at(rest).ok_or_else(|| TranscriptError::TranscriptsDisabled {
        video_id: video_id.to_string(),
    })?;
    Ok(serde_json::from_str(array)?)
}

/// Slice out the balanced `[...]` JSON array `rest` starts with.
///
/// Bracket counting must ignore brackets inside string literals, and
/// backslash escapes within those literals.
fn json_array_at(rest: &str) -> Option<&str> {
    if !rest.starts_with('[') {
        return None;
    }
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Pick the first requested language that has a track, preferring manually
/// created tracks over auto-generated ones.
fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[String],
    video_id: &VideoId,
) -> Result<&'a CaptionTrack> {
    for lang in languages {
        if let Some(track) = tracks
            .iter()
            .find(|t| t.language_code == *lang && !t.is_generated())
        {
            return Ok(track);
        }
        if let Some(track) = tracks.iter().find(|t| t.language_code == *lang) {
            return Ok(track);
        }
    }
    Err(TranscriptError::LanguageUnavailable {
        video_id: video_id.to_string(),
        requested: languages.join(", "),
        available: tracks
            .iter()
            .map(|t| t.language_code.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Decode a `fmt=json3` timed-text payload into transcript segments.
fn parse_timed_text(body: &str) -> Result<Vec<TranscriptSegment>> {
    let parsed: TimedTextBody = serde_json::from_str(body)?;
    let segments = parsed
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs?.into_iter().map(|seg| seg.utf8).collect();
            if text.trim().is_empty() {
                return None;
            }
            Some(TranscriptSegment {
                text,
                start: event.t_start_ms as f64 / 1000.0,
                duration: event.d_duration_ms as f64 / 1000.0,
            })
        })
        .collect();
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract_video_id;

    const PAGE_EXCERPT: &str = r#"<script>var ytInitialPlayerResponse = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=dQw4w9WgXcQ\u0026lang=en","name":{"simpleText":"English"},"vssId":".en","languageCode":"en","isTranslatable":true},{"baseUrl":"https://www.youtube.com/api/timedtext?v=dQw4w9WgXcQ\u0026lang=ko\u0026kind=asr","name":{"simpleText":"Korean (auto-generated)"},"vssId":"a.ko","languageCode":"ko","kind":"asr"}],"audioTracks":[]}}};</script>"#;

    fn video_id() -> VideoId {
        extract_video_id("dQw4w9WgXcQ").unwrap()
    }

    fn track(lang: &str, kind: Option<&str>) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://www.youtube.com/api/timedtext?lang={lang}"),
            language_code: lang.to_string(),
            kind: kind.map(str::to_string),
        }
    }

    #[test]
    fn caption_tracks_are_extracted_from_the_page() {
        let tracks = extract_caption_tracks(PAGE_EXCERPT, &video_id()).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].language_code, "en");
        assert!(!tracks[0].is_generated());
        // \u0026 escapes decode to plain ampersands
        assert!(tracks[0].base_url.ends_with("v=dQw4w9WgXcQ&lang=en"));
        assert!(tracks[1].is_generated());
    }

    #[test]
    fn page_without_tracks_means_transcripts_disabled() {
        let err = extract_caption_tracks("<html>no captions here</html>", &video_id());
        assert!(matches!(
            err,
            Err(TranscriptError::TranscriptsDisabled { .. })
        ));
    }

    #[test]
    fn unavailable_video_is_reported_distinctly() {
        let err = extract_caption_tracks("<title>Video unavailable</title>", &video_id());
        assert!(matches!(err, Err(TranscriptError::VideoUnavailable { .. })));
    }

    #[test]
    fn brackets_inside_strings_do_not_confuse_the_slicer() {
        let input = r#"[{"a":"tricky ] bracket \" quote"},{"b":[1,2]}] trailing"#;
        assert_eq!(
            json_array_at(input),
            Some(r#"[{"a":"tricky ] bracket \" quote"},{"b":[1,2]}]"#)
        );
    }

    #[test]
    fn manual_track_beats_generated_track() {
        let tracks = [track("en", Some("asr")), track("en", None)];
        let selected = select_track(&tracks, &["en".to_string()], &video_id()).unwrap();
        assert!(!selected.is_generated());
    }

    #[test]
    fn requested_language_order_is_respected() {
        let tracks = [track("en", None), track("ko", None)];
        let selected =
            select_track(&tracks, &["ko".to_string(), "en".to_string()], &video_id()).unwrap();
        assert_eq!(selected.language_code, "ko");
    }

    #[test]
    fn generated_track_is_used_when_nothing_else_matches() {
        let tracks = [track("en", Some("asr"))];
        let selected = select_track(&tracks, &["en".to_string()], &video_id()).unwrap();
        assert!(selected.is_generated());
    }

    #[test]
    fn missing_language_lists_what_is_available() {
        let tracks = [track("en", None), track("de", None)];
        match select_track(&tracks, &["ko".to_string()], &video_id()) {
            Err(TranscriptError::LanguageUnavailable {
                requested,
                available,
                ..
            }) => {
                assert_eq!(requested, "ko");
                assert_eq!(available, "en, de");
            }
            other => panic!("expected LanguageUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn timed_text_events_become_segments() {
        let body = r#"{"wireMagic":"pb3","events":[
            {"tStartMs":0,"dDurationMs":5000,"id":1},
            {"tStartMs":120,"dDurationMs":2280,"segs":[{"utf8":"Never"},{"utf8":" gonna"}]},
            {"tStartMs":2400,"dDurationMs":100,"segs":[{"utf8":"\n"}]},
            {"tStartMs":3400,"dDurationMs":2000,"segs":[{"utf8":"give you up"}]}
        ]}"#;
        let segments = parse_timed_text(body).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "Never gonna");
        assert!((segments[0].start - 0.12).abs() < 1e-9);
        assert!((segments[0].duration - 2.28).abs() < 1e-9);
        assert_eq!(segments[1].text, "give you up");
    }

    #[test]
    fn garbage_timed_text_is_a_json_error() {
        assert!(matches!(
            parse_timed_text("<transcript/>"),
            Err(TranscriptError::Json(_))
        ));
    }
}
