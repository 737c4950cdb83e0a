use crate::types::TranscriptSegment;

/// Flatten transcript segments into one readable line of text.
///
/// Each segment's text is trimmed, empty segments are dropped, and the rest
/// are joined with single spaces in the order the source returned them.
pub fn format_transcript(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|seg| seg.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str, start: f64) -> TranscriptSegment {
        TranscriptSegment {
            text: text.to_string(),
            start,
            duration: 1.0,
        }
    }

    #[test]
    fn trims_and_drops_empty_segments() {
        let segments = [segment(" Hello ", 0.0), segment("", 1.0), segment("world", 2.0)];
        assert_eq!(format_transcript(&segments), "Hello world");
    }

    #[test]
    fn empty_input_formats_to_empty_string() {
        assert_eq!(format_transcript(&[]), "");
    }

    #[test]
    fn whitespace_only_segments_are_dropped() {
        let segments = [segment("one", 0.0), segment("  \n ", 1.0), segment("two", 2.0)];
        assert_eq!(format_transcript(&segments), "one two");
    }

    #[test]
    fn source_order_is_preserved() {
        let segments = [segment("b", 5.0), segment("a", 1.0)];
        assert_eq!(format_transcript(&segments), "b a");
    }
}
