use serde::Serialize;

pub const OPEN_MARKER: &str = "{{highlighted}}";
pub const CLOSE_MARKER: &str = "{{/highlighted}}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSegment {
    pub text: String,
    pub emphasized: bool,
}

impl HighlightSegment {
    fn new(text: &str, emphasized: bool) -> Self {
        Self {
            text: text.to_string(),
            emphasized,
        }
    }
}

/// Splits `text` on the highlight markers.
///
/// Markers produce no text of their own. An opening marker that is never
/// closed leaves the rest of the string emphasized.
pub fn split_highlights(text: &str) -> Vec<HighlightSegment> {
    let mut segments = Vec::new();
    let mut emphasized = false;
    let mut rest = text.trim();

    loop {
        let open = rest.find(OPEN_MARKER).map(|i| (i, OPEN_MARKER, true));
        let close = rest.find(CLOSE_MARKER).map(|i| (i, CLOSE_MARKER, false));
        let next = match (open, close) {
            (Some(o), Some(c)) => Some(if o.0 <= c.0 { o } else { c }),
            (o, c) => o.or(c),
        };

        let Some((at, marker, opens)) = next else {
            push_chunk(&mut segments, rest, emphasized);
            break;
        };
        push_chunk(&mut segments, &rest[..at], emphasized);
        emphasized = opens;
        rest = &rest[at + marker.len()..];
    }

    segments
}

fn push_chunk(segments: &mut Vec<HighlightSegment>, chunk: &str, emphasized: bool) {
    if !chunk.trim().is_empty() {
        segments.push(HighlightSegment::new(chunk, emphasized));
    }
}

/// Concatenated text without markers.
pub fn plain_text(segments: &[HighlightSegment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_markers_is_single_plain_segment() {
        let segments = split_highlights("  GDP grew 7% in Q2.  ");
        assert_eq!(segments, vec![HighlightSegment::new("GDP grew 7% in Q2.", false)]);
    }

    #[test]
    fn test_paired_markers() {
        let segments = split_highlights("{{highlighted}}A{{/highlighted}}B");
        assert_eq!(
            segments,
            vec![HighlightSegment::new("A", true), HighlightSegment::new("B", false)]
        );
    }

    #[test]
    fn test_inner_spacing_is_kept() {
        let segments = split_highlights("The {{highlighted}}repo rate{{/highlighted}} was cut");
        assert_eq!(plain_text(&segments), "The repo rate was cut");
        assert_eq!(segments.len(), 3);
        assert!(segments[1].emphasized);
    }

    #[test]
    fn test_whitespace_chunks_dropped() {
        let segments = split_highlights("{{highlighted}} {{/highlighted}}x{{highlighted}}   ");
        assert_eq!(segments, vec![HighlightSegment::new("x", false)]);
        assert!(split_highlights("").is_empty());
    }

    #[test]
    fn test_unterminated_marker_runs_to_end() {
        let segments = split_highlights("before {{highlighted}}after and more");
        assert_eq!(
            segments,
            vec![
                HighlightSegment::new("before ", false),
                HighlightSegment::new("after and more", true),
            ]
        );
    }

    #[test]
    fn test_stray_close_marker() {
        let segments = split_highlights("a{{/highlighted}}b");
        assert_eq!(
            segments,
            vec![HighlightSegment::new("a", false), HighlightSegment::new("b", false)]
        );
    }
}
