use serde::{Deserialize, Serialize};

/// A single time-coded caption cue.
///
/// Timecodes are kept verbatim as they appeared in the source text; this
/// module does no time arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub start: String,
    pub end: String,
    pub text: String,
}

/// Parse line-oriented WebVTT text into ordered cues.
///
/// The parser never fails: malformed input degrades to fewer cues. Rules,
/// applied per trimmed line:
/// - `WEBVTT` headers and `NOTE` comments are skipped;
/// - a blank line closes the open cue (kept only if its text is non-empty);
/// - a line containing `-->` opens a new cue from the trimmed halves,
///   silently discarding any open cue that never saw its blank separator;
/// - any other non-blank line appends to the open cue's text, space-joined.
///
/// EOF acts as an implicit cue close.
pub fn parse_vtt(text: &str) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut current: Option<Cue> = None;

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if let Some(cue) = current.take() {
                if !cue.text.is_empty() {
                    cues.push(cue);
                }
            }
            continue;
        }

        if trimmed.starts_with("WEBVTT") || trimmed.starts_with("NOTE") {
            continue;
        }

        if let Some((start, end)) = trimmed.split_once("-->") {
            // Last cue wins if the previous one was never closed.
            current = Some(Cue {
                start: start.trim().to_string(),
                end: end.trim().to_string(),
                text: String::new(),
            });
        } else if let Some(cue) = current.as_mut() {
            if !cue.text.is_empty() {
                cue.text.push(' ');
            }
            cue.text.push_str(trimmed);
        }
    }

    if let Some(cue) = current {
        if !cue.text.is_empty() {
            cues.push(cue);
        }
    }

    cues
}

/// Quick check that a response body looks like caption content rather than
/// an error page. Used by probe-based strategies to accept a hit.
pub fn looks_like_vtt(body: &str) -> bool {
    body.contains("WEBVTT") || body.contains("-->")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(start: &str, end: &str, text: &str) -> Cue {
        Cue {
            start: start.to_string(),
            end: end.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_two_cue_document() {
        let cues = parse_vtt(
            "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello world\n\n00:00:02.000 --> 00:00:03.000\nFoo bar\n",
        );
        assert_eq!(
            cues,
            vec![
                cue("00:00:01.000", "00:00:02.000", "Hello world"),
                cue("00:00:02.000", "00:00:03.000", "Foo bar"),
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_no_cues() {
        assert!(parse_vtt("").is_empty());
    }

    #[test]
    fn test_eof_closes_open_cue() {
        let cues = parse_vtt("WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nNo trailing blank line");
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "No trailing blank line");
    }

    #[test]
    fn test_multiline_cue_text_space_joined() {
        let cues = parse_vtt("00:01.000 --> 00:02.000\nfirst line\nsecond line\n");
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "first line second line");
    }

    #[test]
    fn test_note_and_header_lines_skipped() {
        let cues = parse_vtt(
            "WEBVTT - with metadata\nNOTE this is a comment\n\n00:01.000 --> 00:02.000\nHello\n",
        );
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Hello");
    }

    #[test]
    fn test_empty_text_cue_dropped() {
        let cues = parse_vtt("00:01.000 --> 00:02.000\n\n00:03.000 --> 00:04.000\nKept\n");
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Kept");
    }

    #[test]
    fn test_unclosed_cue_overwritten_by_next_range() {
        // No blank line between the ranges: the first cue never closed, so
        // the second range discards it along with its text.
        let cues = parse_vtt("00:01.000 --> 00:02.000\nlost\n00:03.000 --> 00:04.000\nkept\n");
        assert_eq!(cues, vec![cue("00:03.000", "00:04.000", "kept")]);
    }

    #[test]
    fn test_trailing_whitespace_tolerated() {
        let cues = parse_vtt("00:01.000 --> 00:02.000   \n   padded text   \n\n");
        assert_eq!(cues, vec![cue("00:01.000", "00:02.000", "padded text")]);
    }

    #[test]
    fn test_reparse_of_rendered_cues_is_idempotent() {
        let original = parse_vtt(
            "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello world\n\n00:00:02.000 --> 00:00:03.000\nFoo bar\n",
        );
        let rendered: String = original
            .iter()
            .map(|c| format!("{} --> {}\n{}\n\n", c.start, c.end, c.text))
            .collect();
        assert_eq!(parse_vtt(&rendered), original);
    }

    #[test]
    fn test_looks_like_vtt() {
        assert!(looks_like_vtt("WEBVTT\n"));
        assert!(looks_like_vtt("00:01 --> 00:02\nhi"));
        assert!(!looks_like_vtt("<html>404</html>"));
    }
}
