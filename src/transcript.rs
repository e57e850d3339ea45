use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vtt::Cue;

/// Fully assembled transcript for one video, serialized as the success
/// output record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: String,
    pub vimeo_url: String,
    /// All cue texts joined by single spaces, in cue order.
    pub text: String,
    pub transcript: Vec<Cue>,
    pub word_count: usize,
    pub cue_count: usize,
    /// Name of the strategy that produced the captions.
    pub extraction_method: String,
    pub transcript_url: String,
    pub extracted_at: DateTime<Utc>,
}

impl Transcript {
    /// Assemble a transcript from parsed cues and resolution metadata.
    pub fn from_cues(
        video_id: &str,
        source_url: &str,
        cues: Vec<Cue>,
        method: &str,
        transcript_url: &str,
    ) -> Self {
        let text = cues
            .iter()
            .map(|cue| cue.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let word_count = text.split_whitespace().count();
        let cue_count = cues.len();

        Self {
            video_id: video_id.to_string(),
            vimeo_url: source_url.to_string(),
            text,
            transcript: cues,
            word_count,
            cue_count,
            extraction_method: method.to_string(),
            transcript_url: transcript_url.to_string(),
            extracted_at: Utc::now(),
        }
    }
}

/// One output record per input URL: either a transcript or a failure note.
/// Failures never abort the rest of a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionRecord {
    Success(Transcript),
    Failure {
        video_url: String,
        error: String,
        success: bool,
        extracted_at: DateTime<Utc>,
    },
}

impl ExtractionRecord {
    pub fn failure(video_url: &str, error: impl ToString) -> Self {
        Self::Failure {
            video_url: video_url.to_string(),
            error: error.to_string(),
            success: false,
            extracted_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
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
    fn test_transcript_assembly() {
        let transcript = Transcript::from_cues(
            "1109387993",
            "https://vimeo.com/1109387993",
            vec![
                cue("00:00:01.000", "00:00:02.000", "Hello world"),
                cue("00:00:02.000", "00:00:03.000", "Foo bar"),
            ],
            "player_config",
            "https://vimeo.com/texttrack/249952628.vtt",
        );

        assert_eq!(transcript.text, "Hello world Foo bar");
        assert_eq!(transcript.word_count, 4);
        assert_eq!(transcript.cue_count, 2);
        assert_eq!(transcript.extraction_method, "player_config");
    }

    #[test]
    fn test_empty_cues_assemble_to_empty_transcript() {
        let transcript = Transcript::from_cues(
            "123456789",
            "https://vimeo.com/123456789",
            Vec::new(),
            "pattern_method",
            "https://vimeo.com/texttrack/000000.vtt",
        );
        assert_eq!(transcript.word_count, 0);
        assert_eq!(transcript.cue_count, 0);
        assert!(transcript.text.is_empty());
    }

    #[test]
    fn test_failure_record_serialization() {
        let record = ExtractionRecord::failure("https://vimeo.com/abc", "Invalid Vimeo URL");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["video_url"], "https://vimeo.com/abc");
        assert!(json["extracted_at"].is_string());
    }
}
