use serde::{Deserialize, Serialize};

/// Structured result streamed back by the speech-to-text service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionResult {
    /// Position of this result in the stream of partial results
    pub result_index: i64,

    /// Segments in arrival order
    pub results: Vec<ResultSegment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultSegment {
    /// Candidate transcriptions, best first
    pub alternatives: Vec<Alternative>,

    /// True once the service will not revise this segment
    #[serde(rename = "final")]
    pub is_final: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alternative {
    pub transcript: String,

    #[serde(rename = "confidence")]
    pub overall_confidence: f64,

    /// `[word, confidence]` pairs
    pub word_confidence: Vec<(String, f64)>,

    /// `[word, start_secs, end_secs]` triples
    pub timestamps: Vec<(String, f64, f64)>,
}

impl TranscriptionResult {
    /// A result with at least one segment ends the read loop
    pub fn is_terminal(&self) -> bool {
        !self.results.is_empty()
    }

    pub fn transcript(&self) -> String {
        get_transcript(self)
    }
}

/// Concatenate the best alternative of every segment, in order, with no separator.
///
/// Segments without alternatives contribute nothing.
pub fn get_transcript(result: &TranscriptionResult) -> String {
    result
        .results
        .iter()
        .filter_map(|segment| segment.alternatives.first())
        .map(|alt| alt.transcript.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> ResultSegment {
        ResultSegment {
            alternatives: vec![Alternative {
                transcript: text.to_string(),
                ..Default::default()
            }],
            is_final: true,
        }
    }

    #[test]
    fn test_concatenates_segments_without_separator() {
        let result = TranscriptionResult {
            result_index: 0,
            results: vec![segment("good "), segment("morning")],
        };

        assert_eq!(get_transcript(&result), "good morning");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let result = TranscriptionResult {
            result_index: 3,
            results: vec![segment("a"), segment("b"), segment("c")],
        };

        assert_eq!(get_transcript(&result), get_transcript(&result));
        assert_eq!(result.transcript(), "abc");
    }

    #[test]
    fn test_only_first_alternative_is_used() {
        let mut seg = segment("best");
        seg.alternatives.push(Alternative {
            transcript: "runner-up".to_string(),
            ..Default::default()
        });
        let result = TranscriptionResult {
            result_index: 0,
            results: vec![seg],
        };

        assert_eq!(get_transcript(&result), "best");
    }

    #[test]
    fn test_segment_without_alternatives_is_skipped() {
        let result = TranscriptionResult {
            result_index: 0,
            results: vec![segment("one "), ResultSegment::default(), segment("two")],
        };

        assert_eq!(get_transcript(&result), "one two");
    }

    #[test]
    fn test_decodes_full_service_payload() {
        let json = r#"{
            "result_index": 2,
            "results": [{
                "final": true,
                "alternatives": [{
                    "transcript": "hello world ",
                    "confidence": 0.92,
                    "word_confidence": [["hello", 0.95], ["world", 0.89]],
                    "timestamps": [["hello", 0.0, 0.41], ["world", 0.41, 0.9]]
                }]
            }]
        }"#;

        let result: TranscriptionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.result_index, 2);
        assert!(result.is_terminal());

        let segment = &result.results[0];
        assert!(segment.is_final);

        let alt = &segment.alternatives[0];
        assert_eq!(alt.overall_confidence, 0.92);
        assert_eq!(alt.word_confidence[1], ("world".to_string(), 0.89));
        assert_eq!(alt.timestamps[0], ("hello".to_string(), 0.0, 0.41));
        assert_eq!(result.transcript(), "hello world ");
    }

    #[test]
    fn test_status_message_decodes_as_empty_result() {
        let result: TranscriptionResult =
            serde_json::from_str(r#"{"state": "listening"}"#).unwrap();

        assert!(!result.is_terminal());
        assert_eq!(result.result_index, 0);
    }
}
