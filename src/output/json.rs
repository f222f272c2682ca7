use std::io::Write;

use serde::Serialize;

use super::FormatWriter;
use crate::transcribe::{Segment, TranscriptMetadata};
use crate::Result;

/// JSON writer: a single object with `transcript` and `metadata` keys.
///
/// Segment ids are 0-based and all timing values serialize as JSON numbers.
/// The `transcript` array is identical between file and stdout modes; only
/// `metadata.source` differs (the caller substitutes the sentinel).
pub struct JsonWriter;

#[derive(Serialize)]
struct JsonDocument<'a> {
    transcript: &'a [Segment],
    metadata: &'a TranscriptMetadata,
}

impl FormatWriter for JsonWriter {
    fn render(
        &self,
        segments: &[Segment],
        metadata: &TranscriptMetadata,
        sink: &mut dyn Write,
    ) -> Result<()> {
        let document = JsonDocument {
            transcript: segments,
            metadata,
        };

        serde_json::to_writer_pretty(&mut *sink, &document)?;
        writeln!(sink)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::{sample_metadata, sample_segments};

    fn render_to_value(metadata: &TranscriptMetadata) -> serde_json::Value {
        let mut buf = Vec::new();
        JsonWriter
            .render(&sample_segments(), metadata, &mut buf)
            .unwrap();
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn test_json_structure() {
        let value = render_to_value(&sample_metadata());

        let transcript = value["transcript"].as_array().unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0]["id"], 0);
        assert_eq!(transcript[1]["id"], 1);
        assert_eq!(transcript[0]["start"], 0.0);
        assert_eq!(transcript[0]["end"], 7.0);
        assert_eq!(
            transcript[0]["text"],
            " VoxDus is a command line tool..."
        );

        let metadata = value["metadata"].as_object().unwrap();
        let mut keys: Vec<&str> = metadata.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["duration", "language", "model", "source", "title"]);
        assert_eq!(metadata["duration"], 12.5);
    }

    #[test]
    fn test_json_numbers_not_strings() {
        let value = render_to_value(&sample_metadata());
        let first = &value["transcript"][0];
        assert!(first["start"].is_number());
        assert!(first["end"].is_number());
        assert!(first["id"].is_u64());
        assert!(value["metadata"]["duration"].is_number());
    }

    #[test]
    fn test_transcript_identical_across_source_values() {
        let file_value = render_to_value(&sample_metadata());

        let mut stdout_metadata = sample_metadata();
        stdout_metadata.source = "unknown".to_string();
        let stdout_value = render_to_value(&stdout_metadata);

        assert_eq!(file_value["transcript"], stdout_value["transcript"]);
        assert_ne!(
            file_value["metadata"]["source"],
            stdout_value["metadata"]["source"]
        );
    }
}
