use std::io::Write;

use super::timecode::vtt_timestamp;
use super::FormatWriter;
use crate::transcribe::{Segment, TranscriptMetadata};
use crate::Result;

/// WebVTT writer: `WEBVTT` header, a `NOTE` metadata block, then unnumbered
/// cues with a period millisecond separator.
pub struct VttWriter;

impl FormatWriter for VttWriter {
    fn render(
        &self,
        segments: &[Segment],
        metadata: &TranscriptMetadata,
        sink: &mut dyn Write,
    ) -> Result<()> {
        writeln!(sink, "WEBVTT")?;
        writeln!(sink)?;

        writeln!(sink, "NOTE Title {}", metadata.title)?;
        writeln!(sink, "NOTE Source {}", metadata.source)?;
        writeln!(sink, "NOTE Duration {:.2}", metadata.duration)?;
        writeln!(sink, "NOTE Language {}", metadata.language)?;
        writeln!(sink, "NOTE Model {}", metadata.model)?;
        writeln!(sink)?;

        for segment in segments {
            writeln!(
                sink,
                "{} --> {}",
                vtt_timestamp(segment.start),
                vtt_timestamp(segment.end)
            )?;
            writeln!(sink, "{}", segment.text)?;
            writeln!(sink)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::{sample_metadata, sample_segments};

    fn render() -> String {
        let mut buf = Vec::new();
        VttWriter
            .render(&sample_segments(), &sample_metadata(), &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_vtt_header_and_metadata_block() {
        let output = render();
        assert!(output.starts_with("WEBVTT\n\n"));
        assert!(output.contains("NOTE Title Sample Recording"));
        assert!(output.contains("NOTE Source sample.mp3"));
        assert!(output.contains("NOTE Duration 12.50"));
        assert!(output.contains("NOTE Language en"));
        assert!(output.contains("NOTE Model small"));
    }

    #[test]
    fn test_vtt_cues_unnumbered() {
        let output = render();
        assert!(output.contains(
            "00:00:00.000 --> 00:00:07.000\n VoxDus is a command line tool...\n"
        ));
        // No bare index line precedes the timing line.
        for line in output.lines() {
            assert!(line.parse::<u32>().is_err(), "numbered cue found: {line}");
        }
    }
}
