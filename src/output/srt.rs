use std::io::Write;

use super::timecode::srt_timestamp;
use super::FormatWriter;
use crate::transcribe::{Segment, TranscriptMetadata};
use crate::Result;

/// SRT writer: numbered blocks starting at 1, comma millisecond separator.
///
/// SRT has no standard metadata mechanism, so none is emitted. Block numbers
/// are independent of the 0-based JSON segment ids.
pub struct SrtWriter;

impl FormatWriter for SrtWriter {
    fn render(
        &self,
        segments: &[Segment],
        _metadata: &TranscriptMetadata,
        sink: &mut dyn Write,
    ) -> Result<()> {
        for (index, segment) in segments.iter().enumerate() {
            writeln!(sink, "{}", index + 1)?;
            writeln!(
                sink,
                "{} --> {}",
                srt_timestamp(segment.start),
                srt_timestamp(segment.end)
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

    #[test]
    fn test_srt_blocks() {
        let mut buf = Vec::new();
        SrtWriter
            .render(&sample_segments(), &sample_metadata(), &mut buf)
            .unwrap();

        let output = String::from_utf8(buf).unwrap();
        assert_eq!(
            output,
            "1\n00:00:00,000 --> 00:00:07,000\n VoxDus is a command line tool...\n\n\
             2\n00:00:07,000 --> 00:00:12,500\n It supports several output formats.\n\n"
        );
    }

    #[test]
    fn test_srt_numbering_starts_at_one() {
        let mut buf = Vec::new();
        SrtWriter
            .render(&sample_segments(), &sample_metadata(), &mut buf)
            .unwrap();

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("1\n"));
        assert!(output.contains("\n\n2\n"));
    }
}
