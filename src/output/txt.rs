use std::io::Write;

use super::FormatWriter;
use crate::transcribe::{Segment, TranscriptMetadata};
use crate::Result;

/// Plain text writer: one `[start - end]: text` line per segment, nothing else.
///
/// The segment text is emitted verbatim, including the leading space whisper
/// produces, so file and stdout renderings are byte-identical.
pub struct TxtWriter;

impl FormatWriter for TxtWriter {
    fn render(
        &self,
        segments: &[Segment],
        _metadata: &TranscriptMetadata,
        sink: &mut dyn Write,
    ) -> Result<()> {
        for segment in segments {
            writeln!(
                sink,
                "[{:.2} - {:.2}]: {}",
                segment.start, segment.end, segment.text
            )?;
        }
        Ok(())
    }
}
