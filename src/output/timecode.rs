//! Timestamp rendering for subtitle formats.
//!
//! SRT and WebVTT share the same `HH:MM:SS` layout and differ only in the
//! millisecond separator (comma vs period). Hours are not capped, so
//! multi-hour transcripts roll over into wider hour fields naturally.

/// Render a second offset as an SRT timestamp (`HH:MM:SS,mmm`).
pub fn srt_timestamp(seconds: f64) -> String {
    compose(seconds, ',')
}

/// Render a second offset as a WebVTT timestamp (`HH:MM:SS.mmm`).
pub fn vtt_timestamp(seconds: f64) -> String {
    compose(seconds, '.')
}

fn compose(seconds: f64, separator: char) -> String {
    // Negative and NaN inputs clamp to zero; milliseconds round half-up.
    let total_millis = (seconds.max(0.0) * 1000.0 + 0.5).floor() as u64;
    let millis = total_millis % 1000;
    let total_secs = total_millis / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    format!(
        "{:02}:{:02}:{:02}{}{:03}",
        hours, minutes, secs, separator, millis
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srt_timestamp() {
        assert_eq!(srt_timestamp(0.0), "00:00:00,000");
        assert_eq!(srt_timestamp(1.5), "00:00:01,500");
        assert_eq!(srt_timestamp(7.0), "00:00:07,000");
        assert_eq!(srt_timestamp(3661.123), "01:01:01,123");
    }

    #[test]
    fn test_vtt_timestamp() {
        assert_eq!(vtt_timestamp(1.5), "00:00:01.500");
        assert_eq!(vtt_timestamp(3661.123), "01:01:01.123");
    }

    #[test]
    fn test_formats_differ_only_in_separator() {
        for &secs in &[0.0, 0.4995, 59.999, 61.02, 3600.0, 86400.5] {
            let srt = srt_timestamp(secs);
            let vtt = vtt_timestamp(secs);
            assert_eq!(srt.replace(',', "."), vtt);
        }
    }

    #[test]
    fn test_milliseconds_round_to_nearest() {
        assert_eq!(srt_timestamp(2.0006), "00:00:02,001");
        assert_eq!(srt_timestamp(2.0004), "00:00:02,000");
        assert_eq!(srt_timestamp(6.959), "00:00:06,959");
    }

    #[test]
    fn test_negative_clamps_to_zero() {
        assert_eq!(srt_timestamp(-3.2), "00:00:00,000");
        assert_eq!(vtt_timestamp(-0.001), "00:00:00.000");
    }

    #[test]
    fn test_hours_roll_over() {
        assert_eq!(srt_timestamp(3600.0), "01:00:00,000");
        assert_eq!(srt_timestamp(36_000.0), "10:00:00,000");
    }
}
