//! SRT subtitle building.

use crate::transcript::TranscriptWord;

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`).
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let s = total_secs % 60;
    let m = (total_secs / 60) % 60;
    let h = total_secs / 3600;
    format!("{:02}:{:02}:{:02},{:03}", h, m, s, ms)
}

/// Build an SRT document from time-coded words.
///
/// Cues are numbered sequentially starting at 1. Words with invalid or
/// inverted timestamps, or empty text after trimming, are silently skipped.
pub fn build_srt(words: &[TranscriptWord]) -> String {
    let mut out = String::new();
    let mut index = 1u32;

    for word in words {
        if !word.is_valid_cue() {
            continue;
        }

        out.push_str(&index.to_string());
        out.push('\n');
        out.push_str(&format_timestamp(word.start_seconds));
        out.push_str(" --> ");
        out.push_str(&format_timestamp(word.end_seconds));
        out.push('\n');
        out.push_str(word.text.trim());
        out.push_str("\n\n");

        index += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, start: f64, end: f64) -> TranscriptWord {
        TranscriptWord {
            text: text.to_string(),
            start_seconds: start,
            end_seconds: end,
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_timestamp(1.5), "00:00:01,500");
        assert_eq!(format_timestamp(61.25), "00:01:01,250");
        assert_eq!(format_timestamp(3661.007), "01:01:01,007");
    }

    #[test]
    fn test_negative_clamps_to_zero() {
        assert_eq!(format_timestamp(-2.0), "00:00:00,000");
    }

    #[test]
    fn test_build_srt_basic() {
        let words = vec![word("Hello", 0.0, 0.4), word("world", 0.5, 0.9)];
        let srt = build_srt(&words);
        let expected = "1\n00:00:00,000 --> 00:00:00,400\nHello\n\n2\n00:00:00,500 --> 00:00:00,900\nworld\n\n";
        assert_eq!(srt, expected);
    }

    #[test]
    fn test_build_srt_skips_invalid_words() {
        let words = vec![
            word("ok", 0.0, 0.4),
            word("  ", 0.5, 0.9),     // blank
            word("bad", 2.0, 1.0),    // inverted
            word("fine", 1.0, 1.2),
        ];
        let srt = build_srt(&words);
        // Skipped words do not consume an index
        assert!(srt.contains("1\n00:00:00,000"));
        assert!(srt.contains("2\n00:00:01,000"));
        assert!(!srt.contains("bad"));
        assert!(!srt.contains("3\n"));
    }

    #[test]
    fn test_build_srt_empty_input() {
        assert_eq!(build_srt(&[]), "");
    }

    #[test]
    fn test_build_srt_trims_text() {
        let srt = build_srt(&[word("  spaced  ", 0.0, 0.3)]);
        assert!(srt.contains("\nspaced\n"));
    }
}
