//! Interval-based silence detection over raw samples.
//!
//! This is the pure, restartable counterpart of the server-side
//! `silenceremove` filter: a single linear pass over one reference channel
//! that produces the ordered set of silent intervals. It is used to preview
//! what the removal stage will cut.

use serde::{Deserialize, Serialize};

/// A detected silent interval, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilenceInterval {
    pub start: f64,
    pub end: f64,
}

impl SilenceInterval {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Detection parameters.
#[derive(Debug, Clone, Copy)]
pub struct SilenceParams {
    /// Amplitude cutoff in dBFS (<= 0). Positive values disable detection.
    pub threshold_db: f64,
    /// Minimum run length in seconds for a run to count as silence.
    pub min_duration: f64,
    /// Seconds of the run preserved at its start (applied inward).
    pub padding_start: f64,
    /// Seconds of the run preserved at its end (applied inward).
    pub padding_end: f64,
}

/// Detect silent intervals in one channel of samples.
///
/// A run of consecutive samples whose absolute value stays below the linear
/// threshold is a candidate; it closes when a sample reaches the threshold
/// or at end-of-stream. Runs shorter than `min_duration` are treated as
/// audible. Padding is applied inward and clamped so it can never invert an
/// interval or cross the opposite boundary; an interval is emitted only if
/// its padded end is strictly after its padded start.
pub fn detect_silence(samples: &[f32], sample_rate: u32, params: &SilenceParams) -> Vec<SilenceInterval> {
    let mut intervals = Vec::new();

    if samples.is_empty() || sample_rate == 0 {
        return intervals;
    }

    let threshold = if params.threshold_db <= 0.0 {
        10f64.powf(params.threshold_db / 20.0)
    } else {
        1.0
    };

    let rate = sample_rate as f64;
    let min_run_samples = (params.min_duration * rate).max(0.0);
    let pad_start_samples = (params.padding_start.max(0.0) * rate).round() as usize;
    let pad_end_samples = (params.padding_end.max(0.0) * rate).round() as usize;

    let mut run_start: Option<usize> = None;

    for (i, sample) in samples.iter().enumerate() {
        let silent = (sample.abs() as f64) < threshold;

        match (run_start, silent) {
            (None, true) => run_start = Some(i),
            (Some(start), false) => {
                emit_run(
                    &mut intervals,
                    start,
                    i,
                    min_run_samples,
                    pad_start_samples,
                    pad_end_samples,
                    rate,
                );
                run_start = None;
            }
            _ => {}
        }
    }

    // A run still open at end-of-stream closes at stream end and is
    // evaluated by the same rules.
    if let Some(start) = run_start {
        emit_run(
            &mut intervals,
            start,
            samples.len(),
            min_run_samples,
            pad_start_samples,
            pad_end_samples,
            rate,
        );
    }

    intervals
}

fn emit_run(
    intervals: &mut Vec<SilenceInterval>,
    run_start: usize,
    run_end: usize,
    min_run_samples: f64,
    pad_start_samples: usize,
    pad_end_samples: usize,
    rate: f64,
) {
    let run_len = run_end - run_start;
    if (run_len as f64) < min_run_samples {
        return;
    }

    // Padding moves both edges inward, clamped to the run itself.
    let padded_start = (run_start + pad_start_samples).min(run_end);
    let padded_end = run_end.saturating_sub(pad_end_samples).max(run_start);

    if padded_end > padded_start {
        intervals.push(SilenceInterval {
            start: padded_start as f64 / rate,
            end: padded_end as f64 / rate,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 1000;

    fn params(threshold_db: f64, min_duration: f64, pad_start: f64, pad_end: f64) -> SilenceParams {
        SilenceParams {
            threshold_db,
            min_duration,
            padding_start: pad_start,
            padding_end: pad_end,
        }
    }

    /// Loud/quiet pattern: `segments` is (amplitude, seconds) pairs.
    fn signal(segments: &[(f32, f64)]) -> Vec<f32> {
        let mut samples = Vec::new();
        for &(amp, secs) in segments {
            samples.extend(std::iter::repeat(amp).take((secs * RATE as f64) as usize));
        }
        samples
    }

    fn assert_invariants(intervals: &[SilenceInterval], total_secs: f64) {
        let mut prev_end = 0.0;
        for iv in intervals {
            assert!(iv.end > iv.start, "interval must have positive length");
            assert!(iv.start >= prev_end, "intervals must be ordered and disjoint");
            assert!(iv.end <= total_secs + 1e-9, "interval exceeds sample span");
            prev_end = iv.end;
        }
    }

    #[test]
    fn test_single_gap_detected() {
        // 1 s loud, 2 s silent, 1 s loud at -40 dB threshold
        let samples = signal(&[(0.5, 1.0), (0.001, 2.0), (0.5, 1.0)]);
        let intervals = detect_silence(&samples, RATE, &params(-40.0, 0.2, 0.0, 0.0));

        assert_eq!(intervals.len(), 1);
        assert!((intervals[0].start - 1.0).abs() < 0.01);
        assert!((intervals[0].end - 3.0).abs() < 0.01);
        assert_invariants(&intervals, 4.0);
    }

    #[test]
    fn test_short_run_discarded() {
        // 0.1 s gap below the 0.2 s minimum
        let samples = signal(&[(0.5, 1.0), (0.001, 0.1), (0.5, 1.0)]);
        let intervals = detect_silence(&samples, RATE, &params(-40.0, 0.2, 0.0, 0.0));
        assert!(intervals.is_empty());
    }

    #[test]
    fn test_open_run_at_end_of_stream() {
        // Trailing silence closes at stream end
        let samples = signal(&[(0.5, 1.0), (0.001, 1.0)]);
        let intervals = detect_silence(&samples, RATE, &params(-40.0, 0.2, 0.0, 0.0));
        assert_eq!(intervals.len(), 1);
        assert!((intervals[0].end - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_leading_silence_detected() {
        let samples = signal(&[(0.0, 1.0), (0.5, 1.0)]);
        let intervals = detect_silence(&samples, RATE, &params(-40.0, 0.2, 0.0, 0.0));
        assert_eq!(intervals.len(), 1);
        assert!(intervals[0].start.abs() < 0.01);
    }

    #[test]
    fn test_padding_applied_inward() {
        let samples = signal(&[(0.5, 1.0), (0.001, 2.0), (0.5, 1.0)]);
        let intervals = detect_silence(&samples, RATE, &params(-40.0, 0.2, 0.3, 0.4));
        assert_eq!(intervals.len(), 1);
        assert!((intervals[0].start - 1.3).abs() < 0.01);
        assert!((intervals[0].end - 2.6).abs() < 0.01);
    }

    #[test]
    fn test_padding_that_inverts_collapses_interval() {
        // 0.5 s gap, 0.4 s of padding on each side: padded edges cross,
        // so the interval contributes nothing.
        let samples = signal(&[(0.5, 1.0), (0.001, 0.5), (0.5, 1.0)]);
        let intervals = detect_silence(&samples, RATE, &params(-40.0, 0.2, 0.4, 0.4));
        assert!(intervals.is_empty());
    }

    #[test]
    fn test_padding_clamped_to_run() {
        // Padding larger than the run never produces negative-length output
        let samples = signal(&[(0.5, 1.0), (0.001, 0.5), (0.5, 1.0)]);
        let intervals = detect_silence(&samples, RATE, &params(-40.0, 0.2, 10.0, 10.0));
        assert!(intervals.is_empty());
    }

    #[test]
    fn test_multiple_gaps_ordered_and_disjoint() {
        let samples = signal(&[
            (0.5, 0.5),
            (0.001, 0.5),
            (0.5, 0.5),
            (0.001, 0.7),
            (0.5, 0.5),
        ]);
        let intervals = detect_silence(&samples, RATE, &params(-40.0, 0.2, 0.0, 0.0));
        assert_eq!(intervals.len(), 2);
        assert_invariants(&intervals, 2.7);
    }

    #[test]
    fn test_threshold_boundary() {
        // -40 dB is amplitude 0.01; samples at exactly the threshold are audible
        let samples = signal(&[(0.5, 1.0), (0.01, 1.0), (0.5, 1.0)]);
        let intervals = detect_silence(&samples, RATE, &params(-40.0, 0.2, 0.0, 0.0));
        assert!(intervals.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(detect_silence(&[], RATE, &params(-40.0, 0.2, 0.0, 0.0)).is_empty());
        assert!(detect_silence(&[0.0; 100], 0, &params(-40.0, 0.2, 0.0, 0.0)).is_empty());
    }

    #[test]
    fn test_all_silent_input() {
        let samples = signal(&[(0.0, 3.0)]);
        let intervals = detect_silence(&samples, RATE, &params(-40.0, 0.2, 0.0, 0.0));
        assert_eq!(intervals.len(), 1);
        assert!(intervals[0].start.abs() < 0.01);
        assert!((intervals[0].end - 3.0).abs() < 0.01);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let samples = signal(&[(0.5, 1.0), (0.001, 1.0), (0.5, 1.0)]);
        let p = params(-40.0, 0.2, 0.1, 0.1);
        assert_eq!(detect_silence(&samples, RATE, &p), detect_silence(&samples, RATE, &p));
    }
}
