//! Stage-entry decisions.
//!
//! These pure functions gate the conditional stages so the orchestrator
//! stays a linear sequence of awaits.

/// Floor for the silence filter's minimum duration once padding is
/// subtracted.
pub const MIN_EFFECTIVE_DURATION: f64 = 0.01;

/// Tempo rate bounds and the gate above which the stage engages.
pub const TEMPO_RATE_GATE: f64 = 1.001;

/// Minimum silence duration handed to the removal filter after padding is
/// folded in. Padding shortens the removable middle of each silent run, so
/// the filter has to trigger on shorter runs.
pub fn effective_min_duration(min_duration: f64, left_padding: f64, right_padding: f64) -> f64 {
    (min_duration - left_padding - right_padding).max(MIN_EFFECTIVE_DURATION)
}

/// The removal filter is skipped entirely when padding swallows the whole
/// minimum run: once the floored effective duration is no shorter than the
/// requested minimum, every silent run would be fully preserved anyway and
/// the input is carried forward unchanged.
pub fn should_skip_silence_filter(min_duration: f64, left_padding: f64, right_padding: f64) -> bool {
    let padding = left_padding + right_padding;
    padding > 0.0
        && effective_min_duration(min_duration, left_padding, right_padding) >= min_duration
}

/// Playback rate for the tempo stage, or `None` when the stage should not
/// run. The stage only speeds up: a probed duration at or under the target
/// (within tolerance) leaves the audio untouched, and the clamped rate must
/// still clear the gate.
pub fn tempo_rate(probed_duration: f64, target_duration: f64, tolerance: f64) -> Option<f64> {
    if target_duration <= 0.0 {
        return None;
    }
    if probed_duration <= target_duration + tolerance {
        return None;
    }

    let rate = (probed_duration / target_duration).clamp(0.5, 100.0);
    if rate > TEMPO_RATE_GATE {
        Some(rate)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_min_duration() {
        assert!((effective_min_duration(0.5, 0.1, 0.1) - 0.3).abs() < 1e-9);
        // Floored when padding exceeds the minimum
        assert!((effective_min_duration(0.2, 0.5, 0.5) - MIN_EFFECTIVE_DURATION).abs() < 1e-9);
    }

    #[test]
    fn test_filter_applies_with_zero_padding() {
        assert!(!should_skip_silence_filter(0.2, 0.0, 0.0));
        assert!(!should_skip_silence_filter(0.5, 0.1, 0.1));
    }

    #[test]
    fn test_skip_when_floor_reaches_minimum() {
        // Padding consumes the whole minimum and the floor lands at or
        // above it: nothing could ever be removed
        assert!(should_skip_silence_filter(0.005, 0.01, 0.0));
        assert!(should_skip_silence_filter(0.01, 0.02, 0.02));
    }

    #[test]
    fn test_tempo_rate_basic() {
        // 8 s down to 4 s doubles the rate
        let rate = tempo_rate(8.0, 4.0, 0.1).unwrap();
        assert!((rate - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_tempo_not_entered_when_under_target() {
        assert!(tempo_rate(4.0, 8.0, 0.1).is_none());
        assert!(tempo_rate(8.0, 8.0, 0.1).is_none());
        // Within tolerance
        assert!(tempo_rate(8.05, 8.0, 0.1).is_none());
    }

    #[test]
    fn test_tempo_never_slows_down() {
        // Even past tolerance, a clamped or sub-gate rate never runs
        assert!(tempo_rate(8.2, 8.19, 0.0).is_none());
    }

    #[test]
    fn test_tempo_rate_clamped() {
        let rate = tempo_rate(10_000.0, 1.0, 0.1).unwrap();
        assert!((rate - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_tempo_invalid_target() {
        assert!(tempo_rate(8.0, 0.0, 0.1).is_none());
        assert!(tempo_rate(8.0, -5.0, 0.1).is_none());
    }
}
