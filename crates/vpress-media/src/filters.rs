//! FFmpeg audio filter definitions.

/// Tempo bounds accepted by the pipeline (and by a single atempo chain).
pub const MIN_TEMPO_RATE: f64 = 0.5;
pub const MAX_TEMPO_RATE: f64 = 100.0;

/// Build a `silenceremove` filter that strips leading, mid-stream and
/// trailing silence below `threshold_db` lasting at least `min_duration`
/// seconds.
pub fn filter_remove_silence(threshold_db: f64, min_duration: f64) -> String {
    format!(
        "silenceremove=start_periods=1:start_duration={d:.3}:start_threshold={t}dB:\
         stop_periods=-1:stop_duration={d:.3}:stop_threshold={t}dB",
        d = min_duration,
        t = threshold_db,
    )
}

/// Build an `atempo` chain for the given rate.
///
/// A single atempo stage only accepts factors in [0.5, 2.0], so larger
/// speed-ups are decomposed into a product of in-range factors.
pub fn filter_atempo(rate: f64) -> String {
    let mut rate = rate.clamp(MIN_TEMPO_RATE, MAX_TEMPO_RATE);
    let mut stages: Vec<String> = Vec::new();

    while rate > 2.0 {
        stages.push("atempo=2.0".to_string());
        rate /= 2.0;
    }
    stages.push(format!("atempo={:.6}", rate));

    stages.join(",")
}

/// Build a `loudnorm` filter targeting the given integrated loudness.
pub fn filter_loudnorm(target_lufs: f64) -> String {
    format!("loudnorm=I={}:TP=-1.5:LRA=11", target_lufs)
}

/// Build a linear fade-out of `duration` seconds starting at `start`.
pub fn filter_fade_out(start: f64, duration: f64) -> String {
    format!("afade=t=out:st={:.3}:d={:.3}", start, duration)
}

/// Build the filter graph that ducks the music bed and mixes it under the
/// voice-over. Input 0 is the voice, input 1 the music; output duration
/// follows the voice input.
pub fn filter_duck_and_mix(ducking_db: f64) -> String {
    format!(
        "[1:a]volume={}dB[bg];[0:a][bg]amix=inputs=2:duration=first:dropout_transition=0",
        ducking_db
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_silence_filter() {
        let f = filter_remove_silence(-40.0, 0.5);
        assert!(f.contains("start_threshold=-40dB"));
        assert!(f.contains("stop_duration=0.500"));
        assert!(f.contains("stop_periods=-1"));
    }

    #[test]
    fn test_atempo_in_range() {
        assert_eq!(filter_atempo(1.5), "atempo=1.500000");
    }

    #[test]
    fn test_atempo_chain_product() {
        // The chained factors must multiply back to the requested rate.
        for rate in [2.5, 4.0, 7.3, 50.0, 100.0] {
            let chain = filter_atempo(rate);
            let product: f64 = chain
                .split(',')
                .map(|s| s.trim_start_matches("atempo=").parse::<f64>().unwrap())
                .product();
            assert!(
                (product - rate).abs() < 1e-3,
                "chain {} for rate {} multiplies to {}",
                chain,
                rate,
                product
            );
        }
    }

    #[test]
    fn test_atempo_stages_in_legal_range() {
        let chain = filter_atempo(37.0);
        for stage in chain.split(',') {
            let factor: f64 = stage.trim_start_matches("atempo=").parse().unwrap();
            assert!((0.5..=2.0).contains(&factor), "illegal factor {}", factor);
        }
    }

    #[test]
    fn test_atempo_clamps() {
        assert_eq!(filter_atempo(0.1), "atempo=0.500000");
        let chain = filter_atempo(500.0);
        let product: f64 = chain
            .split(',')
            .map(|s| s.trim_start_matches("atempo=").parse::<f64>().unwrap())
            .product();
        assert!((product - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_loudnorm_filter() {
        assert_eq!(filter_loudnorm(-14.0), "loudnorm=I=-14:TP=-1.5:LRA=11");
    }

    #[test]
    fn test_fade_out_filter() {
        assert_eq!(filter_fade_out(27.0, 3.0), "afade=t=out:st=27.000:d=3.000");
    }

    #[test]
    fn test_duck_and_mix_filter() {
        let f = filter_duck_and_mix(-12.0);
        assert!(f.starts_with("[1:a]volume=-12dB[bg]"));
        assert!(f.contains("duration=first"));
    }
}
