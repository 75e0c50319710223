//! Swim-time and delta string formatting.
//!
//! Times travel as strings in the `M:SS.mmm` shape the spreadsheet expects.
//! Deltas are signed seconds strings such as `-0.48s`, always negative
//! here since the simulator only ever fabricates improvements.

/// Render a swim time in milliseconds as `M:SS.mmm`.
#[allow(clippy::arithmetic_side_effects)]
pub fn format_swim_time(total_ms: u32) -> String {
    let minutes = total_ms / 60_000;
    let seconds = (total_ms / 1_000) % 60;
    let millis = total_ms % 1_000;
    format!("{minutes}:{seconds:02}.{millis:03}")
}

/// Render a millisecond improvement as a delta string, e.g. `-0.48s`.
///
/// Hundredths are computed with integer math, so the final digit
/// truncates rather than rounds.
#[allow(clippy::arithmetic_side_effects)]
pub fn format_delta(gain_ms: u32) -> String {
    let seconds = gain_ms / 1_000;
    let hundredths = (gain_ms % 1_000) / 10;
    format!("-{seconds}.{hundredths:02}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sub_minute_times() {
        assert_eq!(format_swim_time(27_310), "0:27.310");
        assert_eq!(format_swim_time(30_000), "0:30.000");
    }

    #[test]
    fn formats_times_over_a_minute() {
        assert_eq!(format_swim_time(65_880), "1:05.880");
        assert_eq!(format_swim_time(80_000), "1:20.000");
        assert_eq!(format_swim_time(158_100), "2:38.100");
    }

    #[test]
    fn pads_seconds_and_millis() {
        assert_eq!(format_swim_time(60_001), "1:00.001");
        assert_eq!(format_swim_time(61_010), "1:01.010");
    }

    #[test]
    fn formats_deltas() {
        assert_eq!(format_delta(480), "-0.48s");
        assert_eq!(format_delta(200), "-0.20s");
        assert_eq!(format_delta(1_500), "-1.50s");
        assert_eq!(format_delta(1_234), "-1.23s");
    }
}
