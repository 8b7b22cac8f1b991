//! Segment planning: duration -> timestamp anchors

use crate::notes::models::TimestampAnchor;

/// Duration assumed when the extractor could not read one, in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 600.0;

/// Minimum number of anchors per video.
pub const MIN_ANCHORS: usize = 4;

/// Maximum number of anchors per video.
pub const MAX_ANCHORS: usize = 8;

/// Plan the timestamp anchors for a video of the given duration.
///
/// One segment per three minutes of video, clamped to [MIN_ANCHORS,
/// MAX_ANCHORS]; each anchor sits at the midpoint of its segment, rounded
/// to the nearest second. A missing, non-positive, or degenerately short
/// duration (under one second per anchor) falls back to
/// [`DEFAULT_DURATION_SECS`], so this never fails and the result is always
/// strictly increasing.
pub fn plan_anchors(duration_secs: Option<f64>) -> Vec<TimestampAnchor> {
    let duration = match duration_secs {
        Some(d) if d.is_finite() && d >= MIN_ANCHORS as f64 => d,
        _ => DEFAULT_DURATION_SECS,
    };

    let count = ((duration / 180.0).floor() as usize).clamp(MIN_ANCHORS, MAX_ANCHORS);
    let interval = duration / count as f64;

    (0..count)
        .map(|i| TimestampAnchor {
            offset_secs: (interval * (i as f64 + 0.5)).round() as u32,
        })
        .collect()
}
