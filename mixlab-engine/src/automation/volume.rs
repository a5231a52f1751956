//! Volume automation curve lookup

use mixlab_common::models::VolumePoint;
use std::borrow::Cow;

/// Interpolated gains `(track_a, track_b)` in percent at `time`
///
/// `time` is measured from the transition start, like the control points.
/// Finds the consecutive pair bracketing `time` and interpolates linearly.
/// Returns `None` when `time` lies outside the covered span or the list
/// has fewer than two points. Lists not sorted by time are evaluated on a
/// sorted copy.
pub fn interpolate_volume(points: &[VolumePoint], time: f64) -> Option<(f64, f64)> {
    if points.len() < 2 || !time.is_finite() {
        return None;
    }

    let points: Cow<'_, [VolumePoint]> = if points.windows(2).all(|w| w[0].time <= w[1].time) {
        Cow::Borrowed(points)
    } else {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.time.total_cmp(&b.time));
        Cow::Owned(sorted)
    };

    points.windows(2).find_map(|pair| {
        let (from, to) = (&pair[0], &pair[1]);
        if time < from.time || time > to.time {
            return None;
        }
        let span = to.time - from.time;
        let t = if span > 0.0 { (time - from.time) / span } else { 0.0 };
        Some((
            lerp(from.track_a_volume, to.track_a_volume, t),
            lerp(from.track_b_volume, to.track_b_volume, t),
        ))
    })
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
