//! Volume policy
//!
//! The media source owns the actual volume; these helpers decide what the
//! engine asks it for. Volume is linear, 0.0 (silent) to 1.0 (unity).

/// Clamp a requested volume into range
///
/// Returns `None` for NaN/infinite input, which is ignored rather than
/// mapped to an edge of the range.
pub(crate) fn clamp_volume(volume: f64) -> Option<f64> {
    if volume.is_finite() {
        Some(volume.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Volume to restore when unmuting
///
/// Unmuting at zero volume would still be silent, so the source is bumped to
/// `restore` in that case. Returns `None` when the current level is kept.
pub(crate) fn unmute_restore(current: f64, restore: f64) -> Option<f64> {
    if current <= 0.0 {
        Some(restore)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_in_range() {
        assert_eq!(clamp_volume(0.5), Some(0.5));
        assert_eq!(clamp_volume(0.0), Some(0.0));
        assert_eq!(clamp_volume(1.0), Some(1.0));
    }

    #[test]
    fn clamp_out_of_range() {
        assert_eq!(clamp_volume(-0.2), Some(0.0));
        assert_eq!(clamp_volume(3.0), Some(1.0));
    }

    #[test]
    fn clamp_rejects_non_finite() {
        assert_eq!(clamp_volume(f64::NAN), None);
        assert_eq!(clamp_volume(f64::INFINITY), None);
    }

    #[test]
    fn unmute_at_zero_restores() {
        assert_eq!(unmute_restore(0.0, 0.5), Some(0.5));
        assert_eq!(unmute_restore(0.3, 0.5), None);
    }
}
