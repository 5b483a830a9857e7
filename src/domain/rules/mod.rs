// Domain rules - Business logic and policies

use crate::domain::errors::*;
use crate::domain::model::*;

/// Slack allowed past the probed duration; container durations are rounded
const DURATION_TOLERANCE: f64 = 0.05;

/// Business rules for cut plans
pub struct CutPlanRules;

impl CutPlanRules {
    /// Checks every cut needs regardless of the source: at least one range and
    /// each range satisfying `0 <= start < end`.
    pub fn validate_shape(ranges: &[TimeRange]) -> Result<(), DomainError> {
        if ranges.is_empty() {
            return Err(DomainError::BadArgs(
                "Cut plan must contain at least one time range".to_string(),
            ));
        }
        for (index, range) in ranges.iter().enumerate() {
            range
                .validate()
                .map_err(|e| DomainError::BadArgs(format!("Segment {}: {}", index, e)))?;
        }
        Ok(())
    }

    /// Stricter checks against a probed source: ranges must end within the
    /// media duration and must not overlap each other. Order is free; the
    /// output follows the caller's order.
    pub fn validate_against_media(
        ranges: &[TimeRange],
        media_info: &MediaInfo,
    ) -> Result<(), DomainError> {
        Self::validate_shape(ranges)?;

        let limit = media_info.duration + DURATION_TOLERANCE;
        if let Some((index, range)) = ranges.iter().enumerate().find(|(_, r)| r.end > limit) {
            return Err(DomainError::BadArgs(format!(
                "Segment {} {} extends past media duration {:.3}s",
                index, range, media_info.duration
            )));
        }

        for (i, a) in ranges.iter().enumerate() {
            for (j, b) in ranges.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    return Err(DomainError::BadArgs(format!(
                        "Segments {} {} and {} {} overlap",
                        i, a, j, b
                    )));
                }
            }
        }

        Ok(())
    }

    /// Total output duration of a plan
    pub fn total_duration(ranges: &[TimeRange]) -> f64 {
        ranges.iter().map(TimeRange::duration).sum()
    }
}
