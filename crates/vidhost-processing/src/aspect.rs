//! Aspect ratio classification.

use vidhost_core::models::AspectBucket;

pub const LANDSCAPE_RATIO: f64 = 16.0 / 9.0;
pub const PORTRAIT_RATIO: f64 = 9.0 / 16.0;

/// Maximum distance from a reference ratio that still counts as a match.
pub const ASPECT_TOLERANCE: f64 = 0.05;

fn within_tolerance(ratio: f64, reference: f64) -> bool {
    // One epsilon of slack so that reference + tolerance itself matches.
    (ratio - reference).abs() <= ASPECT_TOLERANCE + f64::EPSILON
}

/// Classify a width/height ratio.
pub fn classify_ratio(ratio: f64) -> AspectBucket {
    if !ratio.is_finite() {
        return AspectBucket::Other;
    }
    if within_tolerance(ratio, LANDSCAPE_RATIO) {
        AspectBucket::Landscape
    } else if within_tolerance(ratio, PORTRAIT_RATIO) {
        AspectBucket::Portrait
    } else {
        AspectBucket::Other
    }
}

/// Classify pixel dimensions. Zero on either side is `Other`.
pub fn classify_dimensions(width: u32, height: u32) -> AspectBucket {
    if width == 0 || height == 0 {
        return AspectBucket::Other;
    }
    classify_ratio(f64::from(width) / f64::from(height))
}
