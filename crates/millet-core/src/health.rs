//! Age-bracket millet recommendations for the consumer health advisor.

use millet_types::MilletType;
use serde::Serialize;

/// Age assumed when the profile has none.
pub const DEFAULT_AGE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub millet: MilletType,
    pub reason: &'static str,
    pub icon: &'static str,
}

const fn rec(millet: MilletType, reason: &'static str, icon: &'static str) -> Recommendation {
    Recommendation { millet, reason, icon }
}

const CHILD: [Recommendation; 2] = [
    rec(MilletType::Finger, "Rich in calcium for growing bones and teeth", "💪"),
    rec(MilletType::Pearl, "High in iron for energy and growth", "⚡"),
];

const ADULT: [Recommendation; 2] = [
    rec(MilletType::Foxtail, "Low glycemic index, helps maintain energy levels", "🏃"),
    rec(MilletType::Little, "High in fiber, supports digestive health", "🌿"),
];

const MIDDLE_AGE: [Recommendation; 2] = [
    rec(MilletType::Barnyard, "Helps manage blood sugar and cholesterol", "❤️"),
    rec(MilletType::Kodo, "Rich in antioxidants, supports heart health", "💚"),
];

const SENIOR: [Recommendation; 2] = [
    rec(MilletType::Finger, "High calcium content for bone health", "🦴"),
    rec(MilletType::Sorghum, "Anti-inflammatory properties, good for joints", "🌾"),
];

/// Two recommendations for the bracket containing `age`:
/// [0,18), [18,40), [40,60), [60,∞).
pub fn recommendations(age: Option<u32>) -> [Recommendation; 2] {
    match age.unwrap_or(DEFAULT_AGE) {
        0..18 => CHILD,
        18..40 => ADULT,
        40..60 => MIDDLE_AGE,
        _ => SENIOR,
    }
}
