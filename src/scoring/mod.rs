pub mod normalize;
pub mod radar;

pub use normalize::{normalize_to_scale, NEUTRAL_SCORE, NOT_APPLICABLE_SCORE, SCORE_MAX, SCORE_MIN};
pub use radar::{radar_series, reliability_scores, RadarSeries, RADAR_CATEGORIES};
