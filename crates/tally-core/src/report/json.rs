use crate::analytics::Analytics;
use crate::errors::AnalyticsResult;

/// Pretty-printed, lossless serialization of the whole collection.
pub fn render(analytics: &Analytics) -> AnalyticsResult<String> {
    Ok(serde_json::to_string_pretty(analytics)?)
}

/// Inverse of [`render`].
pub fn parse(json: &str) -> AnalyticsResult<Analytics> {
    Ok(serde_json::from_str(json)?)
}
