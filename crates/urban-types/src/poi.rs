use crate::geo::{resolve_neighborhood, LatLon, DEFAULT_NEIGHBORHOOD_CENTER};
use crate::wire::Recommendation;
use serde::{Deserialize, Serialize};

/// A marker on the map, either seeded manually or produced by the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub id: String,
    pub center: LatLon,
    pub title: String,
    pub description: String,
    #[serde(rename = "isAIRecommendation", default)]
    pub is_ai_recommendation: bool,
    /// Rating in `0..=5`, AI-sourced points only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// People per km², AI-sourced points only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl PointOfInterest {
    /// Create a manually seeded point.
    pub fn new(
        id: impl Into<String>,
        center: LatLon,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            center,
            title: title.into(),
            description: description.into(),
            is_ai_recommendation: false,
            score: None,
            density: None,
            reasons: Vec::new(),
        }
    }

    /// Build the map point for the `index`-th recommendation of a response.
    pub fn from_recommendation(rec: &Recommendation, index: usize) -> Self {
        let center = rec
            .neighborhood_id
            .as_ref()
            .map(resolve_neighborhood)
            .unwrap_or(DEFAULT_NEIGHBORHOOD_CENTER);

        let title = match &rec.neighborhood_id {
            Some(id) => format!("Neighborhood {}", id),
            None => format!("Neighborhood {}", index),
        };

        Self {
            id: rec.point_id(index),
            center,
            title,
            description: rec
                .development_advice
                .clone()
                .filter(|advice| !advice.is_empty())
                .unwrap_or_else(|| "AI Recommended Area".to_string()),
            is_ai_recommendation: true,
            score: rec.score,
            density: rec.density,
            reasons: rec.reasons.clone(),
        }
    }

    /// Density rounded for display, e.g. `"5124 people/km²"`.
    pub fn density_label(&self) -> Option<String> {
        self.density
            .filter(|d| *d != 0.0)
            .map(|d| format!("{:.0} people/km²", d))
    }
}

/// Screen-space coordinate in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}
