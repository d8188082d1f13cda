use std::collections::HashSet;
use urban_types::{PointOfInterest, Recommendation};

/// Ordered points of interest shown on the map, plus a log of every raw
/// recommendation the assistant has returned this session.
///
/// The log is append-only and never deduplicated: asking about the same
/// neighborhood twice records it twice. It grows for the whole session.
#[derive(Debug, Clone, Default)]
pub struct PoiStore {
    points: Vec<PointOfInterest>,
    recommendation_log: Vec<Recommendation>,
}

impl PoiStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with manual points.
    pub fn with_points(points: Vec<PointOfInterest>) -> Self {
        let mut store = Self::new();
        store.replace_all(points);
        store
    }

    /// Discard current contents and install `points`.
    ///
    /// Ids stay unique: for repeated ids the first occurrence wins.
    pub fn replace_all(&mut self, points: Vec<PointOfInterest>) {
        let mut seen = HashSet::with_capacity(points.len());
        let mut installed = Vec::with_capacity(points.len());

        for point in points {
            if seen.insert(point.id.clone()) {
                installed.push(point);
            } else {
                tracing::debug!("Dropping duplicate point of interest {}", point.id);
            }
        }

        self.points = installed;
    }

    /// Build map points from assistant recommendations and replace the store
    /// with them. Returns the number of installed points.
    pub fn replace_with_recommendations(&mut self, recommendations: &[Recommendation]) -> usize {
        let points = recommendations
            .iter()
            .enumerate()
            .map(|(index, rec)| PointOfInterest::from_recommendation(rec, index))
            .collect();
        self.replace_all(points);
        self.points.len()
    }

    pub fn append_recommendations(&mut self, recommendations: &[Recommendation]) {
        self.recommendation_log.extend_from_slice(recommendations);
    }

    /// Drop every AI-sourced point and empty the recommendation log.
    pub fn clear_ai_recommendations(&mut self) {
        self.points.retain(|p| !p.is_ai_recommendation);
        self.recommendation_log.clear();
    }

    pub fn get(&self, id: &str) -> Option<&PointOfInterest> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    pub fn ai_recommendations(&self) -> impl Iterator<Item = &PointOfInterest> {
        self.points.iter().filter(|p| p.is_ai_recommendation)
    }

    pub fn recommendation_log(&self) -> &[Recommendation] {
        &self.recommendation_log
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
