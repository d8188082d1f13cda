// Wire types of the remote assistant API (/health, /chat, /chat/history)

use crate::geo::NeighborhoodId;
use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatApiRequest {
    pub message: String,
}

impl ChatApiRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatApiResponse {
    #[serde(default)]
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// `None` when the service sent `null` or omitted the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Recommendation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ChatApiResponse {
    pub fn recommendations(&self) -> &[Recommendation] {
        self.recommendations.as_deref().unwrap_or(&[])
    }
}

/// Raw recommendation payload for a single neighborhood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood_id: Option<NeighborhoodId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development_advice: Option<String>,
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl Recommendation {
    pub fn new(neighborhood_id: impl Into<String>) -> Self {
        Self {
            neighborhood_id: Some(NeighborhoodId::new(neighborhood_id)),
            score: None,
            density: None,
            development_advice: None,
            reasons: Vec::new(),
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }

    pub fn with_advice(mut self, advice: impl Into<String>) -> Self {
        self.development_advice = Some(advice.into());
        self
    }

    pub fn with_reasons(mut self, reasons: Vec<String>) -> Self {
        self.reasons = reasons;
        self
    }

    /// Identifier of the map point built from this recommendation.
    ///
    /// Falls back to the entry's position when the service omitted the id.
    pub fn point_id(&self, index: usize) -> String {
        match &self.neighborhood_id {
            Some(id) if !id.as_str().is_empty() => format!("ai-{}", id),
            _ => format!("ai-{}", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_response_parses_full_payload() {
        let body = json!({
            "response": "Consider **Ballard**.",
            "intent": "development_recommendation",
            "confidence": 0.87,
            "recommendations": [{
                "neighborhood_id": 3,
                "score": 4.5,
                "density": 5123.7,
                "development_advice": "Mid-rise housing",
                "reasons": ["Transit access", "Zoning"]
            }],
            "timestamp": "2024-05-01T12:00:00Z"
        });

        let parsed: ChatApiResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.confidence, Some(0.87));
        assert_eq!(parsed.recommendations().len(), 1);

        let rec = &parsed.recommendations()[0];
        assert_eq!(rec.point_id(0), "ai-3");
        assert_eq!(rec.reasons.len(), 2);
    }

    #[test]
    fn test_chat_response_tolerates_null_recommendations() {
        let parsed: ChatApiResponse =
            serde_json::from_value(json!({"response": "hi", "recommendations": null})).unwrap();
        assert!(parsed.recommendations.is_none());
        assert!(parsed.recommendations().is_empty());
    }

    #[test]
    fn test_point_id_falls_back_to_index() {
        let rec: Recommendation = serde_json::from_value(json!({"score": 3})).unwrap();
        assert_eq!(rec.point_id(4), "ai-4");
        assert!(rec.reasons.is_empty());
    }

    #[test]
    fn test_health_status() {
        assert!(HealthResponse { status: "healthy".into() }.is_healthy());
        assert!(!HealthResponse { status: "degraded".into() }.is_healthy());
    }
}
