use serde::Serialize;
use urban_types::{PointOfInterest, ScreenPoint};

/// Offset from the cursor to the popup's top-left corner.
pub const POPUP_OFFSET: (f64, f64) = (10.0, -10.0);
pub const MAX_POPUP_REASONS: usize = 3;

/// Popup shown while the cursor rests on an AI-recommended marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverPopup {
    pub point: PointOfInterest,
    pub cursor: ScreenPoint,
}

impl HoverPopup {
    pub fn anchor(&self) -> ScreenPoint {
        self.cursor.offset(POPUP_OFFSET.0, POPUP_OFFSET.1)
    }

    pub fn top_reasons(&self) -> &[String] {
        let reasons = &self.point.reasons;
        &reasons[..reasons.len().min(MAX_POPUP_REASONS)]
    }
}

#[derive(Debug, Clone, Default)]
pub struct HoverController {
    popup: Option<HoverPopup>,
}

impl HoverController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the popup for `point`. Manual points never get one.
    pub fn on_hover(&mut self, point: &PointOfInterest, cursor: ScreenPoint) -> bool {
        if !point.is_ai_recommendation {
            return false;
        }

        self.popup = Some(HoverPopup {
            point: point.clone(),
            cursor,
        });
        true
    }

    /// Hide the popup. Also bound to the popup's close button.
    pub fn on_leave(&mut self) {
        self.popup = None;
    }

    pub fn popup(&self) -> Option<&HoverPopup> {
        self.popup.as_ref()
    }
}
