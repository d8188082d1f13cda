use crate::error::{Result, StateError};
use crate::poi_store::PoiStore;
use serde::Serialize;
use urban_types::{LatLon, PointOfInterest};

pub const DEFAULT_PANEL_WIDTH: u32 = 420;
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1200.0;

const MIN_PANEL_WIDTH: f64 = 280.0;
const MAX_PANEL_RATIO: f64 = 0.6;
const FALLBACK_PANEL_RATIO: f64 = 0.35;
const CLICK_MARGIN: f64 = 24.0;

/// Width of the detail panel so it stops short of the clicked marker.
///
/// `clamp(click_x - 24, 280, 0.6 * viewport)` with a click position,
/// `0.35 * viewport` without one. The minimum wins on narrow viewports.
pub fn panel_width(click_x: Option<f64>, viewport_width: f64) -> u32 {
    let viewport_width = if viewport_width.is_finite() && viewport_width > 0.0 {
        viewport_width
    } else {
        DEFAULT_VIEWPORT_WIDTH
    };

    let width = match click_x {
        Some(x) => {
            let max_width = (viewport_width * MAX_PANEL_RATIO).floor();
            (x - CLICK_MARGIN).min(max_width).max(MIN_PANEL_WIDTH)
        }
        None => (viewport_width * FALLBACK_PANEL_RATIO).floor(),
    };

    width.round() as u32
}

/// The point whose detail panel is open.
///
/// `point` is a snapshot taken when focus was set; a later bulk replace of the
/// store does not update it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Focus {
    pub center: LatLon,
    pub point: PointOfInterest,
}

#[derive(Debug, Clone)]
pub struct FocusController {
    focus: Option<Focus>,
    panel_width: u32,
}

impl Default for FocusController {
    fn default() -> Self {
        Self {
            focus: None,
            panel_width: DEFAULT_PANEL_WIDTH,
        }
    }
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus the point with `id` and open its panel.
    ///
    /// Unknown ids leave the controller untouched.
    pub fn focus(
        &mut self,
        store: &PoiStore,
        id: &str,
        click_x: Option<f64>,
        viewport_width: f64,
    ) -> Result<&Focus> {
        let point = store
            .get(id)
            .ok_or_else(|| StateError::PointNotFound(id.to_string()))?;

        self.panel_width = panel_width(click_x, viewport_width);
        let focus = self.focus.insert(Focus {
            center: point.center,
            point: point.clone(),
        });
        Ok(focus)
    }

    /// Close the detail panel.
    pub fn dismiss(&mut self) {
        self.focus = None;
    }

    pub fn focused(&self) -> Option<&Focus> {
        self.focus.as_ref()
    }

    pub fn focused_center(&self) -> Option<LatLon> {
        self.focus.as_ref().map(|f| f.center)
    }

    pub fn is_panel_open(&self) -> bool {
        self.focus.is_some()
    }

    pub fn panel_width(&self) -> u32 {
        self.panel_width
    }

    pub fn is_focused_on_ai(&self) -> bool {
        self.focus
            .as_ref()
            .is_some_and(|f| f.point.is_ai_recommendation)
    }
}
