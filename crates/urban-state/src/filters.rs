use serde::Serialize;
use urban_types::OverlayCategory;

/// Enabled flags for the overlay categories, all off initially.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterRegistry {
    enabled: [bool; OverlayCategory::COUNT],
}

/// One row of the filters panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterEntry {
    pub category: OverlayCategory,
    pub label: &'static str,
    pub enabled: bool,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, category: OverlayCategory, enabled: bool) {
        tracing::debug!("Filter {} set to {}", category, enabled);
        self.enabled[category.index()] = enabled;
    }

    /// Set by panel row index. Out-of-range indices are ignored.
    pub fn set_at(&mut self, index: usize, enabled: bool) {
        match OverlayCategory::from_index(index) {
            Some(category) => self.set(category, enabled),
            None => tracing::debug!("Ignoring toggle for unknown filter index {}", index),
        }
    }

    pub fn toggle(&mut self, category: OverlayCategory) -> bool {
        let enabled = !self.is_enabled(category);
        self.set(category, enabled);
        enabled
    }

    pub fn is_enabled(&self, category: OverlayCategory) -> bool {
        self.enabled[category.index()]
    }

    pub fn entries(&self) -> Vec<FilterEntry> {
        OverlayCategory::ALL
            .iter()
            .map(|&category| FilterEntry {
                category,
                label: category.label(),
                enabled: self.is_enabled(category),
            })
            .collect()
    }

    /// Enabled categories that have a dataset to draw.
    ///
    /// Water quality, public transportation and flood risk can be switched on
    /// but never render anything.
    pub fn visible_layers(&self) -> Vec<OverlayCategory> {
        OverlayCategory::ALL
            .iter()
            .copied()
            .filter(|c| self.is_enabled(*c) && c.has_dataset())
            .collect()
    }
}
