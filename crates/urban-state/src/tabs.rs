use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Left-rail tab. `None` means the side panel is collapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Filters,
    PointsOfInterest,
    Assistant,
    None,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tab::Filters => "filters",
            Tab::PointsOfInterest => "poi",
            Tab::Assistant => "assistant",
            Tab::None => "none",
        };
        f.write_str(name)
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filters" | "filter" => Ok(Tab::Filters),
            "poi" | "points" | "points_of_interest" => Ok(Tab::PointsOfInterest),
            "assistant" | "ai" | "chat" => Ok(Tab::Assistant),
            "none" => Ok(Tab::None),
            other => Err(format!("Unknown tab: {}", other)),
        }
    }
}

/// What the assistant tab shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantPane {
    #[default]
    PromptSelector,
    Chat,
}

#[derive(Debug, Clone, Default)]
pub struct TabController {
    active: Tab,
    pane: AssistantPane,
}

impl TabController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `tab`; selecting the active tab again collapses the panel.
    pub fn select(&mut self, tab: Tab) -> Tab {
        self.active = if tab == self.active { Tab::None } else { tab };
        self.active
    }

    /// Collapse the side panel regardless of the active tab.
    pub fn collapse(&mut self) {
        self.active = Tab::None;
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn pane(&self) -> AssistantPane {
        self.pane
    }

    pub fn show_pane(&mut self, pane: AssistantPane) {
        self.pane = pane;
    }
}
