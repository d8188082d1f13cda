use crate::error::{Result, StateError};
use urban_overlays::{AssetState, PromptCatalogue, PromptCategory};

/// Two-level picker over the canned prompt catalogue.
#[derive(Debug, Clone, Default)]
pub struct PromptSelector {
    catalogue: AssetState<PromptCatalogue>,
    selected_category: Option<usize>,
}

impl PromptSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_catalogue(&mut self, catalogue: AssetState<PromptCatalogue>) {
        self.catalogue = catalogue;
        self.selected_category = None;
    }

    pub fn catalogue(&self) -> &AssetState<PromptCatalogue> {
        &self.catalogue
    }

    fn ready(&self) -> Result<&PromptCatalogue> {
        self.catalogue.ready().ok_or(StateError::CatalogueUnavailable)
    }

    pub fn select_category(&mut self, index: usize) -> Result<&PromptCategory> {
        let catalogue = self.catalogue.ready().ok_or(StateError::CatalogueUnavailable)?;
        let category = catalogue
            .category(index)
            .ok_or(StateError::CategoryNotFound(index))?;
        self.selected_category = Some(index);
        Ok(category)
    }

    pub fn back(&mut self) {
        self.selected_category = None;
    }

    pub fn selected_category(&self) -> Option<&PromptCategory> {
        let index = self.selected_category?;
        self.catalogue.ready()?.category(index)
    }

    /// Take prompt `index` from the open category and return to the category
    /// list.
    pub fn pick(&mut self, index: usize) -> Result<String> {
        let category = self.selected_category.ok_or(StateError::NoCategorySelected)?;
        let prompt = self
            .ready()?
            .prompt(category, index)
            .ok_or(StateError::PromptNotFound(index))?
            .to_string();
        self.selected_category = None;
        Ok(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> PromptSelector {
        let mut selector = PromptSelector::new();
        selector.set_catalogue(AssetState::Ready(PromptCatalogue {
            categories: vec![PromptCategory {
                name: "Housing".into(),
                description: String::new(),
                prompts: vec!["Where should I develop 200 houses?".into()],
            }],
        }));
        selector
    }

    #[test]
    fn test_pick_resets_category() {
        let mut selector = selector();
        assert_eq!(selector.select_category(0).unwrap().name, "Housing");

        let prompt = selector.pick(0).unwrap();

        assert_eq!(prompt, "Where should I develop 200 houses?");
        assert!(selector.selected_category().is_none());
    }

    #[test]
    fn test_bad_indices() {
        let mut selector = selector();
        assert_eq!(
            selector.select_category(3).unwrap_err(),
            StateError::CategoryNotFound(3)
        );

        selector.select_category(0).unwrap();
        assert_eq!(selector.pick(5).unwrap_err(), StateError::PromptNotFound(5));
        assert!(selector.selected_category().is_some());
    }

    #[test]
    fn test_pick_without_open_category() {
        let mut selector = selector();
        assert_eq!(selector.pick(0).unwrap_err(), StateError::NoCategorySelected);

        selector.select_category(0).unwrap();
        selector.back();
        assert_eq!(selector.pick(0).unwrap_err(), StateError::NoCategorySelected);
    }

    #[test]
    fn test_unavailable_catalogue() {
        let mut selector = PromptSelector::new();
        assert_eq!(
            selector.select_category(0).unwrap_err(),
            StateError::CatalogueUnavailable
        );
    }
}
