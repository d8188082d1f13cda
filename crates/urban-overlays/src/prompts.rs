use serde::{Deserialize, Serialize};

pub const PROMPT_CATALOGUE_PATH: &str = "/sample_prompts.json";

/// Canned prompts grouped by planning topic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PromptCatalogue {
    #[serde(default)]
    pub categories: Vec<PromptCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prompts: Vec<String>,
}

impl PromptCatalogue {
    pub fn category(&self, index: usize) -> Option<&PromptCategory> {
        self.categories.get(index)
    }

    pub fn prompt(&self, category: usize, prompt: usize) -> Option<&str> {
        self.category(category)?.prompts.get(prompt).map(String::as_str)
    }
}
