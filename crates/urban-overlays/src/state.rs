use crate::error::Result;

/// Load lifecycle of a static asset.
///
/// `Unavailable` is terminal for the session; nothing retries it.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetState<T> {
    Loading,
    Ready(T),
    Unavailable(String),
}

impl<T> Default for AssetState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> AssetState<T> {
    /// Convert a load result, logging failures.
    pub fn from_result(path: &str, result: Result<T>) -> Self {
        match result {
            Ok(value) => {
                tracing::debug!("Loaded asset {}", path);
                Self::Ready(value)
            }
            Err(e) => {
                tracing::error!("Failed to load asset {}: {}", path, e);
                Self::Unavailable(e.to_string())
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
