//! View Configuration

use serde::Deserialize;

/// Selector for the element that receives focus after replaced content
/// swallowed the focused element.
pub const DEFAULT_FOCUSABLE_SELECTOR: &str = "[tabindex],a,button:not(:disabled)";

/// View configuration options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Where keyboard focus lands when replaced content held it
    pub focusable_selector: String,

    /// Move focus after `replace_element` / `set_element_content`
    pub restore_focus: bool,

    /// Memoize `element` lookups; when off every lookup re-queries
    pub cache_elements: bool,
}

impl ViewConfig {
    /// Load from JSON; missing fields take their defaults
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            focusable_selector: DEFAULT_FOCUSABLE_SELECTOR.to_string(),
            restore_focus: true,
            cache_elements: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_partial() {
        let config = ViewConfig::from_json(r#"{"cache_elements": false}"#).unwrap();
        assert!(!config.cache_elements);
        assert!(config.restore_focus);
        assert_eq!(config.focusable_selector, DEFAULT_FOCUSABLE_SELECTOR);
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        assert!(ViewConfig::from_json(r#"{"restore_focus": "yes"}"#).is_err());
    }
}
