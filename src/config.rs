use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::color::ToolColor;
use crate::persistence::DEFAULT_STORAGE_KEY;

/// User-facing settings, persisted with the app state between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PaintConfig {
    /// Tool color a fresh session starts with
    pub color: ToolColor,
    /// Line width a fresh session starts with
    pub size: f32,
    /// Key the drawing is saved under
    pub storage_key: String,
    /// Restore the saved drawing when the app starts
    pub load_on_startup: bool,
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            color: ToolColor::default(),
            size: 6.0,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            load_on_startup: true,
            min_size: 1.0,
            max_size: 50.0,
        }
    }
}

impl PaintConfig {
    pub fn size_range(&self) -> RangeInclusive<f32> {
        let min = self.min_size.min(self.max_size);
        min..=self.max_size.max(min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: PaintConfig = serde_json::from_str(r#"{"size": 12.0}"#).unwrap();
        assert_eq!(config.size, 12.0);
        assert_eq!(config.storage_key, "saved");
        assert_eq!(config.color, ToolColor::default());
    }

    #[test]
    fn test_size_range_is_ordered() {
        let config = PaintConfig {
            min_size: 10.0,
            max_size: 2.0,
            ..Default::default()
        };
        assert_eq!(config.size_range(), 2.0..=2.0);
    }
}
