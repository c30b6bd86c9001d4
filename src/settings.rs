use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::render::AutoShrinkConfig;
use crate::state::DEFAULT_STORAGE_KEY;

/// Application settings, persisted alongside the app state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct CoverSettings {
    /// Key the saved design is stored under
    pub storage_key: String,
    pub auto_shrink: AutoShrinkConfig,
    /// Where exported files are written; the working directory when unset
    pub export_dir: Option<PathBuf>,
    /// Extra folder searched for the Cairo, Amiri and Lateef font files
    pub font_dir: Option<PathBuf>,
}

impl Default for CoverSettings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            auto_shrink: AutoShrinkConfig::default(),
            export_dir: None,
            font_dir: None,
        }
    }
}

impl CoverSettings {
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn older_settings_get_new_fields() {
        let settings: CoverSettings = serde_json::from_str(r#"{"storage_key":"k"}"#).unwrap();
        assert_eq!(settings.storage_key, "k");
        assert_eq!(settings.auto_shrink, AutoShrinkConfig::default());
        assert_eq!(settings.export_dir(), PathBuf::from("."));
        assert_eq!(settings.font_dir, None);
    }

    #[test]
    fn partial_shrink_config_keeps_other_thresholds() {
        let settings: CoverSettings =
            serde_json::from_str(r#"{"auto_shrink":{"name_threshold":10}}"#).unwrap();
        assert_eq!(settings.auto_shrink.name_threshold, 10);
        assert_eq!(settings.auto_shrink.subject_threshold, 20);
        assert_eq!(settings.storage_key, DEFAULT_STORAGE_KEY);
    }
}
