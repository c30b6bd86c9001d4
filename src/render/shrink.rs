use serde::{Deserialize, Serialize};

use crate::document::TextRole;

/// Smallest size auto-shrink will produce
pub const MIN_SHRINK_FONT_PX: u32 = 14;

/// Length thresholds for the free-text roles that shrink as they grow.
/// These are product-tuned values, kept configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoShrinkConfig {
    pub subject_threshold: usize,
    pub name_threshold: usize,
    pub school_name_threshold: usize,
    pub min_font_px: u32,
}

impl Default for AutoShrinkConfig {
    fn default() -> Self {
        Self {
            subject_threshold: 20,
            name_threshold: 15,
            school_name_threshold: 25,
            min_font_px: MIN_SHRINK_FONT_PX,
        }
    }
}

impl AutoShrinkConfig {
    /// Threshold for roles that auto-shrink; `None` for fixed-size roles
    pub fn threshold_for(&self, role: TextRole) -> Option<usize> {
        match role {
            TextRole::Subject => Some(self.subject_threshold),
            TextRole::Name => Some(self.name_threshold),
            TextRole::SchoolName => Some(self.school_name_threshold),
            TextRole::Title | TextRole::OtherInfo => None,
        }
    }

    /// Effective size of `text` rendered in `role` with a stored size of
    /// `stored_px`
    pub fn effective_size(&self, role: TextRole, stored_px: u32, text: &str) -> u32 {
        match self.threshold_for(role) {
            Some(threshold) => auto_shrink(stored_px, text.chars().count(), threshold, self.min_font_px),
            None => stored_px,
        }
    }
}

/// Logarithmic font shrink for long text.
///
/// Up to `threshold` characters the stored size is used unchanged. Beyond
/// it the size is scaled by `ln(threshold) / ln(len)`, rounded, and never
/// goes below `min_px`.
pub fn auto_shrink(stored_px: u32, len: usize, threshold: usize, min_px: u32) -> u32 {
    if len <= threshold {
        return stored_px;
    }
    let scale = (threshold as f64).ln() / (len as f64).ln();
    let scaled = (stored_px as f64 * scale).round();
    // degenerate thresholds (0 or 1) give a non-positive scale
    let scaled = if scaled.is_finite() && scaled > 0.0 {
        scaled as u32
    } else {
        0
    };
    scaled.max(min_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_keeps_stored_size() {
        assert_eq!(auto_shrink(24, 0, 20, 14), 24);
        assert_eq!(auto_shrink(24, 20, 20, 14), 24);
        // even below the floor
        assert_eq!(auto_shrink(12, 5, 20, 14), 12);
    }

    #[test]
    fn twenty_five_character_subject() {
        assert_eq!(auto_shrink(24, 25, 20, 14), 22);
    }

    #[test]
    fn very_long_text_hits_the_floor() {
        assert_eq!(auto_shrink(24, 10_000, 20, 14), 14);
    }

    #[test]
    fn degenerate_threshold_floors() {
        assert_eq!(auto_shrink(40, 5, 1, 14), 14);
        assert_eq!(auto_shrink(40, 1, 0, 14), 14);
    }

    #[test]
    fn fixed_roles_never_shrink() {
        let config = AutoShrinkConfig::default();
        let long = "x".repeat(200);
        assert_eq!(config.effective_size(TextRole::Title, 60, &long), 60);
        assert_eq!(config.effective_size(TextRole::OtherInfo, 24, &long), 24);
        assert!(config.effective_size(TextRole::Name, 36, &long) < 36);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let config = AutoShrinkConfig::default();
        // 15 Arabic letters are 30 bytes but exactly at the name threshold
        let name = "ب".repeat(15);
        assert_eq!(config.effective_size(TextRole::Name, 36, &name), 36);
    }
}
