use serde::{Deserialize, Serialize};

use crate::error::{OrganizerError, OrganizerResult};
use crate::interaction::SnapConfig;

/// Bootstrap configuration for a [`NavigationState`](super::NavigationState).
///
/// Serializable so host applications can persist navigation setup without
/// inventing their own format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Fraction of the viewport a child timeline strip occupies when a
    /// timeline and its child are shown simultaneously. Must be in `(0, 1)`.
    pub child_timeline_size_ratio: f64,
    #[serde(default)]
    pub snap: SnapConfig,
    /// Additional visible space before the current date range, as a fraction
    /// of the range size.
    #[serde(default)]
    pub relative_top_margin: f64,
    /// Additional visible space after the current date range, as a fraction
    /// of the range size.
    #[serde(default)]
    pub relative_bottom_margin: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            child_timeline_size_ratio: 0.3,
            snap: SnapConfig::default(),
            relative_top_margin: 0.0,
            relative_bottom_margin: 0.0,
        }
    }
}

impl NavigationConfig {
    pub fn validate(self) -> OrganizerResult<Self> {
        if !self.child_timeline_size_ratio.is_finite()
            || self.child_timeline_size_ratio <= 0.0
            || self.child_timeline_size_ratio >= 1.0
        {
            return Err(OrganizerError::InvalidConfig(
                "child timeline size ratio must be in (0, 1)".to_owned(),
            ));
        }
        if !self.relative_top_margin.is_finite()
            || self.relative_top_margin < 0.0
            || !self.relative_bottom_margin.is_finite()
            || self.relative_bottom_margin < 0.0
        {
            return Err(OrganizerError::InvalidConfig(
                "visibility margins must be finite and >= 0".to_owned(),
            ));
        }
        self.snap.validate()?;
        Ok(self)
    }
}
