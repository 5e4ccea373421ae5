#![forbid(unsafe_code)]

//! Panel configuration.
//!
//! A [`PanelConfig`] can be built in code, deserialized from any serde
//! format, or read from the environment:
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `REFLOW_ITEM_PADDING` | Item padding |
//! | `REFLOW_DRAG_TOLERANCE` | Enables drag-to-reorder with this tolerance |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::drag::{DragConfig, DragConfigError};

/// Environment variable overriding [`PanelConfig::item_padding`].
pub const ENV_ITEM_PADDING: &str = "REFLOW_ITEM_PADDING";

/// Environment variable enabling drag with the given tolerance.
pub const ENV_DRAG_TOLERANCE: &str = "REFLOW_DRAG_TOLERANCE";

/// Settings for an [`OrderedPanel`](crate::panel::OrderedPanel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Gap around and between items (default: 0).
    pub item_padding: i32,
    /// Drag-to-reorder settings; `None` disables dragging.
    pub drag: Option<DragConfig>,
}

impl PanelConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_item_padding(mut self, padding: i32) -> Self {
        self.item_padding = padding;
        self
    }

    /// Enable dragging with default settings.
    #[must_use]
    pub fn draggable(self) -> Self {
        self.with_drag(DragConfig::default())
    }

    #[must_use]
    pub fn with_drag(mut self, drag: DragConfig) -> Self {
        self.drag = Some(drag);
        self
    }

    /// Defaults overridden by `REFLOW_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`, keyed like the
    /// environment variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(padding) = parse_var(&lookup, ENV_ITEM_PADDING)? {
            config.item_padding = padding;
        }
        if let Some(tolerance) = parse_var(&lookup, ENV_DRAG_TOLERANCE)? {
            config.drag = Some(DragConfig::default().with_tolerance(tolerance));
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject negative padding or tolerance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_padding < 0 {
            return Err(ConfigError::NegativePadding {
                padding: self.item_padding,
            });
        }
        if let Some(drag) = &self.drag {
            drag.validate()?;
        }
        Ok(())
    }
}

fn parse_var<F>(lookup: &F, key: &'static str) -> Result<Option<i32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}

/// Invalid panel configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable did not hold an integer.
    InvalidValue { key: &'static str, value: String },
    NegativePadding { padding: i32 },
    Drag(DragConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "{key} must be an integer (got {value:?})")
            }
            Self::NegativePadding { padding } => {
                write!(f, "item padding must be non-negative (got {padding})")
            }
            Self::Drag(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Drag(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DragConfigError> for ConfigError {
    fn from(err: DragConfigError) -> Self {
        Self::Drag(err)
    }
}
