use composer_common::{default_palette, CommonError, CommonResult, Position};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "composer.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Geometry given to every new component
    #[serde(default = "default_component_position")]
    pub component_position: Position,

    /// Distance between successive children dropped on the same canvas
    #[serde(default = "default_child_offset_step")]
    pub child_offset_step: f64,

    /// Component children wrap their offset at this many pixels
    #[serde(default = "default_component_offset_wrap")]
    pub component_offset_wrap: f64,

    /// Maximum number of undo levels (0 = unlimited)
    #[serde(default = "default_undo_levels")]
    pub undo_levels: usize,

    /// Colors handed out to new components
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

fn default_component_position() -> Position {
    Position::new(25.0, 25.0, 800.0, 550.0)
}

fn default_child_offset_step() -> f64 {
    16.0
}

fn default_component_offset_wrap() -> f64 {
    150.0
}

fn default_undo_levels() -> usize {
    100
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(dir: &Path) -> CommonResult<Self> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a config document
    pub fn from_json(content: &str) -> CommonResult<Self> {
        let config: EditorConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> CommonResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Components are scale references for their instances, so they can never
    /// start out with a zero dimension.
    pub fn validate(&self) -> CommonResult<()> {
        if self.component_position.is_degenerate() {
            return Err(CommonError::Generic(
                "componentPosition must have a non-zero width and height".to_string(),
            ));
        }

        if self.component_offset_wrap <= 0.0 {
            return Err(CommonError::Generic(
                "componentOffsetWrap must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            component_position: default_component_position(),
            child_offset_step: default_child_offset_step(),
            component_offset_wrap: default_component_offset_wrap(),
            undo_levels: default_undo_levels(),
            palette: default_palette(),
        }
    }
}
