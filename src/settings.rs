use crate::model::{Rgb, Tool};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Logical line width bounds exposed by the width slider.
pub const MIN_WIDTH: u32 = 1;
pub const MAX_WIDTH: u32 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_tool")]
    pub tool: Tool,
    #[serde(default = "default_color")]
    pub color: Rgb,
    /// Logical line width, kept within `MIN_WIDTH..=MAX_WIDTH`.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Pen opacity percentage, `0..=100`.
    #[serde(default = "default_opacity")]
    pub pen_opacity: u8,
    /// Highlighter opacity percentage, `0..=100`.
    #[serde(default = "default_opacity")]
    pub highlighter_opacity: u8,
    /// Quick color swatches shown in the toolbar.
    #[serde(default = "default_palette")]
    pub palette: Vec<Rgb>,
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional log file target. Logs go to stderr only when absent.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_tool() -> Tool {
    Tool::Pen
}

fn default_color() -> Rgb {
    Rgb::rgb(0, 0, 0)
}

fn default_width() -> u32 {
    4
}

fn default_opacity() -> u8 {
    100
}

fn default_palette() -> Vec<Rgb> {
    vec![
        Rgb::rgb(0, 0, 0),
        Rgb::rgb(255, 64, 64),
        Rgb::rgb(255, 171, 0),
        Rgb::rgb(255, 230, 64),
        Rgb::rgb(61, 220, 132),
        Rgb::rgb(0, 168, 255),
        Rgb::rgb(180, 102, 255),
        Rgb::rgb(120, 120, 120),
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            color: default_color(),
            width: default_width(),
            pen_opacity: default_opacity(),
            highlighter_opacity: default_opacity(),
            palette: default_palette(),
            debug_logging: false,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        let mut settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("parse settings file {}", path.display()))?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create settings folder {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("write settings file {}", path.display()))?;
        Ok(())
    }

    /// Pulls persisted values back into their contracts after a lenient load.
    pub fn sanitize(&mut self) {
        self.width = self.width.clamp(MIN_WIDTH, MAX_WIDTH);
        self.pen_opacity = self.pen_opacity.min(100);
        self.highlighter_opacity = self.highlighter_opacity.min(100);
        if self.palette.is_empty() {
            self.palette = default_palette();
        }
    }

    /// The opacity slider that applies to the given tool. The eraser always
    /// paints fully opaque.
    pub fn opacity_for(&self, tool: Tool) -> u8 {
        match tool {
            Tool::Pen => self.pen_opacity,
            Tool::Highlighter => self.highlighter_opacity,
            Tool::Eraser => 100,
        }
    }

    pub fn config_path() -> PathBuf {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("inkboard")
            .join("settings.json")
    }
}
