use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::color::{parse_hex, Theme, ThemeColors};
use crate::geometry::{CircleSpec, DEFAULT_MAX_VALUE};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub progress: ProgressConfig,
    pub circle: CircleConfig,
    pub colors: ColorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProgressConfig {
    pub max_value: i32,
    pub tick_ms: u64,
    pub step: i32,
    pub auto_start: bool,
    /// Start over from 0 after reaching max_value
    pub loop_when_done: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            max_value: DEFAULT_MAX_VALUE,
            tick_ms: 150,
            step: 1,
            auto_start: true,
            loop_when_done: false,
        }
    }
}

impl ProgressConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CircleConfig {
    /// Radius in canvas pixels; shrunk to fit the terminal if needed
    pub radius: f32,
    pub stroke_width: f32,
    pub text_size: u16,
    pub show_text: bool,
    pub suffix: String,
}

impl Default for CircleConfig {
    fn default() -> Self {
        let spec = CircleSpec::default();
        Self {
            radius: spec.radius,
            stroke_width: spec.stroke_width,
            text_size: spec.text_size,
            show_text: spec.show_text,
            suffix: "%".to_string(),
        }
    }
}

impl CircleConfig {
    pub fn spec(&self) -> CircleSpec {
        CircleSpec {
            radius: self.radius,
            stroke_width: self.stroke_width,
            text_size: self.text_size,
            show_text: self.show_text,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    pub theme: Theme,
    /// Hex overrides, e.g. "#1e88e5"
    pub background: Option<String>,
    pub filled: Option<String>,
    pub text: Option<String>,
}

impl ColorConfig {
    /// Theme colours with any hex overrides applied.
    pub fn resolve(&self, theme: Theme) -> ThemeColors {
        let mut colors = theme.colors();
        if let Some(c) = self.background.as_deref().and_then(parse_hex) {
            colors.background = c;
        }
        if let Some(c) = self.filled.as_deref().and_then(parse_hex) {
            colors.filled = c;
        }
        if let Some(c) = self.text.as_deref().and_then(parse_hex) {
            colors.text = c;
        }
        colors
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/roundarea/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("roundarea").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists
    /// Returns None if file doesn't exist, logs warning on parse errors
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("{:#}; using defaults", e);
                None
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.progress;
        if p.max_value <= 0 {
            bail!("progress.max_value must be positive, got {}", p.max_value);
        }
        if p.step <= 0 {
            bail!("progress.step must be positive, got {}", p.step);
        }
        if p.tick_ms == 0 {
            bail!("progress.tick_ms must be non-zero");
        }

        let c = &self.circle;
        if !c.radius.is_finite() || c.radius <= 0.0 {
            bail!("circle.radius must be positive, got {}", c.radius);
        }
        if !c.stroke_width.is_finite() || c.stroke_width < 0.0 || c.stroke_width >= c.radius {
            bail!(
                "circle.stroke_width must be in [0, radius), got {}",
                c.stroke_width
            );
        }

        for (name, value) in [
            ("background", &self.colors.background),
            ("filled", &self.colors.filled),
            ("text", &self.colors.text),
        ] {
            if let Some(hex) = value {
                if parse_hex(hex).is_none() {
                    bail!("colors.{} is not a hex colour: {}", name, hex);
                }
            }
        }
        Ok(())
    }

    /// Write the template to `path`, or the XDG path when none is given.
    /// Returns the path written.
    pub fn init_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
        let path = path
            .or_else(Self::default_path)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        if path.exists() && !force {
            anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
        }
        Self::write_template(&path)?;
        Ok(path)
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::generate_config_template())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r##"# Roundarea Configuration
# This file is auto-generated. Edit as needed.

[progress]
# Value at which the circle is full. 100 uses the precomputed angle table;
# any other value is rescaled to a fraction and solved numerically.
max_value = 100
# Milliseconds between progress steps
tick_ms = 150
# Amount added per step
step = 1
# Start stepping immediately
auto_start = true
# Start over from 0 after reaching max_value
loop_when_done = false

[circle]
# Radius in canvas pixels (two pixels per terminal row); shrunk to fit
radius = 120.0
# Width of the ring around the liquid
stroke_width = 6.0
# Label scale (1-5)
text_size = 3
# Show the percentage label
show_text = true
# Appended to the progress number
suffix = "%"

[colors]
# Theme: "ocean", "fire", "forest", "purple", "monochrome"
theme = "ocean"
# Hex overrides (omit to use the theme colour)
# background = "#d0e4f0"
# filled = "#1e88e5"
# text = "#202020"
"##
        .to_string()
    }

    /// Persist interactive preferences, keeping comments and unknown keys.
    pub fn save_preferences(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            Self::write_template(path)?;
        }

        let content = std::fs::read_to_string(path)?;
        let mut doc = content
            .parse::<toml_edit::DocumentMut>()
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if !doc.contains_key("colors") {
            doc["colors"] = toml_edit::table();
        }
        doc["colors"]["theme"] = toml_edit::value(self.colors.theme.name());

        if !doc.contains_key("circle") {
            doc["circle"] = toml_edit::table();
        }
        doc["circle"]["show_text"] = toml_edit::value(self.circle.show_text);

        std::fs::write(path, doc.to_string())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::cli::RunArgs) {
        if let Some(max) = args.max_value {
            self.progress.max_value = max;
        }
        if let Some(ms) = args.tick_ms {
            self.progress.tick_ms = ms;
        }
        if let Some(step) = args.step {
            self.progress.step = step;
        }
        if args.paused {
            self.progress.auto_start = false;
        }
        if args.loop_when_done {
            self.progress.loop_when_done = true;
        }

        if let Some(radius) = args.radius {
            self.circle.radius = radius;
        }
        if let Some(width) = args.stroke_width {
            self.circle.stroke_width = width;
        }
        if args.hide_text {
            self.circle.show_text = false;
        }

        if let Some(theme) = args.theme {
            self.colors.theme = theme;
        }
        if let Some(ref c) = args.filled_color {
            self.colors.filled = Some(c.clone());
        }
        if let Some(ref c) = args.background_color {
            self.colors.background = Some(c.clone());
        }
    }
}
