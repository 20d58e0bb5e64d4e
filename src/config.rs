//! Viewer configuration.
//!
//! Settings are layered, each layer overriding the one before it:
//!
//! ```text
//! 1. stock defaults            (ViewerConfig::default)
//! 2. config.toml               (--config, default ./config.toml, optional)
//! 3. environment               (COMICS_DIR, HOST, PORT, SITE_TITLE)
//! 4. command-line flags        (--comics-dir, --host, --port)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! comics_dir = "static/comics"  # Directory of comic images
//! site_title = "Comics"         # Suffix of every page <title>
//!
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//!
//! [navigation]
//! swipe_threshold = 40          # Minimum horizontal swipe, in pixels
//!
//! [logging]
//! level = "info"                # RUST_LOG takes precedence
//! json = false
//!
//! [colors.light]
//! fg = "#111111"
//! bg = "#fafafa"
//! muted = "#777777"             # Position counter, footer, button borders
//!
//! [colors.dark]
//! fg = "#eeeeee"
//! bg = "#0e0f11"
//! muted = "#9aa0a6"
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },
}

/// Viewer configuration.
///
/// All fields have defaults; a config file only needs the keys it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Directory scanned for comics on every request.
    pub comics_dir: PathBuf,
    /// Appended to each page title, e.g. "Bug Fix — Comics".
    pub site_title: String,
    pub server: ServerConfig,
    pub navigation: NavigationConfig,
    pub logging: LoggingConfig,
    pub colors: ColorConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            comics_dir: PathBuf::from("static/comics"),
            site_title: "Comics".to_string(),
            server: ServerConfig::default(),
            navigation: NavigationConfig::default(),
            logging: LoggingConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.comics_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "comics_dir must not be empty".into(),
            ));
        }
        if self.site_title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_title must not be empty".into(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port must be non-zero".into()));
        }
        if self.navigation.swipe_threshold == 0 {
            return Err(ConfigError::Validation(
                "navigation.swipe_threshold must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// `host:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Listen address settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Client-side navigation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Minimum horizontal travel, in pixels, for a touch gesture to count as
    /// a swipe. Vertical travel must stay below the same value.
    pub swipe_threshold: u32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 40,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Text color.
    pub fg: String,
    /// Background color.
    pub bg: String,
    /// Secondary text and button borders.
    pub muted: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            fg: "#111111".to_string(),
            bg: "#fafafa".to_string(),
            muted: "#777777".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            fg: "#eeeeee".to_string(),
            bg: "#0e0f11".to_string(),
            muted: "#9aa0a6".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Layer loading and merging
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that file overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ViewerConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional file overlay onto the stock defaults and deserialize.
///
/// Not validated yet: environment and flag layers still have to apply.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<ViewerConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ViewerConfig = merged.try_into()?;
    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Taking the lookup as a closure keeps this testable without mutating the
/// process environment.
pub fn apply_env<F>(config: &mut ViewerConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup("COMICS_DIR").filter(|v| !v.is_empty()) {
        config.comics_dir = PathBuf::from(dir);
    }
    if let Some(host) = lookup("HOST").filter(|v| !v.is_empty()) {
        config.server.host = host;
    }
    if let Some(title) = lookup("SITE_TITLE").filter(|v| !v.is_empty()) {
        config.site_title = title;
    }
    if let Some(port) = lookup("PORT").filter(|v| !v.is_empty()) {
        config.server.port = port.trim().parse().map_err(|_| ConfigError::Env {
            var: "PORT",
            value: port.clone(),
        })?;
    }
    Ok(())
}

/// Command-line overrides, the final layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub comics_dir: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Overrides {
    pub fn apply(self, config: &mut ViewerConfig) {
        if let Some(dir) = self.comics_dir {
            config.comics_dir = dir;
        }
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Load the full layered configuration and validate it.
pub fn load_config(config_path: &Path, overrides: Overrides) -> Result<ViewerConfig, ConfigError> {
    let overlay = load_raw_config(config_path)?;
    let mut config = resolve_config(overlay)?;
    apply_env(&mut config, |var| std::env::var(var).ok())?;
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Comic Viewer Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Precedence, lowest to highest:
#   this file -> environment (COMICS_DIR, HOST, PORT, SITE_TITLE) -> CLI flags
#
# Unknown keys will cause an error.

# Directory holding the comic images. Scanned on every request, so new
# files show up without a restart.
#
# Name files so that plain alphabetical order is publication order. The
# convention is YYYY-MM-DD-slug.ext, e.g. 2025-08-05-bug-fix.png, which is
# titled "Bug Fix". Names without a date prefix are titled from the whole
# name. A same-named .txt file (2025-08-05-bug-fix.txt) is shown as the
# caption; its first line doubles as the image alt text.
comics_dir = "static/comics"

# Shown after the comic title in the browser tab.
site_title = "Comics"

# ---------------------------------------------------------------------------
# HTTP server
# ---------------------------------------------------------------------------
[server]
host = "0.0.0.0"
port = 5000

# ---------------------------------------------------------------------------
# Client-side navigation (arrow keys, f/l, swipe)
# ---------------------------------------------------------------------------
[navigation]
# Minimum horizontal swipe distance in pixels.
swipe_threshold = 40

# ---------------------------------------------------------------------------
# Logging
# ---------------------------------------------------------------------------
[logging]
# Filter directive, e.g. "info" or "comic_viewer=debug,tower_http=info".
# The RUST_LOG environment variable overrides this.
level = "info"
# Emit JSON lines.
json = false

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
fg = "#111111"
bg = "#fafafa"
muted = "#777777"    # Counter, footer, button borders

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
fg = "#eeeeee"
bg = "#0e0f11"
muted = "#9aa0a6"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{ --fg: {light_fg}; --bg: {light_bg}; --muted: {light_muted}; }}

@media (prefers-color-scheme: dark) {{
    :root {{ --fg: {dark_fg}; --bg: {dark_bg}; --muted: {dark_muted}; }}
}}"#,
        light_fg = colors.light.fg,
        light_bg = colors.light.bg,
        light_muted = colors.light.muted,
        dark_fg = colors.dark.fg,
        dark_bg = colors.dark.bg,
        dark_muted = colors.dark.muted,
    )
}
