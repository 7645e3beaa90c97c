use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use ratatui::style::Color;
use serde::{Deserialize, Deserializer};
use crate::animation::StepProfile;
use crate::error::{ArrowError, ArrowResult};

// ─── Embedded Default ────────────────────────────────────────────────────
/// Baked into the binary at compile time, always available as the base layer.
const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

const APP_DIR: &str = "linked-arrows";

/// Accepted `animation.step_gap` range. Below the floor the per-frame
/// increment vanishes in f32 and a step would never finish.
const STEP_GAP_RANGE: std::ops::RangeInclusive<f32> = 1e-4..=1.0;

// ─── CLI Arguments (override layer) ─────────────────────────────────────
/// linked-arrows — a chain of rotating arrow clusters, one step per tap
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "linked-arrows", version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the default config to stdout and exit
    #[arg(long)]
    pub print_default_config: bool,

    /// Log file path (logging disabled if not specified)
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Log level filter (overrides config file)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Number of nodes in the chain (overrides config file)
    #[arg(short, long)]
    pub nodes: Option<usize>,

    /// Delay between animation frames in milliseconds (overrides config file)
    #[arg(long)]
    pub frame_delay: Option<u64>,

    /// Disable mouse support
    #[arg(long, default_value_t = false)]
    pub no_mouse: bool,

    /// Render one frame at WIDTHxHEIGHT, print its draw commands as JSON and exit
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_dimensions)]
    pub dump_frame: Option<Dimensions>,
}

/// Surface size requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Parse `WIDTHxHEIGHT` into positive dimensions.
pub fn parse_dimensions(s: &str) -> ArrowResult<Dimensions> {
    let invalid = || ArrowError::InvalidDimensions(s.to_string());
    let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let w: u32 = w.trim().parse().map_err(|_| invalid())?;
    let h: u32 = h.trim().parse().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok(Dimensions {
        width: w,
        height: h,
    })
}

// ─── TOML Structs ───────────────────────────────────────────────────────

/// Root configuration — parsed from TOML, then overridden by CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Nodes in the chain
    pub nodes: usize,
    /// Rotating strokes per node
    pub lines: usize,
    /// Scale increment per frame
    pub step_gap: f32,
    /// Threshold between slow and fast rate
    pub scale_division: f64,
    /// Delay between frames (milliseconds)
    pub frame_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub size_factor: f32,
    pub stroke_factor: f32,
    pub arrow_degrees: f32,
    pub arrow_size_factor: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(
        deserialize_with = "deserialize_color",
        default = "default_color_foreground"
    )]
    pub foreground: Color,

    #[serde(
        deserialize_with = "deserialize_color",
        default = "default_color_background"
    )]
    pub background: Color,

    #[serde(deserialize_with = "deserialize_color", default = "default_color_cyan")]
    pub accent: Color,

    #[serde(
        deserialize_with = "deserialize_color",
        default = "default_color_darkgray"
    )]
    pub dim: Color,
}

// ─── Defaults ───────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        // Parse the embedded TOML — this cannot fail since we control it
        toml::from_str(DEFAULT_CONFIG_TOML)
            .expect("BUG: embedded default_config.toml is invalid TOML")
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let step = StepProfile::default();
        Self {
            nodes: 5,
            lines: 4,
            step_gap: step.gap,
            scale_division: step.division,
            frame_delay_ms: 50,
        }
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            size_factor: 2.8,
            stroke_factor: 90.0,
            arrow_degrees: 45.0,
            arrow_size_factor: 5.0,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            foreground: default_color_foreground(),
            background: default_color_background(),
            accent: Color::Cyan,
            dim: Color::DarkGray,
        }
    }
}

// ─── Color Deserializer ─────────────────────────────────────────────────

fn deserialize_color<'de, D>(deserializer: D) -> std::result::Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: \"{s}\"")))
}

/// Parse a color string into a ratatui Color.
/// Supports: named colors, "reset", "#RRGGBB" hex.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "reset" | "default" | "transparent" => Some(Color::Reset),
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" | "dark_gray" | "dark_grey" => Some(Color::DarkGray),
        "lightblue" | "light_blue" => Some(Color::LightBlue),
        "lightcyan" | "light_cyan" => Some(Color::LightCyan),
        hex if hex.starts_with('#') && hex.len() == 7 => {
            let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
            let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
            let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

// ─── Serde Default Helpers ──────────────────────────────────────────────

fn default_log_level() -> String {
    "info".into()
}
fn default_color_foreground() -> Color {
    Color::Rgb(0x15, 0x65, 0xC0)
}
fn default_color_background() -> Color {
    Color::Rgb(0xBD, 0xBD, 0xBD)
}
fn default_color_cyan() -> Color {
    Color::Cyan
}
fn default_color_darkgray() -> Color {
    Color::DarkGray
}

// ─── Widget Configuration ───────────────────────────────────────────────

/// Immutable, validated parameters handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub nodes: usize,
    pub lines: usize,
    pub step: StepProfile,
    pub size_factor: f32,
    pub stroke_factor: f32,
    pub arrow_degrees: f32,
    pub arrow_size_factor: f32,
    pub foreground: Color,
    pub background: Color,
    pub frame_delay: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        let animation = AnimationConfig::default();
        let geometry = GeometryConfig::default();
        Self {
            nodes: animation.nodes,
            lines: animation.lines,
            step: StepProfile::default(),
            size_factor: geometry.size_factor,
            stroke_factor: geometry.stroke_factor,
            arrow_degrees: geometry.arrow_degrees,
            arrow_size_factor: geometry.arrow_size_factor,
            foreground: default_color_foreground(),
            background: default_color_background(),
            frame_delay: Duration::from_millis(animation.frame_delay_ms),
        }
    }
}

// ─── Path Resolution ────────────────────────────────────────────────────

impl Config {
    /// Standard config file path: ~/.config/linked-arrows/config.toml
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Validate and freeze the widget parameters.
    pub fn widget(&self) -> ArrowResult<WidgetConfig> {
        let a = &self.animation;
        let g = &self.geometry;
        if a.nodes == 0 {
            return Err(ArrowError::Config("animation.nodes must be at least 1".into()));
        }
        if a.lines == 0 {
            return Err(ArrowError::Config("animation.lines must be at least 1".into()));
        }
        let positive = [
            ("animation.step_gap", a.step_gap as f64),
            ("animation.scale_division", a.scale_division),
            ("geometry.size_factor", g.size_factor as f64),
            ("geometry.stroke_factor", g.stroke_factor as f64),
            ("geometry.arrow_size_factor", g.arrow_size_factor as f64),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(ArrowError::Config(format!("{name} must be a positive number")));
        }
        if !STEP_GAP_RANGE.contains(&a.step_gap) {
            return Err(ArrowError::Config(format!(
                "animation.step_gap must be between {} and {}",
                STEP_GAP_RANGE.start(),
                STEP_GAP_RANGE.end()
            )));
        }
        if !g.arrow_degrees.is_finite() {
            return Err(ArrowError::Config("geometry.arrow_degrees must be finite".into()));
        }

        Ok(WidgetConfig {
            nodes: a.nodes,
            lines: a.lines,
            step: StepProfile {
                gap: a.step_gap,
                division: a.scale_division,
            },
            size_factor: g.size_factor,
            stroke_factor: g.stroke_factor,
            arrow_degrees: g.arrow_degrees,
            arrow_size_factor: g.arrow_size_factor,
            foreground: self.theme.foreground,
            background: self.theme.background,
            frame_delay: Duration::from_millis(a.frame_delay_ms),
        })
    }
}

// ─── Bootloader ─────────────────────────────────────────────────────────

/// The single entry point for configuration. Called exactly once at startup.
///
/// 1. Resolve config file path (CLI override or default)
/// 2. If config file doesn't exist, create directory tree + write defaults
/// 3. Parse TOML from disk into Config
/// 4. Apply CLI overrides on top
///
/// Runs before logging is up, so the path of a freshly written default file
/// is handed back for the caller to report.
pub fn load(cli: &CliArgs) -> Result<(Config, Option<PathBuf>)> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // Bootstrap: ensure the file exists on disk
    let mut created = None;
    if !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).wrap_err_with(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&config_path, DEFAULT_CONFIG_TOML).wrap_err_with(|| {
            format!(
                "Failed to write default config to {}",
                config_path.display()
            )
        })?;
        created = Some(config_path.clone());
    }

    let toml_str = std::fs::read_to_string(&config_path)
        .wrap_err_with(|| format!("Failed to read config from {}", config_path.display()))?;

    let mut config: Config = toml::from_str(&toml_str).wrap_err_with(|| {
        format!(
            "Failed to parse config at {}.\n\
             Delete the file to regenerate defaults, or run:\n  \
             linked-arrows --print-default-config > {:?}",
            config_path.display(),
            config_path
        )
    })?;

    // ── CLI overrides ───────────────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.general.log_level = level.clone();
    }
    if let Some(nodes) = cli.nodes {
        config.animation.nodes = nodes;
    }
    if let Some(delay) = cli.frame_delay {
        config.animation.frame_delay_ms = delay;
    }

    Ok((config, created))
}

/// Returns the embedded default config TOML string.
pub fn default_config_toml() -> &'static str {
    DEFAULT_CONFIG_TOML
}
