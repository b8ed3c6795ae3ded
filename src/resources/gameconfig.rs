//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration. Every gameplay
//! constant lives in [`Tuning`] so difficulty can be adjusted without a
//! rebuild.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! fullscreen = false
//! vsync = true
//! target_fps = 60
//!
//! [gameplay]
//! tick_ms = 100
//! battery_drain = 0.5
//! sanity_drain = 0.3
//! ambient_chance = 0.02
//! scare_chance = 0.4
//! scare_damage = 15
//! scare_flash_ms = 500
//! message_ttl_ms = 4000
//! ghost_delay_min_ms = 8000
//! ghost_delay_spread_ms = 15000
//! ghost_visible_min_ms = 2000
//! ghost_visible_spread_ms = 2000
//!
//! [controls]
//! rotate_speed = 0.5
//! flashlight_key = F
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_ROTATE_SPEED: f32 = 0.5;
const DEFAULT_FLASHLIGHT_KEY: &str = "F";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Gameplay constants. Durations are stored in milliseconds, matching the
/// INI file; use the `*_secs` helpers when feeding timers.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    /// Period of the resource tick loop.
    pub tick_ms: u32,
    /// Battery lost per tick while the flashlight is on.
    pub battery_drain: f32,
    /// Sanity lost per tick while the flashlight is off.
    pub sanity_drain: f32,
    /// Probability per tick of an ambient message.
    pub ambient_chance: f32,
    /// Probability that a vanishing ghost triggers a scare.
    pub scare_chance: f32,
    /// Sanity lost on a scare.
    pub scare_damage: f32,
    /// Length of the scare flash.
    pub scare_flash_ms: u32,
    /// Lifetime of an on-screen message.
    pub message_ttl_ms: u32,
    pub ghost_delay_min_ms: u32,
    pub ghost_delay_spread_ms: u32,
    pub ghost_visible_min_ms: u32,
    pub ghost_visible_spread_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            battery_drain: 0.5,
            sanity_drain: 0.3,
            ambient_chance: 0.02,
            scare_chance: 0.4,
            scare_damage: 15.0,
            scare_flash_ms: 500,
            message_ttl_ms: 4000,
            ghost_delay_min_ms: 8000,
            ghost_delay_spread_ms: 15000,
            ghost_visible_min_ms: 2000,
            ghost_visible_spread_ms: 2000,
        }
    }
}

fn ms_to_secs(ms: u32) -> f32 {
    ms as f32 / 1000.0
}

impl Tuning {
    pub fn tick_secs(&self) -> f32 {
        ms_to_secs(self.tick_ms)
    }

    pub fn scare_flash_secs(&self) -> f32 {
        ms_to_secs(self.scare_flash_ms)
    }

    pub fn message_ttl_secs(&self) -> f32 {
        ms_to_secs(self.message_ttl_ms)
    }

    /// Delay before the next ghost appearance for a roll `r` in `[0, 1)`.
    pub fn ghost_delay_secs(&self, r: f32) -> f32 {
        ms_to_secs(self.ghost_delay_min_ms) + r * ms_to_secs(self.ghost_delay_spread_ms)
    }

    /// How long a ghost stays visible for a roll `r` in `[0, 1)`.
    pub fn ghost_visible_secs(&self, r: f32) -> f32 {
        ms_to_secs(self.ghost_visible_min_ms) + r * ms_to_secs(self.ghost_visible_spread_ms)
    }

    fn load(&mut self, config: &Ini) {
        let uint = |key: &str| config.getuint("gameplay", key).ok().flatten();
        let float = |key: &str| config.getfloat("gameplay", key).ok().flatten();

        if let Some(v) = uint("tick_ms") {
            // A zero period would spin the tick loop forever.
            self.tick_ms = (v as u32).max(1);
        }
        if let Some(v) = float("battery_drain") {
            self.battery_drain = v as f32;
        }
        if let Some(v) = float("sanity_drain") {
            self.sanity_drain = v as f32;
        }
        if let Some(v) = float("ambient_chance") {
            self.ambient_chance = (v as f32).clamp(0.0, 1.0);
        }
        if let Some(v) = float("scare_chance") {
            self.scare_chance = (v as f32).clamp(0.0, 1.0);
        }
        if let Some(v) = float("scare_damage") {
            self.scare_damage = v as f32;
        }
        if let Some(v) = uint("scare_flash_ms") {
            self.scare_flash_ms = v as u32;
        }
        if let Some(v) = uint("message_ttl_ms") {
            self.message_ttl_ms = v as u32;
        }
        if let Some(v) = uint("ghost_delay_min_ms") {
            self.ghost_delay_min_ms = v as u32;
        }
        if let Some(v) = uint("ghost_delay_spread_ms") {
            self.ghost_delay_spread_ms = v as u32;
        }
        if let Some(v) = uint("ghost_visible_min_ms") {
            self.ghost_visible_min_ms = v as u32;
        }
        if let Some(v) = uint("ghost_visible_spread_ms") {
            self.ghost_visible_spread_ms = v as u32;
        }
    }

    fn store(&self, config: &mut Ini) {
        let mut set = |key: &str, value: String| {
            config.set("gameplay", key, Some(value));
        };
        set("tick_ms", self.tick_ms.to_string());
        set("battery_drain", self.battery_drain.to_string());
        set("sanity_drain", self.sanity_drain.to_string());
        set("ambient_chance", self.ambient_chance.to_string());
        set("scare_chance", self.scare_chance.to_string());
        set("scare_damage", self.scare_damage.to_string());
        set("scare_flash_ms", self.scare_flash_ms.to_string());
        set("message_ttl_ms", self.message_ttl_ms.to_string());
        set("ghost_delay_min_ms", self.ghost_delay_min_ms.to_string());
        set("ghost_delay_spread_ms", self.ghost_delay_spread_ms.to_string());
        set("ghost_visible_min_ms", self.ghost_visible_min_ms.to_string());
        set(
            "ghost_visible_spread_ms",
            self.ghost_visible_spread_ms.to_string(),
        );
    }
}

/// Game configuration resource.
///
/// Stores window settings, look sensitivity and the gameplay [`Tuning`].
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Drag-to-look sensitivity.
    pub rotate_speed: f32,
    /// Name of the flashlight toggle key.
    pub flashlight_key: String,
    /// Gameplay constants.
    pub tuning: Tuning,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fullscreen: DEFAULT_FULLSCREEN,
            rotate_speed: DEFAULT_ROTATE_SPEED,
            flashlight_key: DEFAULT_FLASHLIGHT_KEY.to_string(),
            tuning: Tuning::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, fullscreen={}, tick={}ms",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen,
            self.tuning.tick_ms
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }

        // [controls] section
        if let Some(speed) = config.getfloat("controls", "rotate_speed").ok().flatten() {
            self.rotate_speed = speed as f32;
        }
        if let Some(key) = config.get("controls", "flashlight_key") {
            self.flashlight_key = key;
        }

        self.tuning.load(config);
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));
        config.set("window", "fullscreen", Some(self.fullscreen.to_string()));

        // [controls] section
        config.set("controls", "rotate_speed", Some(self.rotate_speed.to_string()));
        config.set("controls", "flashlight_key", Some(self.flashlight_key.clone()));

        self.tuning.store(&mut config);

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let t = Tuning::default();
        assert_eq!(t.tick_ms, 100);
        assert_eq!(t.battery_drain, 0.5);
        assert_eq!(t.sanity_drain, 0.3);
        assert_eq!(t.ambient_chance, 0.02);
        assert_eq!(t.scare_chance, 0.4);
        assert_eq!(t.scare_damage, 15.0);
        assert_eq!(t.scare_flash_ms, 500);
        assert_eq!(t.message_ttl_ms, 4000);
    }

    #[test]
    fn ghost_ranges_span_documented_windows() {
        let t = Tuning::default();
        assert!((t.ghost_delay_secs(0.0) - 8.0).abs() < 1e-6);
        assert!((t.ghost_delay_secs(1.0) - 23.0).abs() < 1e-4);
        assert!((t.ghost_visible_secs(0.0) - 2.0).abs() < 1e-6);
        assert!((t.ghost_visible_secs(1.0) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn load_from_str_overrides_only_present_keys() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[window]\nwidth = 800\n\n[gameplay]\nscare_chance = 1.0\ntick_ms = 50\n\n[controls]\nrotate_speed = 1.5\n",
            )
            .unwrap();
        assert_eq!(config.window_width, 800);
        assert_eq!(config.window_height, DEFAULT_WINDOW_HEIGHT);
        assert_eq!(config.tuning.scare_chance, 1.0);
        assert_eq!(config.tuning.tick_ms, 50);
        assert_eq!(config.tuning.battery_drain, 0.5);
        assert_eq!(config.rotate_speed, 1.5);
        assert_eq!(config.flashlight_key, DEFAULT_FLASHLIGHT_KEY);
    }

    #[test]
    fn probabilities_are_clamped_and_tick_is_never_zero() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[gameplay]\nambient_chance = 3\nscare_chance = -1\ntick_ms = 0\n")
            .unwrap();
        assert_eq!(config.tuning.ambient_chance, 1.0);
        assert_eq!(config.tuning.scare_chance, 0.0);
        assert_eq!(config.tuning.tick_ms, 1);
    }

    #[test]
    fn saved_config_loads_back() {
        let path = std::env::temp_dir().join(format!("asylum-config-{}.ini", std::process::id()));
        let mut config = GameConfig::with_path(&path);
        config.window_width = 1024;
        config.vsync = false;
        config.flashlight_key = "F".to_string();
        config.tuning.scare_chance = 0.25;
        config.tuning.message_ttl_ms = 2500;
        config.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        let result = loaded.load_from_file();
        let _ = std::fs::remove_file(&path);
        result.unwrap();
        assert_eq!(loaded.window_width, 1024);
        assert_eq!(loaded.window_height, DEFAULT_WINDOW_HEIGHT);
        assert!(!loaded.vsync);
        assert_eq!(loaded.flashlight_key, "F");
        assert_eq!(loaded.tuning.scare_chance, 0.25);
        assert_eq!(loaded.tuning.message_ttl_ms, 2500);
        assert_eq!(loaded.tuning.tick_ms, 100);
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut config = GameConfig::with_path("./definitely/not/here.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.window_width, DEFAULT_WINDOW_WIDTH);
    }
}
