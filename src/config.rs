//! Monitor and settings configuration.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::frame::Coordinate;
use crate::picker::PickResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default per-channel match tolerance.
pub const DEFAULT_TOLERANCE: u8 = 15;

/// Default delay between monitor cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Per-session monitor parameters, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Coordinate sampled each cycle.
    pub coordinate: Coordinate,
    /// Per-channel match tolerance, exclusive.
    pub tolerance: u8,
    /// Delay between the end of one cycle and the start of the next.
    pub poll_interval: Duration,
}

impl MonitorConfig {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            tolerance: DEFAULT_TOLERANCE,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the match tolerance.
    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the delay between cycles.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Build a config from persisted settings. Fails when the settings
    /// hold no usable coordinate.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let coordinate = settings.coordinate().ok_or(Error::CoordinateUnset)?;
        Ok(Self {
            coordinate,
            tolerance: settings.tolerance,
            poll_interval: Duration::from_millis(settings.poll_interval_ms),
        })
    }
}

/// Persisted watcher settings, stored as a small TOML file.
///
/// A negative `x` or `y` means no coordinate has been picked yet.
/// `color` is the last picked color packed as ARGB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "unset_coordinate")]
    pub x: i32,
    #[serde(default = "unset_coordinate")]
    pub y: i32,
    #[serde(default)]
    pub color: u32,
    #[serde(default = "default_tolerance")]
    pub tolerance: u8,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn unset_coordinate() -> i32 {
    -1
}

fn default_tolerance() -> u8 {
    DEFAULT_TOLERANCE
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            x: unset_coordinate(),
            y: unset_coordinate(),
            color: 0,
            tolerance: default_tolerance(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| Error::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write settings to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| Error::SettingsWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The stored watch coordinate, or None while unset.
    pub fn coordinate(&self) -> Option<Coordinate> {
        if self.x < 0 || self.y < 0 {
            return None;
        }
        Some(Coordinate::new(self.x, self.y))
    }

    /// The stored target color, unpacked from ARGB.
    pub fn target_color(&self) -> Color {
        Color::from_argb(self.color)
    }

    /// Store a pick result as the watch coordinate and target color.
    pub fn remember_pick(&mut self, pick: &PickResult) {
        self.x = pick.coordinate.x;
        self.y = pick.coordinate.y;
        self.color = pick.color.to_argb();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.x, -1);
        assert_eq!(settings.y, -1);
        assert_eq!(settings.color, 0);
        assert_eq!(settings.tolerance, 15);
        assert_eq!(settings.poll_interval_ms, 1000);
        assert!(settings.coordinate().is_none());
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let settings = Settings {
            x: 120,
            y: 740,
            color: 0xFF00FF00,
            tolerance: 20,
            ..Settings::default()
        };
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.coordinate(), Some(Coordinate::new(120, 740)));
        assert_eq!(loaded.target_color(), Color::opaque(0, 255, 0));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = toml::from_str("x = 5\ny = 6\n").unwrap();
        assert_eq!(settings.coordinate(), Some(Coordinate::new(5, 6)));
        assert_eq!(settings.color, 0);
        assert_eq!(settings.tolerance, 15);
        assert_eq!(settings.poll_interval_ms, 1000);
    }

    #[test]
    fn test_parse_error_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "x = \"not a number\"").unwrap();

        match Settings::load(&path) {
            Err(Error::SettingsParse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_settings_requires_coordinate() {
        let settings = Settings::default();
        assert!(matches!(
            MonitorConfig::from_settings(&settings),
            Err(Error::CoordinateUnset)
        ));

        let negative_y = Settings {
            x: 10,
            ..Settings::default()
        };
        assert!(MonitorConfig::from_settings(&negative_y).is_err());
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            x: 10,
            y: 20,
            poll_interval_ms: 250,
            ..Settings::default()
        };

        let config = MonitorConfig::from_settings(&settings).unwrap();
        assert_eq!(config.coordinate, Coordinate::new(10, 20));
        assert_eq!(config.tolerance, 15);
        assert_eq!(config.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_remember_pick() {
        let mut settings = Settings::default();
        let pick = PickResult {
            coordinate: Coordinate::new(33, 44),
            color: Color::opaque(1, 2, 3),
        };
        settings.remember_pick(&pick);

        assert_eq!(settings.coordinate(), Some(Coordinate::new(33, 44)));
        assert_eq!(settings.target_color(), Color::opaque(1, 2, 3));
    }

    #[test]
    fn test_builders() {
        let config = MonitorConfig::new(Coordinate::new(1, 2))
            .with_tolerance(30)
            .with_poll_interval(Duration::from_millis(50));
        assert_eq!(config.coordinate, Coordinate::new(1, 2));
        assert_eq!(config.tolerance, 30);
        assert_eq!(config.poll_interval, Duration::from_millis(50));
    }
}
