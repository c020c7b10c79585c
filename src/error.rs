//! Error types for chromatap.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type for chromatap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by sampling, settings, dispatch, and session control.
#[derive(Debug, Error)]
pub enum Error {
    #[error("coordinate ({x}, {y}) outside frame bounds {width}x{height}")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    #[error("invalid frame geometry: {0}")]
    FrameGeometry(String),

    #[error("invalid hex color {0:?}, expected six hex digits like \"FF00FF\"")]
    InvalidHexColor(String),

    #[error("no watch coordinate set")]
    CoordinateUnset,

    #[error("monitor already running")]
    AlreadyRunning,

    #[error("monitor session already finished")]
    SessionFinished,

    #[error("frame source closed")]
    SourceClosed,

    #[error("failed to spawn tap command {command:?}")]
    DispatchSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("tap command {command:?} exited with {status}")]
    DispatchExit {
        command: String,
        status: ExitStatus,
    },

    #[error("failed to read settings from {path:?}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings from {path:?}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write settings to {path:?}")]
    SettingsWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode settings")]
    SettingsEncode(#[from] toml::ser::Error),

    #[error("failed to spawn monitor worker")]
    WorkerSpawn(#[source] io::Error),

    #[cfg(feature = "image-io")]
    #[error("failed to load frame image")]
    Image(#[from] image::ImageError),
}
