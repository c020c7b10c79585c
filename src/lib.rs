//! chromatap
//!
//! A screen color watcher. A monitor session samples the pixel at a
//! configured coordinate from the latest frame on a fixed delay,
//! compares it against a shared set of target colors under a
//! per-channel tolerance, and fires a synthetic tap through a
//! privileged shell helper when one matches.
//!
//! Frames come from a pluggable [`FrameSource`] and taps go through a
//! pluggable [`ActionDispatcher`]. The stock pieces are a replayable
//! [`SequenceSource`] and the `su -c "input tap x y"` shell dispatcher.
//!
//! ```no_run
//! use chromatap::{
//!     Monitor, MonitorConfig, SequenceSource, Settings, ShellTapDispatcher, TargetRegistry,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> chromatap::Result<()> {
//! let settings = Settings::load("chromatap.toml")?;
//! let config = MonitorConfig::from_settings(&settings)?;
//!
//! let registry = Arc::new(TargetRegistry::new());
//! registry.add(settings.target_color());
//! registry.set_enabled(true);
//!
//! // Replace with a real capture backend.
//! let source = SequenceSource::new(Vec::new());
//!
//! let mut monitor = Monitor::new(config, registry);
//! monitor.start(source, ShellTapDispatcher::new())?;
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod monitor;
pub mod picker;
pub mod registry;

// Re-export commonly used types
pub use color::Color;
pub use config::{MonitorConfig, Settings, DEFAULT_POLL_INTERVAL, DEFAULT_TOLERANCE};
pub use dispatch::{ActionDispatcher, ShellTapDispatcher};
pub use error::{Error, Result};
pub use frame::{Coordinate, Frame, FrameSource, SequenceSource};
pub use monitor::{Monitor, MonitorState, MonitorStatus};
pub use picker::{PickResult, PickSession};
pub use registry::{RegistrySnapshot, TargetRegistry};
