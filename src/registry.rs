//! Shared target color registry.

use crate::color::Color;
use crate::error::Result;
use parking_lot::RwLock;
use std::collections::HashSet;

/// The mutable set of target colors the monitor matches against, plus
/// the switch that arms dispatching.
///
/// Shared between the control thread and the monitor worker. The worker
/// takes one snapshot per cycle, so an edit lands either before that
/// cycle's match or after it, never halfway through.
pub struct TargetRegistry {
    inner: RwLock<Inner>,
}

struct Inner {
    colors: HashSet<Color>,
    enabled: bool,
}

impl TargetRegistry {
    /// Create an empty registry with dispatching disarmed.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                colors: HashSet::new(),
                enabled: false,
            }),
        }
    }

    /// Create a registry seeded with the stock red, green, and blue
    /// targets, still disarmed.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.add(Color::opaque(255, 0, 0));
        registry.add(Color::opaque(0, 255, 0));
        registry.add(Color::opaque(0, 0, 255));
        registry
    }

    /// Add a target color. Returns false if it was already present.
    pub fn add(&self, color: Color) -> bool {
        self.inner.write().colors.insert(color)
    }

    /// Validate a hex string and add it as a target.
    pub fn add_hex(&self, hex: &str) -> Result<Color> {
        let color = Color::from_hex(hex)?;
        self.add(color);
        Ok(color)
    }

    /// Remove a target color. Returns false if it was not present.
    pub fn remove(&self, color: &Color) -> bool {
        self.inner.write().colors.remove(color)
    }

    /// Arm or disarm dispatching without touching the target set.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.write().enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.read().enabled
    }

    pub fn len(&self) -> usize {
        self.inner.read().colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().colors.is_empty()
    }

    /// Copy out the current targets and armed flag in one consistent read.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let inner = self.inner.read();
        RegistrySnapshot {
            colors: inner.colors.iter().copied().collect(),
            enabled: inner.enabled,
        }
    }
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the registry contents.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    colors: Vec<Color>,
    enabled: bool,
}

impl RegistrySnapshot {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Check whether any target matches the sampled color under the
    /// given tolerance.
    pub fn matches_any(&self, color: Color, tolerance: u8) -> bool {
        self.colors
            .iter()
            .any(|target| target.matches(&color, tolerance))
    }
}
