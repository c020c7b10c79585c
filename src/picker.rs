//! One-shot color picking from a frozen frame.

use crate::color::Color;
use crate::frame::{Coordinate, Frame};
use serde::{Deserialize, Serialize};

/// A resolved pick: where the selection landed and the color there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickResult {
    pub coordinate: Coordinate,
    pub color: Color,
}

/// One-shot selection over a frozen frame.
///
/// The first in-bounds selection resolves the session and later calls
/// are ignored. Out-of-bounds selections leave it open. Cancelling
/// before a selection makes it inert with no result.
pub struct PickSession {
    frame: Frame,
    result: Option<PickResult>,
    cancelled: bool,
}

impl PickSession {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            result: None,
            cancelled: false,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Try to resolve the session at a position.
    ///
    /// Returns the pick on the first in-bounds selection. Out-of-bounds
    /// positions return None and keep the session open; anything after
    /// resolution or cancellation returns None.
    pub fn select(&mut self, x: i32, y: i32) -> Option<PickResult> {
        if self.result.is_some() || self.cancelled {
            return None;
        }

        let coordinate = Coordinate::new(x, y);
        let color = self.frame.sample(coordinate).ok()?;

        let pick = PickResult { coordinate, color };
        self.result = Some(pick);
        log::info!("picked {} at {}", color, coordinate);
        Some(pick)
    }

    /// Close the session without a pick. Does nothing once resolved.
    pub fn cancel(&mut self) {
        if self.result.is_none() {
            self.cancelled = true;
        }
    }

    /// The pick this session resolved to, if any.
    pub fn result(&self) -> Option<PickResult> {
        self.result
    }

    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
