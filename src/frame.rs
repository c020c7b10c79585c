//! Frames and frame sources.
//!
//! A frame is one RGBA snapshot of the screen; a frame source hands the
//! monitor loop the most recent one each cycle.

use crate::color::Color;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A screen position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A captured RGBA frame with explicit row and pixel strides.
///
/// Capture backends often pad rows past `width * pixel_stride`, so the
/// geometry is carried along and sampling accounts for it instead of
/// assuming a tight layout.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    row_stride: usize,
    pixel_stride: usize,
    data: Vec<u8>,
}

impl Frame {
    /// Create a frame from raw pixel data, validating the declared
    /// geometry against the buffer length.
    pub fn new(
        width: u32,
        height: u32,
        row_stride: usize,
        pixel_stride: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::FrameGeometry(format!(
                "empty frame {}x{}",
                width, height
            )));
        }
        if pixel_stride < 4 {
            return Err(Error::FrameGeometry(format!(
                "pixel stride {} too small for RGBA",
                pixel_stride
            )));
        }
        let min_row_bytes = (width as usize).checked_mul(pixel_stride).ok_or_else(|| {
            Error::FrameGeometry(format!(
                "pixel stride {} overflows for width {}",
                pixel_stride, width
            ))
        })?;
        if row_stride < min_row_bytes {
            return Err(Error::FrameGeometry(format!(
                "row stride {} too small for width {}",
                row_stride, width
            )));
        }
        let needed = (height as usize - 1)
            .checked_mul(row_stride)
            .and_then(|last_row| last_row.checked_add(min_row_bytes))
            .ok_or_else(|| {
                Error::FrameGeometry(format!(
                    "row stride {} overflows for height {}",
                    row_stride, height
                ))
            })?;
        if data.len() < needed {
            return Err(Error::FrameGeometry(format!(
                "buffer holds {} bytes, geometry needs {}",
                data.len(),
                needed
            )));
        }

        Ok(Self {
            width,
            height,
            row_stride,
            pixel_stride,
            data,
        })
    }

    /// Create a frame with 4-byte pixels and no row padding.
    pub fn tight(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, width as usize * 4, 4, data)
    }

    /// Create a frame filled with a single color.
    pub fn solid(width: u32, height: u32, color: Color) -> Result<Self> {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            data.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Self::tight(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    pub fn pixel_stride(&self) -> usize {
        self.pixel_stride
    }

    /// Read the color at a coordinate.
    ///
    /// The first four bytes of a pixel slot are R, G, B, A; any extra
    /// pixel-stride bytes and row padding are skipped over.
    pub fn sample(&self, coordinate: Coordinate) -> Result<Color> {
        let Coordinate { x, y } = coordinate;
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        let offset = y as usize * self.row_stride + x as usize * self.pixel_stride;
        Ok(Color::new(
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ))
    }
}

#[cfg(feature = "image-io")]
impl Frame {
    /// Build a frame from a decoded RGBA image.
    pub fn from_rgba_image(image: &image::RgbaImage) -> Result<Self> {
        Self::tight(image.width(), image.height(), image.as_raw().clone())
    }

    /// Load a frame from an image file.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let image = image::open(path)?.to_rgba8();
        let (width, height) = image.dimensions();
        Self::tight(width, height, image.into_raw())
    }
}

/// Source of frames for the monitor loop.
///
/// `acquire_latest` hands over at most one frame per call. `Ok(None)`
/// means no frame is ready right now and the cycle is skipped. An error
/// means the source is gone for good and the session ends.
pub trait FrameSource {
    fn acquire_latest(&mut self) -> Result<Option<Frame>>;
}

/// Replays a fixed sequence of frames, one per acquire.
///
/// Once drained it reports no frame ready, or starts over when looping.
pub struct SequenceSource {
    frames: VecDeque<Frame>,
    looping: bool,
}

impl SequenceSource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
            looping: false,
        }
    }

    /// Replay the sequence forever instead of draining it.
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for SequenceSource {
    fn acquire_latest(&mut self) -> Result<Option<Frame>> {
        let Some(frame) = self.frames.pop_front() else {
            return Ok(None);
        };
        if self.looping {
            self.frames.push_back(frame.clone());
        }
        Ok(Some(frame))
    }
}
