//! Recording surface for host-side tests
//!
//! Instead of rasterising, every call is appended to an operation log that
//! tests can inspect afterwards. Text is measured with a fixed advance per
//! character.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::colour::Rgb;
use crate::surface::{DisplayError, PixelSurface, Rotation};

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SetColour(Rgb),
    Clear,
    Text {
        text: String,
        x: i32,
        y: i32,
        rotation: Rotation,
    },
    FillRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    },
    Commit,
    Brightness(f32),
}

/// In-memory [`PixelSurface`] that logs every call
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: i32,
    height: i32,
    advance: i32,
    brightness: f32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Create a surface of the given size where each character is `advance` pixels wide
    pub fn new(width: i32, height: i32, advance: i32) -> Self {
        Self {
            width,
            height,
            advance,
            brightness: 1.0,
            ops: Vec::new(),
        }
    }

    /// All recorded operations in call order
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the operation log
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        core::mem::take(&mut self.ops)
    }

    /// Number of committed frames
    pub fn frames(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Commit).count()
    }

    /// Last brightness set through the surface
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Position of the first text draw of exactly `text`, if any
    pub fn first_text(&self, text: &str) -> Option<usize> {
        self.ops
            .iter()
            .position(|op| matches!(op, DrawOp::Text { text: t, .. } if t == text))
    }

    /// Position of the last text draw of exactly `text`, if any
    pub fn last_text(&self, text: &str) -> Option<usize> {
        self.ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Text { text: t, .. } if t == text))
    }
}

impl PixelSurface for RecordingSurface {
    fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn set_colour(&mut self, colour: Rgb) {
        self.ops.push(DrawOp::SetColour(colour));
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ops.push(DrawOp::Clear);
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        rotation: Rotation,
    ) -> Result<(), DisplayError> {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            rotation,
        });
        Ok(())
    }

    fn measure_text(&self, text: &str) -> i32 {
        text.chars().count() as i32 * self.advance
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<(), DisplayError> {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError> {
        self.ops.push(DrawOp::Line { x0, y0, x1, y1 });
        Ok(())
    }

    fn commit(&mut self) -> Result<(), DisplayError> {
        self.ops.push(DrawOp::Commit);
        Ok(())
    }

    fn set_brightness(&mut self, level: f32) {
        self.brightness = level;
        self.ops.push(DrawOp::Brightness(level));
    }
}
