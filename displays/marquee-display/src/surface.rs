//! Pixel surface trait
//!
//! Defines the interface the render engine draws through. Implementations
//! own the frame buffer and know how to rasterise glyphs and push a finished
//! frame to the panel.

use crate::colour::Rgb;

/// Pixel surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel driver
    Communication,
    /// Display not initialized
    NotInitialized,
}

/// Glyph orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Normal,
    /// Panel mounted upside down; text is drawn rotated by 180 degrees
    Rotated180,
}

impl Rotation {
    /// Rotation angle in degrees as understood by most glyph renderers
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Normal => 0,
            Rotation::Rotated180 => 180,
        }
    }

    pub fn is_rotated(self) -> bool {
        self == Rotation::Rotated180
    }
}

/// Drawing surface for an RGB pixel matrix
///
/// All drawing happens into an off-screen frame using the current pen
/// colour. Nothing becomes visible until [`PixelSurface::commit`].
///
/// Coordinates are signed: text scrolled off the left edge has a negative
/// origin and implementations must clip rather than fail.
pub trait PixelSurface {
    /// Panel size in pixels as (width, height)
    fn dimensions(&self) -> (i32, i32);

    /// Select the pen colour for subsequent drawing
    fn set_colour(&mut self, colour: Rgb);

    /// Fill the whole frame with the current pen colour
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw a single line of text with its top-left origin at (x, y)
    ///
    /// With [`Rotation::Rotated180`] the origin is the bottom-right corner of
    /// the rotated glyph run.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, rotation: Rotation)
        -> Result<(), DisplayError>;

    /// Width in pixels that `text` would occupy when drawn
    fn measure_text(&self, text: &str) -> i32;

    /// Fill a rectangle with the current pen colour
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<(), DisplayError>;

    /// Draw a one pixel wide line between two points
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError>;

    /// Push the finished frame to the panel
    fn commit(&mut self) -> Result<(), DisplayError>;

    /// Set global panel brightness, 0.0 (off) to 1.0 (full)
    fn set_brightness(&mut self, level: f32);
}
