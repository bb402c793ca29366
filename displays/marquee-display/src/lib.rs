//! Pixel surface abstraction and colour primitives for Marquee
//!
//! This crate provides:
//! - `PixelSurface` trait for RGB matrix drivers (Galactic Unicorn style boards,
//!   simulated panels, ...)
//! - `Rgb` colour triple with hue conversion
//! - `Rotation` for panels mounted upside down
//! - `RecordingSurface` (feature `test-utils`) which records draw calls
//!
//! # Architecture
//!
//! The core render engine only ever talks to a `PixelSurface`. Board crates
//! implement it on top of their graphics buffer; the engine never touches
//! pixels directly, so the same scroll and progress logic runs on hardware
//! and in host tests.

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "test-utils")]
extern crate alloc;

pub mod colour;
pub mod surface;

#[cfg(feature = "test-utils")]
pub mod recording;

// Re-export key types
pub use colour::Rgb;
pub use surface::{DisplayError, PixelSurface, Rotation};

#[cfg(feature = "test-utils")]
pub use recording::{DrawOp, RecordingSurface};
