//! Colour resolution
//!
//! Turns the free-form colour tokens found in directive payloads into RGB:
//! numeric triples (`"255,128,0"`, `"0xff,0x80,0x00"`, `[255, 128, 0]`),
//! palette names (`"teal"`), and phrases with random or exclusion intent
//! (`"random"`, `"not-red-or-blue"`).

pub mod palette;
pub mod resolver;

pub use marquee_display::Rgb;
pub use palette::{Palette, STANDARD_PALETTE};
pub use resolver::{ColourResolver, EXCLUSION_WORDS, RANDOM_WORDS};
