//! Collaborator traits
//!
//! These traits define the interface between the application logic and the
//! board: network transport, tone synth, buttons, status LEDs, time and
//! randomness. The pixel surface lives in `marquee-display`.

pub mod buttons;
pub mod led;
pub mod synth;
pub mod system;
pub mod transport;

#[cfg(feature = "embassy-time")]
pub mod embassy;

pub use buttons::{Button, Buttons, PinButtons};
pub use led::StatusLeds;
pub use synth::Synth;
pub use system::{Clock, RandomSource, SystemReset};
pub use transport::Transport;

#[cfg(feature = "embassy-time")]
pub use embassy::EmbassyClock;

pub use marquee_display::PixelSurface;
