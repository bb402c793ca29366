//! Render engine
//!
//! Turns a [`Directive`](crate::directive::Directive) into frames on a
//! [`PixelSurface`](marquee_display::PixelSurface). Banners scroll through
//! a small state machine; progress bars redraw on a slow interval.

pub mod banner;
pub mod engine;
pub mod progress;
pub mod scroll;

pub use banner::{draw_outlined, padded_message, OUTLINE_OFFSETS};
pub use engine::{FinishReason, RenderEngine, RenderMode, RenderSession, Step};
pub use progress::{bar_colour, draw_progress};
pub use scroll::{ScrollEvent, ScrollMachine, ScrollMode, ScrollPhase, ScrollTiming};
