//! Banner scroll state machine
//!
//! Pure timing logic: the machine is ticked with the current time and
//! reports the pixel shift to draw at. It never touches the surface.
//!
//! ```text
//!            hold elapsed, content wider than panel
//! PreScroll ─────────────────────────────────────────▶ Scrolling
//!     ▲  ▲                                                 │
//!     │  └──────────── pass complete (looping) ────────────┤
//!     │                                                    │ pass complete
//!     └──── hold elapsed ──── PostScroll ◀─────────────────┘ (one-shot)
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scroll phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollPhase {
    /// Dwelling at the start position
    PreScroll,
    /// Advancing one pixel per step
    Scrolling,
    /// Dwelling after a one-shot pass
    PostScroll,
}

/// What happens when a pass completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ScrollMode {
    /// Back to the start and scroll again
    #[default]
    Looping,
    /// Stop after one pass
    OneShot,
}

/// Notable transitions reported by [`ScrollMachine::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollEvent {
    /// PreScroll → Scrolling
    Started,
    /// Shift reached the end of the content
    PassComplete,
    /// PostScroll → PreScroll
    Rearmed,
}

/// Timing thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollTiming {
    /// Dwell before and after a pass
    pub hold_ms: u32,
    /// Time per one-pixel step
    pub step_ms: u32,
}

/// Scroll state for one banner
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollMachine {
    phase: ScrollPhase,
    shift: i32,
    last_transition_ms: u64,
    timing: ScrollTiming,
    mode: ScrollMode,
    /// Message width plus padding on both sides
    content_width: i32,
    display_width: i32,
}

impl ScrollMachine {
    /// Create a machine in PreScroll with zero shift
    pub fn new(
        message_width: i32,
        padding: i32,
        display_width: i32,
        timing: ScrollTiming,
        mode: ScrollMode,
        now_ms: u64,
    ) -> Self {
        Self {
            phase: ScrollPhase::PreScroll,
            shift: 0,
            last_transition_ms: now_ms,
            timing,
            mode,
            content_width: message_width + 2 * padding,
            display_width,
        }
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Current pixel shift
    pub fn shift(&self) -> i32 {
        self.shift
    }

    /// Whether the content is wider than the panel
    pub fn needs_scroll(&self) -> bool {
        self.content_width > self.display_width
    }

    /// Shift at which a pass completes
    pub fn shift_limit(&self) -> i32 {
        self.content_width - self.display_width - 1
    }

    /// Advance the machine to `now_ms`
    ///
    /// At most one transition happens per tick, and at most one pixel of
    /// shift is added regardless of how late the tick is.
    pub fn tick(&mut self, now_ms: u64) -> Option<ScrollEvent> {
        let elapsed = now_ms.saturating_sub(self.last_transition_ms);
        let hold = u64::from(self.timing.hold_ms);
        let step = u64::from(self.timing.step_ms);

        match self.phase {
            ScrollPhase::PreScroll if elapsed >= hold => {
                // Re-armed even when the text fits, so a static banner
                // checks again after every hold
                self.last_transition_ms = now_ms;
                if self.needs_scroll() {
                    self.phase = ScrollPhase::Scrolling;
                    Some(ScrollEvent::Started)
                } else {
                    None
                }
            }
            ScrollPhase::Scrolling if elapsed >= step => {
                self.last_transition_ms = now_ms;
                self.shift += 1;
                if self.shift >= self.shift_limit() {
                    self.shift = 0;
                    self.phase = match self.mode {
                        ScrollMode::Looping => ScrollPhase::PreScroll,
                        ScrollMode::OneShot => ScrollPhase::PostScroll,
                    };
                    Some(ScrollEvent::PassComplete)
                } else {
                    None
                }
            }
            ScrollPhase::PostScroll if elapsed >= hold => {
                self.last_transition_ms = now_ms;
                self.shift = 0;
                self.phase = ScrollPhase::PreScroll;
                Some(ScrollEvent::Rearmed)
            }
            _ => None,
        }
    }
}
