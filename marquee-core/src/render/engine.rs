//! Render sessions
//!
//! A [`RenderSession`] is owned by whichever task drives the surface. The
//! engine itself holds only configuration, so stepping a session is a plain
//! function of the session, the surface and the current time.

use alloc::string::String;

use log::debug;
use marquee_display::{DisplayError, PixelSurface, Rgb, Rotation};

use super::banner::{draw_outlined, padded_message};
use super::progress::draw_progress;
use super::scroll::{ScrollEvent, ScrollMachine, ScrollMode, ScrollTiming};
use crate::config::RenderConfig;
use crate::directive::Directive;

/// How a directive is presented, selected by topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderMode {
    /// Scrolling outlined text
    Banner,
    /// Label, percentage and coloured bar
    Progress,
}

/// Why a session ended on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FinishReason {
    /// A one-shot banner finished its pass
    PassComplete,
    /// The continuous-run ceiling was hit
    Expired,
}

/// Result of stepping a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Frame drawn; step again after this many milliseconds
    Wait(u32),
    /// Session is over
    Finished(FinishReason),
}

/// State of one render session
#[derive(Debug, Clone)]
pub struct RenderSession {
    directive: Directive,
    mode: RenderMode,
    /// Banner text with lead and trail blanks
    message: String,
    message_width: i32,
    scroll: Option<ScrollMachine>,
    started_ms: u64,
}

impl RenderSession {
    pub fn directive(&self) -> &Directive {
        &self.directive
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Measured width of the padded banner text, zero in progress mode
    pub fn message_width(&self) -> i32 {
        self.message_width
    }

    pub fn scroll(&self) -> Option<&ScrollMachine> {
        self.scroll.as_ref()
    }

    pub fn started_ms(&self) -> u64 {
        self.started_ms
    }
}

/// Draws sessions according to [`RenderConfig`]
#[derive(Debug, Clone, Copy)]
pub struct RenderEngine<'a> {
    config: &'a RenderConfig,
}

impl<'a> RenderEngine<'a> {
    pub const fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    pub fn rotation(&self) -> Rotation {
        if self.config.rotate_180 {
            Rotation::Rotated180
        } else {
            Rotation::Normal
        }
    }

    /// Start a session for `directive`
    pub fn begin<S: PixelSurface + ?Sized>(
        &self,
        surface: &S,
        directive: Directive,
        mode: RenderMode,
        now_ms: u64,
    ) -> RenderSession {
        let (message, message_width, scroll) = match mode {
            RenderMode::Banner => {
                let message = padded_message(
                    &directive.text,
                    self.config.lead_blanks,
                    self.config.trail_blanks,
                );
                let message_width = surface.measure_text(&message);
                let (display_width, _) = surface.dimensions();
                let scroll = ScrollMachine::new(
                    message_width,
                    self.config.padding,
                    display_width,
                    ScrollTiming {
                        hold_ms: self.config.hold_ms,
                        step_ms: self.config.step_ms,
                    },
                    self.config.scroll_mode,
                    now_ms,
                );
                (message, message_width, Some(scroll))
            }
            RenderMode::Progress => (String::new(), 0, None),
        };

        debug!(
            "render: begin {:?} session, width {} px",
            mode, message_width
        );

        RenderSession {
            directive,
            mode,
            message,
            message_width,
            scroll,
            started_ms: now_ms,
        }
    }

    /// Advance `session` to `now_ms` and draw a frame if it is still running
    pub fn step<S: PixelSurface + ?Sized>(
        &self,
        surface: &mut S,
        session: &mut RenderSession,
        now_ms: u64,
    ) -> Result<Step, DisplayError> {
        if now_ms.saturating_sub(session.started_ms) >= self.config.max_run_ms() {
            debug!("render: run ceiling reached");
            self.clear(surface)?;
            return Ok(Step::Finished(FinishReason::Expired));
        }

        match &mut session.scroll {
            Some(scroll) => {
                let event = scroll.tick(now_ms);
                if event == Some(ScrollEvent::PassComplete)
                    && self.config.scroll_mode == ScrollMode::OneShot
                {
                    if self.config.dim_after_one_shot {
                        surface.set_brightness(0.0);
                    }
                    return Ok(Step::Finished(FinishReason::PassComplete));
                }

                let shift = scroll.shift();
                self.draw_banner(surface, &session.message, &session.directive, shift)?;
                Ok(Step::Wait(self.config.frame_interval_ms))
            }
            None => {
                draw_progress(surface, &session.directive, self.rotation())?;
                Ok(Step::Wait(self.config.progress_interval_ms))
            }
        }
    }

    /// Blank the panel
    pub fn clear<S: PixelSurface + ?Sized>(&self, surface: &mut S) -> Result<(), DisplayError> {
        surface.set_colour(Rgb::BLACK);
        surface.clear()?;
        surface.commit()
    }

    fn draw_banner<S: PixelSurface + ?Sized>(
        &self,
        surface: &mut S,
        message: &str,
        directive: &Directive,
        shift: i32,
    ) -> Result<(), DisplayError> {
        let (width, _) = surface.dimensions();
        let rotation = self.rotation();
        let (x, y) = if rotation.is_rotated() {
            (
                width - self.config.padding + shift,
                self.config.banner_y_rotated,
            )
        } else {
            (self.config.padding - shift, self.config.banner_y)
        };

        surface.set_colour(directive.background);
        surface.clear()?;
        draw_outlined(
            surface,
            message,
            x,
            y,
            rotation,
            directive.outline,
            directive.foreground,
        )?;
        surface.commit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_display::{DrawOp, RecordingSurface};

    fn config() -> RenderConfig {
        RenderConfig {
            hold_ms: 100,
            step_ms: 10,
            frame_interval_ms: 10,
            lead_blanks: 2,
            trail_blanks: 2,
            ..RenderConfig::default()
        }
    }

    fn foreground_positions(surface: &RecordingSurface, text: &str) -> alloc::vec::Vec<(i32, i32)> {
        // The foreground copy is the last of each group of nine text draws
        surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text: t, x, y, .. } if t == text => Some((*x, *y)),
                _ => None,
            })
            .skip(8)
            .step_by(9)
            .collect()
    }

    #[test]
    fn test_banner_frame() {
        let config = config();
        let engine = RenderEngine::new(&config);
        let mut surface = RecordingSurface::new(53, 11, 6);
        let mut directive = Directive::plain("hi");
        directive.background = Rgb::new(0, 0, 255);

        let mut session = engine.begin(&surface, directive, RenderMode::Banner, 0);
        assert_eq!(session.message_width(), 36);
        assert_eq!(engine.step(&mut surface, &mut session, 0), Ok(Step::Wait(10)));

        let ops = surface.ops();
        assert_eq!(ops[0], DrawOp::SetColour(Rgb::new(0, 0, 255)));
        assert_eq!(ops[1], DrawOp::Clear);
        assert_eq!(*ops.last().unwrap(), DrawOp::Commit);
        assert_eq!(foreground_positions(&surface, "  hi  "), [(2, 2)]);
    }

    #[test]
    fn test_rotated_origin() {
        let config = RenderConfig {
            rotate_180: true,
            ..config()
        };
        let engine = RenderEngine::new(&config);
        let mut surface = RecordingSurface::new(53, 11, 6);
        let mut session = engine.begin(&surface, Directive::plain("hi"), RenderMode::Banner, 0);
        engine.step(&mut surface, &mut session, 0).unwrap();

        assert_eq!(foreground_positions(&surface, "  hi  "), [(51, 8)]);
        assert!(surface.ops().iter().any(|op| matches!(
            op,
            DrawOp::Text {
                rotation: Rotation::Rotated180,
                ..
            }
        )));
    }

    #[test]
    fn test_banner_scrolls_left() {
        let config = config();
        let engine = RenderEngine::new(&config);
        let mut surface = RecordingSurface::new(53, 11, 6);
        let text = "a long message";
        let mut session = engine.begin(&surface, Directive::plain(text), RenderMode::Banner, 0);

        for t in [0, 100, 110, 120] {
            engine.step(&mut surface, &mut session, t).unwrap();
        }

        let padded = "  a long message  ";
        assert_eq!(
            foreground_positions(&surface, padded),
            [(2, 2), (2, 2), (1, 2), (0, 2)]
        );
    }

    #[test]
    fn test_one_shot_finishes_and_dims() {
        let config = RenderConfig {
            scroll_mode: ScrollMode::OneShot,
            ..config()
        };
        let engine = RenderEngine::new(&config);
        let mut surface = RecordingSurface::new(53, 11, 6);
        // 12 chars * 6 = 72, content 76, limit 22
        let mut session =
            engine.begin(&surface, Directive::plain("abcdefgh"), RenderMode::Banner, 0);

        let mut t = 0;
        let finished = loop {
            match engine.step(&mut surface, &mut session, t).unwrap() {
                Step::Wait(ms) => t += u64::from(ms),
                Step::Finished(reason) => break reason,
            }
            assert!(t < 10_000);
        };

        assert_eq!(finished, FinishReason::PassComplete);
        assert_eq!(surface.brightness(), 0.0);
        assert_eq!(*surface.ops().last().unwrap(), DrawOp::Brightness(0.0));
    }

    #[test]
    fn test_one_shot_without_dimming() {
        let config = RenderConfig {
            scroll_mode: ScrollMode::OneShot,
            dim_after_one_shot: false,
            ..config()
        };
        let engine = RenderEngine::new(&config);
        let mut surface = RecordingSurface::new(53, 11, 6);
        let mut session =
            engine.begin(&surface, Directive::plain("abcdefgh"), RenderMode::Banner, 0);

        let mut t = 0;
        while let Step::Wait(ms) = engine.step(&mut surface, &mut session, t).unwrap() {
            t += u64::from(ms);
        }
        assert_eq!(surface.brightness(), 1.0);
    }

    #[test]
    fn test_ceiling_clears_display() {
        let config = RenderConfig {
            max_run_minutes: 1,
            ..config()
        };
        let engine = RenderEngine::new(&config);
        let mut surface = RecordingSurface::new(53, 11, 6);
        let mut session =
            engine.begin(&surface, Directive::plain("hi"), RenderMode::Progress, 1000);

        assert_eq!(
            engine.step(&mut surface, &mut session, 1000),
            Ok(Step::Wait(config.progress_interval_ms))
        );
        assert_eq!(
            engine.step(&mut surface, &mut session, 60_999),
            Ok(Step::Wait(config.progress_interval_ms))
        );
        surface.take_ops();

        assert_eq!(
            engine.step(&mut surface, &mut session, 61_000),
            Ok(Step::Finished(FinishReason::Expired))
        );
        assert_eq!(
            surface.ops(),
            [
                DrawOp::SetColour(Rgb::BLACK),
                DrawOp::Clear,
                DrawOp::Commit
            ]
        );
    }

    #[test]
    fn test_progress_session_has_no_scroll() {
        let config = config();
        let engine = RenderEngine::new(&config);
        let surface = RecordingSurface::new(53, 11, 6);
        let session = engine.begin(&surface, Directive::plain("x"), RenderMode::Progress, 0);
        assert!(session.scroll().is_none());
        assert_eq!(session.mode(), RenderMode::Progress);
    }
}
