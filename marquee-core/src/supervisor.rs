//! Display task supervision
//!
//! Exactly one render session runs at a time. The render worker owns the
//! pixel surface and waits for jobs on a [`RenderChannel`]; the
//! [`DisplaySupervisor`] hands it directives, cancelling and awaiting the
//! running session first so an old frame can never land on top of a new
//! one.
//!
//! Cancellation is cooperative: the worker checks for it between frames
//! and while waiting for the next one, never in the middle of drawing.

use core::cell::Cell;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::mutex::Mutex as AsyncMutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;
use log::{debug, info, warn};
use marquee_display::PixelSurface;

use crate::chirp::ChirpRequest;
use crate::config::RenderConfig;
use crate::directive::Directive;
use crate::render::{FinishReason, RenderEngine, RenderMode, Step};
use crate::traits::Clock;

/// Work for the render worker
#[derive(Debug, Clone, PartialEq)]
pub enum RenderJob {
    /// Start a session
    Show {
        directive: Directive,
        mode: RenderMode,
    },
    /// Blank the panel without starting a session
    Clear,
}

/// How a render session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionOutcome {
    /// One-shot pass finished
    Completed,
    /// Continuous-run ceiling reached
    Expired,
    /// Superseded or stopped from outside
    Cancelled,
    /// The surface reported an error
    Failed,
}

impl From<FinishReason> for SessionOutcome {
    fn from(reason: FinishReason) -> Self {
        match reason {
            FinishReason::PassComplete => SessionOutcome::Completed,
            FinishReason::Expired => SessionOutcome::Expired,
        }
    }
}

/// Signals shared between the supervisor and the render worker
pub struct RenderChannel<M: RawMutex> {
    job: Signal<M, RenderJob>,
    cancel: Signal<M, ()>,
    done: Signal<M, SessionOutcome>,
    brightness: Signal<M, f32>,
    active: Mutex<M, Cell<bool>>,
    /// Serialises supervisor operations
    control: AsyncMutex<M, ()>,
}

impl<M: RawMutex> RenderChannel<M> {
    pub const fn new() -> Self {
        Self {
            job: Signal::new(),
            cancel: Signal::new(),
            done: Signal::new(),
            brightness: Signal::new(),
            active: Mutex::new(Cell::new(false)),
            control: AsyncMutex::new(()),
        }
    }

    fn set_active(&self, active: bool) {
        self.active.lock(|a| a.set(active));
    }

    fn is_active(&self) -> bool {
        self.active.lock(|a| a.get())
    }
}

impl<M: RawMutex> Default for RenderChannel<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front end used by message intake and the sleep button
pub struct DisplaySupervisor<'a, M: RawMutex> {
    channel: &'a RenderChannel<M>,
    chirp: Option<&'a ChirpRequest<M>>,
}

impl<'a, M: RawMutex> DisplaySupervisor<'a, M> {
    pub fn new(channel: &'a RenderChannel<M>) -> Self {
        Self {
            channel,
            chirp: None,
        }
    }

    /// Request the notification chirp whenever a new banner starts
    pub fn with_chirp(mut self, chirp: &'a ChirpRequest<M>) -> Self {
        self.chirp = Some(chirp);
        self
    }

    /// Whether a render session is running
    pub fn is_active(&self) -> bool {
        self.channel.is_active()
    }

    /// Replace whatever is on the display with `directive`
    ///
    /// Returns how the superseded session ended, or `None` if nothing was
    /// running. A directive with empty text only clears the panel.
    pub async fn on_directive(
        &self,
        directive: Directive,
        mode: RenderMode,
    ) -> Option<SessionOutcome> {
        let _guard = self.channel.control.lock().await;
        let superseded = self.stop().await;

        if directive.is_clear() {
            debug!("supervisor: empty text, clearing display");
            self.channel.job.signal(RenderJob::Clear);
            return superseded;
        }

        if mode == RenderMode::Banner {
            if let Some(chirp) = self.chirp {
                chirp.signal(());
            }
        }

        self.channel.done.reset();
        self.channel.cancel.reset();
        self.channel.set_active(true);
        self.channel.job.signal(RenderJob::Show { directive, mode });

        superseded
    }

    /// Cancel the running session and blank the panel
    pub async fn clear(&self) -> Option<SessionOutcome> {
        let _guard = self.channel.control.lock().await;
        let superseded = self.stop().await;
        self.channel.job.signal(RenderJob::Clear);
        superseded
    }

    /// Ask the worker to apply a new panel brightness
    pub fn set_brightness(&self, level: f32) {
        self.channel.brightness.signal(level);
    }

    async fn stop(&self) -> Option<SessionOutcome> {
        if !self.channel.is_active() {
            return None;
        }

        self.channel.cancel.signal(());
        let outcome = self.channel.done.wait().await;
        debug!("supervisor: previous session ended {:?}", outcome);
        Some(outcome)
    }
}

/// Render worker task
///
/// Owns the surface for the lifetime of the device. Brightness changes are
/// applied here as well, since nothing else may touch the surface.
pub async fn render_worker<M, S, C, D>(
    channel: &RenderChannel<M>,
    surface: &mut S,
    clock: &C,
    delay: &mut D,
    config: &RenderConfig,
) -> !
where
    M: RawMutex,
    S: PixelSurface,
    C: Clock,
    D: DelayNs,
{
    info!("render worker started");

    let engine = RenderEngine::new(config);
    let mut level: Option<f32> = None;

    loop {
        match select(channel.job.wait(), channel.brightness.wait()).await {
            Either::First(RenderJob::Show { directive, mode }) => {
                // A finished one-shot may have dimmed the panel
                if let Some(level) = level {
                    surface.set_brightness(level);
                }
                let outcome = run_session(
                    &engine, channel, surface, clock, delay, &mut level, directive, mode,
                )
                .await;
                channel.set_active(false);
                channel.done.signal(outcome);
            }
            Either::First(RenderJob::Clear) => {
                if let Err(e) = engine.clear(surface) {
                    warn!("render: clear failed: {:?}", e);
                }
            }
            Either::Second(new_level) => {
                level = Some(new_level);
                surface.set_brightness(new_level);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_session<M, S, C, D>(
    engine: &RenderEngine<'_>,
    channel: &RenderChannel<M>,
    surface: &mut S,
    clock: &C,
    delay: &mut D,
    level: &mut Option<f32>,
    directive: Directive,
    mode: RenderMode,
) -> SessionOutcome
where
    M: RawMutex,
    S: PixelSurface,
    C: Clock,
    D: DelayNs,
{
    let mut session = engine.begin(surface, directive, mode, clock.now_ms());

    loop {
        if channel.cancel.try_take().is_some() {
            return SessionOutcome::Cancelled;
        }

        if let Some(new_level) = channel.brightness.try_take() {
            *level = Some(new_level);
            surface.set_brightness(new_level);
        }

        match engine.step(surface, &mut session, clock.now_ms()) {
            Ok(Step::Wait(ms)) => {
                if let Either::First(()) = select(channel.cancel.wait(), delay.delay_ms(ms)).await {
                    return SessionOutcome::Cancelled;
                }
            }
            Ok(Step::Finished(reason)) => return reason.into(),
            Err(e) => {
                warn!("render: display error {:?}, ending session", e);
                return SessionOutcome::Failed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ScrollMode;
    use crate::sim::{SimClock, SimDelay};
    use alloc::boxed::Box;
    use core::future::Future;
    use core::pin::Pin;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use marquee_display::{DrawOp, RecordingSurface, Rgb};

    type Script<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

    fn config() -> RenderConfig {
        RenderConfig {
            hold_ms: 100,
            step_ms: 10,
            lead_blanks: 1,
            trail_blanks: 1,
            ..RenderConfig::default()
        }
    }

    /// Run `script` against a live render worker and return its result
    fn with_worker<T: 'static>(
        surface: &mut RecordingSurface,
        config: &RenderConfig,
        script: impl for<'a> FnOnce(&'a RenderChannel<NoopRawMutex>, &'a SimClock) -> Script<'a, T>,
    ) -> T {
        let channel = RenderChannel::<NoopRawMutex>::new();
        let clock = SimClock::new();
        let mut delay = SimDelay::new(&clock);

        block_on(async {
            let worker = render_worker(&channel, surface, &clock, &mut delay, config);
            match select(worker, script(&channel, &clock)).await {
                Either::First(_) => unreachable!(),
                Either::Second(result) => result,
            }
        })
    }

    #[test]
    fn test_previous_session_cancelled_before_next_draws() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = config();
        let mut surface = RecordingSurface::new(53, 11, 6);

        let (first, second) = with_worker(&mut surface, &config, |channel, clock| {
            Box::pin(async move {
                let supervisor = DisplaySupervisor::new(channel);
                let first = supervisor
                    .on_directive(Directive::plain("first message here"), RenderMode::Banner)
                    .await;
                clock.run_for(300, 10).await;
                assert!(supervisor.is_active());
                let second = supervisor
                    .on_directive(Directive::plain("second"), RenderMode::Banner)
                    .await;
                clock.run_for(100, 10).await;
                (first, second)
            })
        });

        assert_eq!(first, None);
        assert_eq!(second, Some(SessionOutcome::Cancelled));

        let last_a = surface.last_text(" first message here ").unwrap();
        let first_b = surface.first_text(" second ").unwrap();
        assert!(last_a < first_b);
    }

    #[test]
    fn test_empty_text_clears_without_session() {
        let config = config();
        let mut surface = RecordingSurface::new(53, 11, 6);

        let (cleared, active) = with_worker(&mut surface, &config, |channel, clock| {
            Box::pin(async move {
                let supervisor = DisplaySupervisor::new(channel);
                supervisor
                    .on_directive(Directive::plain("hello"), RenderMode::Progress)
                    .await;
                clock.run_for(50, 10).await;
                let cleared = supervisor
                    .on_directive(Directive::plain(""), RenderMode::Banner)
                    .await;
                clock.settle().await;
                (cleared, supervisor.is_active())
            })
        });

        assert_eq!(cleared, Some(SessionOutcome::Cancelled));
        assert!(!active);
        let ops = surface.ops();
        assert_eq!(
            ops[ops.len() - 3..],
            [DrawOp::SetColour(Rgb::BLACK), DrawOp::Clear, DrawOp::Commit]
        );
    }

    #[test]
    fn test_sleep_clear_when_idle() {
        let config = config();
        let mut surface = RecordingSurface::new(53, 11, 6);

        let outcome = with_worker(&mut surface, &config, |channel, clock| {
            Box::pin(async move {
                let supervisor = DisplaySupervisor::new(channel);
                let outcome = supervisor.clear().await;
                clock.settle().await;
                outcome
            })
        });

        assert_eq!(outcome, None);
        assert_eq!(surface.ops(), [DrawOp::SetColour(Rgb::BLACK), DrawOp::Clear, DrawOp::Commit]);
    }

    #[test]
    fn test_one_shot_completion_is_reported() {
        let config = RenderConfig {
            scroll_mode: ScrollMode::OneShot,
            ..config()
        };
        let mut surface = RecordingSurface::new(53, 11, 6);

        let (active, next) = with_worker(&mut surface, &config, |channel, clock| {
            Box::pin(async move {
                let supervisor = DisplaySupervisor::new(channel);
                supervisor.set_brightness(0.5);
                clock.settle().await;
                supervisor
                    .on_directive(Directive::plain("abcdefgh"), RenderMode::Banner)
                    .await;
                clock.run_for(2_000, 10).await;
                let active = supervisor.is_active();
                let next = supervisor
                    .on_directive(Directive::plain("again"), RenderMode::Banner)
                    .await;
                clock.settle().await;
                (active, next)
            })
        });

        assert!(!active);
        // Nothing was running, so nothing was superseded
        assert_eq!(next, None);

        // Dimmed at the end of the pass, restored for the next banner
        let dim = surface
            .ops()
            .iter()
            .position(|op| *op == DrawOp::Brightness(0.0))
            .unwrap();
        assert_eq!(surface.ops()[dim + 1], DrawOp::Brightness(0.5));
        assert_eq!(surface.brightness(), 0.5);
    }

    #[test]
    fn test_banner_requests_chirp() {
        let config = config();
        let mut surface = RecordingSurface::new(53, 11, 6);

        let (after_banner, after_progress) = with_worker(&mut surface, &config, |channel, _clock| {
            Box::pin(async move {
                let chirp = ChirpRequest::<NoopRawMutex>::new();
                let supervisor = DisplaySupervisor::new(channel).with_chirp(&chirp);

                supervisor
                    .on_directive(Directive::plain("hi"), RenderMode::Progress)
                    .await;
                let after_progress = chirp.try_take().is_some();
                supervisor
                    .on_directive(Directive::plain("hi"), RenderMode::Banner)
                    .await;
                let after_banner = chirp.try_take().is_some();
                (after_banner, after_progress)
            })
        });

        assert!(after_banner);
        assert!(!after_progress);
    }
}
