//! Front panel controls
//!
//! Buttons are polled rather than interrupt driven; holding a button
//! repeats its action on every poll. When the panel is mounted upside down
//! the up/down pairs swap so "up" is still the upper button.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal_async::delay::DelayNs;
use heapless::Vec;
use log::{debug, info};
use marquee_display::Rotation;

use crate::config::InputConfig;
use crate::supervisor::DisplaySupervisor;
use crate::traits::{Button, Buttons};

/// Direction of a level change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Adjust {
    Up,
    Down,
}

impl Adjust {
    fn inverted(self) -> Self {
        match self {
            Adjust::Up => Adjust::Down,
            Adjust::Down => Adjust::Up,
        }
    }

    fn signed(self, step: f32) -> f32 {
        match self {
            Adjust::Up => step,
            Adjust::Down => -step,
        }
    }
}

/// What a button press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Intent {
    Brightness(Adjust),
    Volume(Adjust),
    /// Stop the current session and blank the panel
    Sleep,
}

/// Map the buttons held right now to intents
///
/// Sleep comes first so a held sleep button clears before any level change.
pub fn poll_intents<B: Buttons + ?Sized>(buttons: &mut B, rotation: Rotation) -> Vec<Intent, 5> {
    let orient = |adjust: Adjust| {
        if rotation.is_rotated() {
            adjust.inverted()
        } else {
            adjust
        }
    };

    let mut intents = Vec::new();
    for button in [
        Button::Sleep,
        Button::BrightnessUp,
        Button::BrightnessDown,
        Button::VolumeUp,
        Button::VolumeDown,
    ] {
        if !buttons.is_pressed(button) {
            continue;
        }
        let intent = match button {
            Button::Sleep => Intent::Sleep,
            Button::BrightnessUp => Intent::Brightness(orient(Adjust::Up)),
            Button::BrightnessDown => Intent::Brightness(orient(Adjust::Down)),
            Button::VolumeUp => Intent::Volume(orient(Adjust::Up)),
            Button::VolumeDown => Intent::Volume(orient(Adjust::Down)),
        };
        // One intent per button, so this cannot overflow
        let _ = intents.push(intent);
    }
    intents
}

/// Panel brightness and chirp volume, both within 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Levels {
    pub brightness: f32,
    pub volume: f32,
}

impl Levels {
    pub const fn new(brightness: f32, volume: f32) -> Self {
        Self { brightness, volume }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(
            config.default_brightness.clamp(0.0, 1.0),
            config.default_volume.clamp(0.0, 1.0),
        )
    }

    /// Apply a level intent; sleep leaves the levels alone
    pub fn apply(&mut self, intent: Intent, config: &InputConfig) {
        match intent {
            Intent::Brightness(adjust) => {
                self.brightness =
                    step_level(self.brightness, adjust.signed(config.brightness_step));
            }
            Intent::Volume(adjust) => {
                self.volume = step_level(self.volume, adjust.signed(config.volume_step));
            }
            Intent::Sleep => {}
        }
    }
}

fn step_level(level: f32, delta: f32) -> f32 {
    (level + delta).clamp(0.0, 1.0)
}

/// Levels shared between the button task and their consumers
pub struct ControlState<M: RawMutex> {
    levels: Mutex<M, Cell<Levels>>,
}

impl<M: RawMutex> ControlState<M> {
    pub const fn new(levels: Levels) -> Self {
        Self {
            levels: Mutex::new(Cell::new(levels)),
        }
    }

    pub fn levels(&self) -> Levels {
        self.levels.lock(Cell::get)
    }

    pub fn brightness(&self) -> f32 {
        self.levels().brightness
    }

    /// Chirp volume
    pub fn volume(&self) -> f32 {
        self.levels().volume
    }

    fn apply(&self, intent: Intent, config: &InputConfig) -> Levels {
        self.levels.lock(|cell| {
            let mut levels = cell.get();
            levels.apply(intent, config);
            cell.set(levels);
            levels
        })
    }
}

/// Button polling task
pub async fn run_buttons<M, B, D>(
    buttons: &mut B,
    controls: &ControlState<M>,
    supervisor: &DisplaySupervisor<'_, M>,
    delay: &mut D,
    config: &InputConfig,
    rotation: Rotation,
) -> !
where
    M: RawMutex,
    B: Buttons,
    D: DelayNs,
{
    info!("button task started");
    supervisor.set_brightness(controls.brightness());

    loop {
        for intent in poll_intents(buttons, rotation) {
            match intent {
                Intent::Sleep => {
                    debug!("sleep pressed");
                    supervisor.clear().await;
                }
                Intent::Brightness(_) => {
                    let levels = controls.apply(intent, config);
                    supervisor.set_brightness(levels.brightness);
                }
                Intent::Volume(_) => {
                    let levels = controls.apply(intent, config);
                    debug!("volume {}", levels.volume);
                }
            }
        }

        delay.delay_ms(config.poll_interval_ms).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::directive::Directive;
    use crate::render::RenderMode;
    use crate::sim::{SimClock, SimDelay};
    use crate::supervisor::{render_worker, RenderChannel};
    use embassy_futures::block_on;
    use embassy_futures::select::{select3, Either3};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use marquee_display::{DrawOp, RecordingSurface, Rgb};

    struct FakeButtons<'a>(&'a Cell<[bool; 5]>);

    impl FakeButtons<'_> {
        fn press(cell: &Cell<[bool; 5]>, button: Button, down: bool) {
            let mut state = cell.get();
            state[button as usize] = down;
            cell.set(state);
        }
    }

    impl Buttons for FakeButtons<'_> {
        fn is_pressed(&mut self, button: Button) -> bool {
            self.0.get()[button as usize]
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_intents_follow_rotation() {
        let cell = Cell::new([false; 5]);
        FakeButtons::press(&cell, Button::BrightnessUp, true);
        FakeButtons::press(&cell, Button::VolumeDown, true);
        let mut buttons = FakeButtons(&cell);

        assert_eq!(
            poll_intents(&mut buttons, Rotation::Normal),
            [Intent::Brightness(Adjust::Up), Intent::Volume(Adjust::Down)]
        );
        assert_eq!(
            poll_intents(&mut buttons, Rotation::Rotated180),
            [Intent::Brightness(Adjust::Down), Intent::Volume(Adjust::Up)]
        );
    }

    #[test]
    fn test_sleep_comes_first() {
        let cell = Cell::new([true; 5]);
        let intents = poll_intents(&mut FakeButtons(&cell), Rotation::Normal);
        assert_eq!(intents.len(), 5);
        assert_eq!(intents[0], Intent::Sleep);
    }

    #[test]
    fn test_levels_clamp() {
        let config = InputConfig::default();
        let mut levels = Levels::from_config(&config);
        assert!(approx(levels.brightness, 0.5));
        assert!(approx(levels.volume, 1.0));

        levels.apply(Intent::Volume(Adjust::Up), &config);
        assert_eq!(levels.volume, 1.0);

        for _ in 0..20 {
            levels.apply(Intent::Brightness(Adjust::Down), &config);
        }
        assert_eq!(levels.brightness, 0.0);

        levels.apply(Intent::Brightness(Adjust::Up), &config);
        assert!(approx(levels.brightness, 0.1));

        levels.apply(Intent::Sleep, &config);
        assert!(approx(levels.brightness, 0.1));
    }

    #[test]
    fn test_buttons_drive_brightness_and_sleep() {
        let input = InputConfig::default();
        let render = RenderConfig {
            lead_blanks: 1,
            trail_blanks: 1,
            ..RenderConfig::default()
        };
        let channel = RenderChannel::<NoopRawMutex>::new();
        let controls = ControlState::<NoopRawMutex>::new(Levels::from_config(&input));
        let cell = Cell::new([false; 5]);
        let clock = SimClock::new();
        let mut surface = RecordingSurface::new(53, 11, 6);

        let (active_before_sleep, active_after_sleep) = block_on(async {
            let supervisor = DisplaySupervisor::new(&channel);
            let mut render_delay = SimDelay::new(&clock);
            let mut button_delay = SimDelay::new(&clock);
            let mut buttons = FakeButtons(&cell);

            let worker = render_worker(&channel, &mut surface, &clock, &mut render_delay, &render);
            let poller = run_buttons(
                &mut buttons,
                &controls,
                &supervisor,
                &mut button_delay,
                &input,
                Rotation::Normal,
            );
            let script = async {
                supervisor
                    .on_directive(Directive::plain("hello"), RenderMode::Banner)
                    .await;
                clock.run_for(100, 10).await;

                // Held across exactly one poll, at 200 ms
                FakeButtons::press(&cell, Button::BrightnessUp, true);
                clock.run_for(200, 10).await;
                FakeButtons::press(&cell, Button::BrightnessUp, false);
                let active = supervisor.is_active();

                // Poll at 400 ms
                FakeButtons::press(&cell, Button::Sleep, true);
                clock.run_for(200, 10).await;
                FakeButtons::press(&cell, Button::Sleep, false);
                clock.settle().await;
                (active, supervisor.is_active())
            };

            match select3(worker, poller, script).await {
                Either3::Third(result) => result,
                _ => unreachable!(),
            }
        });

        assert!(active_before_sleep);
        assert!(!active_after_sleep);
        assert!(approx(controls.brightness(), 0.6));
        assert!(approx(surface.brightness(), 0.6));

        let ops = surface.ops();
        assert_eq!(
            ops[ops.len() - 3..],
            [DrawOp::SetColour(Rgb::BLACK), DrawOp::Clear, DrawOp::Commit]
        );
    }
}
