//! Front panel buttons

use embedded_hal::digital::InputPin;

/// Physical controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    BrightnessUp,
    BrightnessDown,
    VolumeUp,
    VolumeDown,
    Sleep,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::BrightnessUp,
        Button::BrightnessDown,
        Button::VolumeUp,
        Button::VolumeDown,
        Button::Sleep,
    ];
}

/// Button state query
pub trait Buttons {
    /// Whether `button` is currently held down
    fn is_pressed(&mut self, button: Button) -> bool;
}

/// Buttons wired as active-low GPIO inputs
///
/// Pins are given in [`Button::ALL`] order. A pin that fails to read
/// counts as released.
pub struct PinButtons<P> {
    pins: [P; 5],
}

impl<P: InputPin> PinButtons<P> {
    pub fn new(
        brightness_up: P,
        brightness_down: P,
        volume_up: P,
        volume_down: P,
        sleep: P,
    ) -> Self {
        Self {
            pins: [brightness_up, brightness_down, volume_up, volume_down, sleep],
        }
    }
}

impl<P: InputPin> Buttons for PinButtons<P> {
    fn is_pressed(&mut self, button: Button) -> bool {
        let pin = &mut self.pins[button as usize];
        pin.is_low().unwrap_or(false)
    }
}
