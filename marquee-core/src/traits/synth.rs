//! Audio synth trait

/// Single voice tone generator
pub trait Synth {
    /// Start or retune the voice
    ///
    /// - `frequency_hz`: tone frequency
    /// - `volume`: 0.0 (silent) to 1.0 (full)
    fn play_tone(&mut self, frequency_hz: f32, volume: f32);

    /// Silence the voice
    fn stop(&mut self);
}
