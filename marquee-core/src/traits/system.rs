//! Time, randomness and restart

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary fixed point (usually boot)
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Source of uniformly distributed bytes
///
/// Used for colour draws and publish jitter; no reproducibility is needed,
/// so a hardware RNG or a ring oscillator sample is enough.
pub trait RandomSource {
    fn next_u8(&mut self) -> u8;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u8(&mut self) -> u8 {
        (**self).next_u8()
    }
}

/// Full system restart
pub trait SystemReset {
    /// Reset the MCU; never returns
    fn restart(&mut self) -> !;
}
