//! Simulated time and randomness for host tests
//!
//! `SimClock` only moves when a test advances it. `SimDelay` waits by
//! yielding until the clock passes its deadline, so tasks under test run on
//! `embassy_futures::block_on` next to a driver future that steps time.

use core::cell::Cell;

use embassy_futures::yield_now;
use embedded_hal_async::delay::DelayNs;

use crate::traits::{Clock, RandomSource};

#[derive(Debug, Default)]
pub struct SimClock {
    now: Cell<u64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    /// Step the clock by `step_ms` until `duration_ms` has passed, yielding
    /// after every step so other futures observe each instant
    pub async fn run_for(&self, duration_ms: u64, step_ms: u64) {
        let until = self.now.get() + duration_ms;
        while self.now.get() < until {
            self.advance(step_ms.min(until - self.now.get()));
            yield_now().await;
        }
    }

    /// Yield a few times without moving the clock
    pub async fn settle(&self) {
        for _ in 0..8 {
            yield_now().await;
        }
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

pub struct SimDelay<'a> {
    clock: &'a SimClock,
}

impl<'a> SimDelay<'a> {
    pub fn new(clock: &'a SimClock) -> Self {
        Self { clock }
    }

    async fn wait_until(&self, deadline: u64) {
        while self.clock.now_ms() < deadline {
            yield_now().await;
        }
    }
}

impl DelayNs for SimDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        let deadline = self.clock.now_ms() + u64::from(ns).div_ceil(1_000_000);
        self.wait_until(deadline).await;
    }

    async fn delay_us(&mut self, us: u32) {
        let deadline = self.clock.now_ms() + u64::from(us).div_ceil(1_000);
        self.wait_until(deadline).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        let deadline = self.clock.now_ms() + u64::from(ms);
        self.wait_until(deadline).await;
    }
}

/// Always returns the same byte
pub struct FixedByte(pub u8);

impl RandomSource for FixedByte {
    fn next_u8(&mut self) -> u8 {
        self.0
    }
}

/// Small xorshift generator for statistical tests
pub struct XorShift(pub u32);

impl RandomSource for XorShift {
    fn next_u8(&mut self) -> u8 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        (x >> 24) as u8
    }
}
