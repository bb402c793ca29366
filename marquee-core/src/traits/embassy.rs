//! Embassy time driver integration

use embassy_time::Instant;

use super::system::Clock;

/// [`Clock`] reading the embassy time driver
///
/// Delays come from `embassy_time::Delay`, which implements
/// `embedded_hal_async::delay::DelayNs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
