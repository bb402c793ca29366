//! Heartbeat LED and uptime counter

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use super::context::{ConnectionContext, LinkState};
use crate::config::ConnectivityConfig;
use crate::traits::StatusLeds;

/// Heartbeat toggle period for a link state
pub fn heartbeat_period(state: LinkState, config: &ConnectivityConfig) -> u32 {
    match state {
        LinkState::Disconnected => config.heartbeat_disconnected_ms,
        LinkState::LinkUp => config.heartbeat_link_up_ms,
        LinkState::Operational => config.heartbeat_operational_ms,
    }
}

/// Blink the heartbeat LED at a rate that reflects the link state
///
/// The link fault LED is lit whenever the link is down.
pub async fn run_heartbeat<M, L, D>(
    ctx: &ConnectionContext<M>,
    leds: &mut L,
    delay: &mut D,
    config: &ConnectivityConfig,
) -> !
where
    M: RawMutex,
    L: StatusLeds,
    D: DelayNs,
{
    let mut on = true;
    loop {
        let state = ctx.link_state();
        leds.set_link_fault(state == LinkState::Disconnected);
        leds.set_heartbeat(on);
        on = !on;
        delay.delay_ms(heartbeat_period(state, config)).await;
    }
}

/// Count uptime minutes
pub async fn run_uptime<M, D>(
    ctx: &ConnectionContext<M>,
    delay: &mut D,
    config: &ConnectivityConfig,
) -> !
where
    M: RawMutex,
    D: DelayNs,
{
    let tick_ms = config.uptime_tick_s.saturating_mul(1000);
    loop {
        delay.delay_ms(tick_ms).await;
        ctx.tick_uptime();
    }
}
