//! Notification chirp
//!
//! A short four-note phrase played when a new banner arrives. Each note is
//! given a little life with vibrato and tremolo, and ends in a quick fade
//! so the synth does not click when it stops.

use core::f32::consts::PI;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;
use libm::sinf;
use log::{debug, info};

use crate::config::ChirpConfig;
use crate::input::ControlState;
use crate::traits::{Clock, RandomSource, Synth};

/// Request to play the chirp; repeated requests while it plays collapse
pub type ChirpRequest<M> = Signal<M, ()>;

/// Pause after each note's fade
const NOTE_GAP_MS: u32 = 10;

/// Volume multiplier of the tremolo at `t_ms` into the note
fn tremolo(config: &ChirpConfig, t_ms: u64) -> f32 {
    0.8 + 0.2 * sinf(2.0 * PI * config.tremolo_hz * t_ms as f32 / 1000.0)
}

/// Frequency with vibrato applied at `t_ms` into the note
fn vibrato(config: &ChirpConfig, base_hz: f32, t_ms: u64) -> f32 {
    base_hz + config.vibrato_depth_hz * sinf(2.0 * PI * config.vibrato_hz * t_ms as f32 / 1000.0)
}

/// Update interval with random spread
fn update_interval_ms<R: RandomSource + ?Sized>(rng: &mut R, config: &ChirpConfig) -> u32 {
    let spread = config.update_jitter_ms.min(config.update_ms.saturating_sub(1));
    if spread == 0 {
        return config.update_ms;
    }
    let offset = u32::from(rng.next_u8()) % (2 * spread + 1);
    config.update_ms - spread + offset
}

/// Play one note with vibrato and tremolo, then fade it out
async fn play_note<S, C, D, R>(
    synth: &mut S,
    clock: &C,
    delay: &mut D,
    rng: &mut R,
    base_hz: f32,
    volume: f32,
    config: &ChirpConfig,
) where
    S: Synth,
    C: Clock,
    D: DelayNs,
    R: RandomSource,
{
    let fade_ms = u64::from(config.fade_steps) * u64::from(config.fade_step_ms);
    let sustain_ms = u64::from(config.tone_ms).saturating_sub(fade_ms);
    let start = clock.now_ms();
    let mut elapsed = 0;
    let mut frequency = base_hz;

    while elapsed < sustain_ms {
        frequency = vibrato(config, base_hz, elapsed);
        synth.play_tone(frequency, volume * tremolo(config, elapsed));
        delay.delay_ms(update_interval_ms(rng, config)).await;
        elapsed = clock.now_ms().saturating_sub(start);
    }

    let steps = f32::from(config.fade_steps.max(1));
    for i in (1..=config.fade_steps).rev() {
        let level = volume * (f32::from(i) / steps) * tremolo(config, elapsed);
        synth.play_tone(frequency, level);
        delay.delay_ms(config.fade_step_ms).await;
    }

    synth.stop();
    delay.delay_ms(NOTE_GAP_MS).await;
}

/// Play the whole phrase once
pub async fn play_chirp<S, C, D, R>(
    synth: &mut S,
    clock: &C,
    delay: &mut D,
    rng: &mut R,
    volume: f32,
    config: &ChirpConfig,
) where
    S: Synth,
    C: Clock,
    D: DelayNs,
    R: RandomSource,
{
    for &tone in &config.tones_hz {
        play_note(synth, clock, delay, rng, tone, volume, config).await;
    }
}

/// Chirp task: plays the phrase at the current volume on every request
#[allow(clippy::too_many_arguments)]
pub async fn run_chirp<M, S, C, D, R>(
    request: &ChirpRequest<M>,
    synth: &mut S,
    controls: &ControlState<M>,
    clock: &C,
    delay: &mut D,
    rng: &mut R,
    config: &ChirpConfig,
) -> !
where
    M: RawMutex,
    S: Synth,
    C: Clock,
    D: DelayNs,
    R: RandomSource,
{
    info!("chirp task started");
    loop {
        request.wait().await;
        let volume = controls.volume();
        if !config.enabled || volume <= 0.0 {
            debug!("chirp skipped");
            continue;
        }
        play_chirp(synth, clock, delay, rng, volume, config).await;
    }
}
