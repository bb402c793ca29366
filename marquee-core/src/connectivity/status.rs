//! Status publisher
//!
//! Waits for a trigger or the idle interval, renews subscriptions after a
//! broker reconnect, publishes the status record and then sleeps a short
//! random time so a fleet of boards does not publish in lockstep.

use core::convert::Infallible;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use log::{debug, error, info};
use marquee_protocol::{StatusError, TopicKind, Topics, SUBSCRIPTIONS};

use super::context::{ConnectionContext, StatusTrigger};
use crate::config::ConnectivityConfig;
use crate::traits::{RandomSource, SystemReset, Transport};

/// Connectivity loop errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectivityError<E> {
    /// Initial connection failed
    Connect(E),
    /// Renewing a subscription failed
    Subscribe(E),
    /// Publishing the status record failed
    Publish(E),
    /// Status record could not be serialized
    Encode,
}

impl<E> From<StatusError> for ConnectivityError<E> {
    fn from(_: StatusError) -> Self {
        ConnectivityError::Encode
    }
}

/// Random pause after a publish, whole seconds up to the configured bound
pub fn publish_jitter_ms<R: RandomSource + ?Sized>(
    rng: &mut R,
    config: &ConnectivityConfig,
) -> u32 {
    let seconds = u32::from(rng.next_u8()) % (u32::from(config.publish_jitter_s) + 1);
    seconds * 1000
}

/// Publishes the status record on `<prefix>/status`
pub struct StatusPublisher<'a, M: RawMutex> {
    ctx: &'a ConnectionContext<M>,
    topics: &'a Topics,
    config: &'a ConnectivityConfig,
}

impl<'a, M: RawMutex> StatusPublisher<'a, M> {
    pub fn new(
        ctx: &'a ConnectionContext<M>,
        topics: &'a Topics,
        config: &'a ConnectivityConfig,
    ) -> Self {
        Self {
            ctx,
            topics,
            config,
        }
    }

    /// Connect, then publish forever; returns only on error
    pub async fn serve<T, D, R>(
        &self,
        transport: &mut T,
        delay: &mut D,
        rng: &mut R,
    ) -> Result<Infallible, ConnectivityError<T::Error>>
    where
        T: Transport,
        D: DelayNs,
        R: RandomSource,
    {
        info!("connecting");
        transport
            .connect()
            .await
            .map_err(ConnectivityError::Connect)?;

        let idle_ms = self.config.status_interval_s.saturating_mul(1000);

        loop {
            let trigger = match select(self.ctx.next_trigger(), delay.delay_ms(idle_ms)).await {
                Either::First(trigger) => Some(trigger),
                Either::Second(()) => None,
            };

            if self.ctx.take_resubscribe() {
                self.resubscribe(transport).await?;
            }

            self.publish_status(transport, trigger).await?;

            let jitter = publish_jitter_ms(rng, self.config);
            if jitter > 0 {
                delay.delay_ms(jitter).await;
            }
        }
    }

    /// Run [`serve`](Self::serve) and restart the board when it fails
    pub async fn run<T, D, R, S>(
        &self,
        transport: &mut T,
        delay: &mut D,
        rng: &mut R,
        reset: &mut S,
    ) -> !
    where
        T: Transport,
        D: DelayNs,
        R: RandomSource,
        S: SystemReset,
    {
        let err = match self.serve(transport, delay, rng).await {
            Ok(never) => match never {},
            Err(e) => e,
        };

        error!(
            "connectivity failed: {:?}, restarting in {} s",
            err, self.config.failure_backoff_s
        );
        delay
            .delay_ms(self.config.failure_backoff_s.saturating_mul(1000))
            .await;
        reset.restart()
    }

    async fn resubscribe<T: Transport>(
        &self,
        transport: &mut T,
    ) -> Result<(), ConnectivityError<T::Error>> {
        for kind in SUBSCRIPTIONS {
            if let Some(topic) = self.topics.topic(kind) {
                transport
                    .subscribe(&topic, kind.qos())
                    .await
                    .map_err(ConnectivityError::Subscribe)?;
                debug!("subscribed to {}", topic.as_str());
            }
        }
        Ok(())
    }

    async fn publish_status<T: Transport>(
        &self,
        transport: &mut T,
        trigger: Option<StatusTrigger>,
    ) -> Result<(), ConnectivityError<T::Error>> {
        let Some(topic) = self.topics.topic(TopicKind::Status) else {
            return Ok(());
        };

        let record = self.ctx.status_record(transport.republish_count());
        let payload = record.to_json()?;
        transport
            .publish(&topic, &payload, TopicKind::Status.qos())
            .await
            .map_err(ConnectivityError::Publish)?;

        debug!("status published ({:?})", trigger);
        Ok(())
    }
}
