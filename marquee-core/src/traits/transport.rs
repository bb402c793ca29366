//! Publish/subscribe transport trait

use marquee_protocol::QoS;

/// Client side of the MQTT session
///
/// Implementations wrap the network stack and broker client. Connection
/// lifecycle events (link up/down, broker connected) are reported into the
/// [`ConnectionContext`](crate::connectivity::ConnectionContext) and inbound
/// messages are pushed into the intake inbox; this trait only covers the
/// calls the connectivity loop makes.
#[allow(async_fn_in_trait)]
pub trait Transport {
    type Error: core::fmt::Debug;

    /// Bring up the link and open the broker session
    async fn connect(&mut self) -> Result<(), Self::Error>;

    /// Subscribe to a topic
    ///
    /// The session is not assumed to keep subscriptions across reconnects,
    /// so this is called again after every broker connection.
    async fn subscribe(&mut self, topic: &str, qos: QoS) -> Result<(), Self::Error>;

    /// Publish a payload
    ///
    /// May wait for the link to come back if it is down.
    async fn publish(&mut self, topic: &str, payload: &[u8], qos: QoS)
        -> Result<(), Self::Error>;

    /// Number of messages the client had to resend since boot
    fn republish_count(&self) -> u32;
}
