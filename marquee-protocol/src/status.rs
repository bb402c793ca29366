//! Status record published on `<prefix>/status`

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// Status serialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusError {
    Serialize,
}

/// Device health counters as seen by the broker
///
/// Field names are part of the wire format and match what existing
/// dashboards consume.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Messages the transport had to resend
    pub repub_count: u32,
    /// Dotted IPv4 address, `0.0.0.0` while offline
    pub ip_address: String,
    /// Broker connections since boot
    pub mqtt_connection_count: u32,
    /// Network link-ups since boot
    pub wifi_connection_count: u32,
    /// Inbound messages handled since boot
    pub msg_cb_count: u32,
    pub uptime_minutes: u32,
}

impl StatusRecord {
    /// Serialize to a JSON object
    pub fn to_json(&self) -> Result<Vec<u8>, StatusError> {
        serde_json::to_vec(self).map_err(|_| StatusError::Serialize)
    }
}
