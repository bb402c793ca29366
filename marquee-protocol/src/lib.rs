//! Marquee publish/subscribe protocol
//!
//! This crate defines everything that crosses the broker: the topic layout
//! under a device prefix, the JSON keys accepted in directive payloads, and
//! the status record the device publishes about itself.
//!
//! # Topic Overview
//!
//! ```text
//! <prefix>/msg       inbound   QoS 1   scrolling banner directive
//! <prefix>/progress  inbound   QoS 1   progress bar directive
//! <prefix>/ping      inbound   QoS 1   request an immediate status record
//! <prefix>/status    outbound  QoS 0   status record (JSON)
//! ```
//!
//! Directive payloads are either plain text or a JSON object; see
//! [`payload`] for the accepted keys. Colour values are carried as opaque
//! tokens here and resolved to RGB by the core crate.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod payload;
pub mod status;
pub mod topic;

pub use payload::{PayloadError, RawDirective, MAX_PAYLOAD_LEN};
pub use status::{StatusError, StatusRecord};
pub use topic::{QoS, TopicError, TopicKind, TopicName, Topics, SUBSCRIPTIONS};
