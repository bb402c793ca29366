//! Connectivity loop
//!
//! Tracks the link and broker session, publishes the status record and
//! drives the heartbeat LED. Counters and link state live in an explicit
//! [`ConnectionContext`] that the transport glue, the intake loop and the
//! tasks here share.

pub mod context;
pub mod heartbeat;
pub mod status;

pub use context::{ConnectionContext, ConnectionStats, LinkState, StatusTrigger};
pub use heartbeat::{heartbeat_period, run_heartbeat, run_uptime};
pub use status::{publish_jitter_ms, ConnectivityError, StatusPublisher};
